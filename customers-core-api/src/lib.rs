pub mod config;
pub mod domain;
pub mod error;
pub mod service;

pub use error::*;
pub use domain::*;
pub use service::*;
