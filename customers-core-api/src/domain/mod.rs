pub mod account;
pub mod ofac;
pub mod request;

pub use account::*;
pub use ofac::*;
pub use request::*;
