pub mod account;
pub mod account_ofac_search;

pub use account::*;
pub use account_ofac_search::*;
