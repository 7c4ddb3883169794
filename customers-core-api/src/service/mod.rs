pub mod repository;
pub mod screener;
pub mod secret_keeper;
pub mod watchlist;

pub use repository::*;
pub use screener::*;
pub use secret_keeper::*;
pub use watchlist::*;
