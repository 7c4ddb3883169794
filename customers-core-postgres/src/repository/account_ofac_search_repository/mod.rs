pub mod find_latest;
pub mod list;
pub mod repo_impl;
pub mod save;

pub use repo_impl::AccountOfacSearchRepositoryImpl;
