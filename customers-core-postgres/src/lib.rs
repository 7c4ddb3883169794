pub mod postgres_repositories;
pub mod repository;
pub mod utils;

pub use postgres_repositories::{AccountRepositories, PostgresRepositories};
pub use repository::account_ofac_search_repository::AccountOfacSearchRepositoryImpl;
pub use repository::account_repository::AccountRepositoryImpl;

#[cfg(test)]
pub mod test_helper;
