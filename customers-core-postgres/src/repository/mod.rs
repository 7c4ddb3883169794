pub mod account_ofac_search_repository;
pub mod account_repository;
pub mod db_init;
