pub mod repo_impl;
pub mod create_account;
pub mod get_account;
pub mod list_accounts;
pub mod get_decrypted_account_number;
pub mod update_account_status;
pub mod deactivate_account;
#[cfg(test)]
pub mod test_utils;

pub use repo_impl::AccountRepositoryImpl;
