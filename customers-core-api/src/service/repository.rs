use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::account::{Account, AccountStatus};
use crate::domain::ofac::OfacSearchResult;
use crate::domain::request::CreateAccountRequest;
use crate::error::AccountResult;

/// Durable, encrypted-at-rest storage of customer accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Validate, fingerprint, encrypt and insert a new account in one transaction.
    ///
    /// Fails with `AccountError::Duplicate` when an active account with the same
    /// number and routing number already exists for the customer.
    async fn create_account(
        &self,
        customer_id: Uuid,
        user_id: Uuid,
        request: &CreateAccountRequest,
    ) -> AccountResult<Account>;

    /// Active account owned by `customer_id`, or `AccountError::NotFound`.
    async fn get_account(&self, customer_id: Uuid, account_id: Uuid) -> AccountResult<Account>;

    /// Active accounts of a customer, oldest first.
    async fn list_accounts(&self, customer_id: Uuid) -> AccountResult<Vec<Account>>;

    /// Plaintext account number, for trusted internal callers only.
    async fn get_decrypted_account_number(
        &self,
        customer_id: Uuid,
        account_id: Uuid,
    ) -> AccountResult<String>;

    /// Conditional status change; illegal or lost transitions fail with
    /// `AccountError::InvalidTransition`.
    async fn update_account_status(&self, account_id: Uuid, status: AccountStatus) -> AccountResult<()>;

    /// Soft delete. Deactivating an already deactivated account succeeds.
    async fn deactivate_account(&self, account_id: Uuid) -> AccountResult<()>;
}

/// Append-only store of sanctions search results keyed to an account.
#[async_trait]
pub trait AccountOfacSearchRepository: Send + Sync {
    async fn save_account_ofac_search(
        &self,
        account_id: Uuid,
        result: &OfacSearchResult,
    ) -> AccountResult<()>;

    /// The authoritative (most recent) result, regardless of account state.
    async fn latest_account_ofac_search(&self, account_id: Uuid) -> AccountResult<Option<OfacSearchResult>>;

    /// Every stored result for the account, oldest first.
    async fn list_account_ofac_searches(&self, account_id: Uuid) -> AccountResult<Vec<OfacSearchResult>>;
}
