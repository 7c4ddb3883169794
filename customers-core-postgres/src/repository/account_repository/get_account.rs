use customers_core_api::domain::Account;
use customers_core_api::error::{AccountError, AccountResult};
use uuid::Uuid;

use super::repo_impl::{AccountRepositoryImpl, ACCOUNT_COLUMNS};

impl AccountRepositoryImpl {
    pub(super) async fn get_account_impl(
        repo: &AccountRepositoryImpl,
        customer_id: Uuid,
        account_id: Uuid,
    ) -> AccountResult<Account> {
        let query = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts \
             WHERE customer_id = $1 AND account_id = $2 AND deactivated_at IS NULL"
        );
        let row = sqlx::query(&query)
            .bind(customer_id)
            .bind(account_id)
            .fetch_optional(&*repo.pool)
            .await
            .map_err(|e| AccountError::storage("load account", e))?;

        match row {
            Some(row) => Ok(Self::decode_row(&row)?.into()),
            None => Err(AccountError::NotFound(format!(
                "account {account_id} for customer {customer_id}"
            ))),
        }
    }
}
