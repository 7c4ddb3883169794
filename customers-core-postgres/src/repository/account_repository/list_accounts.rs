use customers_core_api::domain::Account;
use customers_core_api::error::{AccountError, AccountResult};
use uuid::Uuid;

use super::repo_impl::{AccountRepositoryImpl, ACCOUNT_COLUMNS};

impl AccountRepositoryImpl {
    pub(super) async fn list_accounts_impl(
        repo: &AccountRepositoryImpl,
        customer_id: Uuid,
    ) -> AccountResult<Vec<Account>> {
        let query = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts \
             WHERE customer_id = $1 AND deactivated_at IS NULL \
             ORDER BY created_at ASC"
        );
        let rows = sqlx::query(&query)
            .bind(customer_id)
            .fetch_all(&*repo.pool)
            .await
            .map_err(|e| AccountError::storage("list accounts", e))?;

        let mut accounts = Vec::with_capacity(rows.len());
        for row in rows {
            accounts.push(Self::decode_row(&row)?.into());
        }
        Ok(accounts)
    }
}
