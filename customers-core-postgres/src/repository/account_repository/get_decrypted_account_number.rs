use customers_core_api::error::{AccountError, AccountResult};
use uuid::Uuid;

use super::repo_impl::AccountRepositoryImpl;

impl AccountRepositoryImpl {
    #[tracing::instrument(skip(repo))]
    pub(super) async fn get_decrypted_account_number_impl(
        repo: &AccountRepositoryImpl,
        customer_id: Uuid,
        account_id: Uuid,
    ) -> AccountResult<String> {
        let encrypted: Option<String> = sqlx::query_scalar(
            r#"
            SELECT encrypted_account_number FROM accounts
            WHERE customer_id = $1 AND account_id = $2 AND deactivated_at IS NULL
            "#,
        )
        .bind(customer_id)
        .bind(account_id)
        .fetch_optional(&*repo.pool)
        .await
        .map_err(|e| AccountError::storage("load encrypted account number", e))?;

        let encrypted = encrypted.ok_or_else(|| {
            AccountError::NotFound(format!("account {account_id} for customer {customer_id}"))
        })?;

        repo.keeper.decrypt(&encrypted).await.map_err(|source| {
            tracing::error!(error = %source, "failed to decrypt account number");
            AccountError::Decryption { account_id, source }
        })
    }
}
