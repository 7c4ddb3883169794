use chrono::{SubsecRound, Utc};
use customers_core_api::error::{AccountError, AccountResult};
use uuid::Uuid;

use super::repo_impl::AccountRepositoryImpl;

impl AccountRepositoryImpl {
    #[tracing::instrument(skip(repo))]
    pub(super) async fn deactivate_account_impl(
        repo: &AccountRepositoryImpl,
        account_id: Uuid,
    ) -> AccountResult<()> {
        let result = sqlx::query(
            "UPDATE accounts SET deactivated_at = $2 WHERE account_id = $1 AND deactivated_at IS NULL",
        )
        .bind(account_id)
        .bind(Utc::now().trunc_subsecs(6))
        .execute(&*repo.pool)
        .await
        .map_err(|e| AccountError::storage("deactivate account", e))?;

        if result.rows_affected() == 1 {
            tracing::info!("deactivated account");
            return Ok(());
        }

        // Already deactivated is a no-op; an unknown id is not.
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM accounts WHERE account_id = $1)")
                .bind(account_id)
                .fetch_one(&*repo.pool)
                .await
                .map_err(|e| AccountError::storage("load account", e))?;

        if exists {
            Ok(())
        } else {
            Err(AccountError::account_not_found(account_id))
        }
    }
}
