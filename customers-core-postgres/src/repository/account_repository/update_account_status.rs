use customers_core_api::domain::AccountStatus;
use customers_core_api::error::{AccountError, AccountResult};
use uuid::Uuid;

use super::repo_impl::AccountRepositoryImpl;

impl AccountRepositoryImpl {
    /// Single conditional UPDATE guarded by the legal predecessors of `status`,
    /// so a concurrent decision that lands first makes this one fail instead of
    /// being overwritten.
    #[tracing::instrument(skip(repo))]
    pub(super) async fn update_account_status_impl(
        repo: &AccountRepositoryImpl,
        account_id: Uuid,
        status: AccountStatus,
    ) -> AccountResult<()> {
        let predecessors: Vec<String> = status
            .predecessors()
            .iter()
            .map(ToString::to_string)
            .collect();

        let result = sqlx::query(
            r#"
            UPDATE accounts SET status = $2
            WHERE account_id = $1 AND deactivated_at IS NULL AND status::text = ANY($3)
            "#,
        )
        .bind(account_id)
        .bind(status)
        .bind(&predecessors)
        .execute(&*repo.pool)
        .await
        .map_err(|e| AccountError::storage("update account status", e))?;

        if result.rows_affected() == 1 {
            tracing::info!("updated account status");
            return Ok(());
        }

        let current: Option<AccountStatus> = sqlx::query_scalar(
            "SELECT status FROM accounts WHERE account_id = $1 AND deactivated_at IS NULL",
        )
        .bind(account_id)
        .fetch_optional(&*repo.pool)
        .await
        .map_err(|e| AccountError::storage("load account status", e))?;

        match current {
            Some(from) => {
                tracing::warn!(%from, "rejected account status transition");
                Err(AccountError::InvalidTransition {
                    account_id,
                    from,
                    to: status,
                })
            }
            None => Err(AccountError::account_not_found(account_id)),
        }
    }
}
