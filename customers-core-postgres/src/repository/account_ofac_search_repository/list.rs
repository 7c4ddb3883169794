use customers_core_api::domain::OfacSearchResult;
use customers_core_api::error::{AccountError, AccountResult};
use customers_core_db::models::account_ofac_search::AccountOfacSearchModel;
use uuid::Uuid;

use super::repo_impl::{AccountOfacSearchRepositoryImpl, OFAC_SEARCH_COLUMNS};

impl AccountOfacSearchRepositoryImpl {
    pub(super) async fn list_impl(
        repo: &AccountOfacSearchRepositoryImpl,
        account_id: Uuid,
    ) -> AccountResult<Vec<OfacSearchResult>> {
        let query = format!(
            "SELECT {OFAC_SEARCH_COLUMNS} FROM account_ofac_searches \
             WHERE account_id = $1 ORDER BY created_at ASC"
        );
        let models = sqlx::query_as::<_, AccountOfacSearchModel>(&query)
            .bind(account_id)
            .fetch_all(&*repo.pool)
            .await
            .map_err(|e| AccountError::storage("list ofac searches", e))?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
