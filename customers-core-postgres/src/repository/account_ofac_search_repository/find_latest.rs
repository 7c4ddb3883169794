use customers_core_api::domain::OfacSearchResult;
use customers_core_api::error::{AccountError, AccountResult};
use customers_core_db::models::account_ofac_search::AccountOfacSearchModel;
use uuid::Uuid;

use super::repo_impl::{AccountOfacSearchRepositoryImpl, OFAC_SEARCH_COLUMNS};

impl AccountOfacSearchRepositoryImpl {
    pub(super) async fn find_latest_impl(
        repo: &AccountOfacSearchRepositoryImpl,
        account_id: Uuid,
    ) -> AccountResult<Option<OfacSearchResult>> {
        let query = format!(
            "SELECT {OFAC_SEARCH_COLUMNS} FROM account_ofac_searches \
             WHERE account_id = $1 ORDER BY created_at DESC LIMIT 1"
        );
        let model = sqlx::query_as::<_, AccountOfacSearchModel>(&query)
            .bind(account_id)
            .fetch_optional(&*repo.pool)
            .await
            .map_err(|e| AccountError::storage("load latest ofac search", e))?;

        Ok(model.map(Into::into))
    }
}
