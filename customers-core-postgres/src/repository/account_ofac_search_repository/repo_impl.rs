use async_trait::async_trait;
use customers_core_api::domain::OfacSearchResult;
use customers_core_api::error::AccountResult;
use customers_core_api::service::AccountOfacSearchRepository;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Columns selected whenever a search history row is loaded.
pub(super) const OFAC_SEARCH_COLUMNS: &str =
    "ofac_search_id, account_id, entity_id, sdn_name, sdn_type, match_score, created_at";

pub struct AccountOfacSearchRepositoryImpl {
    pub(crate) pool: Arc<PgPool>,
}

impl AccountOfacSearchRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountOfacSearchRepository for AccountOfacSearchRepositoryImpl {
    async fn save_account_ofac_search(
        &self,
        account_id: Uuid,
        result: &OfacSearchResult,
    ) -> AccountResult<()> {
        Self::save_impl(self, account_id, result).await
    }

    async fn latest_account_ofac_search(
        &self,
        account_id: Uuid,
    ) -> AccountResult<Option<OfacSearchResult>> {
        Self::find_latest_impl(self, account_id).await
    }

    async fn list_account_ofac_searches(
        &self,
        account_id: Uuid,
    ) -> AccountResult<Vec<OfacSearchResult>> {
        Self::list_impl(self, account_id).await
    }
}
