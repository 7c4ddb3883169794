use chrono::{DateTime, Utc};
use customers_core_api::domain::ofac::OfacSearchResult;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of an account's sanctions search history. Rows are only ever
/// inserted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccountOfacSearchModel {
    pub ofac_search_id: Uuid,
    pub account_id: Uuid,
    pub entity_id: String,
    pub sdn_name: String,
    pub sdn_type: String,
    pub match_score: f64,
    pub created_at: DateTime<Utc>,
}

impl AccountOfacSearchModel {
    pub fn new(account_id: Uuid, result: &OfacSearchResult) -> Self {
        Self {
            ofac_search_id: Uuid::new_v4(),
            account_id,
            entity_id: result.entity_id.clone(),
            sdn_name: result.display_name.clone(),
            sdn_type: result.category.clone(),
            match_score: result.match_score,
            created_at: result.created_at,
        }
    }
}

impl From<AccountOfacSearchModel> for OfacSearchResult {
    fn from(model: AccountOfacSearchModel) -> Self {
        OfacSearchResult {
            entity_id: model.entity_id,
            display_name: model.sdn_name,
            category: model.sdn_type,
            match_score: model.match_score,
            created_at: model.created_at,
        }
    }
}
