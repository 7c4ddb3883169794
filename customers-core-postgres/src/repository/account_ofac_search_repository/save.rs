use customers_core_api::domain::OfacSearchResult;
use customers_core_api::error::{AccountError, AccountResult};
use customers_core_db::models::account_ofac_search::AccountOfacSearchModel;
use uuid::Uuid;

use super::repo_impl::AccountOfacSearchRepositoryImpl;

impl AccountOfacSearchRepositoryImpl {
    #[tracing::instrument(skip(repo, result), fields(entity_id = %result.entity_id))]
    pub(super) async fn save_impl(
        repo: &AccountOfacSearchRepositoryImpl,
        account_id: Uuid,
        result: &OfacSearchResult,
    ) -> AccountResult<()> {
        let model = AccountOfacSearchModel::new(account_id, result);

        let mut tx = repo
            .pool
            .begin()
            .await
            .map_err(|e| AccountError::storage("begin ofac search insert", e))?;

        sqlx::query(
            r#"
            INSERT INTO account_ofac_searches
            (ofac_search_id, account_id, entity_id, sdn_name, sdn_type, match_score, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(model.ofac_search_id)
        .bind(model.account_id)
        .bind(&model.entity_id)
        .bind(&model.sdn_name)
        .bind(&model.sdn_type)
        .bind(model.match_score)
        .bind(model.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, account_id))?;

        tx.commit()
            .await
            .map_err(|e| map_insert_error(e, account_id))?;

        tracing::debug!(ofac_search_id = %model.ofac_search_id, "stored ofac search");
        Ok(())
    }
}

fn map_insert_error(err: sqlx::Error, account_id: Uuid) -> AccountError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return AccountError::account_not_found(account_id);
        }
        if db_err.is_check_violation() {
            return AccountError::Validation(format!(
                "match score out of range for account {account_id}"
            ));
        }
    }
    tracing::error!(%account_id, error = %err, "failed to insert ofac search");
    AccountError::storage("insert account_ofac_searches", err)
}
