use async_trait::async_trait;
use customers_core_api::domain::{Account, AccountStatus, CreateAccountRequest};
use customers_core_api::error::{AccountError, AccountResult};
use customers_core_api::service::{AccountRepository, SecretKeeper};
use customers_core_db::models::account::AccountModel;
use customers_core_db::utils::AccountFingerprinter;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use crate::utils::{get_heapless_string, TryFromRow};

/// Columns selected whenever a full account row is loaded.
pub(super) const ACCOUNT_COLUMNS: &str = "account_id, customer_id, user_id, \
    encrypted_account_number, fingerprint, masked_account_number, routing_number, \
    account_type, status, created_at, deactivated_at";

/// Partial unique index over `(customer_id, fingerprint)` for active rows.
pub(super) const ACTIVE_FINGERPRINT_INDEX: &str = "accounts_active_fingerprint_idx";

pub struct AccountRepositoryImpl {
    pub(crate) pool: Arc<PgPool>,
    pub(crate) keeper: Arc<dyn SecretKeeper>,
    pub(crate) fingerprinter: AccountFingerprinter,
}

impl AccountRepositoryImpl {
    pub fn new(
        pool: Arc<PgPool>,
        keeper: Arc<dyn SecretKeeper>,
        fingerprinter: AccountFingerprinter,
    ) -> Self {
        Self {
            pool,
            keeper,
            fingerprinter,
        }
    }

    pub(super) fn decode_row(row: &PgRow) -> AccountResult<AccountModel> {
        AccountModel::try_from_row(row).map_err(|e| AccountError::storage("decode account row", e))
    }
}

impl TryFromRow<PgRow> for AccountModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(AccountModel {
            account_id: row.try_get("account_id")?,
            customer_id: row.try_get("customer_id")?,
            user_id: row.try_get("user_id")?,
            encrypted_account_number: row.try_get("encrypted_account_number")?,
            fingerprint: row.try_get("fingerprint")?,
            masked_account_number: get_heapless_string(row, "masked_account_number")?,
            routing_number: get_heapless_string(row, "routing_number")?,
            account_type: row.try_get("account_type")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            deactivated_at: row.try_get("deactivated_at")?,
        })
    }
}

#[async_trait]
impl AccountRepository for AccountRepositoryImpl {
    async fn create_account(
        &self,
        customer_id: Uuid,
        user_id: Uuid,
        request: &CreateAccountRequest,
    ) -> AccountResult<Account> {
        Self::create_account_impl(self, customer_id, user_id, request).await
    }

    async fn get_account(&self, customer_id: Uuid, account_id: Uuid) -> AccountResult<Account> {
        Self::get_account_impl(self, customer_id, account_id).await
    }

    async fn list_accounts(&self, customer_id: Uuid) -> AccountResult<Vec<Account>> {
        Self::list_accounts_impl(self, customer_id).await
    }

    async fn get_decrypted_account_number(
        &self,
        customer_id: Uuid,
        account_id: Uuid,
    ) -> AccountResult<String> {
        Self::get_decrypted_account_number_impl(self, customer_id, account_id).await
    }

    async fn update_account_status(&self, account_id: Uuid, status: AccountStatus) -> AccountResult<()> {
        Self::update_account_status_impl(self, account_id, status).await
    }

    async fn deactivate_account(&self, account_id: Uuid) -> AccountResult<()> {
        Self::deactivate_account_impl(self, account_id).await
    }
}
