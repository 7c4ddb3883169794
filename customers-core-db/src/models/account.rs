use chrono::{DateTime, Utc};
use customers_core_api::domain::account::{
    Account, AccountStatus, AccountType, MAX_ACCOUNT_NUMBER_LEN, ROUTING_NUMBER_LEN,
};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Database model for a customer bank account
///
/// Holds the encrypted account number and its fingerprint alongside the
/// display fields. Never leaves the persistence layer as-is: callers receive an
/// [`Account`], which drops both sensitive columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountModel {
    pub account_id: Uuid,
    pub customer_id: Uuid,
    pub user_id: Uuid,

    /// Ciphertext produced by the secret keeper
    pub encrypted_account_number: String,

    /// Keyed hash of account number and routing number; unique per customer
    /// among active accounts
    pub fingerprint: String,

    pub masked_account_number: HeaplessString<MAX_ACCOUNT_NUMBER_LEN>,
    pub routing_number: HeaplessString<ROUTING_NUMBER_LEN>,
    pub account_type: AccountType,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,

    /// Soft-delete marker; `None` while the account is active
    pub deactivated_at: Option<DateTime<Utc>>,
}

impl From<AccountModel> for Account {
    fn from(model: AccountModel) -> Self {
        Account {
            account_id: model.account_id,
            customer_id: model.customer_id,
            user_id: model.user_id,
            masked_account_number: model.masked_account_number,
            routing_number: model.routing_number,
            account_type: model.account_type,
            status: model.status,
            created_at: model.created_at,
            deactivated_at: model.deactivated_at,
        }
    }
}
