use thiserror::Error;
use uuid::Uuid;

use crate::domain::account::AccountStatus;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Opaque failure reported by a [`crate::service::SecretKeeper`].
#[derive(Error, Debug)]
#[error("Secret keeper error: {0}")]
pub struct KeeperError(pub String);

/// Failure reported by a [`crate::service::WatchlistClient`].
#[derive(Error, Debug)]
pub enum WatchlistError {
    #[error("Watchlist request timed out")]
    Timeout,

    #[error("Watchlist transport error: {0}")]
    Transport(String),

    #[error("Watchlist returned unexpected status {0}")]
    UnexpectedStatus(u16),

    #[error("Watchlist response could not be decoded: {0}")]
    Decode(String),

    #[error("Watchlist returned no results")]
    NoResults,

    #[error("Watchlist returned match score {0} outside 0.0..=1.0")]
    InvalidMatchScore(f64),
}

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Account already on file for customer {customer_id}")]
    Duplicate { customer_id: Uuid },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid status transition for account {account_id}: {from} -> {to}")]
    InvalidTransition {
        account_id: Uuid,
        from: AccountStatus,
        to: AccountStatus,
    },

    #[error("Encryption error for customer {customer_id}")]
    Encryption {
        customer_id: Uuid,
        #[source]
        source: KeeperError,
    },

    #[error("Decryption error for account {account_id}")]
    Decryption {
        account_id: Uuid,
        #[source]
        source: KeeperError,
    },

    #[error("Screening error for account {account_id}")]
    Screening {
        account_id: Uuid,
        #[source]
        source: WatchlistError,
    },

    #[error("Storage error: {context}")]
    Storage {
        context: String,
        #[source]
        source: BoxError,
    },
}

impl AccountError {
    pub fn storage(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        AccountError::Storage {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn account_not_found(account_id: Uuid) -> Self {
        AccountError::NotFound(format!("account {account_id}"))
    }

    /// True for the benign "account already on file" outcome of a create.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, AccountError::Duplicate { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AccountError::NotFound(_))
    }
}

impl From<validator::ValidationErrors> for AccountError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AccountError::Validation(errors.to_string())
    }
}

pub type AccountResult<T> = Result<T, AccountError>;
