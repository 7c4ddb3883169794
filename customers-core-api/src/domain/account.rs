use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Longest account number accepted (ACH DFI account number field width).
pub const MAX_ACCOUNT_NUMBER_LEN: usize = 17;
pub const ROUTING_NUMBER_LEN: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "account_type", rename_all = "PascalCase"))]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Checking => write!(f, "Checking"),
            AccountType::Savings => write!(f, "Savings"),
        }
    }
}

impl FromStr for AccountType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Checking" | "checking" => Ok(AccountType::Checking),
            "Savings" | "savings" => Ok(AccountType::Savings),
            _ => Err(()),
        }
    }
}

/// Validation status of an account.
///
/// `None` is the initial state. `Validated` and `Rejected` are terminal: a
/// re-screen appends a new search result instead of reopening the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "account_status", rename_all = "PascalCase"))]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    None,
    Validated,
    Rejected,
}

impl AccountStatus {
    pub const ALL: [AccountStatus; 3] = [
        AccountStatus::None,
        AccountStatus::Validated,
        AccountStatus::Rejected,
    ];

    pub fn can_transition_to(self, next: AccountStatus) -> bool {
        matches!(
            (self, next),
            (AccountStatus::None, AccountStatus::Validated)
                | (AccountStatus::None, AccountStatus::Rejected)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, AccountStatus::Validated | AccountStatus::Rejected)
    }

    /// Statuses from which `self` may legally be reached.
    pub fn predecessors(self) -> Vec<AccountStatus> {
        Self::ALL
            .iter()
            .copied()
            .filter(|from| from.can_transition_to(self))
            .collect()
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountStatus::None => write!(f, "None"),
            AccountStatus::Validated => write!(f, "Validated"),
            AccountStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

impl FromStr for AccountStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" | "none" => Ok(AccountStatus::None),
            "Validated" | "validated" => Ok(AccountStatus::Validated),
            "Rejected" | "rejected" => Ok(AccountStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// A customer's bank account as exposed to callers.
///
/// The plaintext account number is never part of this struct; only the masked
/// display value derived at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: Uuid,
    pub customer_id: Uuid,
    /// Actor who created the account
    pub user_id: Uuid,
    pub masked_account_number: HeaplessString<MAX_ACCOUNT_NUMBER_LEN>,
    pub routing_number: HeaplessString<ROUTING_NUMBER_LEN>,
    pub account_type: AccountType,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub deactivated_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.deactivated_at.is_none()
    }
}
