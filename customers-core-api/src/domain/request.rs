use serde::Deserialize;
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::account::{AccountType, MAX_ACCOUNT_NUMBER_LEN, ROUTING_NUMBER_LEN};
use crate::error::{AccountError, AccountResult};

/// ABA check-digit weights, repeated across the nine digits.
const ROUTING_WEIGHTS: [u32; ROUTING_NUMBER_LEN] = [3, 7, 1, 3, 7, 1, 3, 7, 1];

/// Input for creating an account. Carries the plaintext account number, so it
/// only lives in memory for the duration of the create call.
#[derive(Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    #[validate(
        length(min = 1, max = 17, message = "account number must be 1 to 17 characters"),
        custom(function = "validate_account_number")
    )]
    pub account_number: String,

    #[validate(custom(function = "validate_routing_number"))]
    pub routing_number: String,

    #[serde(rename = "type")]
    pub account_type: AccountType,
}

impl CreateAccountRequest {
    pub fn new(
        account_number: impl Into<String>,
        routing_number: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            routing_number: routing_number.into(),
            account_type,
        }
    }

    /// Checks the owning identifiers and the request fields before any storage
    /// or keeper call is made.
    pub fn validate_for(&self, customer_id: Uuid, user_id: Uuid) -> AccountResult<()> {
        if customer_id.is_nil() {
            return Err(AccountError::Validation("customer id is required".to_string()));
        }
        if user_id.is_nil() {
            return Err(AccountError::Validation("user id is required".to_string()));
        }
        self.validate()?;
        Ok(())
    }
}

impl std::fmt::Debug for CreateAccountRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateAccountRequest")
            .field("account_number", &"<redacted>")
            .field("routing_number", &self.routing_number)
            .field("account_type", &self.account_type)
            .finish()
    }
}

fn validate_account_number(value: &str) -> Result<(), ValidationError> {
    if value.len() <= MAX_ACCOUNT_NUMBER_LEN && value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Ok(());
    }
    Err(ValidationError::new("account_number")
        .with_message(Cow::Borrowed("account number must be ASCII alphanumeric")))
}

fn validate_routing_number(value: &str) -> Result<(), ValidationError> {
    if is_valid_routing_number(value) {
        return Ok(());
    }
    Err(ValidationError::new("routing_number").with_message(Cow::Borrowed(
        "routing number must be 9 digits with a valid check digit",
    )))
}

/// Nine ASCII digits whose 3-7-1 weighted sum is a multiple of ten.
pub fn is_valid_routing_number(value: &str) -> bool {
    if value.len() != ROUTING_NUMBER_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let sum: u32 = value
        .bytes()
        .zip(ROUTING_WEIGHTS)
        .map(|(digit, weight)| u32::from(digit - b'0') * weight)
        .sum();
    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_number_checksum() {
        assert!(is_valid_routing_number("987654320"));
        assert!(is_valid_routing_number("123456780"));
        assert!(is_valid_routing_number("021000021"));

        assert!(!is_valid_routing_number("987654321"));
        assert!(!is_valid_routing_number("98765432"));
        assert!(!is_valid_routing_number("9876543200"));
        assert!(!is_valid_routing_number("98765432a"));
        assert!(!is_valid_routing_number(""));
    }

    #[test]
    fn test_validate_for_accepts_valid_request() {
        let req = CreateAccountRequest::new("123", "987654320", AccountType::Checking);
        assert!(req.validate_for(Uuid::new_v4(), Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_validate_for_rejects_bad_routing_number() {
        let req = CreateAccountRequest::new("123", "987654321", AccountType::Checking);
        let err = req.validate_for(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));
        assert!(err.to_string().contains("routing number"));
    }

    #[test]
    fn test_validate_for_rejects_bad_account_number() {
        for account_number in ["", "12-34", "123456789012345678"] {
            let req = CreateAccountRequest::new(account_number, "987654320", AccountType::Savings);
            let err = req.validate_for(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
            assert!(matches!(err, AccountError::Validation(_)), "{account_number:?}");
        }
    }

    #[test]
    fn test_validate_for_requires_identifiers() {
        let req = CreateAccountRequest::new("123", "987654320", AccountType::Checking);
        assert!(matches!(
            req.validate_for(Uuid::nil(), Uuid::new_v4()),
            Err(AccountError::Validation(_))
        ));
        assert!(matches!(
            req.validate_for(Uuid::new_v4(), Uuid::nil()),
            Err(AccountError::Validation(_))
        ));
    }

    #[test]
    fn test_debug_redacts_account_number() {
        let req = CreateAccountRequest::new("55512345", "987654320", AccountType::Checking);
        let debug = format!("{req:?}");
        assert!(!debug.contains("55512345"));
        assert!(debug.contains("987654320"));
    }

    #[test]
    fn test_deserialize_from_json() {
        let req: CreateAccountRequest = serde_json::from_str(
            r#"{"accountNumber":"156421","routingNumber":"123456780","type":"savings"}"#,
        )
        .unwrap();
        assert_eq!(req.account_number, "156421");
        assert_eq!(req.account_type, AccountType::Savings);
    }
}
