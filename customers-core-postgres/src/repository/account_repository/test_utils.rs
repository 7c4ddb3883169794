use customers_core_api::domain::{AccountType, CreateAccountRequest};

use crate::test_helper::random;

pub fn create_test_request(account_number: &str, routing_number: &str) -> CreateAccountRequest {
    CreateAccountRequest::new(account_number, routing_number, AccountType::Checking)
}

/// Request with a random account number against a valid routing number.
pub fn create_random_request(account_type: AccountType) -> CreateAccountRequest {
    CreateAccountRequest::new(random(12), "123456780", account_type)
}
