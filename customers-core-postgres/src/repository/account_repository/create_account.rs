use chrono::{SubsecRound, Utc};
use customers_core_api::domain::{Account, AccountStatus, CreateAccountRequest};
use customers_core_api::error::{AccountError, AccountResult};
use customers_core_db::models::account::AccountModel;
use customers_core_db::utils::mask_account_number;
use heapless::String as HeaplessString;
use std::str::FromStr;
use uuid::Uuid;

use super::repo_impl::{AccountRepositoryImpl, ACTIVE_FINGERPRINT_INDEX};

impl AccountRepositoryImpl {
    #[tracing::instrument(skip(repo, request), fields(account_type = %request.account_type))]
    pub(super) async fn create_account_impl(
        repo: &AccountRepositoryImpl,
        customer_id: Uuid,
        user_id: Uuid,
        request: &CreateAccountRequest,
    ) -> AccountResult<Account> {
        request.validate_for(customer_id, user_id)?;

        let fingerprint = repo
            .fingerprinter
            .fingerprint(&request.account_number, &request.routing_number)
            .map_err(|e| AccountError::storage("compute account fingerprint", e))?;
        let masked_account_number =
            mask_account_number(&request.account_number).map_err(AccountError::Validation)?;
        let routing_number = HeaplessString::from_str(&request.routing_number)
            .map_err(|_| AccountError::Validation("routing number is too long".to_string()))?;

        let encrypted_account_number = repo
            .keeper
            .encrypt(&request.account_number)
            .await
            .map_err(|source| AccountError::Encryption {
                customer_id,
                source,
            })?;

        let model = AccountModel {
            account_id: Uuid::new_v4(),
            customer_id,
            user_id,
            encrypted_account_number,
            fingerprint,
            masked_account_number,
            routing_number,
            account_type: request.account_type,
            status: AccountStatus::None,
            // Postgres keeps microseconds
            created_at: Utc::now().trunc_subsecs(6),
            deactivated_at: None,
        };

        let mut tx = repo
            .pool
            .begin()
            .await
            .map_err(|e| AccountError::storage("begin account insert", e))?;

        sqlx::query(
            r#"
            INSERT INTO accounts
            (account_id, customer_id, user_id, encrypted_account_number, fingerprint, masked_account_number, routing_number, account_type, status, created_at, deactivated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(model.account_id)
        .bind(model.customer_id)
        .bind(model.user_id)
        .bind(&model.encrypted_account_number)
        .bind(&model.fingerprint)
        .bind(model.masked_account_number.as_str())
        .bind(model.routing_number.as_str())
        .bind(model.account_type)
        .bind(model.status)
        .bind(model.created_at)
        .bind(model.deactivated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, customer_id))?;

        tx.commit()
            .await
            .map_err(|e| map_insert_error(e, customer_id))?;

        tracing::info!(account_id = %model.account_id, "created account");
        Ok(model.into())
    }
}

fn map_insert_error(err: sqlx::Error, customer_id: Uuid) -> AccountError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() && db_err.constraint() == Some(ACTIVE_FINGERPRINT_INDEX) {
            tracing::info!(%customer_id, "account already on file");
            return AccountError::Duplicate { customer_id };
        }
    }
    tracing::error!(%customer_id, error = %err, "failed to insert account");
    AccountError::storage("insert account", err)
}

#[cfg(test)]
mod tests {
    use crate::repository::account_repository::test_utils::{create_random_request, create_test_request};
    use crate::repository::account_repository::AccountRepositoryImpl;
    use crate::test_helper::{setup_test_context, test_fingerprinter};
    use async_trait::async_trait;
    use customers_core_api::domain::{AccountStatus, AccountType};
    use customers_core_api::error::{AccountError, KeeperError};
    use customers_core_api::service::{AccountRepository, SecretKeeper};
    use serial_test::serial;
    use std::sync::Arc;
    use uuid::Uuid;

    struct FailingKeeper;

    #[async_trait]
    impl SecretKeeper for FailingKeeper {
        async fn encrypt(&self, _plaintext: &str) -> Result<String, KeeperError> {
            Err(KeeperError("key unavailable".to_string()))
        }

        async fn decrypt(&self, _ciphertext: &str) -> Result<String, KeeperError> {
            Err(KeeperError("key unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_create_account() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let account_repo = &ctx.repos().account_repository;
        let (customer_id, user_id) = (Uuid::new_v4(), Uuid::new_v4());

        let account = account_repo
            .create_account(customer_id, user_id, &create_test_request("123", "987654320"))
            .await?;

        assert_eq!(account.customer_id, customer_id);
        assert_eq!(account.user_id, user_id);
        assert_eq!(account.masked_account_number.as_str(), "*123");
        assert_eq!(account.routing_number.as_str(), "987654320");
        assert_eq!(account.account_type, AccountType::Checking);
        assert_eq!(account.status, AccountStatus::None);
        assert!(account.is_active());

        let loaded = account_repo.get_account(customer_id, account.account_id).await?;
        assert_eq!(loaded, account);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_account_stores_ciphertext() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let account_repo = &ctx.repos().account_repository;

        let account = account_repo
            .create_account(
                Uuid::new_v4(),
                Uuid::new_v4(),
                &create_test_request("5551234567", "987654320"),
            )
            .await?;

        let (encrypted, fingerprint): (String, String) = sqlx::query_as(
            "SELECT encrypted_account_number, fingerprint FROM accounts WHERE account_id = $1",
        )
        .bind(account.account_id)
        .fetch_one(&**ctx.pool())
        .await?;

        assert!(!encrypted.is_empty());
        assert!(!encrypted.contains("5551234567"));
        assert_eq!(
            fingerprint,
            test_fingerprinter().fingerprint("5551234567", "987654320").unwrap()
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_account_duplicate() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let account_repo = &ctx.repos().account_repository;
        let (customer_id, user_id) = (Uuid::new_v4(), Uuid::new_v4());
        let req = create_test_request("156421", "123456780");

        // first write should pass
        account_repo.create_account(customer_id, user_id, &req).await?;

        // second write should fail
        let err = account_repo
            .create_account(customer_id, user_id, &req)
            .await
            .unwrap_err();
        assert!(err.is_duplicate(), "unexpected error: {err:?}");

        assert_eq!(account_repo.list_accounts(customer_id).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_create_account_concurrent_duplicates() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let account_repo = &ctx.repos().account_repository;
        let (customer_id, user_id) = (Uuid::new_v4(), Uuid::new_v4());
        let req = create_test_request("7001002003", "123456780");

        let (first, second) = tokio::join!(
            account_repo.create_account(customer_id, user_id, &req),
            account_repo.create_account(customer_id, user_id, &req),
        );

        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(AccountError::Duplicate { .. })))
                .count(),
            1
        );
        assert_eq!(account_repo.list_accounts(customer_id).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_account_same_number_other_customer() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let account_repo = &ctx.repos().account_repository;
        let req = create_test_request("156421", "123456780");

        account_repo.create_account(Uuid::new_v4(), Uuid::new_v4(), &req).await?;
        account_repo.create_account(Uuid::new_v4(), Uuid::new_v4(), &req).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_account_after_deactivation() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let account_repo = &ctx.repos().account_repository;
        let (customer_id, user_id) = (Uuid::new_v4(), Uuid::new_v4());
        let req = create_random_request(AccountType::Savings);

        let first = account_repo.create_account(customer_id, user_id, &req).await?;
        account_repo.deactivate_account(first.account_id).await?;

        let second = account_repo.create_account(customer_id, user_id, &req).await?;
        assert_ne!(first.account_id, second.account_id);

        let accounts = account_repo.list_accounts(customer_id).await?;
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].account_id, second.account_id);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_account_validates_before_storage() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let account_repo = &ctx.repos().account_repository;
        let customer_id = Uuid::new_v4();

        let err = account_repo
            .create_account(customer_id, Uuid::new_v4(), &create_test_request("123", "987654321"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));

        let err = account_repo
            .create_account(Uuid::nil(), Uuid::new_v4(), &create_test_request("123", "987654320"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));

        assert!(account_repo.list_accounts(customer_id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_account_encryption_failure() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let account_repo = AccountRepositoryImpl::new(
            ctx.pool().clone(),
            Arc::new(FailingKeeper),
            test_fingerprinter(),
        );
        let customer_id = Uuid::new_v4();

        let err = account_repo
            .create_account(customer_id, Uuid::new_v4(), &create_test_request("123", "987654320"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Encryption { customer_id: id, .. } if id == customer_id));

        assert!(account_repo.list_accounts(customer_id).await?.is_empty());

        Ok(())
    }
}
