//! Test helper module for database-backed tests
//!
//! Tests connect to the database named by `DATABASE_URL` (falling back to the
//! default local database), apply migrations, and work under freshly generated
//! customer ids so they never see each other's rows. A database that cannot be
//! reached fails the test.

use crate::postgres_repositories::{AccountRepositories, PostgresRepositories};
use crate::repository::db_init::init_database;
use customers_core_api::config::{DatabaseConfig, DEFAULT_DATABASE_URL};
use customers_core_api::service::LocalStringKeeper;
use customers_core_db::utils::AccountFingerprinter;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_KEEPER_KEY: [u8; 32] = [0x4b; 32];
pub const TEST_FINGERPRINT_KEY: [u8; 32] = [0x46; 32];

/// Test context holding repositories built over a migrated database
pub struct TestContext {
    pub repos: AccountRepositories,
    factory: PostgresRepositories,
}

impl TestContext {
    pub fn repos(&self) -> &AccountRepositories {
        &self.repos
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        self.factory.pool()
    }
}

pub fn test_database_config() -> DatabaseConfig {
    let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    DatabaseConfig {
        url,
        max_connections: 5,
        acquire_timeout_secs: 30,
    }
}

pub fn test_keeper() -> Arc<LocalStringKeeper> {
    Arc::new(LocalStringKeeper::new(TEST_KEEPER_KEY))
}

pub fn test_fingerprinter() -> AccountFingerprinter {
    AccountFingerprinter::new(TEST_FINGERPRINT_KEY)
}

/// Setup a test context against the database named by `DATABASE_URL`
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let ctx = setup_test_context().await?;
///     let account_repo = &ctx.repos().account_repository;
///     // ...
///     Ok(())
/// }
/// ```
pub async fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error + Send + Sync>> {
    let config = test_database_config();

    let factory = PostgresRepositories::connect(&config).await?;
    init_database(factory.pool()).await?;
    let repos = factory.build_all_repos(test_keeper(), test_fingerprinter());

    Ok(TestContext { repos, factory })
}

/// Random alphanumeric string of the given length
pub fn random(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_test_context_reaches_migrated_database() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_name IN ('accounts', 'account_ofac_searches')",
        )
        .fetch_one(&**ctx.pool())
        .await?;
        assert_eq!(tables, 2);

        Ok(())
    }

    #[test]
    fn test_database_config_defaults_to_local_database() {
        let config = test_database_config();
        match std::env::var("DATABASE_URL") {
            Ok(url) => assert_eq!(config.url, url),
            Err(_) => assert_eq!(config.url, DEFAULT_DATABASE_URL),
        }
    }
}
