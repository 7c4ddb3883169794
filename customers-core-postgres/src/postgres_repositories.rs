use customers_core_api::config::DatabaseConfig;
use customers_core_api::service::SecretKeeper;
use customers_core_db::utils::AccountFingerprinter;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

use crate::repository::account_ofac_search_repository::AccountOfacSearchRepositoryImpl;
use crate::repository::account_repository::AccountRepositoryImpl;

/// Builds repositories over a shared connection pool.
///
/// Create once at startup and share; every repository it hands out runs its
/// own short transactions against the pool.
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Open a pool with the configured limits.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url)
            .await?;
        Ok(Self::new(Arc::new(pool)))
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    pub fn build_account_repo(
        &self,
        keeper: Arc<dyn SecretKeeper>,
        fingerprinter: AccountFingerprinter,
    ) -> Arc<AccountRepositoryImpl> {
        Arc::new(AccountRepositoryImpl::new(
            self.pool.clone(),
            keeper,
            fingerprinter,
        ))
    }

    pub fn build_account_ofac_search_repo(&self) -> Arc<AccountOfacSearchRepositoryImpl> {
        Arc::new(AccountOfacSearchRepositoryImpl::new(self.pool.clone()))
    }

    pub fn build_all_repos(
        &self,
        keeper: Arc<dyn SecretKeeper>,
        fingerprinter: AccountFingerprinter,
    ) -> AccountRepositories {
        AccountRepositories {
            account_repository: self.build_account_repo(keeper, fingerprinter),
            account_ofac_search_repository: self.build_account_ofac_search_repo(),
        }
    }
}

/// Container for the account module repositories
pub struct AccountRepositories {
    pub account_repository: Arc<AccountRepositoryImpl>,
    pub account_ofac_search_repository: Arc<AccountOfacSearchRepositoryImpl>,
}
