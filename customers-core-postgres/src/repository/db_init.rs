//! Database initialization
//!
//! Applies the SQL migrations under `migrations/` to the target database.
//! Applied migrations are tracked by sqlx, so calling this on every start is
//! safe.

use sqlx::migrate::MigrateError;
use sqlx::PgPool;

/// Initialize the database schema
///
/// # Example
///
/// ```rust,no_run
/// use sqlx::PgPool;
/// use customers_core_postgres::repository::db_init::init_database;
///
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// init_database(pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn init_database(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!().run(pool).await
}
