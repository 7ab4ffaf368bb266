use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Create a connection pool, retrying a fixed number of times with a fixed
/// delay between attempts. Returns the last error once `retries` extra
/// attempts have failed.
pub async fn connect_with_retry(
    database_url: &str,
    retries: u32,
    delay: Duration,
) -> Result<DbPool, sqlx::Error> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match create_pool(database_url).await {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt <= retries => {
                tracing::warn!(
                    attempt,
                    retries,
                    error = %e,
                    "Database connection failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                tracing::error!(attempt, error = %e, "Database connection retries exhausted");
                return Err(e);
            }
        }
    }
}

/// Run a trivial query to confirm the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
