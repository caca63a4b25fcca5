//! Database operations for the storefront `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `product` - Catalog, including the stock counter checkout decrements
//! - `app_user` - Username/password accounts
//! - `customer_order` - Placed orders with JSON item snapshots
//! - `tower_sessions.session` - Session storage (created by the session store)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and embedded in
//! [`MIGRATOR`]. Run them via:
//! ```bash
//! cargo run -p electroshop-cli -- migrate
//! ```

pub mod orders;
pub mod products;
pub mod users;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use electroshop_core::ProductId;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A guarded stock decrement matched no row: another checkout took the
    /// stock first. The surrounding transaction has been rolled back.
    #[error("insufficient stock for product {product_id} ({product_name})")]
    StockConflict {
        product_id: ProductId,
        product_name: String,
    },
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Apply any pending migrations.
///
/// # Errors
///
/// Returns `RepositoryError::Migration` if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), RepositoryError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Drop every storefront table and re-apply all migrations.
///
/// Destroys all products, users, orders and sessions. Only the CLI calls
/// this, and only in development mode.
///
/// # Errors
///
/// Returns `RepositoryError` if dropping or migrating fails.
pub async fn reset_schema(pool: &PgPool) -> Result<(), RepositoryError> {
    let mut tx = pool.begin().await?;
    for statement in [
        "DROP TABLE IF EXISTS customer_order",
        "DROP TABLE IF EXISTS app_user",
        "DROP TABLE IF EXISTS product",
        "DROP TABLE IF EXISTS _sqlx_migrations",
        "DROP SCHEMA IF EXISTS tower_sessions CASCADE",
    ] {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    run_migrations(pool).await
}

/// Map a unique-constraint violation to `RepositoryError::Conflict`.
pub(crate) fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}
