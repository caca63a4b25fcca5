//! Database migration command.
//!
//! Migrations live in `crates/storefront/migrations/` and are embedded in
//! the storefront library, so the CLI and the server always agree on them.

use electroshop_storefront::db;

use super::{CommandError, connect};

/// Apply pending storefront migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running storefront migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Storefront migrations complete!");
    Ok(())
}
