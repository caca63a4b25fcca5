//! Development database reset.

use electroshop_storefront::config::Environment;
use electroshop_storefront::db;

use super::{CommandError, connect, environment};

/// Drop every storefront table and re-apply migrations.
///
/// # Errors
///
/// Returns `CommandError::Refused` unless `confirm` is set and
/// `ELECTROSHOP_ENV` is `development`.
pub async fn run(confirm: bool) -> Result<(), CommandError> {
    check_allowed(environment()?, confirm)?;

    let pool = connect().await?;
    tracing::warn!("Dropping all storefront tables");
    db::reset_schema(&pool).await?;

    tracing::info!("Database reset complete; seed products to repopulate the catalog");
    Ok(())
}

fn check_allowed(environment: Environment, confirm: bool) -> Result<(), CommandError> {
    if !environment.is_development() {
        return Err(CommandError::Refused(format!(
            "reset is only allowed when ELECTROSHOP_ENV=development (current: {})",
            environment.as_str()
        )));
    }
    if !confirm {
        return Err(CommandError::Refused(
            "reset destroys all data; pass --confirm to proceed".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_needs_development_and_confirm() {
        assert!(check_allowed(Environment::Development, true).is_ok());
        assert!(matches!(
            check_allowed(Environment::Development, false),
            Err(CommandError::Refused(_))
        ));
        assert!(matches!(
            check_allowed(Environment::Production, true),
            Err(CommandError::Refused(_))
        ));
    }
}
