//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use electroshop_core::{UserId, Username};

/// A storefront account (domain type, never carries the password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login name.
    pub username: Username,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
