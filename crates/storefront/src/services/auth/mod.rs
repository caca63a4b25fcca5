//! Authentication service.
//!
//! Username/password accounts with Argon2id hashes stored as PHC strings.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use tracing::instrument;

use electroshop_core::Username;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Outcome of a registration attempt.
#[derive(Debug)]
pub enum Registration {
    /// The account was created.
    Created(User),
    /// Another account already holds this username.
    UsernameTaken,
}

impl Registration {
    /// Whether the account was created.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user.
    ///
    /// A taken username is reported as [`Registration::UsernameTaken`], detected
    /// from the unique constraint rather than a lookup beforehand.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is blank.
    /// Returns `AuthError::InvalidUsername` if the username is too long.
    /// Returns `AuthError::Repository` for database failures.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<Registration, AuthError> {
        let (username, password) = credentials(username, password)?;
        let password_hash = hash_password(password)?;

        match self.users.create(&username, &password_hash).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "User registered");
                Ok(Registration::Created(user))
            }
            Err(RepositoryError::Conflict(_)) => {
                tracing::debug!("Username already taken");
                Ok(Registration::UsernameTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check a username/password pair.
    ///
    /// Returns `None` for blank fields, an unknown username and a wrong
    /// password alike.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` for database failures.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, AuthError> {
        // A pair that could never have been registered cannot log in.
        let Ok((username, password)) = credentials(username, password) else {
            return Ok(None);
        };

        let Some((user, password_hash)) = self.users.get_password_hash(&username).await? else {
            return Ok(None);
        };

        Ok(verify_password(password, &password_hash).then_some(user))
    }
}

/// Trim and validate a username/password pair.
fn credentials<'p>(username: &str, password: &'p str) -> Result<(Username, &'p str), AuthError> {
    let password = password.trim();
    if username.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok((Username::parse(username)?, password))
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash. Unparseable hashes never match.
fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}
