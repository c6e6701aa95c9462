//! User row types for CloudDrop.

use crate::auth::Credential;

/// A registered user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Email address, globally unique, case-sensitive as stored.
    pub email: String,
    /// Stored password credential (Argon2 hash, or plaintext on legacy rows).
    pub password: String,
    /// When the account was created.
    pub created_at: String,
}

impl User {
    /// Classify this user's stored credential.
    pub fn credential(&self) -> Credential {
        Credential::parse(&self.password)
    }

    /// Parse the creation timestamp.
    pub fn created_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        crate::datetime::parse_sqlite_datetime(&self.created_at)
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address.
    pub email: String,
    /// Hashed password credential.
    pub password: String,
}

impl NewUser {
    /// Create a new NewUser.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}
