//! Account registration for CloudDrop.

use sqlx::SqlitePool;
use tracing::info;

use crate::auth::password::{hash_password, PasswordParams};
use crate::db::{NewUser, User, UserRepository};
use crate::{CloudDropError, Result};

/// Register a new account.
///
/// Derives an Argon2 credential from the password under the given work
/// factor and persists the user. A duplicate email surfaces as `Conflict`
/// from the store's unique index, so two concurrent registrations of the
/// same email cannot both succeed.
pub async fn register(
    pool: &SqlitePool,
    params: &PasswordParams,
    email: &str,
    password: &str,
) -> Result<User> {
    if email.is_empty() {
        return Err(CloudDropError::Validation("email is required".to_string()));
    }
    if password.is_empty() {
        return Err(CloudDropError::Validation(
            "password is required".to_string(),
        ));
    }

    let password_hash = hash_password(password, params)
        .map_err(|e| CloudDropError::Validation(e.to_string()))?;

    let repo = UserRepository::new(pool);
    let user = repo.create(&NewUser::new(email, password_hash)).await?;

    info!(email = %user.email, "registered new account");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn test_params() -> PasswordParams {
        PasswordParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let db = Database::open_in_memory().await.unwrap();

        let user = register(db.pool(), &test_params(), "a@x.com", "pw1")
            .await
            .unwrap();

        assert_eq!(user.email, "a@x.com");
        // The stored credential is a hash, never the raw password
        assert!(user.password.starts_with("$argon2id$"));
        assert_ne!(user.password, "pw1");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let db = Database::open_in_memory().await.unwrap();

        register(db.pool(), &test_params(), "a@x.com", "pw1")
            .await
            .unwrap();
        let result = register(db.pool(), &test_params(), "a@x.com", "pw2").await;

        assert!(matches!(result, Err(CloudDropError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_empty_email() {
        let db = Database::open_in_memory().await.unwrap();

        let result = register(db.pool(), &test_params(), "", "pw1").await;
        assert!(matches!(result, Err(CloudDropError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_empty_password() {
        let db = Database::open_in_memory().await.unwrap();

        let result = register(db.pool(), &test_params(), "a@x.com", "").await;
        assert!(matches!(result, Err(CloudDropError::Validation(_))));
    }
}
