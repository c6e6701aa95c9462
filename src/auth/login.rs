//! Credential verification for CloudDrop.

use sqlx::SqlitePool;
use tracing::debug;

use crate::db::{User, UserRepository};
use crate::{CloudDropError, Result};

/// Verify an email/password pair.
///
/// Unknown email and wrong password collapse into the same generic error so
/// a caller cannot probe which part failed. Legacy plaintext rows compare by
/// equality; everything else verifies against the stored Argon2 hash.
pub async fn verify_login(pool: &SqlitePool, email: &str, password: &str) -> Result<User> {
    let repo = UserRepository::new(pool);

    let user = match repo.get_by_email(email).await? {
        Some(user) => user,
        None => {
            debug!(email, "login attempt for unknown email");
            return Err(invalid_credentials());
        }
    };

    if !user.credential().matches(password) {
        debug!(email, "login attempt with wrong password");
        return Err(invalid_credentials());
    }

    Ok(user)
}

fn invalid_credentials() -> CloudDropError {
    CloudDropError::Auth("invalid credentials".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::PasswordParams;
    use crate::auth::registration::register;
    use crate::db::{Database, NewUser};

    fn test_params() -> PasswordParams {
        PasswordParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[tokio::test]
    async fn test_verify_login_success() {
        let db = Database::open_in_memory().await.unwrap();
        register(db.pool(), &test_params(), "a@x.com", "pw1")
            .await
            .unwrap();

        let user = verify_login(db.pool(), "a@x.com", "pw1").await.unwrap();
        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_verify_login_wrong_password() {
        let db = Database::open_in_memory().await.unwrap();
        register(db.pool(), &test_params(), "a@x.com", "pw1")
            .await
            .unwrap();

        let result = verify_login(db.pool(), "a@x.com", "pw2").await;
        assert!(matches!(result, Err(CloudDropError::Auth(_))));
    }

    #[tokio::test]
    async fn test_verify_login_unknown_email() {
        let db = Database::open_in_memory().await.unwrap();

        let result = verify_login(db.pool(), "nobody@x.com", "pw1").await;
        assert!(matches!(result, Err(CloudDropError::Auth(_))));
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
        let db = Database::open_in_memory().await.unwrap();
        register(db.pool(), &test_params(), "a@x.com", "pw1")
            .await
            .unwrap();

        let unknown = verify_login(db.pool(), "nobody@x.com", "pw1")
            .await
            .unwrap_err();
        let wrong = verify_login(db.pool(), "a@x.com", "bad").await.unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_verify_login_legacy_plaintext_row() {
        let db = Database::open_in_memory().await.unwrap();

        // Simulate a pre-migration row stored with a plaintext credential
        let repo = UserRepository::new(db.pool());
        repo.create(&NewUser::new("legacy@x.com", "old-secret"))
            .await
            .unwrap();

        assert!(verify_login(db.pool(), "legacy@x.com", "old-secret")
            .await
            .is_ok());
        assert!(verify_login(db.pool(), "legacy@x.com", "wrong")
            .await
            .is_err());
    }
}
