//! User repository for CloudDrop.

use sqlx::SqlitePool;

use super::user::{NewUser, User};
use crate::{CloudDropError, Result};

/// Repository for user persistence.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID. A duplicate email is
    /// rejected by the unique index and surfaces as `Conflict`, which also
    /// covers two concurrent registrations of the same email.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (email, password) VALUES (?, ?)")
            .bind(&new_user.email)
            .bind(&new_user.password)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if e.to_string().contains("UNIQUE") {
                    CloudDropError::Conflict("email already registered".to_string())
                } else {
                    CloudDropError::from(e)
                }
            })?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| CloudDropError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, email, password, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get a user by exact email match.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, email, password, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Check whether an email is already registered.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
                .bind(email)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_by_email() {
        let db = setup().await;
        let repo = UserRepository::new(db.pool());

        let user = repo
            .create(&NewUser::new("a@x.com", "$argon2id$hash"))
            .await
            .unwrap();
        assert_eq!(user.email, "a@x.com");
        assert!(user.id > 0);
        assert!(!user.created_at.is_empty());

        let found = repo.get_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.password, "$argon2id$hash");
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let db = setup().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("a@x.com", "h1")).await.unwrap();
        let result = repo.create(&NewUser::new("a@x.com", "h2")).await;

        assert!(matches!(result, Err(CloudDropError::Conflict(_))));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_email_is_case_sensitive() {
        let db = setup().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("a@x.com", "h1")).await.unwrap();

        // A different casing is a different identity
        assert!(repo.get_by_email("A@X.COM").await.unwrap().is_none());
        assert!(repo.create(&NewUser::new("A@X.COM", "h2")).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_by_email_missing() {
        let db = setup().await;
        let repo = UserRepository::new(db.pool());

        assert!(repo.get_by_email("nobody@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_exists() {
        let db = setup().await;
        let repo = UserRepository::new(db.pool());

        assert!(!repo.email_exists("a@x.com").await.unwrap());
        repo.create(&NewUser::new("a@x.com", "h1")).await.unwrap();
        assert!(repo.email_exists("a@x.com").await.unwrap());
    }
}
