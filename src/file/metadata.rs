//! Upload ledger types and repository for CloudDrop.
//!
//! The ledger records one row per stored blob, binding it to its owner,
//! original filename, and location within the blob store.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{CloudDropError, Result};

/// A ledger entry for one stored blob.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UploadRecord {
    /// Opaque unique identifier (uuid v4), assigned at creation.
    pub id: String,
    /// Owner's email. Weak reference to `users.email`: no cascading delete.
    pub owner_email: String,
    /// User-supplied filename, untrusted.
    pub original_name: String,
    /// System-generated filename within the owner's namespace.
    pub stored_name: String,
    /// `{namespace}/{stored_name}`, unique across the store.
    pub storage_path: String,
    /// When the upload was recorded.
    pub created_at: String,
}

impl UploadRecord {
    /// Parse the creation timestamp.
    pub fn created_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        crate::datetime::parse_sqlite_datetime(&self.created_at)
    }
}

/// Data for creating a new ledger entry.
#[derive(Debug, Clone)]
pub struct NewUpload {
    /// Owner's email.
    pub owner_email: String,
    /// User-supplied filename.
    pub original_name: String,
    /// Generated stored filename.
    pub stored_name: String,
    /// Blob location relative to the storage root.
    pub storage_path: String,
}

impl NewUpload {
    /// Create a new NewUpload.
    pub fn new(
        owner_email: impl Into<String>,
        original_name: impl Into<String>,
        stored_name: impl Into<String>,
        storage_path: impl Into<String>,
    ) -> Self {
        Self {
            owner_email: owner_email.into(),
            original_name: original_name.into(),
            stored_name: stored_name.into(),
            storage_path: storage_path.into(),
        }
    }
}

/// Repository for upload ledger operations.
pub struct UploadRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UploadRepository<'a> {
    /// Create a new UploadRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new ledger entry and return it with its assigned id.
    pub async fn insert(&self, new_upload: &NewUpload) -> Result<UploadRecord> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO uploads (id, owner_email, original_name, stored_name, storage_path)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&new_upload.owner_email)
        .bind(&new_upload.original_name)
        .bind(&new_upload.stored_name)
        .bind(&new_upload.storage_path)
        .execute(self.pool)
        .await?;

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| CloudDropError::NotFound("upload".to_string()))
    }

    /// List all uploads for an owner, newest first.
    ///
    /// `created_at` has second resolution, so the rowid breaks ties between
    /// uploads recorded within the same second.
    pub async fn list_by_owner(&self, owner_email: &str) -> Result<Vec<UploadRecord>> {
        let records = sqlx::query_as::<_, UploadRecord>(
            "SELECT id, owner_email, original_name, stored_name, storage_path, created_at
             FROM uploads WHERE owner_email = ?
             ORDER BY created_at DESC, rowid DESC",
        )
        .bind(owner_email)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    /// Look up a ledger entry by id.
    ///
    /// A malformed id is reported as a validation error rather than treated
    /// as merely absent, and never panics.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<UploadRecord>> {
        let id = Self::parse_id(id)?;

        let record = sqlx::query_as::<_, UploadRecord>(
            "SELECT id, owner_email, original_name, stored_name, storage_path, created_at
             FROM uploads WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    /// Delete a ledger entry by id.
    ///
    /// Returns `true` if a row was removed; deleting an absent id is a no-op.
    pub async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let id = Self::parse_id(id)?;

        let result = sqlx::query("DELETE FROM uploads WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count uploads for an owner.
    pub async fn count_by_owner(&self, owner_email: &str) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM uploads WHERE owner_email = ?")
            .bind(owner_email)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Validate and canonicalize an upload id.
    fn parse_id(id: &str) -> Result<String> {
        let parsed = Uuid::parse_str(id)
            .map_err(|_| CloudDropError::Validation(format!("malformed upload id: {id}")))?;
        Ok(parsed.to_string())
    }
}
