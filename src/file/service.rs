//! Upload lifecycle service for CloudDrop.
//!
//! This module orchestrates the upload lifecycle across the blob store and
//! the upload ledger:
//! - Create: blob write, then ledger insert
//! - List: ledger only
//! - Fetch/Delete: ledger lookup with ownership check, then blob access
//!
//! Ownership failures collapse into `NotFound` so a caller cannot tell
//! "does not exist" from "exists but is not yours".

use sqlx::SqlitePool;
use tracing::{error, warn};

use crate::db::User;
use crate::{CloudDropError, Result};

use super::metadata::{NewUpload, UploadRecord, UploadRepository};
use super::storage::FileStorage;
use super::DEFAULT_MAX_UPLOAD_SIZE;

/// Result of fetching an upload.
#[derive(Debug)]
pub struct FetchResult {
    /// The ledger entry.
    pub record: UploadRecord,
    /// Blob content.
    pub content: Vec<u8>,
}

/// Service coordinating the blob store and the upload ledger.
pub struct UploadService<'a> {
    pool: &'a SqlitePool,
    storage: &'a FileStorage,
    max_upload_size: u64,
}

impl<'a> UploadService<'a> {
    /// Create a new UploadService.
    pub fn new(pool: &'a SqlitePool, storage: &'a FileStorage) -> Self {
        Self {
            pool,
            storage,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }

    /// Create a new UploadService with a custom max upload size.
    pub fn with_max_upload_size(mut self, max_size: u64) -> Self {
        self.max_upload_size = max_size;
        self
    }

    /// Store an upload for `owner` and record it in the ledger.
    ///
    /// The blob is written first. If the ledger insert then fails, the blob
    /// stays on disk as an orphan: the write already succeeded, and silently
    /// unwinding it would make a retried upload lose data. The orphan is
    /// logged for operator cleanup.
    pub async fn create(
        &self,
        owner: &User,
        original_name: &str,
        content: &[u8],
    ) -> Result<UploadRecord> {
        if original_name.is_empty() {
            return Err(CloudDropError::Validation(
                "filename is required".to_string(),
            ));
        }
        if content.len() as u64 > self.max_upload_size {
            return Err(CloudDropError::Validation(format!(
                "file too large (max {} bytes)",
                self.max_upload_size
            )));
        }

        let namespace = FileStorage::namespace_for(&owner.email);
        let blob = self.storage.write(&namespace, original_name, content)?;

        let repo = UploadRepository::new(self.pool);
        let new_upload = NewUpload::new(
            &owner.email,
            original_name,
            &blob.stored_name,
            &blob.relative_path,
        );

        match repo.insert(&new_upload).await {
            Ok(record) => Ok(record),
            Err(e) => {
                error!(
                    owner = %owner.email,
                    path = %blob.relative_path,
                    error = %e,
                    "ledger insert failed after blob write; blob is orphaned"
                );
                Err(e)
            }
        }
    }

    /// List the owner's uploads, newest first. No blob access.
    pub async fn list(&self, owner: &User) -> Result<Vec<UploadRecord>> {
        UploadRepository::new(self.pool)
            .list_by_owner(&owner.email)
            .await
    }

    /// Fetch an upload's record and content.
    ///
    /// A record whose blob has gone missing surfaces `NotFound` on the read.
    pub async fn fetch(&self, owner: &User, id: &str) -> Result<FetchResult> {
        let record = self.find_owned(owner, id).await?;
        let content = self.storage.read(&record.storage_path)?;

        Ok(FetchResult { record, content })
    }

    /// Delete an upload.
    ///
    /// The blob is removed before the record so a crash mid-operation leaves
    /// at worst a record pointing at a missing blob, never an untracked blob.
    /// Blob removal is best-effort: failures are logged, not surfaced.
    pub async fn delete(&self, owner: &User, id: &str) -> Result<()> {
        let record = self.find_owned(owner, id).await?;

        match self.storage.delete(&record.storage_path) {
            Ok(true) => {}
            Ok(false) => {
                warn!(path = %record.storage_path, "blob already gone at delete");
            }
            Err(e) => {
                warn!(path = %record.storage_path, error = %e, "failed to delete blob");
            }
        }

        UploadRepository::new(self.pool)
            .delete_by_id(&record.id)
            .await?;

        Ok(())
    }

    /// Look up a record and verify ownership.
    ///
    /// Both an unknown id and someone else's record come back as `NotFound`.
    async fn find_owned(&self, owner: &User, id: &str) -> Result<UploadRecord> {
        let record = UploadRepository::new(self.pool)
            .find_by_id(id)
            .await?
            .ok_or_else(|| CloudDropError::NotFound("upload".to_string()))?;

        if record.owner_email != owner.email {
            return Err(CloudDropError::NotFound("upload".to_string()));
        }

        Ok(record)
    }
}
