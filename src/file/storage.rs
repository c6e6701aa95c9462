//! Blob storage for CloudDrop.
//!
//! This module provides physical file storage:
//! - Per-owner namespace directories derived from the owner's email
//! - UUID-based stored names that keep the original extension
//! - Write, read, and delete operations over an injected root directory

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use uuid::Uuid;

use crate::{CloudDropError, Result};

/// Location of a stored blob, relative to the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Generated filename within the namespace.
    pub stored_name: String,
    /// `{namespace}/{stored_name}`, unique across the store.
    pub relative_path: String,
}

/// File storage service for uploaded blobs.
///
/// Blobs are grouped by owner namespace:
/// ```text
/// {base_path}/
/// ├── alice_example.com/
/// │   └── 5f6f2c1e-....txt
/// └── bob_example.com/
///     └── 9a1d03b7-....pdf
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory for file storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new FileStorage with the given base path.
    ///
    /// The base directory will be created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Derive a filesystem-safe namespace directory name from an email.
    ///
    /// Every character outside `[A-Za-z0-9._-]` becomes `_`. Distinct emails
    /// can collapse to the same namespace (e.g. `a+b@x.com` and `a_b@x.com`);
    /// stored names stay unique regardless, but the collision itself is a
    /// known hazard of this scheme.
    pub fn namespace_for(email: &str) -> String {
        email
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// Write content into a namespace under a freshly generated stored name.
    ///
    /// The namespace directory is created if needed. Returns the generated
    /// stored name and the blob's path relative to the storage root.
    pub fn write(
        &self,
        namespace: &str,
        original_name: &str,
        content: &[u8],
    ) -> Result<StoredBlob> {
        let stored_name = Self::generate_stored_name(original_name);
        let relative_path = format!("{namespace}/{stored_name}");

        let file_path = self.resolve(&relative_path)?;
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&file_path, content)?;

        Ok(StoredBlob {
            stored_name,
            relative_path,
        })
    }

    /// Load a blob's content.
    pub fn read(&self, relative_path: &str) -> Result<Vec<u8>> {
        let file_path = self.resolve(relative_path)?;

        match fs::read(&file_path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(CloudDropError::NotFound(format!("blob {relative_path}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a blob.
    ///
    /// Returns `true` if the file was deleted, `false` if it was already
    /// gone. Absence is not an error.
    pub fn delete(&self, relative_path: &str) -> Result<bool> {
        let file_path = self.resolve(relative_path)?;

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a blob exists.
    pub fn exists(&self, relative_path: &str) -> bool {
        self.resolve(relative_path)
            .map(|p| p.exists())
            .unwrap_or(false)
    }

    /// Resolve a relative path against the storage root.
    ///
    /// Rejects absolute paths and any path containing `..` so a crafted
    /// ledger entry cannot escape the root.
    fn resolve(&self, relative_path: &str) -> Result<PathBuf> {
        let rel = Path::new(relative_path);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if relative_path.is_empty() || escapes {
            return Err(CloudDropError::Validation(format!(
                "invalid storage path: {relative_path}"
            )));
        }
        Ok(self.base_path.join(rel))
    }

    /// Generate a new UUID-based stored name, keeping the original extension.
    ///
    /// A name without an extension stays extensionless.
    pub fn generate_stored_name(original_name: &str) -> String {
        let uuid = Uuid::new_v4();
        match Path::new(original_name)
            .extension()
            .and_then(|s| s.to_str())
        {
            Some(ext) => format!("{uuid}.{ext}"),
            None => uuid.to_string(),
        }
    }
}
