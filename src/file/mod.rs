//! File management module for CloudDrop.
//!
//! This module provides upload storage and lifecycle management:
//! - Per-owner blob namespaces with generated filenames
//! - The upload ledger binding blobs to their owners
//! - The lifecycle service keeping both consistent

mod metadata;
mod service;
mod storage;

pub use metadata::{NewUpload, UploadRecord, UploadRepository};
pub use service::{FetchResult, UploadService};
pub use storage::{FileStorage, StoredBlob};

/// Default maximum upload size (10MB).
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;
