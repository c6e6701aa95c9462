//! Response DTOs for the Web API.

use serde::Serialize;

use crate::file::UploadRecord;

/// Body of a successful POST /api/register.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Registered email.
    pub email: String,
    /// Always "created".
    pub status: &'static str,
}

/// Body of a successful POST /api/login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Authenticated email.
    pub email: String,
    /// Always "ok".
    pub status: &'static str,
}

/// One entry of GET /api/uploads.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadEntry {
    /// Upload id.
    pub id: String,
    /// Stored (generated) filename.
    pub name: String,
    /// User-supplied filename.
    pub original_name: String,
    /// Download URL for this upload.
    pub url: String,
}

impl UploadEntry {
    /// Project a ledger record into its listing shape.
    pub fn from_record(record: &UploadRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.stored_name.clone(),
            original_name: record.original_name.clone(),
            url: download_url(&record.id),
        }
    }
}

/// Body of a successful POST /upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Human-readable confirmation.
    pub message: &'static str,
    /// Download path for the new upload.
    pub file_path: String,
    /// Stored (generated) filename.
    pub stored_name: String,
    /// User-supplied filename.
    pub original_name: String,
    /// Download URL (same as `file_path`).
    pub url: String,
}

impl UploadResponse {
    /// Build the upload confirmation for a freshly created record.
    pub fn from_record(record: &UploadRecord) -> Self {
        let url = download_url(&record.id);
        Self {
            message: "File uploaded successfully",
            file_path: url.clone(),
            stored_name: record.stored_name.clone(),
            original_name: record.original_name.clone(),
            url,
        }
    }
}

/// Body of a successful DELETE /api/uploads/:id.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Always "deleted".
    pub status: &'static str,
}

/// Download URL for an upload id.
pub fn download_url(id: &str) -> String {
    format!("/api/uploads/file/{id}")
}
