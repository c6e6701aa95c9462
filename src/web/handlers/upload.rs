//! Upload handlers for the Web API.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::header,
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::file::UploadService;
use crate::web::dto::{DeleteResponse, UploadEntry, UploadResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::ClaimedUser;

/// Generate a safe Content-Disposition header value for file downloads.
///
/// Control characters are stripped (CR/LF would allow header injection),
/// quotes and backslashes are replaced in the ASCII fallback, and non-ASCII
/// names get an RFC 5987 `filename*` parameter.
fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' => '_',
            '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && !filename.chars().any(|c| c.is_control() || c == '"' || c == '\\') {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let encoded = urlencoding::encode(filename);

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized, encoded
    )
}

/// GET /api/uploads - List the caller's uploads, newest first.
pub async fn list_uploads(
    State(state): State<Arc<AppState>>,
    ClaimedUser(user): ClaimedUser,
) -> Result<Json<Vec<UploadEntry>>, ApiError> {
    let service = UploadService::new(state.db.pool(), &state.storage);
    let records = service.list(&user).await.map_err(ApiError::from)?;

    let entries = records.iter().map(UploadEntry::from_record).collect();
    Ok(Json(entries))
}

/// GET /api/uploads/file/:id - Download one upload.
///
/// An unknown id and an upload owned by someone else both answer 404.
pub async fn download_upload(
    State(state): State<Arc<AppState>>,
    ClaimedUser(user): ClaimedUser,
    Path(id): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let service = UploadService::new(state.db.pool(), &state.storage);
    let fetched = service.fetch(&user, &id).await.map_err(ApiError::from)?;

    let content_type = mime_guess::from_path(&fetched.record.original_name)
        .first_or_octet_stream()
        .to_string();

    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&fetched.record.original_name),
        )
        .header(header::CONTENT_LENGTH, fetched.content.len())
        .body(Body::from(fetched.content))
        .map_err(|e| {
            tracing::error!("Failed to build download response: {}", e);
            ApiError::internal("Failed to build response")
        })?;

    Ok(response)
}

/// DELETE /api/uploads/:id - Delete one upload.
pub async fn delete_upload(
    State(state): State<Arc<AppState>>,
    ClaimedUser(user): ClaimedUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let service = UploadService::new(state.db.pool(), &state.storage);
    service.delete(&user, &id).await.map_err(ApiError::from)?;

    Ok(Json(DeleteResponse { status: "deleted" }))
}

/// POST /upload - Accept a multipart upload (field `file`).
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    ClaimedUser(user): ClaimedUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut filename: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        if field.name() == Some("file") {
            filename = field.file_name().map(|s| s.to_string());
            content = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to read file content: {}", e);
                        ApiError::bad_request("Failed to read file")
                    })?
                    .to_vec(),
            );
        }
    }

    let (filename, content) = match (filename, content) {
        (Some(filename), Some(content)) => (filename, content),
        _ => return Err(ApiError::bad_request("No file uploaded")),
    };

    let service = UploadService::new(state.db.pool(), &state.storage)
        .with_max_upload_size(state.max_upload_size);
    let record = service
        .create(&user, &filename, &content)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UploadResponse::from_record(&record)))
}
