//! Router configuration for the Web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{
    delete_upload, download_upload, list_uploads, login, register, upload_file, AppState,
};
use super::middleware::create_cors_layer;

/// Slack added on top of the upload limit for multipart framing overhead.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/uploads", get(list_uploads))
        .route("/uploads/file/:id", get(download_upload))
        .route("/uploads/:id", delete(delete_upload));

    let body_limit = app_state.max_upload_size + MULTIPART_OVERHEAD;

    Router::new()
        .nest("/api", api_routes)
        .route("/upload", post(upload_file))
        .layer(DefaultBodyLimit::max(body_limit as usize))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create a router serving the static browser frontend, if the directory exists.
pub fn create_static_router(static_path: &str) -> Option<Router> {
    let path = Path::new(static_path);
    if !path.is_dir() {
        tracing::warn!(
            "Static path {:?} does not exist; frontend will not be served",
            path
        );
        return None;
    }

    Some(Router::new().fallback_service(ServeDir::new(path)))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }

    #[test]
    fn test_create_static_router_missing_dir() {
        assert!(create_static_router("definitely/not/a/real/dir").is_none());
    }
}
