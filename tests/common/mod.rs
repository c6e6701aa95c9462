//! Shared scaffolding for Web API integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use axum::http::HeaderName;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

use clouddrop::auth::PasswordParams;
use clouddrop::db::Database;
use clouddrop::file::FileStorage;
use clouddrop::web::handlers::AppState;
use clouddrop::web::middleware::IDENTITY_HEADER;
use clouddrop::web::router::{create_health_router, create_router};

/// Low-cost Argon2 parameters so the test suite stays fast.
fn test_password_params() -> PasswordParams {
    PasswordParams {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}

/// Create a test server backed by an in-memory database and a temp blob root.
///
/// The TempDir must stay alive for the duration of the test.
pub async fn create_test_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let storage = FileStorage::new(temp_dir.path()).expect("Failed to create test storage");

    let app_state = Arc::new(
        AppState::new(db, storage).with_password_params(test_password_params()),
    );

    let router = create_router(app_state, &[]).merge(create_health_router());
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, temp_dir)
}

/// Header pair asserting the given identity.
pub fn identity_header(email: &str) -> (HeaderName, String) {
    (HeaderName::from_static(IDENTITY_HEADER), email.to_string())
}

/// Register a user and assert success.
pub async fn register_user(server: &TestServer, email: &str, password: &str) {
    let response = server
        .post("/api/register")
        .json(&json!({ "email": email, "password": password }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
}

/// Upload a file for the given identity, returning the response body.
pub async fn upload_file(
    server: &TestServer,
    email: &str,
    filename: &str,
    content: &[u8],
) -> Value {
    let (name, value) = identity_header(email);
    let form = MultipartForm::new()
        .add_part("file", Part::bytes(content.to_vec()).file_name(filename));

    let response = server
        .post("/upload")
        .add_header(name, value)
        .multipart(form)
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}

/// Extract the upload id from an upload response's url field.
pub fn upload_id(body: &Value) -> String {
    let url = body["url"].as_str().expect("upload response missing url");
    url.rsplit('/')
        .next()
        .expect("upload url has no id segment")
        .to_string()
}
