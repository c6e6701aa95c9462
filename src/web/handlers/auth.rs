//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::auth::{register as register_account, verify_login};
use crate::web::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Pull both credential fields out of a request body, or answer 400.
fn require_credentials(
    email: Option<String>,
    password: Option<String>,
) -> Result<(String, String), ApiError> {
    match (email, password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(ApiError::bad_request("Email and password are required")),
    }
}

/// POST /api/register - Create a new account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let (email, password) = require_credentials(req.email, req.password)?;

    let user = register_account(state.db.pool(), &state.password_params, &email, &password)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            email: user.email,
            status: "created",
        }),
    ))
}

/// POST /api/login - Verify credentials.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (email, password) = require_credentials(req.email, req.password)?;

    let user = verify_login(state.db.pool(), &email, &password)
        .await
        .map_err(|e| match e {
            crate::CloudDropError::Auth(_) => ApiError::unauthorized("Invalid credentials"),
            other => ApiError::from(other),
        })?;

    Ok(Json(LoginResponse {
        email: user.email,
        status: "ok",
    }))
}
