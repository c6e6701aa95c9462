//! Claimed-identity resolution middleware.
//!
//! Every request asserts its identity as a bare email in the `x-user-email`
//! header; there is no token issuance and no server-side session state. The
//! claim is re-validated against the user store on every request.
//!
//! Security hazard, kept for behavioral parity with the deployed contract:
//! any caller who knows a valid email can impersonate that user. A redesign
//! must replace this with signed, expiring session tokens.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

use crate::db::{User, UserRepository};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Name of the identity header.
pub const IDENTITY_HEADER: &str = "x-user-email";

/// Extractor for the request's resolved identity.
///
/// Handlers taking this extractor require a known user; the resolved record
/// is handed over for ownership checks.
#[derive(Debug, Clone)]
pub struct ClaimedUser(pub User);

impl FromRequestParts<Arc<AppState>> for ClaimedUser {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let email = parts
                .headers
                .get(IDENTITY_HEADER)
                .and_then(|value| value.to_str().ok())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ApiError::unauthorized("Missing user identity"))?;

            let repo = UserRepository::new(state.db.pool());
            let user = repo
                .get_by_email(email)
                .await
                .map_err(ApiError::from)?
                .ok_or_else(|| {
                    tracing::debug!(email, "request claimed an unknown identity");
                    ApiError::unauthorized("User not found")
                })?;

            Ok(ClaimedUser(user))
        })
    }
}
