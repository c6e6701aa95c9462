//! Request DTOs for the Web API.

use serde::Deserialize;

/// Body of POST /api/register.
///
/// Fields are optional at the serde level so a missing field answers 400
/// from the handler instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Email address.
    pub email: Option<String>,
    /// Password.
    pub password: Option<String>,
}

/// Body of POST /api/login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: Option<String>,
    /// Password.
    pub password: Option<String>,
}
