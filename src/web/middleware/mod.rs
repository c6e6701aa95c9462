//! Middleware for the Web API.

pub mod auth;
pub mod cors;

pub use auth::{ClaimedUser, IDENTITY_HEADER};
pub use cors::create_cors_layer;
