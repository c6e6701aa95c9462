//! API handlers for the Web API.

pub mod auth;
pub mod upload;

pub use auth::*;
pub use upload::*;

use crate::auth::PasswordParams;
use crate::db::Database;
use crate::file::{FileStorage, DEFAULT_MAX_UPLOAD_SIZE};

/// Application state shared across handlers.
///
/// Constructed once at startup and passed to every component that needs it;
/// there are no ambient globals, so store readiness is a property of this
/// object's construction.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (pooled).
    pub db: Database,
    /// Blob storage rooted at the configured upload directory.
    pub storage: FileStorage,
    /// Argon2 work factor for new registrations.
    pub password_params: PasswordParams,
    /// Maximum accepted upload size in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, storage: FileStorage) -> Self {
        Self {
            db,
            storage,
            password_params: PasswordParams::default(),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }

    /// Set the Argon2 work factor.
    pub fn with_password_params(mut self, params: PasswordParams) -> Self {
        self.password_params = params;
        self
    }

    /// Set the maximum upload size in bytes.
    pub fn with_max_upload_size(mut self, max_size: u64) -> Self {
        self.max_upload_size = max_size;
        self
    }
}
