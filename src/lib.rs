//! CloudDrop - a small self-hosted file drop.
//!
//! Users register with email and password, then upload, list, download,
//! and delete their own files. Blobs live in per-user directories under a
//! configurable root; a SQLite ledger binds each blob to its owner.

pub mod auth;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, register, validate_password, verify_login, verify_password, Credential,
    PasswordError, PasswordParams,
};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{CloudDropError, Result};
pub use file::{FileStorage, NewUpload, UploadRecord, UploadRepository, UploadService};
pub use web::WebServer;
