//! Authentication module for CloudDrop.
//!
//! This module provides password hashing, stored-credential classification,
//! account registration, and login verification.

mod credential;
mod login;
mod password;
mod registration;

pub use credential::Credential;
pub use login::verify_login;
pub use password::{
    hash_password, validate_password, verify_password, PasswordError, PasswordParams,
    HASH_PREFIX, MAX_PASSWORD_LENGTH,
};
pub use registration::register;
