//! Password hashing and verification for CloudDrop.
//!
//! Uses Argon2id for credential hashing. The work factor is configurable so
//! operators can tune hashing cost per deployment.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;

/// Maximum password length in bytes.
pub const MAX_PASSWORD_LENGTH: usize = 512;

/// Prefix shared by every PHC-formatted Argon2 hash this crate produces.
pub const HASH_PREFIX: &str = "$argon2";

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password is empty.
    #[error("password must not be empty")]
    Empty,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} bytes")]
    TooLong,

    /// Invalid work factor parameters.
    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Password hash is invalid.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password verification failed (wrong password).
    #[error("password verification failed")]
    VerificationFailed,
}

/// Argon2 work factor parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Time cost (iterations).
    pub iterations: u32,
    /// Parallelism (lanes).
    pub parallelism: u32,
}

impl Default for PasswordParams {
    fn default() -> Self {
        // 64 MB, 3 iterations, 4 lanes
        Self {
            memory_kib: 65536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Build the Argon2id hasher from work factor parameters.
fn create_argon2(params: &PasswordParams) -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        None,
    )
    .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

/// Hash a password using Argon2id.
///
/// Returns a PHC-formatted hash string that includes the salt and parameters.
pub fn hash_password(password: &str, params: &PasswordParams) -> Result<String, PasswordError> {
    validate_password(password)?;

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = create_argon2(params)?;
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash.
///
/// Returns `Ok(())` if the password matches, or an error if it doesn't.
/// The parameters are taken from the parsed hash, so credentials hashed
/// under an older work factor keep verifying.
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

/// Validate password requirements.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Low-cost parameters so the test suite stays fast.
    fn test_params() -> PasswordParams {
        PasswordParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_password_success() {
        let hash = hash_password("test_password_123", &test_params()).unwrap();

        // Should be a valid PHC string
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.starts_with(HASH_PREFIX));
        assert!(hash.contains("$v=19$")); // Version 0x13 = 19
    }

    #[test]
    fn test_hash_password_different_hashes() {
        let params = test_params();
        let hash1 = hash_password("same_password", &params).unwrap();
        let hash2 = hash_password("same_password", &params).unwrap();

        // Same password should produce different hashes (different salts)
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_hash_embeds_work_factor() {
        let hash = hash_password("test_password", &test_params()).unwrap();

        assert!(hash.contains("m=1024"));
        assert!(hash.contains("t=1"));
        assert!(hash.contains("p=1"));
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("correct_password", &test_params()).unwrap();
        assert!(verify_password("correct_password", &hash).is_ok());
    }

    #[test]
    fn test_verify_password_wrong() {
        let hash = hash_password("correct_password", &test_params()).unwrap();

        let result = verify_password("wrong_password", &hash);
        assert!(matches!(result, Err(PasswordError::VerificationFailed)));
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("any_password", "not_a_valid_hash");
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }

    #[test]
    fn test_verify_survives_work_factor_change() {
        // Hash under one work factor, verify with defaults: parameters come
        // from the stored hash, not from the active configuration.
        let hash = hash_password("portable_password", &test_params()).unwrap();
        assert!(verify_password("portable_password", &hash).is_ok());
    }

    #[test]
    fn test_validate_password_empty() {
        let result = validate_password("");
        assert!(matches!(result, Err(PasswordError::Empty)));
    }

    #[test]
    fn test_validate_password_short_is_allowed() {
        // Short passwords are accepted; length policy belongs to the caller.
        assert!(validate_password("pw1").is_ok());
    }

    #[test]
    fn test_validate_password_too_long() {
        let long_password = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        let result = validate_password(&long_password);
        assert!(matches!(result, Err(PasswordError::TooLong)));
    }

    #[test]
    fn test_hash_password_empty() {
        let result = hash_password("", &test_params());
        assert!(matches!(result, Err(PasswordError::Empty)));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = PasswordParams {
            memory_kib: 1, // below Argon2 minimum
            iterations: 1,
            parallelism: 1,
        };
        let result = hash_password("password", &params);
        assert!(matches!(result, Err(PasswordError::InvalidParams(_))));
    }

    #[test]
    fn test_password_with_unicode() {
        let password = "パスワード123";
        let hash = hash_password(password, &test_params()).unwrap();
        assert!(verify_password(password, &hash).is_ok());
    }

    #[test]
    fn test_password_error_display() {
        assert_eq!(
            PasswordError::Empty.to_string(),
            "password must not be empty"
        );
        assert_eq!(
            PasswordError::VerificationFailed.to_string(),
            "password verification failed"
        );
    }
}
