//! Stored credential classification.
//!
//! Early deployments of the service stored some passwords as plaintext.
//! Rows are classified once when loaded, by the PHC prefix, instead of
//! re-sniffing the stored string at every comparison. New registrations
//! always produce hashed credentials; the plaintext arm exists only so
//! pre-migration accounts can still log in.

use crate::auth::password::{verify_password, HASH_PREFIX};

/// A stored password credential, classified at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// PHC-formatted Argon2 hash.
    Hashed(String),
    /// Legacy plaintext value. Migration hazard: any account still carrying
    /// one of these should be rehashed out-of-band.
    Plaintext(String),
}

impl Credential {
    /// Classify a stored credential string.
    pub fn parse(stored: &str) -> Self {
        if stored.starts_with(HASH_PREFIX) {
            Credential::Hashed(stored.to_string())
        } else {
            Credential::Plaintext(stored.to_string())
        }
    }

    /// Check a candidate password against this credential.
    pub fn matches(&self, password: &str) -> bool {
        match self {
            Credential::Hashed(hash) => verify_password(password, hash).is_ok(),
            Credential::Plaintext(stored) => {
                tracing::warn!("plaintext credential comparison for a legacy account");
                stored == password
            }
        }
    }

    /// Whether this credential is a legacy plaintext value.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Credential::Plaintext(_))
    }
}
