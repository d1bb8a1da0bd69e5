//! Password hashing trait and the Argon2 implementation.

use crate::error::{Error, Result};
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};

/// Password hashing collaborator.
///
/// The core never sees plaintext passwords beyond handing them to this
/// trait, and never compares hashes itself.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a PHC-format string.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if hashing fails.
    fn hash(&self, plain: &str) -> Result<String>;

    /// Verify a plaintext password against a stored PHC string.
    ///
    /// A mismatch is `Ok(false)`, not an error; errors are reserved for
    /// malformed hashes and hasher failures.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the stored hash is malformed or the
    /// verifier fails.
    fn verify(&self, plain: &str, phc: &str) -> Result<bool>;
}

/// Argon2id password hasher with default parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a new Argon2 hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| Error::Storage(format!("failed to hash password: {e}")))
    }

    fn verify(&self, plain: &str, phc: &str) -> Result<bool> {
        let parsed = PasswordHash::new(phc)
            .map_err(|e| Error::Storage(format!("malformed password hash: {e}")))?;

        match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(Error::Storage(format!("failed to verify password: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = Argon2PasswordHasher::new();

        let phc = hasher.hash("hunter42pass").unwrap();
        assert!(phc.starts_with("$argon2"));

        assert!(hasher.verify("hunter42pass", &phc).unwrap());
        assert!(!hasher.verify("wrong-password", &phc).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_storage_error() {
        let hasher = Argon2PasswordHasher::new();

        let result = hasher.verify("whatever", "not-a-phc-string");
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = Argon2PasswordHasher::new();

        let a = hasher.hash("same-password1").unwrap();
        let b = hasher.hash("same-password1").unwrap();

        assert_ne!(a, b);
    }
}
