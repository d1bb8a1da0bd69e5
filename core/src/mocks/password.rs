//! Mock password hasher for testing.

use crate::error::Result;
use crate::providers::PasswordHasher;

/// Marker-prefix password hasher for tests.
///
/// Hashing is a reversible string marker so tests run at memory speed;
/// real hashing behavior is covered by the Argon2 implementation's own
/// tests.
#[derive(Debug, Clone, Default)]
pub struct MockPasswordHasher;

impl MockPasswordHasher {
    /// Create a new mock hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PasswordHasher for MockPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String> {
        Ok(format!("hashed:{plain}"))
    }

    fn verify(&self, plain: &str, phc: &str) -> Result<bool> {
        Ok(phc == format!("hashed:{plain}"))
    }
}
