//! Mock token service for testing.

use crate::error::{Error, Result};
use crate::providers::TokenService;
use crate::state::{Identity, UserId};
use chrono::{DateTime, Utc};

/// Transparent token service for tests.
///
/// Encodes the identity directly into the token string, so tests can
/// mint admin and non-admin credentials without signing keys. Tokens
/// never expire; expiry behavior is covered by the JWT implementation's
/// own tests.
#[derive(Debug, Clone, Default)]
pub struct MockTokenService;

impl MockTokenService {
    /// Create a new mock token service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TokenService for MockTokenService {
    fn issue(&self, identity: &Identity) -> Result<String> {
        Ok(format!(
            "mock.{}.{}.{}",
            identity.user_id.0,
            identity.is_admin,
            identity.issued_at.timestamp()
        ))
    }

    fn verify(&self, token: &str, _now: DateTime<Utc>) -> Result<Identity> {
        let mut parts = token.split('.');

        let (Some("mock"), Some(user), Some(admin), Some(iat), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(Error::TokenInvalid);
        };

        let user_id = user.parse().map_err(|_| Error::TokenInvalid)?;
        let is_admin = admin.parse().map_err(|_| Error::TokenInvalid)?;
        let issued_at = iat
            .parse()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or(Error::TokenInvalid)?;

        Ok(Identity {
            user_id: UserId(user_id),
            is_admin,
            issued_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let service = MockTokenService::new();
        let identity = Identity {
            user_id: UserId::new(),
            is_admin: true,
            issued_at: Utc::now(),
        };

        let token = service.issue(&identity).unwrap();
        let verified = service.verify(&token, Utc::now()).unwrap();

        assert_eq!(verified.user_id, identity.user_id);
        assert!(verified.is_admin);
    }

    #[test]
    fn test_garbage_rejected() {
        let service = MockTokenService::new();
        assert_eq!(
            service.verify("definitely-not-a-token", Utc::now()),
            Err(Error::TokenInvalid)
        );
    }
}
