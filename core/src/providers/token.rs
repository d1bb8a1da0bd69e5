//! Token service trait and the JWT implementation.
//!
//! The core treats bearer credentials as opaque: it only ever sees the
//! [`TokenService`] contract, never how tokens are minted or stored.

use crate::config::TokenConfig;
use crate::error::{Error, Result};
use crate::state::{Identity, UserId};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Opaque bearer-credential service.
///
/// Verification is pure computation over the credential string, so the
/// methods are synchronous; the explicit `now` keeps expiry checks
/// deterministic under test.
pub trait TokenService: Send + Sync {
    /// Mint a credential for the given identity.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if signing fails.
    fn issue(&self, identity: &Identity) -> Result<String>;

    /// Verify a credential and recover the identity it carries.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The credential is malformed or mis-signed → `Error::TokenInvalid`
    /// - The credential is past its expiry → `Error::TokenExpired`
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Identity>;
}

/// Signed claims carried by an issued token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Account the token was issued for.
    sub: uuid::Uuid,

    /// Admin role flag.
    is_admin: bool,

    /// Issued-at, seconds since the epoch.
    iat: i64,

    /// Expiry, seconds since the epoch.
    exp: i64,
}

/// HS256 JWT token service.
///
/// # Example
///
/// ```
/// use stockroom_core::config::TokenConfig;
/// use stockroom_core::providers::{JwtTokenService, TokenService};
/// use stockroom_core::state::{Identity, UserId};
/// use chrono::Utc;
///
/// let service = JwtTokenService::new(&TokenConfig::new("secret".to_string()));
/// let identity = Identity { user_id: UserId::new(), is_admin: false, issued_at: Utc::now() };
///
/// let token = service.issue(&identity).unwrap();
/// let verified = service.verify(&token, Utc::now()).unwrap();
/// assert_eq!(verified.user_id, identity.user_id);
/// ```
#[derive(Clone)]
pub struct JwtTokenService {
    /// Signing key.
    encoding: EncodingKey,

    /// Verification key.
    decoding: DecodingKey,

    /// Token lifetime.
    ttl: chrono::Duration,
}

impl JwtTokenService {
    /// Create a token service from configuration.
    #[must_use]
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: config.ttl,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, identity: &Identity) -> Result<String> {
        let claims = Claims {
            sub: identity.user_id.0,
            is_admin: identity.is_admin,
            iat: identity.issued_at.timestamp(),
            exp: (identity.issued_at + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| Error::Storage(format!("failed to sign token: {e}")))
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Identity> {
        // Expiry is checked against the caller's `now`, not the wall clock
        // jsonwebtoken would consult on its own.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| Error::TokenInvalid)?;

        if data.claims.exp <= now.timestamp() {
            return Err(Error::TokenExpired);
        }

        let issued_at =
            DateTime::from_timestamp(data.claims.iat, 0).ok_or(Error::TokenInvalid)?;

        Ok(Identity {
            user_id: UserId(data.claims.sub),
            is_admin: data.claims.is_admin,
            issued_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn service() -> JwtTokenService {
        JwtTokenService::new(&TokenConfig::new("test-secret".to_string()))
    }

    fn identity(is_admin: bool) -> Identity {
        Identity {
            user_id: UserId::new(),
            is_admin,
            issued_at: Utc::now(),
        }
    }

    #[test]
    fn test_round_trip_carries_role() {
        let service = service();
        let admin = identity(true);

        let token = service.issue(&admin).unwrap();
        let verified = service.verify(&token, Utc::now()).unwrap();

        assert_eq!(verified.user_id, admin.user_id);
        assert!(verified.is_admin);
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let service = service();

        assert_eq!(
            service.verify("not-a-token", Utc::now()),
            Err(Error::TokenInvalid)
        );
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let issuing = service();
        let verifying = JwtTokenService::new(&TokenConfig::new("other-secret".to_string()));

        let token = issuing.issue(&identity(false)).unwrap();

        assert_eq!(
            verifying.verify(&token, Utc::now()),
            Err(Error::TokenInvalid)
        );
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = service();
        let token = service.issue(&identity(false)).unwrap();

        let after_expiry = Utc::now() + Duration::hours(25);

        assert_eq!(
            service.verify(&token, after_expiry),
            Err(Error::TokenExpired)
        );
    }
}
