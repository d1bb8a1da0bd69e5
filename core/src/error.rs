//! Error types for inventory and authentication operations.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the inventory backend.
///
/// Every failure mode a caller can observe is a distinct variant here;
/// nothing is retried or masked inside the core. A `Storage` failure
/// propagates for an outer layer to handle.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    // ═══════════════════════════════════════════════════════════
    // Input Errors
    // ═══════════════════════════════════════════════════════════

    /// Malformed or out-of-range input (e.g. quota amount below 1).
    #[error("invalid input: {0}")]
    Validation(String),

    // ═══════════════════════════════════════════════════════════
    // Authentication Errors
    // ═══════════════════════════════════════════════════════════

    /// Email/password pair did not match an account.
    #[error("email or password are incorrect")]
    InvalidCredentials,

    /// Bearer token failed verification.
    #[error("invalid authentication token")]
    TokenInvalid,

    /// Bearer token is past its expiry.
    #[error("authentication token has expired")]
    TokenExpired,

    // ═══════════════════════════════════════════════════════════
    // Authorization Errors
    // ═══════════════════════════════════════════════════════════

    /// Caller lacks the required role or ownership.
    #[error("insufficient permissions: {required}")]
    Forbidden {
        /// Required permission that was missing.
        required: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Login Throttling
    // ═══════════════════════════════════════════════════════════

    /// Too many failed login attempts inside the failure window.
    #[error("too many login attempts, retry after {retry_after:?}")]
    Throttled {
        /// Duration to wait before the window can roll over.
        retry_after: Duration,
    },

    // ═══════════════════════════════════════════════════════════
    // Lookup Errors
    // ═══════════════════════════════════════════════════════════

    /// Referenced entity does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// Human-readable name of the missing resource.
        resource: &'static str,
    },

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// Collaborator I/O failure (database, Redis, signing key).
    #[error("storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Shorthand for a [`Error::NotFound`] with the given resource name.
    #[must_use]
    pub const fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    /// Returns `true` if this error is due to invalid user input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stockroom_core::Error;
    /// assert!(Error::Validation("bad amount".into()).is_user_error());
    /// assert!(!Error::Storage("connection refused".into()).is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidCredentials
                | Self::TokenInvalid
                | Self::Forbidden { .. }
                | Self::NotFound { .. }
        )
    }

    /// Returns `true` if this error indicates abuse pressure worth alerting on.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stockroom_core::Error;
    /// # use std::time::Duration;
    /// assert!(Error::Throttled { retry_after: Duration::from_secs(60) }.is_security_issue());
    /// assert!(!Error::TokenExpired.is_security_issue());
    /// ```
    #[must_use]
    pub const fn is_security_issue(&self) -> bool {
        matches!(self, Self::Throttled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::InvalidCredentials.to_string(),
            "email or password are incorrect"
        );
        assert_eq!(
            Error::not_found("Stock").to_string(),
            "Stock not found"
        );
    }

    #[test]
    fn test_user_error_classification() {
        assert!(Error::InvalidCredentials.is_user_error());
        assert!(Error::Forbidden { required: "admin".into() }.is_user_error());
        assert!(!Error::TokenExpired.is_user_error());
        assert!(!Error::Storage("boom".into()).is_user_error());
    }
}
