//! Core configuration.
//!
//! Configuration values should be provided by the application, not
//! hardcoded; defaults here are for local development only.

use chrono::Duration;

/// Bearer-token configuration.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC signing secret for issued tokens.
    pub secret: String,

    /// Token lifetime.
    ///
    /// Default: 24 hours
    pub ttl: Duration,
}

impl TokenConfig {
    /// Create new token configuration with the given signing secret.
    #[must_use]
    pub const fn new(secret: String) -> Self {
        Self {
            secret,
            ttl: Duration::hours(24),
        }
    }

    /// Set token lifetime.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "dev-secret-change-me".to_string(),
            ttl: Duration::hours(24),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_config_builder() {
        let config = TokenConfig::new("s3cr3t".to_string()).with_ttl(Duration::hours(1));

        assert_eq!(config.secret, "s3cr3t");
        assert_eq!(config.ttl, Duration::hours(1));
    }

    #[test]
    fn test_default_config() {
        let config = TokenConfig::default();
        assert_eq!(config.ttl, Duration::hours(24));
    }
}
