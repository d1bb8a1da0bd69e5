//! Application configuration from the environment.

use anyhow::Context as _;
use chrono::Duration;
use stockroom_core::config::TokenConfig;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to listen on. `PORT`, default 5000.
    pub port: u16,

    /// PostgreSQL connection URL. `DATABASE_URL`, required.
    pub database_url: String,

    /// Redis connection URL for the failure ledger. `REDIS_URL`,
    /// default `redis://127.0.0.1:6379`.
    pub redis_url: String,

    /// Bearer-token settings. Secret from `JWT_SECRET` (required),
    /// lifetime from `TOKEN_TTL_HOURS` (default 24).
    pub token: TokenConfig,
}

impl AppConfig {
    /// Read configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if a required variable is missing or a numeric
    /// variable fails to parse.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT must be a port number")?,
            Err(_) => 5000,
        };

        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let redis_url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let ttl_hours = match std::env::var("TOKEN_TTL_HOURS") {
            Ok(raw) => raw.parse().context("TOKEN_TTL_HOURS must be a number")?,
            Err(_) => 24,
        };

        Ok(Self {
            port,
            database_url,
            redis_url,
            token: TokenConfig::new(secret).with_ttl(Duration::hours(ttl_hours)),
        })
    }
}
