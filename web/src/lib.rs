//! Axum HTTP shell for the Stockroom inventory backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP, JSON, bearer tokens
//! │  - Request parsing, CORS, tracing       │
//! │  - CurrentUser extractor (Auth Gate)    │
//! ├─────────────────────────────────────────┤
//! │         Core (stockroom-core)           │
//! │  - Login throttle over the ledger       │
//! │  - Quota workflow state machine         │
//! │  - Document operations over ports       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Request Flow
//!
//! 1. **HTTP request** arrives at an Axum handler
//! 2. **Extract** identity (bearer token), path ids, JSON body
//! 3. **Call** the core operation with the concrete providers
//! 4. **Map** the domain result to an HTTP response via [`AppError`]

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use config::AppConfig;
pub use error::AppError;
pub use extractors::{CorrelationId, CurrentUser};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
pub use router::api_router;
pub use state::AppEnv;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
