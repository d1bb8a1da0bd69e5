//! HTTP handlers, one module per resource.
//!
//! Handlers stay thin: they parse the request, call the core operation,
//! and map the result. Authorization decisions live in the core; the
//! [`CurrentUser`](crate::extractors::CurrentUser) extractor only
//! authenticates.

pub mod cart;
pub mod favorites;
pub mod health;
pub mod inquiries;
pub mod stocks;
pub mod users;
