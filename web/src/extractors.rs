//! Custom Axum extractors.
//!
//! - `CurrentUser`: the Auth Gate — verifies the bearer credential and
//!   attaches the caller's identity to the request
//! - `CorrelationId`: extract or generate request correlation IDs
//!
//! # Examples
//!
//! ```ignore
//! async fn handler(
//!     State(env): State<AppEnv<...>>,
//!     CurrentUser(identity): CurrentUser,
//! ) -> Result<Json<Response>, AppError> {
//!     tracing::info!(account = %identity.user_id.0, "processing request");
//!     Ok(Json(response))
//! }
//! ```

use crate::error::AppError;
use crate::state::AppEnv;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;
use stockroom_core::providers::{
    CartStore, FailureLedger, FavoriteStore, InquiryStore, PasswordHasher, StockRepository,
    TokenService, UserRepository,
};
use stockroom_core::state::Identity;
use uuid::Uuid;

/// Verified caller identity, extracted from the `Authorization` header.
///
/// Accepts `Bearer <token>` as well as a raw token value. Verification
/// failures reject the request before the handler runs; role checks stay
/// in the core operations.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Identity);

#[async_trait]
impl<U, S, C, F, N, L, T, H> FromRequestParts<AppEnv<U, S, C, F, N, L, T, H>> for CurrentUser
where
    U: UserRepository + Clone,
    S: StockRepository + Clone,
    C: CartStore + Clone,
    F: FavoriteStore + Clone,
    N: InquiryStore + Clone,
    L: FailureLedger + Clone,
    T: TokenService + Clone,
    H: PasswordHasher + Clone,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        env: &AppEnv<U, S, C, F, N, L, T, H>,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
            return Err(AppError::unauthorized(
                "No token provided. Please login to access this resource.",
            ));
        };

        let value = value
            .to_str()
            .map_err(|_| AppError::bad_request("Invalid authorization header"))?;

        // Bearer prefix is optional; the original middleware accepted both.
        let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
        if token.is_empty() {
            return Err(AppError::unauthorized("Invalid token format"));
        }

        let identity = env.tokens.verify(token, Utc::now())?;

        Ok(Self(identity))
    }
}

/// Correlation ID for request tracing.
///
/// Extracts the correlation ID from the `X-Correlation-ID` header,
/// or generates a new UUID v4 if not present.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<St> FromRequestParts<St> for CorrelationId
where
    St: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        let correlation_id = parts
            .headers
            .get("X-Correlation-ID")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}
