//! Customer inquiry handlers: public create and listing.

use crate::error::AppError;
use crate::state::AppEnv;
use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::Deserialize;
use stockroom_core::providers::{
    CartStore, FailureLedger, FavoriteStore, InquiryStore, PasswordHasher, StockRepository,
    TokenService, UserRepository,
};
use stockroom_core::state::{Inquiry, InquiryId};
use stockroom_core::utils::is_valid_email;

/// Contact-form submission.
#[derive(Debug, Clone, Deserialize)]
pub struct NewInquiry {
    /// Sender name.
    pub name: String,

    /// Sender email.
    pub email: String,

    /// Message body.
    pub message: String,
}

/// List every inquiry, newest first; public.
///
/// # Endpoint
///
/// ```text
/// GET /api/inquiries
/// ```
///
/// # Errors
///
/// Returns 500 if the store is unavailable.
pub async fn list_inquiries<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
) -> Result<(StatusCode, Json<Vec<Inquiry>>), AppError>
where
    U: UserRepository + Clone + 'static,
    S: StockRepository + Clone + 'static,
    C: CartStore + Clone + 'static,
    F: FavoriteStore + Clone + 'static,
    N: InquiryStore + Clone + 'static,
    L: FailureLedger + Clone + 'static,
    T: TokenService + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let inquiries = env.inquiries.list().await?;
    Ok((StatusCode::OK, Json(inquiries)))
}

/// Submit an inquiry; public.
///
/// # Endpoint
///
/// ```text
/// POST /api/inquiries
/// ```
///
/// # Errors
///
/// Returns 400 for a blank name or message, or a malformed email.
pub async fn create_inquiry<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    Json(request): Json<NewInquiry>,
) -> Result<(StatusCode, Json<Inquiry>), AppError>
where
    U: UserRepository + Clone + 'static,
    S: StockRepository + Clone + 'static,
    C: CartStore + Clone + 'static,
    F: FavoriteStore + Clone + 'static,
    N: InquiryStore + Clone + 'static,
    L: FailureLedger + Clone + 'static,
    T: TokenService + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    if request.name.trim().is_empty() {
        return Err(AppError::bad_request("Name is required"));
    }
    if !is_valid_email(&request.email) {
        return Err(AppError::bad_request("Email must be a valid address"));
    }
    if request.message.trim().is_empty() {
        return Err(AppError::bad_request("Message is required"));
    }

    let inquiry = env
        .inquiries
        .insert(&Inquiry {
            id: InquiryId::new(),
            name: request.name,
            email: request.email,
            message: request.message,
            created_at: Utc::now(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(inquiry)))
}
