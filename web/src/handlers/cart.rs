//! Cart and quota-workflow handlers.
//!
//! The `:id` path segment is a stock id for toggle, request-quota, and
//! mark-handled, and a cart-entry id for quota-status — mirroring how
//! decisions address entries directly.

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::state::AppEnv;
use axum::{Json, extract::Path, extract::State, http::StatusCode};
use chrono::Utc;
use serde::Deserialize;
use stockroom_core::cart::{self, CartItemView, StockCartOverview, ToggleOutcome};
use stockroom_core::providers::{
    CartStore, FailureLedger, FavoriteStore, InquiryStore, PasswordHasher, StockRepository,
    TokenService, UserRepository,
};
use stockroom_core::quota::{self, Decision};
use stockroom_core::state::{CartEntry, CartEntryId, StockId};
use uuid::Uuid;

/// Quota request body.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaRequestBody {
    /// Requested amount; must be at least 1.
    pub amount: u32,
}

/// Decision wire values.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    /// Approve the request.
    Approved,
    /// Reject the request.
    Rejected,
}

/// Quota decision body.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaDecisionBody {
    /// Approve or reject.
    pub status: DecisionStatus,

    /// Optional reason, recorded on rejection.
    #[serde(default)]
    pub reason: Option<String>,
}

/// List the caller's cart with quota detail.
///
/// # Endpoint
///
/// ```text
/// GET /api/cart
/// ```
///
/// # Errors
///
/// Returns 500 if a store is unavailable.
pub async fn get_cart<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    CurrentUser(identity): CurrentUser,
) -> Result<(StatusCode, Json<Vec<CartItemView>>), AppError>
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
    let items = cart::user_cart(&env.cart, &env.stocks, identity.user_id).await?;
    Ok((StatusCode::OK, Json(items)))
}

/// Toggle a stock item in or out of the caller's cart.
///
/// Removing the entry discards any quota state it carried.
///
/// # Endpoint
///
/// ```text
/// PATCH /api/cart/:id        (:id = stock id)
/// ```
///
/// # Errors
///
/// Returns 404 for an unknown stock item.
pub async fn toggle<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ToggleOutcome>), AppError>
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
    let outcome = cart::toggle_entry(
        &env.cart,
        &env.stocks,
        identity.user_id,
        StockId(id),
        Utc::now(),
    )
    .await?;

    Ok((StatusCode::OK, Json(outcome)))
}

/// Every cart entry grouped by stock with per-user quota detail; admin.
///
/// # Endpoint
///
/// ```text
/// GET /api/cart/all
/// ```
///
/// # Errors
///
/// Returns 403 for non-admin callers.
pub async fn all_carts<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    CurrentUser(identity): CurrentUser,
) -> Result<(StatusCode, Json<Vec<StockCartOverview>>), AppError>
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
    let overview = cart::overview(&env.cart, &env.stocks, &env.users, &identity).await?;
    Ok((StatusCode::OK, Json(overview)))
}

/// Request a quota for a stock item.
///
/// A repeat request supersedes the previous one, whatever its state.
///
/// # Endpoint
///
/// ```text
/// POST /api/cart/:id/request-quota        (:id = stock id)
/// ```
///
/// # Errors
///
/// Returns 400 for an amount below 1, 404 for an unknown stock item.
pub async fn request_quota<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<QuotaRequestBody>,
) -> Result<(StatusCode, Json<CartEntry>), AppError>
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
    let entry = quota::request(
        &env.cart,
        &env.stocks,
        identity.user_id,
        StockId(id),
        body.amount,
        Utc::now(),
    )
    .await?;

    Ok((StatusCode::OK, Json(entry)))
}

/// Approve or reject a quota request; admin.
///
/// # Endpoint
///
/// ```text
/// PATCH /api/cart/:id/quota-status        (:id = cart entry id)
/// ```
///
/// # Errors
///
/// Returns 403 for non-admin callers, 404 for an unknown entry.
pub async fn decide_quota<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<QuotaDecisionBody>,
) -> Result<(StatusCode, Json<CartEntry>), AppError>
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
    let decision = match body.status {
        DecisionStatus::Approved => Decision::Approved,
        DecisionStatus::Rejected => Decision::Rejected { reason: body.reason },
    };

    let entry = quota::decide(&env.cart, &identity, CartEntryId(id), decision, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(entry)))
}

/// Flag one decided quota request for a stock item as fulfilled; admin.
///
/// One entry per call; repeat until 404 to clear a stock item's queue.
///
/// # Endpoint
///
/// ```text
/// PATCH /api/cart/:id/mark-handled        (:id = stock id)
/// ```
///
/// # Errors
///
/// Returns 403 for non-admin callers, 404 when nothing is waiting.
pub async fn mark_handled<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<CartEntry>), AppError>
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
    let entry = quota::mark_handled(&env.cart, &identity, StockId(id), Utc::now()).await?;
    Ok((StatusCode::OK, Json(entry)))
}
