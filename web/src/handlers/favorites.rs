//! Favorite handlers: list and toggle.

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::state::AppEnv;
use axum::{Json, extract::Path, extract::State, http::StatusCode};
use chrono::Utc;
use serde::Serialize;
use stockroom_core::providers::{
    CartStore, FailureLedger, FavoriteStore, InquiryStore, PasswordHasher, StockRepository,
    TokenService, UserRepository,
};
use stockroom_core::state::{FavoriteEntry, Stock, StockId};
use uuid::Uuid;

/// A stock item with its favorite flag for the caller.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteView {
    /// The stock item.
    pub stock: Stock,

    /// Whether the caller currently has it favorited.
    pub is_favorite: bool,
}

/// List the caller's favorites, joined with the stock items.
///
/// Favorites whose stock item has since been deleted are skipped.
///
/// # Endpoint
///
/// ```text
/// GET /api/favorites
/// ```
///
/// # Errors
///
/// Returns 500 if a store is unavailable.
pub async fn list_favorites<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    CurrentUser(identity): CurrentUser,
) -> Result<(StatusCode, Json<Vec<FavoriteView>>), AppError>
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
    let favorites = env.favorites.list_by_user(identity.user_id).await?;

    let mut views = Vec::with_capacity(favorites.len());
    for favorite in favorites {
        let Some(stock) = env.stocks.find(favorite.stock_id).await? else {
            continue;
        };
        views.push(FavoriteView { stock, is_favorite: true });
    }

    Ok((StatusCode::OK, Json(views)))
}

/// Toggle a stock item in or out of the caller's favorites.
///
/// # Endpoint
///
/// ```text
/// PATCH /api/favorites/:id        (:id = stock id)
/// ```
///
/// # Errors
///
/// Returns 404 for an unknown stock item.
pub async fn toggle<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<FavoriteView>), AppError>
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
    let stock_id = StockId(id);

    let Some(stock) = env.stocks.find(stock_id).await? else {
        return Err(AppError::not_found("Stock not found"));
    };

    let is_favorite = if env.favorites.find(identity.user_id, stock_id).await?.is_some() {
        env.favorites.delete(identity.user_id, stock_id).await?;
        false
    } else {
        env.favorites
            .insert(&FavoriteEntry {
                user_id: identity.user_id,
                stock_id,
                created_at: Utc::now(),
            })
            .await?;
        true
    };

    Ok((StatusCode::OK, Json(FavoriteView { stock, is_favorite })))
}
