//! Router composition.
//!
//! Composes every resource's handlers into the application router, with
//! CORS, request tracing, and correlation-id layers applied to all of it.

use crate::handlers::{cart, favorites, health, inquiries, stocks, users};
use crate::middleware::correlation_id_layer;
use crate::state::AppEnv;
use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, patch, post},
};
use stockroom_core::providers::{
    CartStore, FailureLedger, FavoriteStore, InquiryStore, PasswordHasher, StockRepository,
    TokenService, UserRepository,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the application router with all endpoints.
///
/// # Routes
///
/// ## Users
/// - `POST /api/users` - Register
/// - `POST /api/users/login` - Login (throttled after repeated failures)
/// - `GET /api/users` - List users (admin)
/// - `GET /api/users/:id` - Get user
/// - `PUT /api/users/:id` - Update user (owner or admin)
/// - `DELETE /api/users/:id` - Delete user (owner)
///
/// ## Stocks
/// - `GET /api/stocks`, `GET /api/stocks/brands`, `GET /api/stocks/:id`
/// - `POST /api/stocks`, `PATCH /api/stocks/:id`, `DELETE /api/stocks/:id`
///
/// ## Cart & quota
/// - `GET /api/cart` - Caller's cart with quota detail
/// - `PATCH /api/cart/:id` - Toggle entry (stock id)
/// - `GET /api/cart/all` - Grouped overview (admin)
/// - `POST /api/cart/:id/request-quota` - Request quota (stock id)
/// - `PATCH /api/cart/:id/quota-status` - Decide (admin, entry id)
/// - `PATCH /api/cart/:id/mark-handled` - Fulfill one (admin, stock id)
///
/// ## Favorites & inquiries
/// - `GET /api/favorites`, `PATCH /api/favorites/:id`
/// - `GET /api/inquiries`, `POST /api/inquiries`
pub fn api_router<U, S, C, F, N, L, T, H>(env: AppEnv<U, S, C, F, N, L, T, H>) -> Router
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
    Router::new()
        .route("/health", get(health::health_check))

        // User routes
        .route(
            "/api/users",
            post(users::register::<U, S, C, F, N, L, T, H>)
                .get(users::list_users::<U, S, C, F, N, L, T, H>),
        )
        .route("/api/users/login", post(users::login::<U, S, C, F, N, L, T, H>))
        .route(
            "/api/users/:id",
            get(users::get_user::<U, S, C, F, N, L, T, H>)
                .put(users::update_user::<U, S, C, F, N, L, T, H>)
                .delete(users::delete_user::<U, S, C, F, N, L, T, H>),
        )

        // Stock routes
        .route(
            "/api/stocks",
            get(stocks::list_stocks::<U, S, C, F, N, L, T, H>)
                .post(stocks::create_stock::<U, S, C, F, N, L, T, H>),
        )
        .route("/api/stocks/brands", get(stocks::brands::<U, S, C, F, N, L, T, H>))
        .route(
            "/api/stocks/:id",
            get(stocks::get_stock::<U, S, C, F, N, L, T, H>)
                .patch(stocks::update_stock::<U, S, C, F, N, L, T, H>)
                .delete(stocks::delete_stock::<U, S, C, F, N, L, T, H>),
        )

        // Cart & quota routes
        .route("/api/cart", get(cart::get_cart::<U, S, C, F, N, L, T, H>))
        .route("/api/cart/all", get(cart::all_carts::<U, S, C, F, N, L, T, H>))
        .route("/api/cart/:id", patch(cart::toggle::<U, S, C, F, N, L, T, H>))
        .route(
            "/api/cart/:id/request-quota",
            post(cart::request_quota::<U, S, C, F, N, L, T, H>),
        )
        .route(
            "/api/cart/:id/quota-status",
            patch(cart::decide_quota::<U, S, C, F, N, L, T, H>),
        )
        .route(
            "/api/cart/:id/mark-handled",
            patch(cart::mark_handled::<U, S, C, F, N, L, T, H>),
        )

        // Favorite routes
        .route("/api/favorites", get(favorites::list_favorites::<U, S, C, F, N, L, T, H>))
        .route("/api/favorites/:id", patch(favorites::toggle::<U, S, C, F, N, L, T, H>))

        // Inquiry routes
        .route(
            "/api/inquiries",
            get(inquiries::list_inquiries::<U, S, C, F, N, L, T, H>)
                .post(inquiries::create_inquiry::<U, S, C, F, N, L, T, H>),
        )

        .fallback(route_not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(env)
}

/// Fallback for unknown paths.
#[allow(clippy::unused_async)]
async fn route_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Route not found" })),
    )
}
