//! User account handlers: register, login, lookup, update, delete.

use crate::error::AppError;
use crate::extractors::{CorrelationId, CurrentUser};
use crate::state::AppEnv;
use axum::{Json, extract::Path, extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use stockroom_core::accounts::{self, NewUser, UserPatch};
use stockroom_core::login::attempt_login;
use stockroom_core::providers::{
    CartStore, FailureLedger, FavoriteStore, InquiryStore, PasswordHasher, StockRepository,
    TokenService, UserRepository,
};
use stockroom_core::state::{User, UserId};
use uuid::Uuid;

/// Login request body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,

    /// Account password.
    pub password: String,
}

/// Login response: the bearer token to present on authenticated calls.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Signed bearer token.
    pub token: String,
}

/// Register a new account.
///
/// # Endpoint
///
/// ```text
/// POST /api/users
/// ```
///
/// # Errors
///
/// Propagates validation failures (including a taken email) as 400.
pub async fn register<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    Json(request): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError>
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
    let user = accounts::register(&env.users, &env.hasher, request, Utc::now()).await?;
    Ok((StatusCode::OK, Json(user)))
}

/// Attempt a login; returns a bearer token.
///
/// # Endpoint
///
/// ```text
/// POST /api/users/login
/// ```
///
/// # Errors
///
/// Returns 400 for a bad pair and 429 once the account is throttled.
pub async fn login<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    correlation_id: CorrelationId,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), AppError>
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
    tracing::debug!(correlation_id = %correlation_id.0, "login attempt");

    let token = attempt_login(
        &env.users,
        &env.ledger,
        &env.hasher,
        &env.tokens,
        &request.email,
        &request.password,
        Utc::now(),
    )
    .await?;

    Ok((StatusCode::OK, Json(LoginResponse { token })))
}

/// List every account; admin only.
///
/// # Endpoint
///
/// ```text
/// GET /api/users
/// ```
///
/// # Errors
///
/// Returns 403 for non-admin callers.
pub async fn list_users<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    CurrentUser(identity): CurrentUser,
) -> Result<(StatusCode, Json<Vec<User>>), AppError>
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
    let users = accounts::list_users(&env.users, &identity).await?;
    Ok((StatusCode::OK, Json(users)))
}

/// Get a single account; public.
///
/// # Endpoint
///
/// ```text
/// GET /api/users/:id
/// ```
///
/// # Errors
///
/// Returns 404 for an unknown id.
pub async fn get_user<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<User>), AppError>
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
    let user = accounts::get_user(&env.users, UserId(id)).await?;
    Ok((StatusCode::OK, Json(user)))
}

/// Update an account; owner or admin.
///
/// # Endpoint
///
/// ```text
/// PUT /api/users/:id
/// ```
///
/// # Errors
///
/// Returns 403 when the caller is neither owner nor admin, 404 for an
/// unknown id.
pub async fn update_user<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UserPatch>,
) -> Result<(StatusCode, Json<User>), AppError>
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
    let user = accounts::update_user(&env.users, &identity, UserId(id), patch).await?;
    Ok((StatusCode::OK, Json(user)))
}

/// Delete an account; owner only.
///
/// # Endpoint
///
/// ```text
/// DELETE /api/users/:id
/// ```
///
/// # Errors
///
/// Returns 403 for anyone but the owner, 404 for an unknown id.
pub async fn delete_user<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<User>), AppError>
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
    let user = accounts::delete_user(&env.users, &identity, UserId(id)).await?;
    Ok((StatusCode::OK, Json(user)))
}
