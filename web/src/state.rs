//! Application environment for Axum handlers.
//!
//! This module defines the environment type for dependency injection
//! into handlers: one field per port the core consumes.

use stockroom_core::providers::{
    CartStore, FailureLedger, FavoriteStore, InquiryStore, PasswordHasher, StockRepository,
    TokenService, UserRepository,
};

/// Application environment.
///
/// Contains every external dependency the handlers need. Cloned per
/// request by Axum; the providers themselves hold cheaply-clonable pool
/// handles.
///
/// # Type Parameters
///
/// - `U`: User repository
/// - `S`: Stock repository
/// - `C`: Cart store
/// - `F`: Favorite store
/// - `N`: Inquiry store
/// - `L`: Failure ledger
/// - `T`: Token service
/// - `H`: Password hasher
#[derive(Clone)]
pub struct AppEnv<U, S, C, F, N, L, T, H>
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
    /// User repository (`PostgreSQL`).
    pub users: U,

    /// Stock repository (`PostgreSQL`).
    pub stocks: S,

    /// Cart store (`PostgreSQL`).
    pub cart: C,

    /// Favorite store (`PostgreSQL`).
    pub favorites: F,

    /// Inquiry store (`PostgreSQL`).
    pub inquiries: N,

    /// Login-failure ledger (`Redis`).
    pub ledger: L,

    /// Bearer-token service.
    pub tokens: T,

    /// Password hasher.
    pub hasher: H,
}

impl<U, S, C, F, N, L, T, H> AppEnv<U, S, C, F, N, L, T, H>
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
    /// Create a new application environment.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: U,
        stocks: S,
        cart: C,
        favorites: F,
        inquiries: N,
        ledger: L,
        tokens: T,
        hasher: H,
    ) -> Self {
        Self {
            users,
            stocks,
            cart,
            favorites,
            inquiries,
            ledger,
            tokens,
            hasher,
        }
    }
}
