//! Favorite store trait.

use crate::error::Result;
use crate::state::{FavoriteEntry, StockId, UserId};

/// Keyed store over `(user_id, stock_id)` favorite marks.
pub trait FavoriteStore: Send + Sync {
    /// Get the favorite for a `(user, stock)` pair, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn find(
        &self,
        user_id: UserId,
        stock_id: StockId,
    ) -> impl std::future::Future<Output = Result<Option<FavoriteEntry>>> + Send;

    /// Insert a favorite mark.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails or the pair already
    /// exists.
    fn insert(
        &self,
        favorite: &FavoriteEntry,
    ) -> impl std::future::Future<Output = Result<FavoriteEntry>> + Send;

    /// Remove the favorite for a `(user, stock)` pair.
    ///
    /// # Returns
    ///
    /// `true` if a mark was removed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn delete(
        &self,
        user_id: UserId,
        stock_id: StockId,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    /// All favorites owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn list_by_user(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<FavoriteEntry>>> + Send;
}
