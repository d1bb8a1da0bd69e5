//! Cart entry store trait.
//!
//! The `(user, stock)` uniqueness enforced by [`CartStore::upsert`] is
//! load-bearing for the quota workflow: it is what prevents split quota
//! state for the same item.

use crate::error::Result;
use crate::state::{CartEntry, CartEntryId, StockId, UserId};

/// Keyed store over `(user_id, stock_id)` cart entries.
pub trait CartStore: Send + Sync {
    /// Get the entry for a `(user, stock)` pair, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn find(
        &self,
        user_id: UserId,
        stock_id: StockId,
    ) -> impl std::future::Future<Output = Result<Option<CartEntry>>> + Send;

    /// Get an entry by its id, or `None` if absent.
    ///
    /// Quota decisions address entries this way.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn find_by_id(
        &self,
        entry_id: CartEntryId,
    ) -> impl std::future::Future<Output = Result<Option<CartEntry>>> + Send;

    /// Insert the entry, or return the existing one for the same
    /// `(user, stock)` pair.
    ///
    /// A second upsert for a pair never creates a duplicate: the stored
    /// entry (with its original id and quota state) is returned instead.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn upsert(
        &self,
        entry: &CartEntry,
    ) -> impl std::future::Future<Output = Result<CartEntry>> + Send;

    /// Overwrite an entry by id, as one atomic write.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The entry no longer exists → `Error::NotFound`
    /// - The query fails → `Error::Storage`
    fn update(
        &self,
        entry: &CartEntry,
    ) -> impl std::future::Future<Output = Result<CartEntry>> + Send;

    /// Remove the entry for a `(user, stock)` pair, discarding its quota
    /// state with it.
    ///
    /// # Returns
    ///
    /// `true` if an entry was removed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn delete(
        &self,
        user_id: UserId,
        stock_id: StockId,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    /// All entries owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn list_by_user(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<CartEntry>>> + Send;

    /// All entries referencing a stock item, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn list_by_stock(
        &self,
        stock_id: StockId,
    ) -> impl std::future::Future<Output = Result<Vec<CartEntry>>> + Send;

    /// Every cart entry in the system.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn list_all(&self) -> impl std::future::Future<Output = Result<Vec<CartEntry>>> + Send;
}
