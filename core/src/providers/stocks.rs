//! Stock repository trait.

use crate::error::Result;
use crate::state::{Stock, StockId};

/// Stock item repository.
pub trait StockRepository: Send + Sync {
    /// Get stock item by id, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn find(
        &self,
        stock_id: StockId,
    ) -> impl std::future::Future<Output = Result<Option<Stock>>> + Send;

    /// Create a stock item.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - A non-empty sku collides with an existing item → `Error::Validation`
    /// - The query fails → `Error::Storage`
    fn create(
        &self,
        stock: &Stock,
    ) -> impl std::future::Future<Output = Result<Stock>> + Send;

    /// Overwrite a stock document.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The item does not exist → `Error::NotFound`
    /// - The query fails → `Error::Storage`
    fn update(
        &self,
        stock: &Stock,
    ) -> impl std::future::Future<Output = Result<Stock>> + Send;

    /// Delete a stock item by id.
    ///
    /// # Returns
    ///
    /// `true` if a document was removed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn delete(
        &self,
        stock_id: StockId,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    /// All stock items.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Stock>>> + Send;

    /// Distinct non-empty brand names.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn brands(&self) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}
