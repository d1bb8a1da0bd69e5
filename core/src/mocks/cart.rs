//! Mock cart store for testing.

use crate::error::{Error, Result};
use crate::providers::CartStore;
use crate::state::{CartEntry, CartEntryId, StockId, UserId};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// In-memory cart store.
///
/// Entries are kept in insertion order, so "first match" behavior in the
/// quota workflow is deterministic under test.
#[derive(Debug, Clone, Default)]
pub struct MockCartStore {
    entries: Arc<Mutex<Vec<CartEntry>>>,
}

impl MockCartStore {
    /// Create a new mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_err() -> Error {
    Error::Storage("mutex poisoned".to_string())
}

impl CartStore for MockCartStore {
    fn find(
        &self,
        user_id: UserId,
        stock_id: StockId,
    ) -> impl Future<Output = Result<Option<CartEntry>>> + Send {
        let entries = Arc::clone(&self.entries);

        async move {
            let guard = entries.lock().map_err(|_| lock_err())?;
            Ok(guard
                .iter()
                .find(|e| e.user_id == user_id && e.stock_id == stock_id)
                .cloned())
        }
    }

    fn find_by_id(
        &self,
        entry_id: CartEntryId,
    ) -> impl Future<Output = Result<Option<CartEntry>>> + Send {
        let entries = Arc::clone(&self.entries);

        async move {
            let guard = entries.lock().map_err(|_| lock_err())?;
            Ok(guard.iter().find(|e| e.id == entry_id).cloned())
        }
    }

    fn upsert(&self, entry: &CartEntry) -> impl Future<Output = Result<CartEntry>> + Send {
        let entries = Arc::clone(&self.entries);
        let entry = entry.clone();

        async move {
            let mut guard = entries.lock().map_err(|_| lock_err())?;

            // One entry per (user, stock): the existing entry wins.
            if let Some(existing) = guard
                .iter()
                .find(|e| e.user_id == entry.user_id && e.stock_id == entry.stock_id)
            {
                return Ok(existing.clone());
            }

            guard.push(entry.clone());
            Ok(entry)
        }
    }

    fn update(&self, entry: &CartEntry) -> impl Future<Output = Result<CartEntry>> + Send {
        let entries = Arc::clone(&self.entries);
        let entry = entry.clone();

        async move {
            let mut guard = entries.lock().map_err(|_| lock_err())?;

            let Some(slot) = guard.iter_mut().find(|e| e.id == entry.id) else {
                return Err(Error::not_found("Cart entry"));
            };

            *slot = entry.clone();
            Ok(entry)
        }
    }

    fn delete(
        &self,
        user_id: UserId,
        stock_id: StockId,
    ) -> impl Future<Output = Result<bool>> + Send {
        let entries = Arc::clone(&self.entries);

        async move {
            let mut guard = entries.lock().map_err(|_| lock_err())?;
            let before = guard.len();
            guard.retain(|e| !(e.user_id == user_id && e.stock_id == stock_id));
            Ok(guard.len() < before)
        }
    }

    fn list_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<CartEntry>>> + Send {
        let entries = Arc::clone(&self.entries);

        async move {
            let guard = entries.lock().map_err(|_| lock_err())?;
            Ok(guard.iter().filter(|e| e.user_id == user_id).cloned().collect())
        }
    }

    fn list_by_stock(
        &self,
        stock_id: StockId,
    ) -> impl Future<Output = Result<Vec<CartEntry>>> + Send {
        let entries = Arc::clone(&self.entries);

        async move {
            let guard = entries.lock().map_err(|_| lock_err())?;
            Ok(guard.iter().filter(|e| e.stock_id == stock_id).cloned().collect())
        }
    }

    fn list_all(&self) -> impl Future<Output = Result<Vec<CartEntry>>> + Send {
        let entries = Arc::clone(&self.entries);

        async move {
            let guard = entries.lock().map_err(|_| lock_err())?;
            Ok(guard.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_upsert_returns_existing_for_same_pair() {
        let store = MockCartStore::new();
        let user = UserId::new();
        let stock = StockId::new();
        let now = Utc::now();

        let first = store.upsert(&CartEntry::new(user, stock, now)).await.unwrap();
        let second = store.upsert(&CartEntry::new(user, stock, now)).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_discards_entry() {
        let store = MockCartStore::new();
        let user = UserId::new();
        let stock = StockId::new();

        store
            .upsert(&CartEntry::new(user, stock, Utc::now()))
            .await
            .unwrap();

        assert!(store.delete(user, stock).await.unwrap());
        assert!(!store.delete(user, stock).await.unwrap());
        assert!(store.find(user, stock).await.unwrap().is_none());
    }
}
