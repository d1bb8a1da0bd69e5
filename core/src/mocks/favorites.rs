//! Mock favorite store for testing.

use crate::error::{Error, Result};
use crate::providers::FavoriteStore;
use crate::state::{FavoriteEntry, StockId, UserId};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// In-memory favorite store.
#[derive(Debug, Clone, Default)]
pub struct MockFavoriteStore {
    favorites: Arc<Mutex<Vec<FavoriteEntry>>>,
}

impl MockFavoriteStore {
    /// Create a new mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_err() -> Error {
    Error::Storage("mutex poisoned".to_string())
}

impl FavoriteStore for MockFavoriteStore {
    fn find(
        &self,
        user_id: UserId,
        stock_id: StockId,
    ) -> impl Future<Output = Result<Option<FavoriteEntry>>> + Send {
        let favorites = Arc::clone(&self.favorites);

        async move {
            let guard = favorites.lock().map_err(|_| lock_err())?;
            Ok(guard
                .iter()
                .find(|f| f.user_id == user_id && f.stock_id == stock_id)
                .copied())
        }
    }

    fn insert(
        &self,
        favorite: &FavoriteEntry,
    ) -> impl Future<Output = Result<FavoriteEntry>> + Send {
        let favorites = Arc::clone(&self.favorites);
        let favorite = *favorite;

        async move {
            let mut guard = favorites.lock().map_err(|_| lock_err())?;

            if guard
                .iter()
                .any(|f| f.user_id == favorite.user_id && f.stock_id == favorite.stock_id)
            {
                return Err(Error::Storage("favorite already exists".to_string()));
            }

            guard.push(favorite);
            Ok(favorite)
        }
    }

    fn delete(
        &self,
        user_id: UserId,
        stock_id: StockId,
    ) -> impl Future<Output = Result<bool>> + Send {
        let favorites = Arc::clone(&self.favorites);

        async move {
            let mut guard = favorites.lock().map_err(|_| lock_err())?;
            let before = guard.len();
            guard.retain(|f| !(f.user_id == user_id && f.stock_id == stock_id));
            Ok(guard.len() < before)
        }
    }

    fn list_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<FavoriteEntry>>> + Send {
        let favorites = Arc::clone(&self.favorites);

        async move {
            let guard = favorites.lock().map_err(|_| lock_err())?;
            Ok(guard.iter().filter(|f| f.user_id == user_id).copied().collect())
        }
    }
}
