//! Mock stock repository for testing.

use crate::error::{Error, Result};
use crate::providers::StockRepository;
use crate::state::{Stock, StockId};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// In-memory stock repository.
#[derive(Debug, Clone, Default)]
pub struct MockStockRepository {
    stocks: Arc<Mutex<Vec<Stock>>>,
}

impl MockStockRepository {
    /// Create a new mock repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_err() -> Error {
    Error::Storage("mutex poisoned".to_string())
}

impl StockRepository for MockStockRepository {
    fn find(&self, stock_id: StockId) -> impl Future<Output = Result<Option<Stock>>> + Send {
        let stocks = Arc::clone(&self.stocks);

        async move {
            let guard = stocks.lock().map_err(|_| lock_err())?;
            Ok(guard.iter().find(|s| s.id == stock_id).cloned())
        }
    }

    fn create(&self, stock: &Stock) -> impl Future<Output = Result<Stock>> + Send {
        let stocks = Arc::clone(&self.stocks);
        let stock = stock.clone();

        async move {
            let mut guard = stocks.lock().map_err(|_| lock_err())?;

            if !stock.sku.is_empty() && guard.iter().any(|s| s.sku == stock.sku) {
                return Err(Error::Validation("sku already exists".to_string()));
            }

            guard.push(stock.clone());
            Ok(stock)
        }
    }

    fn update(&self, stock: &Stock) -> impl Future<Output = Result<Stock>> + Send {
        let stocks = Arc::clone(&self.stocks);
        let stock = stock.clone();

        async move {
            let mut guard = stocks.lock().map_err(|_| lock_err())?;

            let Some(slot) = guard.iter_mut().find(|s| s.id == stock.id) else {
                return Err(Error::not_found("Stock"));
            };

            *slot = stock.clone();
            Ok(stock)
        }
    }

    fn delete(&self, stock_id: StockId) -> impl Future<Output = Result<bool>> + Send {
        let stocks = Arc::clone(&self.stocks);

        async move {
            let mut guard = stocks.lock().map_err(|_| lock_err())?;
            let before = guard.len();
            guard.retain(|s| s.id != stock_id);
            Ok(guard.len() < before)
        }
    }

    fn list(&self) -> impl Future<Output = Result<Vec<Stock>>> + Send {
        let stocks = Arc::clone(&self.stocks);

        async move {
            let guard = stocks.lock().map_err(|_| lock_err())?;
            Ok(guard.clone())
        }
    }

    fn brands(&self) -> impl Future<Output = Result<Vec<String>>> + Send {
        let stocks = Arc::clone(&self.stocks);

        async move {
            let guard = stocks.lock().map_err(|_| lock_err())?;

            let mut brands: Vec<String> = guard
                .iter()
                .map(|s| s.brand.trim().to_string())
                .filter(|b| !b.is_empty())
                .collect();
            brands.sort();
            brands.dedup();

            Ok(brands)
        }
    }
}
