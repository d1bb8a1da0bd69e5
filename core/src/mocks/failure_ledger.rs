//! Mock failure ledger for testing.

use crate::error::{Error, Result};
use crate::providers::FailureLedger;
use crate::state::UserId;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::constants::throttle::MAX_RECORDED_FAILURES;

/// In-memory failure ledger.
///
/// Keeps per-account timestamps sorted, evicting from the front once the
/// cap is exceeded — the same evict-on-insert contract the Redis ledger
/// provides.
#[derive(Debug, Clone, Default)]
pub struct MockFailureLedger {
    /// Map of account -> sorted failure timestamps.
    records: Arc<Mutex<HashMap<UserId, Vec<DateTime<Utc>>>>>,
}

impl MockFailureLedger {
    /// Create a new mock ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Retained timestamps for an account, oldest first.
    ///
    /// Test helper; not part of the [`FailureLedger`] contract.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn snapshot(&self, account: UserId) -> Vec<DateTime<Utc>> {
        self.records
            .lock()
            .unwrap()
            .get(&account)
            .cloned()
            .unwrap_or_default()
    }
}

impl FailureLedger for MockFailureLedger {
    fn record(
        &self,
        account: UserId,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<()>> + Send {
        let records = Arc::clone(&self.records);

        async move {
            let mut guard = records
                .lock()
                .map_err(|_| Error::Storage("mutex poisoned".to_string()))?;

            let timestamps = guard.entry(account).or_default();
            timestamps.push(now);
            timestamps.sort_unstable();

            while timestamps.len() > MAX_RECORDED_FAILURES as usize {
                timestamps.remove(0);
            }

            Ok(())
        }
    }

    fn count(&self, account: UserId) -> impl Future<Output = Result<u32>> + Send {
        let records = Arc::clone(&self.records);

        async move {
            let guard = records
                .lock()
                .map_err(|_| Error::Storage("mutex poisoned".to_string()))?;

            #[allow(clippy::cast_possible_truncation)]
            Ok(guard.get(&account).map_or(0, |t| t.len() as u32))
        }
    }

    fn oldest(
        &self,
        account: UserId,
    ) -> impl Future<Output = Result<Option<DateTime<Utc>>>> + Send {
        let records = Arc::clone(&self.records);

        async move {
            let guard = records
                .lock()
                .map_err(|_| Error::Storage("mutex poisoned".to_string()))?;

            Ok(guard.get(&account).and_then(|t| t.first().copied()))
        }
    }
}
