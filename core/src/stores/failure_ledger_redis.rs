//! Redis-based failure ledger implementation.
//!
//! # Algorithm
//!
//! Capped ordered collection over a sorted set:
//! 1. Add the failure timestamp (ZADD, scored by epoch milliseconds)
//! 2. Count retained entries (ZCARD)
//! 3. If the account now exceeds the cap, pop the oldest (ZPOPMIN)
//!
//! Steps 1-2 run in one atomic pipeline; the eviction in step 3 follows
//! immediately, so concurrent writers can transiently exceed the cap but
//! the count stabilizes at the cap once all writers complete.
//!
//! The keys carry **no TTL**: records are never pruned by age. Staleness
//! is the throttle's concern, detected lazily at check time.

use crate::constants::throttle::MAX_RECORDED_FAILURES;
use crate::error::{Error, Result};
use crate::providers::FailureLedger;
use crate::state::UserId;
use chrono::{DateTime, Utc};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

/// `Redis`-backed bounded ledger of failed login attempts.
///
/// # Example
///
/// ```no_run
/// use stockroom_core::stores::RedisFailureLedger;
/// use stockroom_core::providers::FailureLedger;
/// use stockroom_core::state::UserId;
/// use chrono::Utc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let ledger = RedisFailureLedger::new("redis://127.0.0.1:6379").await?;
/// ledger.record(UserId::new(), Utc::now()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RedisFailureLedger {
    /// Connection manager for connection pooling.
    conn_manager: ConnectionManager,
}

impl RedisFailureLedger {
    /// Create a new `Redis` failure ledger.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - `Redis` connection URL (e.g., "<redis://127.0.0.1:6379>")
    ///
    /// # Errors
    ///
    /// Returns error if connection to `Redis` fails.
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| Error::Storage(format!("failed to create Redis client: {e}")))?;

        let conn_manager = ConnectionManager::new(client).await.map_err(|e| {
            Error::Storage(format!("failed to create Redis connection manager: {e}"))
        })?;

        Ok(Self { conn_manager })
    }

    /// Get the `Redis` key for an account's ledger.
    fn ledger_key(account: UserId) -> String {
        format!("login_failures:{}", account.0)
    }
}

impl FailureLedger for RedisFailureLedger {
    async fn record(&self, account: UserId, now: DateTime<Utc>) -> Result<()> {
        let mut conn = self.conn_manager.clone();
        let key = Self::ledger_key(account);
        let now_ms = now.timestamp_millis();

        // Members get a uuid suffix so two failures in the same
        // millisecond stay distinct entries; the score alone orders them.
        let member = format!("{now_ms}-{}", uuid::Uuid::new_v4());

        // Insert and count atomically; the conditional eviction below can
        // momentarily observe an over-cap count under concurrency, which
        // the contract tolerates (the count stabilizes once writers
        // drain).
        let (count,): (u64,) = redis::pipe()
            .atomic()
            .zadd(&key, &member, now_ms)
            .ignore()
            .zcard(&key)
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::Storage(format!("failed to record login failure: {e}")))?;

        if count > u64::from(MAX_RECORDED_FAILURES) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let overflow = (count - u64::from(MAX_RECORDED_FAILURES)) as isize;

            let _: Vec<(String, f64)> = conn.zpopmin(&key, overflow).await.map_err(|e| {
                Error::Storage(format!("failed to evict oldest login failure: {e}"))
            })?;
        }

        tracing::debug!(
            account = %account.0,
            timestamp_ms = now_ms,
            "recorded login failure"
        );

        Ok(())
    }

    async fn count(&self, account: UserId) -> Result<u32> {
        let mut conn = self.conn_manager.clone();
        let key = Self::ledger_key(account);

        let count: u64 = conn
            .zcard(&key)
            .await
            .map_err(|e| Error::Storage(format!("failed to count login failures: {e}")))?;

        #[allow(clippy::cast_possible_truncation)]
        Ok(count as u32)
    }

    async fn oldest(&self, account: UserId) -> Result<Option<DateTime<Utc>>> {
        let mut conn = self.conn_manager.clone();
        let key = Self::ledger_key(account);

        let entries: Vec<(String, f64)> = conn
            .zrange_withscores(&key, 0, 0)
            .await
            .map_err(|e| Error::Storage(format!("failed to read oldest login failure: {e}")))?;

        let Some((_, score)) = entries.first() else {
            return Ok(None);
        };

        #[allow(clippy::cast_possible_truncation)]
        let oldest = DateTime::from_timestamp_millis(*score as i64)
            .ok_or_else(|| Error::Storage("ledger score out of range".to_string()))?;

        Ok(Some(oldest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    // Note: These tests require a running Redis instance
    // Run with: docker run -d -p 6379:6379 redis:7-alpine

    #[allow(clippy::unwrap_used)]
    async fn ledger() -> RedisFailureLedger {
        RedisFailureLedger::new("redis://127.0.0.1:6379").await.unwrap()
    }

    #[tokio::test]
    #[ignore] // Requires Redis running
    #[allow(clippy::unwrap_used)]
    async fn test_record_and_count() {
        let ledger = ledger().await;
        let account = UserId::new();

        for _ in 0..2 {
            ledger.record(account, Utc::now()).await.unwrap();
        }

        assert_eq!(ledger.count(account).await.unwrap(), 2);
    }

    #[tokio::test]
    #[ignore] // Requires Redis running
    #[allow(clippy::unwrap_used)]
    async fn test_cap_evicts_oldest() {
        let ledger = ledger().await;
        let account = UserId::new();
        let base = Utc::now();

        for i in 0..5 {
            ledger.record(account, base + Duration::minutes(i)).await.unwrap();
        }

        assert_eq!(ledger.count(account).await.unwrap(), 3);

        let oldest = ledger.oldest(account).await.unwrap().unwrap();
        assert_eq!(
            oldest.timestamp_millis(),
            (base + Duration::minutes(2)).timestamp_millis()
        );
    }

    #[tokio::test]
    #[ignore] // Requires Redis running
    #[allow(clippy::unwrap_used)]
    async fn test_oldest_absent_for_clean_account() {
        let ledger = ledger().await;

        assert_eq!(ledger.oldest(UserId::new()).await.unwrap(), None);
    }
}
