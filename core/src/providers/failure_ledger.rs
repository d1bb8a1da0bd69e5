//! Failure ledger trait for login throttling.
//!
//! # Contract
//!
//! The ledger is an append-only record of failed login attempts, bounded
//! per account: at most [`MAX_RECORDED_FAILURES`] records are retained,
//! and writing one more evicts the single oldest (FIFO). Records are
//! never pruned by age — the throttle detects staleness lazily by
//! comparing the oldest retained timestamp against the failure window.
//!
//! [`MAX_RECORDED_FAILURES`]: crate::constants::throttle::MAX_RECORDED_FAILURES

use crate::error::Result;
use crate::state::UserId;
use chrono::{DateTime, Utc};

/// Bounded per-account ledger of failed login attempts.
///
/// # Example
///
/// ```no_run
/// use stockroom_core::providers::FailureLedger;
/// use stockroom_core::state::UserId;
/// use chrono::Utc;
///
/// # async fn example(ledger: impl FailureLedger, account: UserId) -> Result<(), Box<dyn std::error::Error>> {
/// ledger.record(account, Utc::now()).await?;
/// assert!(ledger.count(account).await? >= 1);
/// # Ok(())
/// # }
/// ```
pub trait FailureLedger: Send + Sync {
    /// Append a failure record stamped `now`.
    ///
    /// Insertion and the FIFO eviction of the oldest record (when the
    /// account would exceed the cap) are one unit: after this call
    /// completes, the account retains at most the cap's worth of records.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the underlying store is unavailable.
    fn record(
        &self,
        account: UserId,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Number of currently retained records for the account (0-3).
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the underlying store is unavailable.
    fn count(
        &self,
        account: UserId,
    ) -> impl std::future::Future<Output = Result<u32>> + Send;

    /// Timestamp of the earliest retained record, or `None` if the
    /// account has no recorded failures.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the underlying store is unavailable.
    fn oldest(
        &self,
        account: UserId,
    ) -> impl std::future::Future<Output = Result<Option<DateTime<Utc>>>> + Send;
}
