//! Login throttle.
//!
//! Decides, at login time, whether a password check may proceed for an
//! account, based on the account's recent failure history in the
//! [`FailureLedger`].
//!
//! # Contract
//!
//! 1. Fewer than [`MAX_RECORDED_FAILURES`] retained failures: permitted,
//!    regardless of their age.
//! 2. Exactly the cap: permitted only if the oldest retained failure
//!    predates the failure window (the ledger is not pruned by age, so
//!    staleness is detected here, lazily).
//! 3. A successful login never clears the ledger — prior failures keep
//!    counting toward the cap until FIFO eviction pushes them out.
//!
//! [`MAX_RECORDED_FAILURES`]: crate::constants::throttle::MAX_RECORDED_FAILURES

use crate::constants::throttle::{FAILURE_WINDOW_HOURS, MAX_RECORDED_FAILURES};
use crate::error::{Error, Result};
use crate::providers::FailureLedger;
use crate::state::UserId;
use chrono::{DateTime, Duration, Utc};

/// Permit or deny a login attempt for `account` at `now`.
///
/// # Errors
///
/// Returns error if:
/// - The account is inside the failure window → `Error::Throttled`
/// - The ledger is unavailable → `Error::Storage`
pub async fn ensure_permitted<L>(
    ledger: &L,
    account: UserId,
    now: DateTime<Utc>,
) -> Result<()>
where
    L: FailureLedger,
{
    let count = ledger.count(account).await?;
    if count < MAX_RECORDED_FAILURES {
        return Ok(());
    }

    // The ledger's evict-on-insert keeps counts at the cap, so this
    // branch only ever compares against exactly the cap's worth of
    // records.
    let Some(oldest) = ledger.oldest(account).await? else {
        return Ok(());
    };

    let window_start = now - Duration::hours(FAILURE_WINDOW_HOURS);
    if oldest < window_start {
        // The window has rolled over; the stale records stay in the
        // ledger but no longer gate the attempt.
        tracing::debug!(
            account = %account.0,
            oldest = %oldest,
            "failure window rolled over, attempt permitted"
        );
        return Ok(());
    }

    let retry_after = ((oldest + Duration::hours(FAILURE_WINDOW_HOURS)) - now)
        .to_std()
        .unwrap_or_default();

    tracing::warn!(
        throttled = true,
        account = %account.0,
        failures = count,
        oldest = %oldest,
        "too many login attempts inside the failure window"
    );

    Err(Error::Throttled { retry_after })
}
