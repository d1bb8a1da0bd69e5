//! Core constants.
//!
//! This module contains the fixed parameters of the login-failure throttle.

/// Login-failure throttle parameters.
pub mod throttle {
    /// Maximum failure records retained per account.
    ///
    /// The ledger evicts its oldest record once an account would exceed
    /// this count, so reads never observe more than this many (modulo
    /// concurrent writers that have not yet re-evicted).
    pub const MAX_RECORDED_FAILURES: u32 = 3;

    /// Sliding failure window, in hours.
    ///
    /// An account with [`MAX_RECORDED_FAILURES`] failures is denied until
    /// its oldest retained failure is at least this old. Records are never
    /// pruned by age; staleness is detected lazily at check time.
    pub const FAILURE_WINDOW_HOURS: i64 = 24;
}
