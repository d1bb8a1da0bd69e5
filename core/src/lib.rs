//! # Stockroom Core
//!
//! Domain model, ports, and stores for the Stockroom inventory backend.
//!
//! ## Architecture
//!
//! Every operation is request-per-call: it reads current state from the
//! shared store, mutates, and writes back — no in-process state survives
//! between calls. The two stateful subsystems live here:
//!
//! - **Login throttle** ([`throttle`], [`login`]): a sliding-window abuse
//!   guard over the bounded [`providers::FailureLedger`]. Three failures
//!   inside 24 hours deny further attempts until the window rolls over;
//!   a successful login never clears the ledger.
//! - **Quota workflow** ([`quota`]): the state machine over a cart
//!   entry's quota request (`none → pending → approved/rejected →
//!   handled`), modeled as the tagged [`state::QuotaState`] so illegal
//!   combinations cannot be constructed.
//!
//! External collaborators — document stores, the token service, the
//! password hasher — are ports under [`providers`], with live backends
//! in [`stores`] and in-memory [`mocks`] for tests.
//!
//! ## Example: quota round trip
//!
//! ```rust,ignore
//! use stockroom_core::{mocks::*, quota};
//!
//! let entry = quota::request(&cart, &stocks, user, stock, 5, now).await?;
//! let entry = quota::decide(&cart, &admin, entry.id, Decision::Approved, now).await?;
//! let entry = quota::mark_handled(&cart, &admin, stock, now).await?;
//! assert_eq!(entry.quota.handled(), Some(true));
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod accounts;
pub mod cart;
pub mod config;
pub mod constants;
pub mod error;
pub mod login;
pub mod providers;
pub mod quota;
pub mod state;
pub mod stores;
pub mod throttle;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use state::{
    CartEntry, CartEntryId, Identity, Inquiry, InquiryId, QuotaState, Stock, StockId, User,
    UserId,
};
