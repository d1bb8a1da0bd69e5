//! Store implementations.
//!
//! Live backends for the provider traits: `Redis` for the login-failure
//! ledger, `PostgreSQL` for document storage.

mod failure_ledger_redis;
pub mod postgres;

pub use failure_ledger_redis::RedisFailureLedger;
