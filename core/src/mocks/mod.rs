//! Mock providers for testing.
//!
//! In-memory implementations of every port, available behind the default
//! `test-utils` feature. Tests run at memory speed against these; the
//! live stores in [`crate::stores`] carry the same contracts.

mod cart;
mod failure_ledger;
mod favorites;
mod inquiries;
mod password;
mod stocks;
mod token;
mod users;

pub use cart::MockCartStore;
pub use failure_ledger::MockFailureLedger;
pub use favorites::MockFavoriteStore;
pub use inquiries::MockInquiryStore;
pub use password::MockPasswordHasher;
pub use stocks::MockStockRepository;
pub use token::MockTokenService;
pub use users::MockUserRepository;
