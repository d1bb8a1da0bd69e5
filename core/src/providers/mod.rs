//! Provider traits (ports) and concrete credential providers.
//!
//! Every external collaborator the core touches is abstracted behind a
//! trait in this module: document repositories, the login-failure ledger,
//! the token service, and the password hasher. Store implementations live
//! in [`crate::stores`]; in-memory mocks in [`crate::mocks`].

mod cart;
mod failure_ledger;
mod favorites;
mod inquiries;
mod password;
mod stocks;
mod token;
mod users;

pub use cart::CartStore;
pub use failure_ledger::FailureLedger;
pub use favorites::FavoriteStore;
pub use inquiries::InquiryStore;
pub use password::{Argon2PasswordHasher, PasswordHasher};
pub use stocks::StockRepository;
pub use token::{JwtTokenService, TokenService};
pub use users::UserRepository;
