//! Customer inquiry store trait.

use crate::error::Result;
use crate::state::Inquiry;

/// Append-and-list store for customer inquiries.
pub trait InquiryStore: Send + Sync {
    /// Persist a new inquiry.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn insert(
        &self,
        inquiry: &Inquiry,
    ) -> impl std::future::Future<Output = Result<Inquiry>> + Send;

    /// All inquiries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Inquiry>>> + Send;
}
