//! User repository trait.

use crate::error::Result;
use crate::state::{User, UserId};

/// User account repository.
///
/// This trait abstracts over user document storage (PostgreSQL in
/// production, in-memory in tests).
pub trait UserRepository: Send + Sync {
    /// Get user by id, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn find(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>>> + Send;

    /// Get user by email, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>>> + Send;

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The email is already registered → `Error::Validation`
    /// - The query fails → `Error::Storage`
    fn create(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<User>> + Send;

    /// Overwrite a user document.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The user does not exist → `Error::NotFound`
    /// - The query fails → `Error::Storage`
    fn update(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<User>> + Send;

    /// Delete a user by id.
    ///
    /// # Returns
    ///
    /// `true` if a document was removed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn delete(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    /// All registered users.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the query fails.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<User>>> + Send;
}
