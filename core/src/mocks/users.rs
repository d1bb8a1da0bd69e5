//! Mock user repository for testing.

use crate::error::{Error, Result};
use crate::providers::UserRepository;
use crate::state::{User, UserId};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// In-memory user repository.
///
/// Stores users in insertion order, so `list` is deterministic.
#[derive(Debug, Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_err() -> Error {
    Error::Storage("mutex poisoned".to_string())
}

impl UserRepository for MockUserRepository {
    fn find(&self, user_id: UserId) -> impl Future<Output = Result<Option<User>>> + Send {
        let users = Arc::clone(&self.users);

        async move {
            let guard = users.lock().map_err(|_| lock_err())?;
            Ok(guard.iter().find(|u| u.id == user_id).cloned())
        }
    }

    fn find_by_email(&self, email: &str) -> impl Future<Output = Result<Option<User>>> + Send {
        let users = Arc::clone(&self.users);
        let email = email.to_string();

        async move {
            let guard = users.lock().map_err(|_| lock_err())?;
            Ok(guard.iter().find(|u| u.email == email).cloned())
        }
    }

    fn create(&self, user: &User) -> impl Future<Output = Result<User>> + Send {
        let users = Arc::clone(&self.users);
        let user = user.clone();

        async move {
            let mut guard = users.lock().map_err(|_| lock_err())?;

            if guard.iter().any(|u| u.email == user.email) {
                return Err(Error::Validation("user already exists".to_string()));
            }

            guard.push(user.clone());
            Ok(user)
        }
    }

    fn update(&self, user: &User) -> impl Future<Output = Result<User>> + Send {
        let users = Arc::clone(&self.users);
        let user = user.clone();

        async move {
            let mut guard = users.lock().map_err(|_| lock_err())?;

            let Some(slot) = guard.iter_mut().find(|u| u.id == user.id) else {
                return Err(Error::not_found("User"));
            };

            *slot = user.clone();
            Ok(user)
        }
    }

    fn delete(&self, user_id: UserId) -> impl Future<Output = Result<bool>> + Send {
        let users = Arc::clone(&self.users);

        async move {
            let mut guard = users.lock().map_err(|_| lock_err())?;
            let before = guard.len();
            guard.retain(|u| u.id != user_id);
            Ok(guard.len() < before)
        }
    }

    fn list(&self) -> impl Future<Output = Result<Vec<User>>> + Send {
        let users = Arc::clone(&self.users);

        async move {
            let guard = users.lock().map_err(|_| lock_err())?;
            Ok(guard.clone())
        }
    }
}
