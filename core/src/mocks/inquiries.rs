//! Mock inquiry store for testing.

use crate::error::{Error, Result};
use crate::providers::InquiryStore;
use crate::state::Inquiry;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// In-memory inquiry store.
#[derive(Debug, Clone, Default)]
pub struct MockInquiryStore {
    inquiries: Arc<Mutex<Vec<Inquiry>>>,
}

impl MockInquiryStore {
    /// Create a new mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_err() -> Error {
    Error::Storage("mutex poisoned".to_string())
}

impl InquiryStore for MockInquiryStore {
    fn insert(&self, inquiry: &Inquiry) -> impl Future<Output = Result<Inquiry>> + Send {
        let inquiries = Arc::clone(&self.inquiries);
        let inquiry = inquiry.clone();

        async move {
            let mut guard = inquiries.lock().map_err(|_| lock_err())?;
            guard.push(inquiry.clone());
            Ok(inquiry)
        }
    }

    fn list(&self) -> impl Future<Output = Result<Vec<Inquiry>>> + Send {
        let inquiries = Arc::clone(&self.inquiries);

        async move {
            let guard = inquiries.lock().map_err(|_| lock_err())?;

            let mut all = guard.clone();
            all.sort_by(|a, b| b.created_at.cmp(&a.created_at));

            Ok(all)
        }
    }
}
