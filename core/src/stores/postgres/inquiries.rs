//! PostgreSQL inquiry store implementation.

use crate::error::{Error, Result};
use crate::providers::InquiryStore;
use crate::state::{Inquiry, InquiryId};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Row shape for the `inquiries` table.
#[derive(sqlx::FromRow)]
struct InquiryRow {
    id: uuid::Uuid,
    name: String,
    email: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<InquiryRow> for Inquiry {
    fn from(row: InquiryRow) -> Self {
        Self {
            id: InquiryId(row.id),
            name: row.name,
            email: row.email,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL inquiry store.
#[derive(Clone)]
pub struct PostgresInquiryStore {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresInquiryStore {
    /// Create a new PostgreSQL inquiry store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl InquiryStore for PostgresInquiryStore {
    async fn insert(&self, inquiry: &Inquiry) -> Result<Inquiry> {
        sqlx::query(
            "INSERT INTO inquiries (id, name, email, message, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(inquiry.id.0)
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.message)
        .bind(inquiry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to insert inquiry: {e}")))?;

        Ok(inquiry.clone())
    }

    async fn list(&self) -> Result<Vec<Inquiry>> {
        let rows = sqlx::query_as::<_, InquiryRow>(
            "SELECT id, name, email, message, created_at FROM inquiries ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to list inquiries: {e}")))?;

        Ok(rows.into_iter().map(Inquiry::from).collect())
    }
}
