//! PostgreSQL favorite store implementation.

use crate::error::{Error, Result};
use crate::providers::FavoriteStore;
use crate::state::{FavoriteEntry, StockId, UserId};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Row shape for the `favorites` table.
#[derive(sqlx::FromRow)]
struct FavoriteRow {
    user_id: uuid::Uuid,
    stock_id: uuid::Uuid,
    created_at: DateTime<Utc>,
}

impl From<FavoriteRow> for FavoriteEntry {
    fn from(row: FavoriteRow) -> Self {
        Self {
            user_id: UserId(row.user_id),
            stock_id: StockId(row.stock_id),
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL favorite store.
#[derive(Clone)]
pub struct PostgresFavoriteStore {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresFavoriteStore {
    /// Create a new PostgreSQL favorite store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl FavoriteStore for PostgresFavoriteStore {
    async fn find(&self, user_id: UserId, stock_id: StockId) -> Result<Option<FavoriteEntry>> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            "SELECT user_id, stock_id, created_at FROM favorites WHERE user_id = $1 AND stock_id = $2",
        )
        .bind(user_id.0)
        .bind(stock_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to get favorite: {e}")))?;

        Ok(row.map(FavoriteEntry::from))
    }

    async fn insert(&self, favorite: &FavoriteEntry) -> Result<FavoriteEntry> {
        sqlx::query("INSERT INTO favorites (user_id, stock_id, created_at) VALUES ($1, $2, $3)")
            .bind(favorite.user_id.0)
            .bind(favorite.stock_id.0)
            .bind(favorite.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("failed to insert favorite: {e}")))?;

        Ok(*favorite)
    }

    async fn delete(&self, user_id: UserId, stock_id: StockId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND stock_id = $2")
            .bind(user_id.0)
            .bind(stock_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("failed to delete favorite: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<FavoriteEntry>> {
        let rows = sqlx::query_as::<_, FavoriteRow>(
            "SELECT user_id, stock_id, created_at FROM favorites WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to list favorites: {e}")))?;

        Ok(rows.into_iter().map(FavoriteEntry::from).collect())
    }
}
