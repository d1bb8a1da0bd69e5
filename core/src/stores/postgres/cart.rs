//! PostgreSQL cart store implementation.
//!
//! The domain's tagged [`QuotaState`] flattens into nullable columns
//! here; the row-to-domain conversion is the single place where an
//! inconsistent persisted combination can surface, and it surfaces as a
//! `Storage` error rather than a fabricated state.

use crate::error::{Error, Result};
use crate::providers::CartStore;
use crate::state::{CartEntry, CartEntryId, QuotaState, StockId, UserId};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

const SELECT_ENTRY: &str = r"
    SELECT id, user_id, stock_id, quantity, quota_amount, quota_requested_at,
           quota_status, quota_reason, quota_decided_at, quota_handled,
           created_at, updated_at
    FROM cart_entries
";

/// Row shape for the `cart_entries` table.
#[derive(sqlx::FromRow)]
struct CartRow {
    id: uuid::Uuid,
    user_id: uuid::Uuid,
    stock_id: uuid::Uuid,
    quantity: i32,
    quota_amount: Option<i32>,
    quota_requested_at: Option<DateTime<Utc>>,
    quota_status: Option<String>,
    quota_reason: Option<String>,
    quota_decided_at: Option<DateTime<Utc>>,
    quota_handled: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CartRow> for CartEntry {
    type Error = Error;

    fn try_from(row: CartRow) -> Result<Self> {
        let corrupt = || Error::Storage("inconsistent quota columns in cart entry".to_string());

        let quota = match row.quota_status.as_deref() {
            None => QuotaState::None,
            Some(status) => {
                let amount = row
                    .quota_amount
                    .and_then(|a| u32::try_from(a).ok())
                    .ok_or_else(corrupt)?;
                let requested_at = row.quota_requested_at.ok_or_else(corrupt)?;

                match status {
                    "pending" => QuotaState::Pending { amount, requested_at },
                    "approved" => QuotaState::Approved {
                        amount,
                        requested_at,
                        decided_at: row.quota_decided_at.ok_or_else(corrupt)?,
                        handled: row.quota_handled,
                    },
                    "rejected" => QuotaState::Rejected {
                        amount,
                        requested_at,
                        reason: row.quota_reason,
                        handled: row.quota_handled,
                    },
                    _ => return Err(corrupt()),
                }
            }
        };

        Ok(Self {
            id: CartEntryId(row.id),
            user_id: UserId(row.user_id),
            stock_id: StockId(row.stock_id),
            quantity: row.quantity,
            quota,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// `QuotaState` flattened into bind-ready column values.
struct QuotaColumns {
    amount: Option<i32>,
    requested_at: Option<DateTime<Utc>>,
    status: Option<&'static str>,
    reason: Option<String>,
    decided_at: Option<DateTime<Utc>>,
    handled: bool,
}

fn quota_columns(quota: &QuotaState) -> Result<QuotaColumns> {
    let amount_i32 = |amount: u32| {
        i32::try_from(amount)
            .map_err(|_| Error::Storage("quota amount out of range".to_string()))
    };

    Ok(match quota {
        QuotaState::None => QuotaColumns {
            amount: None,
            requested_at: None,
            status: None,
            reason: None,
            decided_at: None,
            handled: false,
        },
        QuotaState::Pending { amount, requested_at } => QuotaColumns {
            amount: Some(amount_i32(*amount)?),
            requested_at: Some(*requested_at),
            status: Some("pending"),
            reason: None,
            decided_at: None,
            handled: false,
        },
        QuotaState::Approved { amount, requested_at, decided_at, handled } => QuotaColumns {
            amount: Some(amount_i32(*amount)?),
            requested_at: Some(*requested_at),
            status: Some("approved"),
            reason: None,
            decided_at: Some(*decided_at),
            handled: *handled,
        },
        QuotaState::Rejected { amount, requested_at, reason, handled } => QuotaColumns {
            amount: Some(amount_i32(*amount)?),
            requested_at: Some(*requested_at),
            status: Some("rejected"),
            reason: reason.clone(),
            decided_at: None,
            handled: *handled,
        },
    })
}

/// PostgreSQL cart store.
///
/// The unique index on `(user_id, stock_id)` backs the upsert contract:
/// a second insert for the same pair yields the existing row.
#[derive(Clone)]
pub struct PostgresCartStore {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresCartStore {
    /// Create a new PostgreSQL cart store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CartStore for PostgresCartStore {
    async fn find(&self, user_id: UserId, stock_id: StockId) -> Result<Option<CartEntry>> {
        let row = sqlx::query_as::<_, CartRow>(&format!(
            "{SELECT_ENTRY} WHERE user_id = $1 AND stock_id = $2"
        ))
        .bind(user_id.0)
        .bind(stock_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to get cart entry: {e}")))?;

        row.map(CartEntry::try_from).transpose()
    }

    async fn find_by_id(&self, entry_id: CartEntryId) -> Result<Option<CartEntry>> {
        let row = sqlx::query_as::<_, CartRow>(&format!("{SELECT_ENTRY} WHERE id = $1"))
            .bind(entry_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("failed to get cart entry: {e}")))?;

        row.map(CartEntry::try_from).transpose()
    }

    async fn upsert(&self, entry: &CartEntry) -> Result<CartEntry> {
        let quota = quota_columns(&entry.quota)?;

        let inserted = sqlx::query_as::<_, CartRow>(
            r"
            INSERT INTO cart_entries
                (id, user_id, stock_id, quantity, quota_amount, quota_requested_at,
                 quota_status, quota_reason, quota_decided_at, quota_handled,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (user_id, stock_id) DO NOTHING
            RETURNING id, user_id, stock_id, quantity, quota_amount, quota_requested_at,
                      quota_status, quota_reason, quota_decided_at, quota_handled,
                      created_at, updated_at
            ",
        )
        .bind(entry.id.0)
        .bind(entry.user_id.0)
        .bind(entry.stock_id.0)
        .bind(entry.quantity)
        .bind(quota.amount)
        .bind(quota.requested_at)
        .bind(quota.status)
        .bind(quota.reason)
        .bind(quota.decided_at)
        .bind(quota.handled)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to upsert cart entry: {e}")))?;

        if let Some(row) = inserted {
            return CartEntry::try_from(row);
        }

        // Conflict: the pair already has an entry; return it.
        self.find(entry.user_id, entry.stock_id)
            .await?
            .ok_or_else(|| Error::Storage("cart entry vanished during upsert".to_string()))
    }

    async fn update(&self, entry: &CartEntry) -> Result<CartEntry> {
        let quota = quota_columns(&entry.quota)?;

        let result = sqlx::query(
            r"
            UPDATE cart_entries
            SET quantity = $2,
                quota_amount = $3,
                quota_requested_at = $4,
                quota_status = $5,
                quota_reason = $6,
                quota_decided_at = $7,
                quota_handled = $8,
                updated_at = $9
            WHERE id = $1
            ",
        )
        .bind(entry.id.0)
        .bind(entry.quantity)
        .bind(quota.amount)
        .bind(quota.requested_at)
        .bind(quota.status)
        .bind(quota.reason)
        .bind(quota.decided_at)
        .bind(quota.handled)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to update cart entry: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Cart entry"));
        }

        Ok(entry.clone())
    }

    async fn delete(&self, user_id: UserId, stock_id: StockId) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM cart_entries WHERE user_id = $1 AND stock_id = $2")
                .bind(user_id.0)
                .bind(stock_id.0)
                .execute(&self.pool)
                .await
                .map_err(|e| Error::Storage(format!("failed to delete cart entry: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<CartEntry>> {
        let rows = sqlx::query_as::<_, CartRow>(&format!(
            "{SELECT_ENTRY} WHERE user_id = $1 ORDER BY created_at"
        ))
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to list cart entries: {e}")))?;

        rows.into_iter().map(CartEntry::try_from).collect()
    }

    async fn list_by_stock(&self, stock_id: StockId) -> Result<Vec<CartEntry>> {
        let rows = sqlx::query_as::<_, CartRow>(&format!(
            "{SELECT_ENTRY} WHERE stock_id = $1 ORDER BY created_at"
        ))
        .bind(stock_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to list cart entries: {e}")))?;

        rows.into_iter().map(CartEntry::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<CartEntry>> {
        let rows = sqlx::query_as::<_, CartRow>(&format!("{SELECT_ENTRY} ORDER BY created_at"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("failed to list cart entries: {e}")))?;

        rows.into_iter().map(CartEntry::try_from).collect()
    }
}
