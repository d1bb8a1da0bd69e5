//! PostgreSQL stock repository implementation.

use crate::error::{Error, Result};
use crate::providers::StockRepository;
use crate::state::{Stock, StockId};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

const SELECT_STOCK: &str = r"
    SELECT id, brand, model, quantity, price_usd, condition, description, detail,
           category, part_number, sku, serial_number, location, status,
           created_at, updated_at
    FROM stocks
";

/// Row shape for the `stocks` table.
#[derive(sqlx::FromRow)]
struct StockRow {
    id: uuid::Uuid,
    brand: String,
    model: String,
    quantity: i64,
    price_usd: String,
    condition: String,
    description: String,
    detail: String,
    category: String,
    part_number: String,
    sku: String,
    serial_number: String,
    location: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StockRow> for Stock {
    fn from(row: StockRow) -> Self {
        Self {
            id: StockId(row.id),
            brand: row.brand,
            model: row.model,
            quantity: row.quantity,
            price_usd: row.price_usd,
            condition: row.condition,
            description: row.description,
            detail: row.detail,
            category: row.category,
            part_number: row.part_number,
            sku: row.sku,
            serial_number: row.serial_number,
            location: row.location,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL stock repository.
#[derive(Clone)]
pub struct PostgresStockRepository {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresStockRepository {
    /// Create a new PostgreSQL stock repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl StockRepository for PostgresStockRepository {
    async fn find(&self, stock_id: StockId) -> Result<Option<Stock>> {
        let row = sqlx::query_as::<_, StockRow>(&format!("{SELECT_STOCK} WHERE id = $1"))
            .bind(stock_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("failed to get stock: {e}")))?;

        Ok(row.map(Stock::from))
    }

    async fn create(&self, stock: &Stock) -> Result<Stock> {
        sqlx::query(
            r"
            INSERT INTO stocks
                (id, brand, model, quantity, price_usd, condition, description, detail,
                 category, part_number, sku, serial_number, location, status,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ",
        )
        .bind(stock.id.0)
        .bind(&stock.brand)
        .bind(&stock.model)
        .bind(stock.quantity)
        .bind(&stock.price_usd)
        .bind(&stock.condition)
        .bind(&stock.description)
        .bind(&stock.detail)
        .bind(&stock.category)
        .bind(&stock.part_number)
        .bind(&stock.sku)
        .bind(&stock.serial_number)
        .bind(&stock.location)
        .bind(&stock.status)
        .bind(stock.created_at)
        .bind(stock.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return Error::Validation("sku already exists".to_string());
                }
            }
            Error::Storage(format!("failed to create stock: {e}"))
        })?;

        Ok(stock.clone())
    }

    async fn update(&self, stock: &Stock) -> Result<Stock> {
        let result = sqlx::query(
            r"
            UPDATE stocks
            SET brand = $2,
                model = $3,
                quantity = $4,
                price_usd = $5,
                condition = $6,
                description = $7,
                detail = $8,
                category = $9,
                part_number = $10,
                sku = $11,
                serial_number = $12,
                location = $13,
                status = $14,
                updated_at = $15
            WHERE id = $1
            ",
        )
        .bind(stock.id.0)
        .bind(&stock.brand)
        .bind(&stock.model)
        .bind(stock.quantity)
        .bind(&stock.price_usd)
        .bind(&stock.condition)
        .bind(&stock.description)
        .bind(&stock.detail)
        .bind(&stock.category)
        .bind(&stock.part_number)
        .bind(&stock.sku)
        .bind(&stock.serial_number)
        .bind(&stock.location)
        .bind(&stock.status)
        .bind(stock.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to update stock: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Stock"));
        }

        Ok(stock.clone())
    }

    async fn delete(&self, stock_id: StockId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM stocks WHERE id = $1")
            .bind(stock_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("failed to delete stock: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Stock>> {
        let rows = sqlx::query_as::<_, StockRow>(&format!("{SELECT_STOCK} ORDER BY created_at"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("failed to list stocks: {e}")))?;

        Ok(rows.into_iter().map(Stock::from).collect())
    }

    async fn brands(&self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT trim(brand) FROM stocks WHERE trim(brand) <> '' ORDER BY 1",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to list brands: {e}")))?;

        Ok(rows.into_iter().map(|(brand,)| brand).collect())
    }
}
