//! PostgreSQL store implementations.
//!
//! One repository struct per document type, each holding a cloned
//! [`PgPool`]. Queries use the runtime-checked sqlx API so the workspace
//! builds without a live database; the schema ships in `migrations/`.

mod cart;
mod favorites;
mod inquiries;
mod stocks;
mod users;

pub use cart::PostgresCartStore;
pub use favorites::PostgresFavoriteStore;
pub use inquiries::PostgresInquiryStore;
pub use stocks::PostgresStockRepository;
pub use users::PostgresUserRepository;

use crate::error::{Error, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Connect a pool to the given database URL.
///
/// # Errors
///
/// Returns `Error::Storage` if the connection fails.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| Error::Storage(format!("failed to connect to PostgreSQL: {e}")))
}

/// Run database migrations.
///
/// # Errors
///
/// Returns `Error::Storage` if migrations fail.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| Error::Storage(format!("migration failed: {e}")))?;
    Ok(())
}
