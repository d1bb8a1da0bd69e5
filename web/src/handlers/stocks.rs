//! Stock item handlers: CRUD plus the distinct-brands listing.
//!
//! Mutations require authentication but no particular role.

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::state::AppEnv;
use axum::{Json, extract::Path, extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use stockroom_core::providers::{
    CartStore, FailureLedger, FavoriteStore, InquiryStore, PasswordHasher, StockRepository,
    TokenService, UserRepository,
};
use stockroom_core::state::{Stock, StockId};
use stockroom_core::utils::is_valid_sku;
use uuid::Uuid;

/// Stock fields as supplied by clients; every field defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StockInput {
    /// Manufacturer brand.
    pub brand: String,
    /// Model designation.
    pub model: String,
    /// Units on hand.
    pub quantity: i64,
    /// Listed price in USD.
    pub price_usd: String,
    /// Condition.
    pub condition: String,
    /// Short description.
    pub description: String,
    /// Long-form detail text.
    pub detail: String,
    /// Product category.
    pub category: String,
    /// Manufacturer part number.
    pub part_number: String,
    /// Stock-keeping unit.
    pub sku: String,
    /// Serial number.
    pub serial_number: String,
    /// Warehouse location.
    pub location: String,
    /// Availability status.
    pub status: String,
}

/// Partial update to a stock item; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockPatch {
    /// New brand.
    pub brand: Option<String>,
    /// New model.
    pub model: Option<String>,
    /// New quantity.
    pub quantity: Option<i64>,
    /// New price.
    pub price_usd: Option<String>,
    /// New condition.
    pub condition: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New detail text.
    pub detail: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New part number.
    pub part_number: Option<String>,
    /// New sku.
    pub sku: Option<String>,
    /// New serial number.
    pub serial_number: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New status.
    pub status: Option<String>,
}

/// One brand with its derived logo file name.
#[derive(Debug, Clone, Serialize)]
pub struct BrandLogo {
    /// Brand name as stored.
    pub brand: String,

    /// Logo file name derived from the brand.
    pub file_name: String,

    /// Logo path a frontend can request.
    pub logo_path: String,
}

/// Confirmation message for deletions.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Human-readable confirmation.
    pub message: String,
}

fn logo_file_name(brand: &str) -> String {
    let stem: String = brand
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}_logo.png")
}

fn ensure_valid_sku(sku: &str) -> Result<(), AppError> {
    if is_valid_sku(sku) {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "SKU can only contain letters, numbers, and hyphens",
        ))
    }
}

/// Create a stock item; authenticated.
///
/// # Endpoint
///
/// ```text
/// POST /api/stocks
/// ```
///
/// # Errors
///
/// Returns 400 for an empty body or a malformed sku.
pub async fn create_stock<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    CurrentUser(_identity): CurrentUser,
    Json(input): Json<StockInput>,
) -> Result<(StatusCode, Json<Stock>), AppError>
where
    U: UserRepository + Clone + 'static,
    S: StockRepository + Clone + 'static,
    C: CartStore + Clone + 'static,
    F: FavoriteStore + Clone + 'static,
    N: InquiryStore + Clone + 'static,
    L: FailureLedger + Clone + 'static,
    T: TokenService + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    if input == StockInput::default() {
        return Err(AppError::bad_request("Stock details are missing"));
    }
    ensure_valid_sku(&input.sku)?;

    let now = Utc::now();
    let stock = Stock {
        id: StockId::new(),
        brand: input.brand,
        model: input.model,
        quantity: input.quantity,
        price_usd: input.price_usd,
        condition: input.condition,
        description: input.description,
        detail: input.detail,
        category: input.category,
        part_number: input.part_number,
        sku: input.sku,
        serial_number: input.serial_number,
        location: input.location,
        status: input.status,
        created_at: now,
        updated_at: now,
    };

    let created = env.stocks.create(&stock).await?;
    Ok((StatusCode::OK, Json(created)))
}

/// List every stock item; public.
///
/// # Endpoint
///
/// ```text
/// GET /api/stocks
/// ```
///
/// # Errors
///
/// Returns 500 if the store is unavailable.
pub async fn list_stocks<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
) -> Result<(StatusCode, Json<Vec<Stock>>), AppError>
where
    U: UserRepository + Clone + 'static,
    S: StockRepository + Clone + 'static,
    C: CartStore + Clone + 'static,
    F: FavoriteStore + Clone + 'static,
    N: InquiryStore + Clone + 'static,
    L: FailureLedger + Clone + 'static,
    T: TokenService + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let stocks = env.stocks.list().await?;
    Ok((StatusCode::OK, Json(stocks)))
}

/// Distinct brands with derived logo paths; public.
///
/// No file serving happens here: the paths are plain strings a frontend
/// resolves against its own asset host.
///
/// # Endpoint
///
/// ```text
/// GET /api/stocks/brands
/// ```
///
/// # Errors
///
/// Returns 500 if the store is unavailable.
pub async fn brands<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
) -> Result<(StatusCode, Json<Vec<BrandLogo>>), AppError>
where
    U: UserRepository + Clone + 'static,
    S: StockRepository + Clone + 'static,
    C: CartStore + Clone + 'static,
    F: FavoriteStore + Clone + 'static,
    N: InquiryStore + Clone + 'static,
    L: FailureLedger + Clone + 'static,
    T: TokenService + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let brands = env.stocks.brands().await?;

    let logos = brands
        .into_iter()
        .map(|brand| {
            let file_name = logo_file_name(&brand);
            let logo_path = format!("/logos/{file_name}");
            BrandLogo { brand, file_name, logo_path }
        })
        .collect();

    Ok((StatusCode::OK, Json(logos)))
}

/// Get a single stock item; public.
///
/// # Endpoint
///
/// ```text
/// GET /api/stocks/:id
/// ```
///
/// # Errors
///
/// Returns 404 for an unknown id.
pub async fn get_stock<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Stock>), AppError>
where
    U: UserRepository + Clone + 'static,
    S: StockRepository + Clone + 'static,
    C: CartStore + Clone + 'static,
    F: FavoriteStore + Clone + 'static,
    N: InquiryStore + Clone + 'static,
    L: FailureLedger + Clone + 'static,
    T: TokenService + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let stock = env
        .stocks
        .find(StockId(id))
        .await?
        .ok_or(stockroom_core::Error::not_found("Stock"))?;

    Ok((StatusCode::OK, Json(stock)))
}

/// Patch a stock item; authenticated.
///
/// # Endpoint
///
/// ```text
/// PATCH /api/stocks/:id
/// ```
///
/// # Errors
///
/// Returns 404 for an unknown id, 400 for a malformed sku.
pub async fn update_stock<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    CurrentUser(_identity): CurrentUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<StockPatch>,
) -> Result<(StatusCode, Json<Stock>), AppError>
where
    U: UserRepository + Clone + 'static,
    S: StockRepository + Clone + 'static,
    C: CartStore + Clone + 'static,
    F: FavoriteStore + Clone + 'static,
    N: InquiryStore + Clone + 'static,
    L: FailureLedger + Clone + 'static,
    T: TokenService + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let Some(mut stock) = env.stocks.find(StockId(id)).await? else {
        return Err(AppError::not_found("Stock not found"));
    };

    if let Some(sku) = &patch.sku {
        ensure_valid_sku(sku)?;
    }

    if let Some(brand) = patch.brand {
        stock.brand = brand;
    }
    if let Some(model) = patch.model {
        stock.model = model;
    }
    if let Some(quantity) = patch.quantity {
        stock.quantity = quantity;
    }
    if let Some(price_usd) = patch.price_usd {
        stock.price_usd = price_usd;
    }
    if let Some(condition) = patch.condition {
        stock.condition = condition;
    }
    if let Some(description) = patch.description {
        stock.description = description;
    }
    if let Some(detail) = patch.detail {
        stock.detail = detail;
    }
    if let Some(category) = patch.category {
        stock.category = category;
    }
    if let Some(sku) = patch.sku {
        stock.sku = sku;
    }
    if let Some(part_number) = patch.part_number {
        stock.part_number = part_number;
    }
    if let Some(serial_number) = patch.serial_number {
        stock.serial_number = serial_number;
    }
    if let Some(location) = patch.location {
        stock.location = location;
    }
    if let Some(status) = patch.status {
        stock.status = status;
    }
    stock.updated_at = Utc::now();

    let updated = env.stocks.update(&stock).await?;
    Ok((StatusCode::OK, Json(updated)))
}

/// Delete a stock item; authenticated.
///
/// # Endpoint
///
/// ```text
/// DELETE /api/stocks/:id
/// ```
///
/// # Errors
///
/// Returns 404 for an unknown id.
pub async fn delete_stock<U, S, C, F, N, L, T, H>(
    State(env): State<AppEnv<U, S, C, F, N, L, T, H>>,
    CurrentUser(_identity): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<DeleteResponse>), AppError>
where
    U: UserRepository + Clone + 'static,
    S: StockRepository + Clone + 'static,
    C: CartStore + Clone + 'static,
    F: FavoriteStore + Clone + 'static,
    N: InquiryStore + Clone + 'static,
    L: FailureLedger + Clone + 'static,
    T: TokenService + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    if !env.stocks.delete(StockId(id)).await? {
        return Err(AppError::not_found("Stock not found"));
    }

    Ok((
        StatusCode::OK,
        Json(DeleteResponse { message: "Stock deleted successfully".to_string() }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_file_name_replaces_special_chars() {
        assert_eq!(logo_file_name("Cisco"), "Cisco_logo.png");
        assert_eq!(logo_file_name("Hewlett Packard"), "Hewlett_Packard_logo.png");
        assert_eq!(logo_file_name("D-Link"), "D_Link_logo.png");
    }
}
