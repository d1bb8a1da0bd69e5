//! Cart operations and views.
//!
//! A cart entry exists per `(user, stock)` pair; toggling adds or removes
//! it, and removing it discards any quota state the entry carried.

use crate::error::{Error, Result};
use crate::providers::{CartStore, StockRepository, UserRepository};
use crate::state::{
    CartEntry, CartEntryId, Identity, PersonName, QuotaState, Stock, StockId, UserId,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// One line of a user's cart: the stock item plus the entry's own state.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    /// Entry id (needed to address quota decisions).
    pub entry_id: CartEntryId,

    /// The stock item.
    pub stock: Stock,

    /// Always `true` in cart listings; mirrors the toggle response shape.
    pub in_cart: bool,

    /// Units in the cart.
    pub quantity: i32,

    /// Quota request state for this entry.
    pub quota: QuotaState,
}

/// Result of toggling a stock item in or out of the cart.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleOutcome {
    /// The stock item.
    pub stock: Stock,

    /// Whether the item is in the cart after the toggle.
    pub in_cart: bool,
}

/// One user's participation in a stock item's cart overview.
#[derive(Debug, Clone, Serialize)]
pub struct CartParticipant {
    /// Entry id (needed to address quota decisions).
    pub entry_id: CartEntryId,

    /// Participating user.
    pub user_id: UserId,

    /// Participant's name.
    pub name: PersonName,

    /// Participant's email.
    pub email: String,

    /// When the entry was created.
    pub created_at: DateTime<Utc>,

    /// Units in the cart.
    pub quantity: i32,

    /// Quota request state for this entry.
    pub quota: QuotaState,
}

/// Admin view: a stock item and everyone who has it in their cart.
#[derive(Debug, Clone, Serialize)]
pub struct StockCartOverview {
    /// The stock item.
    pub stock: Stock,

    /// Participants, in entry-creation order.
    pub in_cart_by: Vec<CartParticipant>,
}

/// List the caller's cart, joined with the referenced stock items.
///
/// Entries whose stock item has since been deleted are skipped.
///
/// # Errors
///
/// Returns `Error::Storage` if a query fails.
pub async fn user_cart<C, S>(
    cart: &C,
    stocks: &S,
    user_id: UserId,
) -> Result<Vec<CartItemView>>
where
    C: CartStore,
    S: StockRepository,
{
    let entries = cart.list_by_user(user_id).await?;

    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(stock) = stocks.find(entry.stock_id).await? else {
            continue;
        };
        items.push(CartItemView {
            entry_id: entry.id,
            stock,
            in_cart: true,
            quantity: entry.quantity,
            quota: entry.quota,
        });
    }

    Ok(items)
}

/// Add the stock item to the cart, or remove it if already present.
///
/// Removal discards the entry's quota state entirely; no quota history
/// survives the entry.
///
/// # Errors
///
/// Returns error if:
/// - The stock item does not exist → `Error::NotFound`
/// - A query fails → `Error::Storage`
pub async fn toggle_entry<C, S>(
    cart: &C,
    stocks: &S,
    user_id: UserId,
    stock_id: StockId,
    now: DateTime<Utc>,
) -> Result<ToggleOutcome>
where
    C: CartStore,
    S: StockRepository,
{
    let Some(stock) = stocks.find(stock_id).await? else {
        return Err(Error::not_found("Stock"));
    };

    let in_cart = if cart.find(user_id, stock_id).await?.is_some() {
        cart.delete(user_id, stock_id).await?;
        false
    } else {
        cart.upsert(&CartEntry::new(user_id, stock_id, now)).await?;
        true
    };

    Ok(ToggleOutcome { stock, in_cart })
}

/// Admin overview of every cart entry, grouped by stock item.
///
/// Entries whose stock or user has since been deleted are skipped.
///
/// # Errors
///
/// Returns error if:
/// - The caller is not an admin → `Error::Forbidden`
/// - A query fails → `Error::Storage`
pub async fn overview<C, S, U>(
    cart: &C,
    stocks: &S,
    users: &U,
    identity: &Identity,
) -> Result<Vec<StockCartOverview>>
where
    C: CartStore,
    S: StockRepository,
    U: UserRepository,
{
    if !identity.is_admin {
        return Err(Error::Forbidden { required: "admin".to_string() });
    }

    let entries = cart.list_all().await?;

    let mut groups: Vec<StockCartOverview> = Vec::new();
    let mut index: HashMap<StockId, usize> = HashMap::new();

    for entry in entries {
        let Some(user) = users.find(entry.user_id).await? else {
            continue;
        };

        let slot = match index.get(&entry.stock_id).copied() {
            Some(slot) => slot,
            None => {
                let Some(stock) = stocks.find(entry.stock_id).await? else {
                    continue;
                };
                groups.push(StockCartOverview { stock, in_cart_by: Vec::new() });
                index.insert(entry.stock_id, groups.len() - 1);
                groups.len() - 1
            }
        };

        groups[slot].in_cart_by.push(CartParticipant {
            entry_id: entry.id,
            user_id: user.id,
            name: user.name,
            email: user.email,
            created_at: entry.created_at,
            quantity: entry.quantity,
            quota: entry.quota,
        });
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockCartStore, MockStockRepository};

    fn stock(now: DateTime<Utc>) -> Stock {
        Stock {
            id: StockId::new(),
            brand: "Acme".to_string(),
            model: "Widget".to_string(),
            quantity: 10,
            price_usd: "19.99".to_string(),
            condition: "new".to_string(),
            description: String::new(),
            detail: String::new(),
            category: "parts".to_string(),
            part_number: String::new(),
            sku: "ACME-1".to_string(),
            serial_number: String::new(),
            location: String::new(),
            status: "available".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let cart = MockCartStore::new();
        let stocks = MockStockRepository::new();
        let now = Utc::now();
        let user = UserId::new();

        let item = stocks.create(&stock(now)).await.unwrap();

        let added = toggle_entry(&cart, &stocks, user, item.id, now).await.unwrap();
        assert!(added.in_cart);

        let removed = toggle_entry(&cart, &stocks, user, item.id, now).await.unwrap();
        assert!(!removed.in_cart);

        assert!(cart.find(user, item.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_toggle_missing_stock() {
        let cart = MockCartStore::new();
        let stocks = MockStockRepository::new();

        let result =
            toggle_entry(&cart, &stocks, UserId::new(), StockId::new(), Utc::now()).await;
        assert_eq!(result.unwrap_err(), Error::not_found("Stock"));
    }

    #[tokio::test]
    async fn test_user_cart_joins_stock() {
        let cart = MockCartStore::new();
        let stocks = MockStockRepository::new();
        let now = Utc::now();
        let user = UserId::new();

        let item = stocks.create(&stock(now)).await.unwrap();
        toggle_entry(&cart, &stocks, user, item.id, now).await.unwrap();

        let view = user_cart(&cart, &stocks, user).await.unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].stock.id, item.id);
        assert_eq!(view[0].quantity, 1);
        assert_eq!(view[0].quota, QuotaState::None);
    }
}
