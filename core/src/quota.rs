//! Quota-request workflow.
//!
//! The state machine over a cart entry's quota request:
//!
//! ```text
//! none ──request──► pending ──decide──► approved | rejected ──mark-handled──► handled
//! ```
//!
//! Two deliberate permissivenesses are preserved from the observed
//! contract: a new request always supersedes the prior one regardless of
//! its state, and an already-decided entry can be re-decided (the
//! `handled` flag is carried over unchanged).

use crate::error::{Error, Result};
use crate::providers::{CartStore, StockRepository};
use crate::state::{CartEntry, CartEntryId, Identity, QuotaState, StockId, UserId};
use chrono::{DateTime, Utc};

/// An admin's decision on a quota request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Approve the requested amount.
    Approved,

    /// Reject the request, optionally with a reason for the requester.
    Rejected {
        /// Reason shown to the requester.
        reason: Option<String>,
    },
}

/// Request a quota for a stock item, creating the cart entry if needed.
///
/// Any existing quota state on the entry — pending, decided, handled or
/// not — is overwritten: the new request supersedes it.
///
/// # Errors
///
/// Returns error if:
/// - `amount` is below 1 → `Error::Validation`
/// - The stock item does not exist → `Error::NotFound`
/// - A query fails → `Error::Storage`
pub async fn request<C, S>(
    cart: &C,
    stocks: &S,
    user_id: UserId,
    stock_id: StockId,
    amount: u32,
    now: DateTime<Utc>,
) -> Result<CartEntry>
where
    C: CartStore,
    S: StockRepository,
{
    if amount < 1 {
        return Err(Error::Validation(
            "quota amount must be at least 1".to_string(),
        ));
    }

    if stocks.find(stock_id).await?.is_none() {
        return Err(Error::not_found("Stock"));
    }

    let mut entry = cart.upsert(&CartEntry::new(user_id, stock_id, now)).await?;

    entry.quota = QuotaState::Pending { amount, requested_at: now };
    entry.updated_at = now;

    let entry = cart.update(&entry).await?;

    tracing::info!(
        entry = %entry.id.0,
        account = %user_id.0,
        stock = %stock_id.0,
        amount = amount,
        "quota requested"
    );

    Ok(entry)
}

/// Decide a quota request; admin only.
///
/// The entry is addressed by its id, not by the `(user, stock)` pair.
/// Re-deciding an already-decided entry is allowed — it overwrites the
/// decision while leaving `handled` as it was.
///
/// # Errors
///
/// Returns error if:
/// - The caller is not an admin → `Error::Forbidden`
/// - The entry does not exist → `Error::NotFound`
/// - The entry carries no quota request → `Error::Validation`
/// - A query fails → `Error::Storage`
pub async fn decide<C>(
    cart: &C,
    identity: &Identity,
    entry_id: CartEntryId,
    decision: Decision,
    now: DateTime<Utc>,
) -> Result<CartEntry>
where
    C: CartStore,
{
    if !identity.is_admin {
        return Err(Error::Forbidden { required: "admin".to_string() });
    }

    let Some(mut entry) = cart.find_by_id(entry_id).await? else {
        return Err(Error::not_found("Cart entry"));
    };

    let (amount, requested_at, handled) = match &entry.quota {
        QuotaState::None => {
            return Err(Error::Validation(
                "cart entry has no quota request".to_string(),
            ));
        }
        QuotaState::Pending { amount, requested_at } => (*amount, *requested_at, false),
        QuotaState::Approved { amount, requested_at, handled, .. }
        | QuotaState::Rejected { amount, requested_at, handled, .. } => {
            (*amount, *requested_at, *handled)
        }
    };

    entry.quota = match decision {
        Decision::Approved => QuotaState::Approved {
            amount,
            requested_at,
            decided_at: now,
            handled,
        },
        Decision::Rejected { reason } => QuotaState::Rejected {
            amount,
            requested_at,
            reason,
            handled,
        },
    };
    entry.updated_at = now;

    let entry = cart.update(&entry).await?;

    tracing::info!(
        entry = %entry.id.0,
        admin = %identity.user_id.0,
        "quota request decided"
    );

    Ok(entry)
}

/// Mark one decided-but-unfulfilled quota request for a stock item as
/// handled; admin only.
///
/// Only the first matching entry is flagged per call — when several
/// users' requests for the same item await fulfillment, callers invoke
/// this repeatedly until it reports nothing left to handle.
///
/// # Errors
///
/// Returns error if:
/// - The caller is not an admin → `Error::Forbidden`
/// - No decided, unhandled request exists for the item → `Error::NotFound`
/// - A query fails → `Error::Storage`
pub async fn mark_handled<C>(
    cart: &C,
    identity: &Identity,
    stock_id: StockId,
    now: DateTime<Utc>,
) -> Result<CartEntry>
where
    C: CartStore,
{
    if !identity.is_admin {
        return Err(Error::Forbidden { required: "admin".to_string() });
    }

    let entries = cart.list_by_stock(stock_id).await?;

    let Some(mut entry) = entries
        .into_iter()
        .find(|entry| entry.quota.is_unhandled_decision())
    else {
        return Err(Error::not_found("Unhandled quota request"));
    };

    entry.quota = match entry.quota {
        QuotaState::Approved { amount, requested_at, decided_at, .. } => {
            QuotaState::Approved { amount, requested_at, decided_at, handled: true }
        }
        QuotaState::Rejected { amount, requested_at, reason, .. } => {
            QuotaState::Rejected { amount, requested_at, reason, handled: true }
        }
        // is_unhandled_decision() only matches decided states.
        other => other,
    };
    entry.updated_at = now;

    let entry = cart.update(&entry).await?;

    tracing::info!(
        entry = %entry.id.0,
        stock = %stock_id.0,
        admin = %identity.user_id.0,
        "quota request marked handled"
    );

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockCartStore, MockStockRepository};
    use crate::state::Stock;

    fn admin() -> Identity {
        Identity { user_id: UserId::new(), is_admin: true, issued_at: Utc::now() }
    }

    fn member() -> Identity {
        Identity { user_id: UserId::new(), is_admin: false, issued_at: Utc::now() }
    }

    async fn seeded_stock(stocks: &MockStockRepository) -> StockId {
        let now = Utc::now();
        let stock = Stock {
            id: StockId::new(),
            brand: "Acme".to_string(),
            model: "Widget".to_string(),
            quantity: 100,
            price_usd: "5".to_string(),
            condition: String::new(),
            description: String::new(),
            detail: String::new(),
            category: String::new(),
            part_number: String::new(),
            sku: String::new(),
            serial_number: String::new(),
            location: String::new(),
            status: String::new(),
            created_at: now,
            updated_at: now,
        };
        stocks.create(&stock).await.unwrap().id
    }

    #[tokio::test]
    async fn test_request_supersedes_previous() {
        let cart = MockCartStore::new();
        let stocks = MockStockRepository::new();
        let stock_id = seeded_stock(&stocks).await;
        let user = UserId::new();
        let now = Utc::now();

        let first = request(&cart, &stocks, user, stock_id, 5, now).await.unwrap();
        let second = request(&cart, &stocks, user, stock_id, 2, now).await.unwrap();

        // Same entry, overwritten request — no stacking.
        assert_eq!(first.id, second.id);
        assert_eq!(
            second.quota,
            QuotaState::Pending { amount: 2, requested_at: now }
        );
        assert_eq!(cart.list_by_stock(stock_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_request_rejects_zero_amount() {
        let cart = MockCartStore::new();
        let stocks = MockStockRepository::new();
        let stock_id = seeded_stock(&stocks).await;

        let result =
            request(&cart, &stocks, UserId::new(), stock_id, 0, Utc::now()).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_decide_requires_admin() {
        let cart = MockCartStore::new();
        let stocks = MockStockRepository::new();
        let stock_id = seeded_stock(&stocks).await;
        let now = Utc::now();

        let entry = request(&cart, &stocks, UserId::new(), stock_id, 3, now)
            .await
            .unwrap();

        let result = decide(&cart, &member(), entry.id, Decision::Approved, now).await;
        assert!(matches!(result, Err(Error::Forbidden { .. })));

        // Status unchanged after the refused attempt.
        let unchanged = cart.find_by_id(entry.id).await.unwrap().unwrap();
        assert_eq!(unchanged.quota, QuotaState::Pending { amount: 3, requested_at: now });
    }

    #[tokio::test]
    async fn test_redecide_preserves_handled() {
        let cart = MockCartStore::new();
        let stocks = MockStockRepository::new();
        let stock_id = seeded_stock(&stocks).await;
        let admin = admin();
        let now = Utc::now();

        let entry = request(&cart, &stocks, UserId::new(), stock_id, 4, now)
            .await
            .unwrap();

        decide(&cart, &admin, entry.id, Decision::Approved, now).await.unwrap();
        mark_handled(&cart, &admin, stock_id, now).await.unwrap();

        // Re-deciding flips the decision but leaves fulfillment flagged.
        let redecided = decide(
            &cart,
            &admin,
            entry.id,
            Decision::Rejected { reason: Some("allocation exhausted".to_string()) },
            now,
        )
        .await
        .unwrap();

        assert_eq!(redecided.quota.handled(), Some(true));
        assert!(matches!(redecided.quota, QuotaState::Rejected { .. }));
    }

    #[tokio::test]
    async fn test_decide_without_request_is_invalid() {
        let cart = MockCartStore::new();
        let stocks = MockStockRepository::new();
        let stock_id = seeded_stock(&stocks).await;
        let now = Utc::now();

        let entry = cart
            .upsert(&CartEntry::new(UserId::new(), stock_id, now))
            .await
            .unwrap();

        let result = decide(&cart, &admin(), entry.id, Decision::Approved, now).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_mark_handled_one_entry_per_call() {
        let cart = MockCartStore::new();
        let stocks = MockStockRepository::new();
        let stock_id = seeded_stock(&stocks).await;
        let admin = admin();
        let now = Utc::now();

        let first = request(&cart, &stocks, UserId::new(), stock_id, 1, now)
            .await
            .unwrap();
        let second = request(&cart, &stocks, UserId::new(), stock_id, 2, now)
            .await
            .unwrap();

        decide(&cart, &admin, first.id, Decision::Approved, now).await.unwrap();
        decide(&cart, &admin, second.id, Decision::Approved, now).await.unwrap();

        let handled_first = mark_handled(&cart, &admin, stock_id, now).await.unwrap();
        let handled_second = mark_handled(&cart, &admin, stock_id, now).await.unwrap();

        assert_ne!(handled_first.id, handled_second.id);

        // Nothing left to handle on the third call.
        let exhausted = mark_handled(&cart, &admin, stock_id, now).await;
        assert_eq!(exhausted.unwrap_err(), Error::not_found("Unhandled quota request"));
    }

    #[tokio::test]
    async fn test_pending_requests_are_not_handleable() {
        let cart = MockCartStore::new();
        let stocks = MockStockRepository::new();
        let stock_id = seeded_stock(&stocks).await;
        let now = Utc::now();

        request(&cart, &stocks, UserId::new(), stock_id, 1, now).await.unwrap();

        let result = mark_handled(&cart, &admin(), stock_id, now).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }
}
