//! Quota workflow integration tests.
//!
//! Drives the request → decide → mark-handled state machine end to end
//! over the mock stores, including the deliberate permissivenesses
//! (supersede-on-request, redecide) and the one-per-call fulfillment
//! contract.

use chrono::Utc;
use stockroom_core::cart::{self, toggle_entry, user_cart};
use stockroom_core::error::Error;
use stockroom_core::mocks::{MockCartStore, MockStockRepository, MockUserRepository};
use stockroom_core::providers::{CartStore, StockRepository};
use stockroom_core::quota::{self, Decision};
use stockroom_core::state::{Identity, QuotaState, Stock, StockId, UserId};

fn admin() -> Identity {
    Identity { user_id: UserId::new(), is_admin: true, issued_at: Utc::now() }
}

fn member(user_id: UserId) -> Identity {
    Identity { user_id, is_admin: false, issued_at: Utc::now() }
}

async fn seed_stock(stocks: &MockStockRepository, sku: &str) -> StockId {
    let now = Utc::now();
    stocks
        .create(&Stock {
            id: StockId::new(),
            brand: "Acme".to_string(),
            model: "Widget".to_string(),
            quantity: 50,
            price_usd: "12.50".to_string(),
            condition: "new".to_string(),
            description: String::new(),
            detail: String::new(),
            category: "parts".to_string(),
            part_number: String::new(),
            sku: sku.to_string(),
            serial_number: String::new(),
            location: String::new(),
            status: "available".to_string(),
            created_at: now,
            updated_at: now,
        })
        .await
        .expect("stock seed failed")
        .id
}

#[tokio::test]
async fn second_request_supersedes_the_first() {
    let carts = MockCartStore::new();
    let stocks = MockStockRepository::new();
    let stock = seed_stock(&stocks, "SUP-1").await;
    let user = UserId::new();
    let now = Utc::now();

    quota::request(&carts, &stocks, user, stock, 5, now).await.unwrap();
    let entry = quota::request(&carts, &stocks, user, stock, 2, now).await.unwrap();

    assert_eq!(entry.quota, QuotaState::Pending { amount: 2, requested_at: now });
    assert_eq!(carts.list_by_stock(stock).await.unwrap().len(), 1);
}

#[tokio::test]
async fn request_supersedes_even_a_decided_handled_state() {
    let carts = MockCartStore::new();
    let stocks = MockStockRepository::new();
    let stock = seed_stock(&stocks, "SUP-2").await;
    let admin = admin();
    let user = UserId::new();
    let now = Utc::now();

    let entry = quota::request(&carts, &stocks, user, stock, 5, now).await.unwrap();
    quota::decide(&carts, &admin, entry.id, Decision::Approved, now).await.unwrap();
    quota::mark_handled(&carts, &admin, stock, now).await.unwrap();

    // A fresh ask reopens the lifecycle from pending.
    let reopened = quota::request(&carts, &stocks, user, stock, 9, now).await.unwrap();
    assert_eq!(reopened.id, entry.id);
    assert_eq!(reopened.quota, QuotaState::Pending { amount: 9, requested_at: now });
}

#[tokio::test]
async fn non_admin_decision_is_forbidden_and_leaves_state_alone() {
    let carts = MockCartStore::new();
    let stocks = MockStockRepository::new();
    let stock = seed_stock(&stocks, "AUTH-1").await;
    let user = UserId::new();
    let now = Utc::now();

    let entry = quota::request(&carts, &stocks, user, stock, 3, now).await.unwrap();

    let result =
        quota::decide(&carts, &member(user), entry.id, Decision::Approved, now).await;
    assert!(matches!(result, Err(Error::Forbidden { .. })));

    let unchanged = carts.find_by_id(entry.id).await.unwrap().unwrap();
    assert_eq!(unchanged.quota, QuotaState::Pending { amount: 3, requested_at: now });
}

#[tokio::test]
async fn decide_unknown_entry_is_not_found() {
    let carts = MockCartStore::new();
    let now = Utc::now();

    let result = quota::decide(
        &carts,
        &admin(),
        stockroom_core::CartEntryId::new(),
        Decision::Approved,
        now,
    )
    .await;

    assert_eq!(result.unwrap_err(), Error::not_found("Cart entry"));
}

#[tokio::test]
async fn rejection_records_the_reason() {
    let carts = MockCartStore::new();
    let stocks = MockStockRepository::new();
    let stock = seed_stock(&stocks, "REJ-1").await;
    let now = Utc::now();

    let entry = quota::request(&carts, &stocks, UserId::new(), stock, 7, now)
        .await
        .unwrap();

    let rejected = quota::decide(
        &carts,
        &admin(),
        entry.id,
        Decision::Rejected { reason: Some("allocation exhausted".to_string()) },
        now,
    )
    .await
    .unwrap();

    assert!(matches!(
        rejected.quota,
        QuotaState::Rejected { ref reason, handled: false, .. }
            if reason.as_deref() == Some("allocation exhausted")
    ));
}

#[tokio::test]
async fn mark_handled_clears_one_request_per_call() {
    let carts = MockCartStore::new();
    let stocks = MockStockRepository::new();
    let stock = seed_stock(&stocks, "FUL-1").await;
    let admin = admin();
    let now = Utc::now();

    let first = quota::request(&carts, &stocks, UserId::new(), stock, 4, now)
        .await
        .unwrap();
    let second = quota::request(&carts, &stocks, UserId::new(), stock, 6, now)
        .await
        .unwrap();

    quota::decide(&carts, &admin, first.id, Decision::Approved, now).await.unwrap();
    quota::decide(&carts, &admin, second.id, Decision::Approved, now).await.unwrap();

    let handled_a = quota::mark_handled(&carts, &admin, stock, now).await.unwrap();
    let handled_b = quota::mark_handled(&carts, &admin, stock, now).await.unwrap();

    assert_ne!(handled_a.id, handled_b.id);
    assert_eq!(handled_a.quota.handled(), Some(true));
    assert_eq!(handled_b.quota.handled(), Some(true));

    let exhausted = quota::mark_handled(&carts, &admin, stock, now).await;
    assert_eq!(
        exhausted.unwrap_err(),
        Error::not_found("Unhandled quota request")
    );
}

#[tokio::test]
async fn deleting_the_entry_discards_quota_state() {
    let carts = MockCartStore::new();
    let stocks = MockStockRepository::new();
    let stock = seed_stock(&stocks, "DEL-1").await;
    let user = UserId::new();
    let now = Utc::now();

    quota::request(&carts, &stocks, user, stock, 5, now).await.unwrap();

    // Toggling removes the entry — quota state goes with it.
    let outcome = toggle_entry(&carts, &stocks, user, stock, now).await.unwrap();
    assert!(!outcome.in_cart);
    assert!(user_cart(&carts, &stocks, user).await.unwrap().is_empty());

    // Adding the item back starts from a clean slate.
    toggle_entry(&carts, &stocks, user, stock, now).await.unwrap();
    let items = user_cart(&carts, &stocks, user).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quota, QuotaState::None);
}

#[tokio::test]
async fn concurrent_request_and_decision_end_in_a_defined_state() {
    let carts = MockCartStore::new();
    let stocks = MockStockRepository::new();
    let stock = seed_stock(&stocks, "RACE-1").await;
    let admin = admin();
    let user = UserId::new();
    let now = Utc::now();

    let entry = quota::request(&carts, &stocks, user, stock, 5, now).await.unwrap();

    // Owner re-requests while the admin decides: last write wins over the
    // whole quota sub-record, so either outcome is acceptable — but the
    // final state must be one of the defined variants.
    let (requested, decided) = tokio::join!(
        quota::request(&carts, &stocks, user, stock, 8, now),
        quota::decide(&carts, &admin, entry.id, Decision::Approved, now),
    );
    requested.unwrap();
    decided.unwrap();

    let end = carts.find_by_id(entry.id).await.unwrap().unwrap();
    assert!(matches!(
        end.quota,
        QuotaState::Pending { .. } | QuotaState::Approved { .. }
    ));
}

#[tokio::test]
async fn admin_overview_groups_by_stock() {
    let carts = MockCartStore::new();
    let stocks = MockStockRepository::new();
    let users = MockUserRepository::new();
    let admin = admin();
    let now = Utc::now();

    let stock_a = seed_stock(&stocks, "GRP-A").await;
    let stock_b = seed_stock(&stocks, "GRP-B").await;

    let alice = seed_user(&users, "alice@example.com").await;
    let bob = seed_user(&users, "bob@example.com").await;

    quota::request(&carts, &stocks, alice, stock_a, 1, now).await.unwrap();
    quota::request(&carts, &stocks, bob, stock_a, 2, now).await.unwrap();
    quota::request(&carts, &stocks, bob, stock_b, 3, now).await.unwrap();

    let overview = cart::overview(&carts, &stocks, &users, &admin).await.unwrap();

    assert_eq!(overview.len(), 2);
    let group_a = overview.iter().find(|g| g.stock.id == stock_a).unwrap();
    assert_eq!(group_a.in_cart_by.len(), 2);

    // Non-admins don't get the overview at all.
    let refused = cart::overview(&carts, &stocks, &users, &member(alice)).await;
    assert!(matches!(refused, Err(Error::Forbidden { .. })));
}

async fn seed_user(users: &MockUserRepository, email: &str) -> UserId {
    use stockroom_core::providers::UserRepository;
    use stockroom_core::state::{Address, PersonName, User};

    users
        .create(&User {
            id: UserId::new(),
            name: PersonName {
                first: "Test".to_string(),
                middle: None,
                last: "User".to_string(),
            },
            phone: "0521234567".to_string(),
            email: email.to_string(),
            password_hash: "hashed:pw".to_string(),
            address: Address {
                state: String::new(),
                country: "IL".to_string(),
                city: "Haifa".to_string(),
                street: "Main".to_string(),
                house_number: 1,
                zip: 31000,
            },
            is_admin: false,
            created_at: Utc::now(),
        })
        .await
        .expect("user seed failed")
        .id
}
