//! Login throttling integration tests.
//!
//! Exercises the failure ledger and throttle through the full login flow:
//! the bounded ledger, the 24h sliding window, and the property that a
//! successful login never resets the window.

use chrono::{Duration, Utc};
use stockroom_core::accounts::{self, NewUser};
use stockroom_core::error::Error;
use stockroom_core::login::attempt_login;
use stockroom_core::mocks::{
    MockFailureLedger, MockPasswordHasher, MockTokenService, MockUserRepository,
};
use stockroom_core::providers::FailureLedger;
use stockroom_core::state::{Address, PersonName, User};

const PASSWORD: &str = "passw0rd";
const WRONG: &str = "wr0ng-password";

struct Harness {
    users: MockUserRepository,
    ledger: MockFailureLedger,
    hasher: MockPasswordHasher,
    tokens: MockTokenService,
}

impl Harness {
    fn new() -> Self {
        Self {
            users: MockUserRepository::new(),
            ledger: MockFailureLedger::new(),
            hasher: MockPasswordHasher::new(),
            tokens: MockTokenService::new(),
        }
    }

    async fn register(&self, email: &str) -> User {
        accounts::register(
            &self.users,
            &self.hasher,
            NewUser {
                name: PersonName {
                    first: "Avi".to_string(),
                    middle: None,
                    last: "Cohen".to_string(),
                },
                phone: "0521234567".to_string(),
                email: email.to_string(),
                password: PASSWORD.to_string(),
                address: Address {
                    state: String::new(),
                    country: "IL".to_string(),
                    city: "Haifa".to_string(),
                    street: "Herzl".to_string(),
                    house_number: 1,
                    zip: 31000,
                },
                is_admin: false,
            },
            Utc::now(),
        )
        .await
        .expect("registration failed")
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, Error> {
        attempt_login(
            &self.users,
            &self.ledger,
            &self.hasher,
            &self.tokens,
            email,
            password,
            Utc::now(),
        )
        .await
    }
}

#[tokio::test]
async fn ledger_retains_at_most_three_most_recent_failures() {
    let h = Harness::new();
    let user = h.register("bounded@example.com").await;

    for _ in 0..5 {
        let _ = h.login("bounded@example.com", WRONG).await;
    }

    let retained = h.ledger.snapshot(user.id);
    assert_eq!(retained.len(), 3);

    // Retained timestamps are the most recent three, in order.
    assert!(retained.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(h.ledger.count(user.id).await.unwrap(), 3);
}

#[tokio::test]
async fn three_recent_failures_deny_even_the_correct_password() {
    let h = Harness::new();
    h.register("locked@example.com").await;

    for _ in 0..3 {
        let result = h.login("locked@example.com", WRONG).await;
        assert_eq!(result.unwrap_err(), Error::InvalidCredentials);
    }

    let result = h.login("locked@example.com", PASSWORD).await;
    assert!(matches!(result, Err(Error::Throttled { .. })));
}

#[tokio::test]
async fn stale_window_rolls_over_to_credential_check() {
    let h = Harness::new();
    let user = h.register("stale@example.com").await;

    // Three failures whose oldest is 25h old: the window has passed.
    let now = Utc::now();
    h.ledger.record(user.id, now - Duration::hours(25)).await.unwrap();
    h.ledger.record(user.id, now - Duration::hours(2)).await.unwrap();
    h.ledger.record(user.id, now - Duration::hours(1)).await.unwrap();

    let token = h.login("stale@example.com", PASSWORD).await.unwrap();
    assert!(!token.is_empty());

    // ...and a wrong password still reaches verification and records.
    let result = h.login("stale@example.com", WRONG).await;
    assert_eq!(result.unwrap_err(), Error::InvalidCredentials);
}

#[tokio::test]
async fn success_between_failures_does_not_clear_the_ledger() {
    let h = Harness::new();
    let user = h.register("sticky@example.com").await;

    let _ = h.login("sticky@example.com", WRONG).await;
    let _ = h.login("sticky@example.com", WRONG).await;

    // A good login goes through...
    h.login("sticky@example.com", PASSWORD).await.unwrap();

    // ...but the two failures still count; one more reaches the cap.
    let _ = h.login("sticky@example.com", WRONG).await;
    assert_eq!(h.ledger.count(user.id).await.unwrap(), 3);

    // And the account is now throttled.
    let result = h.login("sticky@example.com", PASSWORD).await;
    assert!(matches!(result, Err(Error::Throttled { .. })));
}

#[tokio::test]
async fn unknown_email_fails_without_touching_the_ledger() {
    let h = Harness::new();
    let user = h.register("present@example.com").await;

    let result = h.login("absent@example.com", PASSWORD).await;
    assert_eq!(result.unwrap_err(), Error::InvalidCredentials);

    assert_eq!(h.ledger.count(user.id).await.unwrap(), 0);
}

#[tokio::test]
async fn concurrent_failures_stabilize_at_the_cap() {
    let h = Harness::new();
    let user = h.register("racy@example.com").await;

    // Six concurrent wrong-password attempts; once all writers complete
    // the ledger must hold no more than the cap.
    let (a, b, c, d, e, f) = tokio::join!(
        h.login("racy@example.com", WRONG),
        h.login("racy@example.com", WRONG),
        h.login("racy@example.com", WRONG),
        h.login("racy@example.com", WRONG),
        h.login("racy@example.com", WRONG),
        h.login("racy@example.com", WRONG),
    );

    for result in [a, b, c, d, e, f] {
        assert!(matches!(
            result,
            Err(Error::InvalidCredentials | Error::Throttled { .. })
        ));
    }

    assert!(h.ledger.count(user.id).await.unwrap() <= 3);
}

#[tokio::test]
async fn malformed_login_input_is_rejected_before_lookup() {
    let h = Harness::new();
    h.register("valid@example.com").await;

    let bad_email = h.login("not-an-email", PASSWORD).await;
    assert!(matches!(bad_email, Err(Error::Validation(_))));

    let short_password = h.login("valid@example.com", "short").await;
    assert!(matches!(short_password, Err(Error::Validation(_))));
}
