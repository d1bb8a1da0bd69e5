//! Login flow.
//!
//! Sequences the throttle, the password check, and token minting for one
//! login attempt. The ledger is only ever written on a failed password
//! check; a successful login leaves prior failures in place.

use crate::error::{Error, Result};
use crate::providers::{FailureLedger, PasswordHasher, TokenService, UserRepository};
use crate::state::Identity;
use crate::throttle;
use crate::utils;
use chrono::{DateTime, Utc};

/// Attempt a login and mint a bearer token on success.
///
/// The caller learns nothing about whether the email or the password was
/// the wrong half of the pair.
///
/// # Errors
///
/// Returns error if:
/// - The input is malformed → `Error::Validation`
/// - The account is inside the failure window → `Error::Throttled`
/// - The pair does not match an account → `Error::InvalidCredentials`
/// - A collaborator fails → `Error::Storage`
pub async fn attempt_login<U, L, H, T>(
    users: &U,
    ledger: &L,
    hasher: &H,
    tokens: &T,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<String>
where
    U: UserRepository,
    L: FailureLedger,
    H: PasswordHasher,
    T: TokenService,
{
    if !utils::is_valid_email(email) {
        return Err(Error::Validation("email must be a valid address".to_string()));
    }
    if password.len() < 8 {
        return Err(Error::Validation(
            "password must be at least 8 characters long".to_string(),
        ));
    }

    let Some(user) = users.find_by_email(email).await? else {
        return Err(Error::InvalidCredentials);
    };

    throttle::ensure_permitted(ledger, user.id, now).await?;

    if !hasher.verify(password, &user.password_hash)? {
        ledger.record(user.id, now).await?;
        tracing::warn!(
            account = %user.id.0,
            "failed login attempt recorded"
        );
        return Err(Error::InvalidCredentials);
    }

    // Success does not touch the ledger: a lone good login between
    // failures must not reset the window.
    let identity = Identity {
        user_id: user.id,
        is_admin: user.is_admin,
        issued_at: now,
    };
    let token = tokens.issue(&identity)?;

    tracing::info!(
        account = %user.id.0,
        is_admin = user.is_admin,
        "login succeeded"
    );

    Ok(token)
}
