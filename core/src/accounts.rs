//! User account operations.
//!
//! Registration, lookup, update, and deletion, with the authorization
//! rules the API enforces: listing is admin-only, updates are allowed for
//! the account owner or an admin, deletion only for the owner. Email and
//! registration timestamp are immutable by construction — the patch type
//! simply has no fields for them.

use crate::error::{Error, Result};
use crate::providers::{PasswordHasher, UserRepository};
use crate::state::{Address, Identity, PersonName, User, UserId};
use crate::utils;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Registration input.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    /// Full name.
    pub name: PersonName,

    /// Contact phone number.
    pub phone: String,

    /// Email address.
    pub email: String,

    /// Plaintext password; hashed before it ever reaches a store.
    pub password: String,

    /// Postal address.
    pub address: Address,

    /// Whether the account is created with the admin role.
    #[serde(default)]
    pub is_admin: bool,
}

/// Partial update to a person's name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamePatch {
    /// New first name.
    pub first: Option<String>,

    /// New middle name.
    pub middle: Option<String>,

    /// New last name.
    pub last: Option<String>,
}

/// Partial update to a postal address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressPatch {
    /// New state or province.
    pub state: Option<String>,

    /// New country.
    pub country: Option<String>,

    /// New city.
    pub city: Option<String>,

    /// New street.
    pub street: Option<String>,

    /// New house number.
    pub house_number: Option<i32>,

    /// New postal code.
    pub zip: Option<i32>,
}

/// Partial update to a user account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    /// Name fields to change.
    pub name: Option<NamePatch>,

    /// New phone number.
    pub phone: Option<String>,

    /// Address fields to change.
    pub address: Option<AddressPatch>,

    /// New admin flag.
    pub is_admin: Option<bool>,
}

fn validate_name(name: &PersonName) -> Result<()> {
    if name.first.chars().count() < 2 || name.last.chars().count() < 2 {
        return Err(Error::Validation(
            "first and last name must be at least 2 characters".to_string(),
        ));
    }
    Ok(())
}

/// Register a new account.
///
/// # Errors
///
/// Returns error if:
/// - A field fails validation or the email is taken → `Error::Validation`
/// - A collaborator fails → `Error::Storage`
pub async fn register<U, H>(
    users: &U,
    hasher: &H,
    new: NewUser,
    now: DateTime<Utc>,
) -> Result<User>
where
    U: UserRepository,
    H: PasswordHasher,
{
    validate_name(&new.name)?;
    if !utils::is_valid_phone(&new.phone) {
        return Err(Error::Validation("phone number must be 9-10 digits".to_string()));
    }
    if !utils::is_valid_email(&new.email) {
        return Err(Error::Validation("email must be a valid address".to_string()));
    }
    if !utils::is_valid_password(&new.password) {
        return Err(Error::Validation(
            "password must be at least 8 characters and contain a letter and a digit"
                .to_string(),
        ));
    }

    if users.find_by_email(&new.email).await?.is_some() {
        return Err(Error::Validation("user already exists".to_string()));
    }

    let user = User {
        id: UserId::new(),
        name: new.name,
        phone: new.phone,
        email: new.email,
        password_hash: hasher.hash(&new.password)?,
        address: new.address,
        is_admin: new.is_admin,
        created_at: now,
    };

    let created = users.create(&user).await?;

    tracing::info!(account = %created.id.0, "user registered");

    Ok(created)
}

/// Get a user by id.
///
/// # Errors
///
/// Returns error if:
/// - The user does not exist → `Error::NotFound`
/// - The query fails → `Error::Storage`
pub async fn get_user<U>(users: &U, user_id: UserId) -> Result<User>
where
    U: UserRepository,
{
    users
        .find(user_id)
        .await?
        .ok_or(Error::not_found("User"))
}

/// List every account; admin only.
///
/// # Errors
///
/// Returns error if:
/// - The caller is not an admin → `Error::Forbidden`
/// - The query fails → `Error::Storage`
pub async fn list_users<U>(users: &U, identity: &Identity) -> Result<Vec<User>>
where
    U: UserRepository,
{
    if !identity.is_admin {
        return Err(Error::Forbidden { required: "admin".to_string() });
    }
    users.list().await
}

/// Apply a partial update to an account.
///
/// Only the owner or an admin may update; email and `created_at` cannot
/// change.
///
/// # Errors
///
/// Returns error if:
/// - The target does not exist → `Error::NotFound`
/// - The caller is neither owner nor admin → `Error::Forbidden`
/// - A patched field fails validation → `Error::Validation`
/// - The query fails → `Error::Storage`
pub async fn update_user<U>(
    users: &U,
    identity: &Identity,
    target: UserId,
    patch: UserPatch,
) -> Result<User>
where
    U: UserRepository,
{
    let Some(mut user) = users.find(target).await? else {
        return Err(Error::not_found("User"));
    };

    if !identity.is_admin && identity.user_id != target {
        return Err(Error::Forbidden {
            required: "admin or account owner".to_string(),
        });
    }

    if let Some(name) = patch.name {
        if let Some(first) = name.first {
            user.name.first = first;
        }
        if let Some(middle) = name.middle {
            user.name.middle = if middle.is_empty() { None } else { Some(middle) };
        }
        if let Some(last) = name.last {
            user.name.last = last;
        }
        validate_name(&user.name)?;
    }

    if let Some(phone) = patch.phone {
        if !utils::is_valid_phone(&phone) {
            return Err(Error::Validation("phone number must be 9-10 digits".to_string()));
        }
        user.phone = phone;
    }

    if let Some(address) = patch.address {
        if let Some(state) = address.state {
            user.address.state = state;
        }
        if let Some(country) = address.country {
            user.address.country = country;
        }
        if let Some(city) = address.city {
            user.address.city = city;
        }
        if let Some(street) = address.street {
            user.address.street = street;
        }
        if let Some(house_number) = address.house_number {
            user.address.house_number = house_number;
        }
        if let Some(zip) = address.zip {
            user.address.zip = zip;
        }
    }

    if let Some(is_admin) = patch.is_admin {
        user.is_admin = is_admin;
    }

    users.update(&user).await
}

/// Delete an account; owners only.
///
/// # Errors
///
/// Returns error if:
/// - The target does not exist → `Error::NotFound`
/// - The caller is not the owner → `Error::Forbidden`
/// - The query fails → `Error::Storage`
pub async fn delete_user<U>(
    users: &U,
    identity: &Identity,
    target: UserId,
) -> Result<User>
where
    U: UserRepository,
{
    let Some(user) = users.find(target).await? else {
        return Err(Error::not_found("User"));
    };

    if identity.user_id != target {
        return Err(Error::Forbidden {
            required: "account owner".to_string(),
        });
    }

    users.delete(target).await?;

    tracing::info!(account = %target.0, "user deleted");

    Ok(user)
}
