//! Domain state types.
//!
//! This module defines the persisted document types for the inventory
//! backend. All types are `Clone` and serde-serializable so they can move
//! between stores, handlers, and tests without ceremony.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub uuid::Uuid);

impl UserId {
    /// Generate a new random `UserId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a stock item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockId(pub uuid::Uuid);

impl StockId {
    /// Generate a new random `StockId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for StockId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a cart entry.
///
/// Quota decisions address cart entries by this id, not by the
/// `(user, stock)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartEntryId(pub uuid::Uuid);

impl CartEntryId {
    /// Generate a new random `CartEntryId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for CartEntryId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a customer inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InquiryId(pub uuid::Uuid);

impl InquiryId {
    /// Generate a new random `InquiryId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for InquiryId {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Identity (verified token payload)
// ═══════════════════════════════════════════════════════════════════════

/// Verified caller identity produced by the token service.
///
/// This is the only thing the core ever learns about a bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Account the credential was issued for.
    pub user_id: UserId,

    /// Whether the account holds the admin role.
    pub is_admin: bool,

    /// When the credential was minted.
    pub issued_at: DateTime<Utc>,
}

// ═══════════════════════════════════════════════════════════════════════
// Users
// ═══════════════════════════════════════════════════════════════════════

/// A person's name, split the way the registration form collects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    /// First name.
    pub first: String,

    /// Optional middle name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,

    /// Last name.
    pub last: String,
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// State or province; empty for countries without one.
    #[serde(default)]
    pub state: String,

    /// Country.
    pub country: String,

    /// City.
    pub city: String,

    /// Street.
    pub street: String,

    /// House number.
    pub house_number: i32,

    /// Postal code.
    pub zip: i32,
}

/// A registered user account.
///
/// The password hash never leaves the store layer: it is skipped during
/// serialization so no handler can leak it by accident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Account id.
    pub id: UserId,

    /// Full name.
    pub name: PersonName,

    /// Contact phone number (9-10 digits).
    pub phone: String,

    /// Email address; unique across accounts.
    pub email: String,

    /// PHC-format password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Postal address.
    pub address: Address,

    /// Whether the account holds the admin role.
    pub is_admin: bool,

    /// Registration timestamp; immutable.
    pub created_at: DateTime<Utc>,
}

// ═══════════════════════════════════════════════════════════════════════
// Stock
// ═══════════════════════════════════════════════════════════════════════

/// An inventory stock item.
///
/// Most fields are free-form text imported from supplier sheets; only
/// `sku` carries a format constraint (letters, digits, and hyphens).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    /// Stock id.
    pub id: StockId,

    /// Manufacturer brand.
    #[serde(default)]
    pub brand: String,

    /// Model designation.
    #[serde(default)]
    pub model: String,

    /// Units on hand.
    #[serde(default)]
    pub quantity: i64,

    /// Listed price in USD, kept as entered (may include formatting).
    #[serde(default)]
    pub price_usd: String,

    /// Condition (new, refurbished, ...).
    #[serde(default)]
    pub condition: String,

    /// Short description.
    #[serde(default)]
    pub description: String,

    /// Long-form detail text.
    #[serde(default)]
    pub detail: String,

    /// Product category.
    #[serde(default)]
    pub category: String,

    /// Manufacturer part number.
    #[serde(default)]
    pub part_number: String,

    /// Stock-keeping unit; unique when non-empty.
    #[serde(default)]
    pub sku: String,

    /// Serial number.
    #[serde(default)]
    pub serial_number: String,

    /// Warehouse location.
    #[serde(default)]
    pub location: String,

    /// Availability status.
    #[serde(default)]
    pub status: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

// ═══════════════════════════════════════════════════════════════════════
// Cart & Quota
// ═══════════════════════════════════════════════════════════════════════

/// Lifecycle of a cart entry's quota request.
///
/// The state space is `{none, pending, approved, approved+handled,
/// rejected, rejected+handled}`; `handled` exists only on decided
/// requests, so combinations like "handled but never decided" cannot be
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuotaState {
    /// No quota request on this entry.
    None,

    /// Requested by the owner, awaiting an admin decision.
    Pending {
        /// Requested amount (at least 1).
        amount: u32,

        /// When the request was made.
        requested_at: DateTime<Utc>,
    },

    /// Approved by an admin.
    Approved {
        /// Requested amount.
        amount: u32,

        /// When the request was made.
        requested_at: DateTime<Utc>,

        /// When the approval was recorded.
        decided_at: DateTime<Utc>,

        /// Whether fulfillment has been carried out.
        handled: bool,
    },

    /// Rejected by an admin.
    Rejected {
        /// Requested amount.
        amount: u32,

        /// When the request was made.
        requested_at: DateTime<Utc>,

        /// Optional rejection reason shown to the requester.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,

        /// Whether the rejection has been communicated/closed out.
        handled: bool,
    },
}

impl QuotaState {
    /// Returns `true` if a quota request exists in any state.
    #[must_use]
    pub const fn is_requested(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns `true` for a decided request whose fulfillment is still open.
    #[must_use]
    pub const fn is_unhandled_decision(&self) -> bool {
        matches!(
            self,
            Self::Approved { handled: false, .. } | Self::Rejected { handled: false, .. }
        )
    }

    /// Requested amount, if a request exists.
    #[must_use]
    pub const fn amount(&self) -> Option<u32> {
        match self {
            Self::None => None,
            Self::Pending { amount, .. }
            | Self::Approved { amount, .. }
            | Self::Rejected { amount, .. } => Some(*amount),
        }
    }

    /// Fulfillment flag, if the request has been decided.
    #[must_use]
    pub const fn handled(&self) -> Option<bool> {
        match self {
            Self::None | Self::Pending { .. } => None,
            Self::Approved { handled, .. } | Self::Rejected { handled, .. } => Some(*handled),
        }
    }
}

impl Default for QuotaState {
    fn default() -> Self {
        Self::None
    }
}

/// One user's cart line for one stock item.
///
/// The `(user_id, stock_id)` pair is unique: a second write for the same
/// pair merges into the existing entry instead of creating a duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Entry id; quota decisions address entries by this.
    pub id: CartEntryId,

    /// Owning user.
    pub user_id: UserId,

    /// Referenced stock item.
    pub stock_id: StockId,

    /// Units in the cart; at least 1.
    pub quantity: i32,

    /// Quota request lifecycle for this entry.
    #[serde(default)]
    pub quota: QuotaState,

    /// Creation timestamp; immutable.
    pub created_at: DateTime<Utc>,

    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CartEntry {
    /// Create a fresh cart entry with default quantity and no quota request.
    #[must_use]
    pub fn new(user_id: UserId, stock_id: StockId, now: DateTime<Utc>) -> Self {
        Self {
            id: CartEntryId::new(),
            user_id,
            stock_id,
            quantity: 1,
            quota: QuotaState::None,
            created_at: now,
            updated_at: now,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Favorites & Inquiries
// ═══════════════════════════════════════════════════════════════════════

/// A user's favorite mark on a stock item; unique per `(user, stock)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    /// Owning user.
    pub user_id: UserId,

    /// Favorited stock item.
    pub stock_id: StockId,

    /// When the favorite was set.
    pub created_at: DateTime<Utc>,
}

/// A customer inquiry submitted through the public contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    /// Inquiry id.
    pub id: InquiryId,

    /// Sender name.
    pub name: String,

    /// Sender email.
    pub email: String,

    /// Message body.
    pub message: String,

    /// Submission timestamp; immutable.
    pub created_at: DateTime<Utc>,
}
