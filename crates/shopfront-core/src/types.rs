//! # Domain Types
//!
//! Core domain types used throughout Shopfront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     User        │   │    Product      │   │     Role        │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID v5)   │   │  id (sequence)  │   │  User           │       │
//! │  │  email          │   │  title          │   │  Admin          │       │
//! │  │  name           │   │  price_cents    │   └─────────────────┘       │
//! │  │  role           │   │  stock          │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    TaxRate      │   │   NewProduct    │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  bps (u32)      │   │  Product minus  │                             │
//! │  │  800 = 8%       │   │  id + timestamp │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Notes
//! - User ids are UUID v5 hashes of the email, so the same email always
//!   resolves to the same persisted cart key across sessions.
//! - Product ids are sequential stringified integers issued by the catalog
//!   container's monotonic counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000. The storefront's 8% sales tax is 800 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Role
// =============================================================================

/// The role assigned to an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular shopper (default for registration).
    #[default]
    User,
    /// Admin dashboard access.
    Admin,
}

impl Role {
    /// Derives the role a login email receives.
    ///
    /// The auth layer is a local simulation with no backend, so the role is
    /// inferred from the email itself: any address containing "admin" gets
    /// the admin role.
    pub fn from_email(email: &str) -> Self {
        if email.contains("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// An authenticated user identity.
///
/// Synthesized at login/registration (never verified against a backend),
/// persisted under the `user_data` key, and cleared on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier derived from the email (UUID v5).
    pub id: String,

    /// Login email, kept verbatim.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Role derived at login (see [`Role::from_email`]).
    pub role: Role,

    /// When this identity was synthesized.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns the stable id a given email maps to.
    ///
    /// UUID v5 is a name hash: deterministic per email, distinct across
    /// emails. The cart persistence key is derived from this, so a shopper
    /// who logs back in with the same email finds the same saved cart.
    pub fn id_for_email(email: &str) -> String {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, email.as_bytes()).to_string()
    }

    /// Checks whether this user has admin access.
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Product
// =============================================================================

/// A purchasable catalog entry.
///
/// Immutable once added except by full replacement; the catalog is
/// append-only within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Sequential stringified identifier issued by the catalog.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Longer marketing description.
    pub description: String,

    /// Unit price in cents (non-negative).
    pub price_cents: i64,

    /// Free-text category (e.g. "Electronics").
    pub category: String,

    /// Image URL for display.
    pub image: String,

    /// Units available. Display and clamp value only — never decremented
    /// by a purchase.
    pub stock: i64,

    /// Average rating, 0.0 to 5.0.
    pub rating: f32,

    /// Number of reviews behind the rating.
    pub reviews: i64,

    /// When the product was added to the catalog.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks if the product has any units left to display as available.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// New Product
// =============================================================================

/// Payload for appending a product to the catalog.
///
/// Everything a [`Product`] carries except the id and timestamp, which the
/// catalog container assigns on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub category: String,
    pub image: String,
    pub stock: i64,
    pub rating: f32,
    pub reviews: i64,
}

impl NewProduct {
    /// Materializes the payload into a full product with the given identity.
    pub fn into_product(self, id: String, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            title: self.title,
            description: self.description,
            price_cents: self.price_cents,
            category: self.category,
            image: self.image,
            stock: self.stock,
            rating: self.rating,
            reviews: self.reviews,
            created_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
