//! # shopfront-core: Pure Business Logic for Shopfront
//!
//! This crate is the **heart** of Shopfront. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront UI (external)                       │   │
//! │  │    Browse ──► Cart ──► Checkout ──► Admin dashboard             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                shopfront-store (state containers)               │   │
//! │  │    AuthStore, CatalogStore, CartStore, NotificationHub          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopfront-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ checkout  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  Totals   │  │   │
//! │  │   │   User    │  │  TaxCalc  │  │ CartLine  │  │  Order    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO CLOCK-DRIVEN LOGIC              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Role, Product, TaxRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart math: merging, clamping, derived totals
//! - [`checkout`] - Checkout totals, forms, and the order record
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Key-value store, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::checkout::{CheckoutPolicy, CheckoutTotals};
//! use shopfront_core::money::Money;
//!
//! // $150.00 cart: free shipping, 8% tax
//! let totals = CheckoutTotals::for_subtotal(Money::from_cents(15_000), &CheckoutPolicy::default());
//!
//! assert!(totals.shipping.is_zero());
//! assert_eq!(totals.tax.cents(), 1200);
//! assert_eq!(totals.total.cents(), 16_200);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shopfront_core::Money` instead of
// `use shopfront_core::money::Money`

pub use cart::{Cart, CartLine};
pub use checkout::{CheckoutPolicy, CheckoutTotals, Order, OrderStatus, PaymentCard, ShippingInfo};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{NewProduct, Product, Role, TaxRate, User};
