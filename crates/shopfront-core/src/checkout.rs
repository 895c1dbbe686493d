//! # Checkout Computation
//!
//! Pure order math and the order record types. Nothing here touches state;
//! the store crate drives these from its `place_order` flow after the
//! shopper submits the checkout form.
//!
//! ## Totals Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Totals                                      │
//! │                                                                         │
//! │  Cart subtotal S                                                        │
//! │       │                                                                 │
//! │       ├── shipping = $0.00   if S > $100.00 (strictly greater)          │
//! │       │              $9.99   otherwise — exactly $100.00 still pays     │
//! │       │                                                                 │
//! │       ├── tax = 8% × S       (800 bps, integer rounding)                │
//! │       │                                                                 │
//! │       └── total = S + shipping + tax                                    │
//! │                                                                         │
//! │  Example: S = $150.00 → shipping $0.00, tax $12.00, total $162.00      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::CartLine;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::TaxRate;
use crate::validation::{
    validate_card_number, validate_cvv, validate_expiry_date, validate_required,
};

// =============================================================================
// Checkout Policy
// =============================================================================

/// The pricing rules applied at checkout.
///
/// Defaults are the storefront's fixed rules; the configuration layer can
/// override them per deployment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CheckoutPolicy {
    /// Sales tax applied to the subtotal.
    pub tax_rate: TaxRate,

    /// Orders strictly above this subtotal ship free.
    pub free_shipping_threshold: Money,

    /// Flat shipping charged below (and at) the threshold.
    pub flat_shipping: Money,
}

impl Default for CheckoutPolicy {
    /// 8% tax, free shipping above $100.00, flat $9.99 otherwise.
    fn default() -> Self {
        CheckoutPolicy {
            tax_rate: TaxRate::from_bps(800),
            free_shipping_threshold: Money::from_cents(10_000),
            flat_shipping: Money::from_cents(999),
        }
    }
}

// =============================================================================
// Checkout Totals
// =============================================================================

/// Derived order totals for a given cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotals {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

impl CheckoutTotals {
    /// Computes totals for a subtotal under the given policy.
    ///
    /// The free-shipping boundary is exclusive: a subtotal of exactly
    /// $100.00 still pays the flat rate.
    pub fn for_subtotal(subtotal: Money, policy: &CheckoutPolicy) -> Self {
        let shipping = if subtotal > policy.free_shipping_threshold {
            Money::zero()
        } else {
            policy.flat_shipping
        };
        let tax = subtotal.calculate_tax(policy.tax_rate);

        CheckoutTotals {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Amount still missing to reach free shipping, if any.
    pub fn remaining_for_free_shipping(&self, policy: &CheckoutPolicy) -> Option<Money> {
        if self.subtotal > policy.free_shipping_threshold {
            None
        } else {
            Some(policy.free_shipping_threshold - self.subtotal)
        }
    }
}

// =============================================================================
// Checkout Forms
// =============================================================================

/// Shipping address form. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
}

impl ShippingInfo {
    /// Validates that every field is filled in. First failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required("first name", &self.first_name)?;
        validate_required("last name", &self.last_name)?;
        validate_required("address", &self.address)?;
        validate_required("city", &self.city)?;
        validate_required("state", &self.state)?;
        validate_required("zip code", &self.zip_code)?;
        validate_required("phone", &self.phone)?;
        Ok(())
    }
}

/// Payment card form.
///
/// Card data lives only in memory during checkout; the order record keeps
/// the last 4 digits and nothing else, and nothing is ever transmitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCard {
    /// Card number; spaces between digit groups are tolerated.
    pub card_number: String,

    /// Expiry in MM/YY form.
    pub expiry_date: String,

    pub cvv: String,

    pub card_name: String,
}

impl PaymentCard {
    /// Validates all card fields. First failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required("card number", &self.card_number)?;
        validate_required("cardholder name", &self.card_name)?;
        validate_required("expiry date", &self.expiry_date)?;
        validate_required("cvv", &self.cvv)?;
        validate_card_number(&self.card_number)?;
        validate_expiry_date(&self.expiry_date)?;
        validate_cvv(&self.cvv)?;
        Ok(())
    }

    /// Returns the last 4 digits — the only part of the number an order
    /// record is allowed to hold.
    pub fn last4(&self) -> String {
        let digits: String = self.card_number.chars().filter(|c| c.is_ascii_digit()).collect();
        let cut = digits.len().saturating_sub(4);
        digits[cut..].to_string()
    }
}

// =============================================================================
// Order
// =============================================================================

/// Lifecycle status of an order.
///
/// The storefront has no fulfillment pipeline; orders are confirmed at
/// placement and never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Confirmed,
}

/// A locally constructed order record.
///
/// Built at checkout, logged, and never sent anywhere — there is no payment
/// gateway or order backend behind this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,

    /// Snapshot of the cart lines at placement.
    pub lines: Vec<CartLine>,

    pub shipping_info: ShippingInfo,

    /// Last 4 digits of the card; the full number is discarded.
    pub card_last4: String,

    pub totals: CheckoutTotals,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Assembles an order from validated checkout inputs.
    pub fn build(
        user_id: String,
        lines: Vec<CartLine>,
        shipping_info: ShippingInfo,
        card: &PaymentCard,
        totals: CheckoutTotals,
    ) -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            user_id,
            lines,
            shipping_info,
            card_last4: card.last4(),
            totals,
            status: OrderStatus::Confirmed,
            placed_at: Utc::now(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62704".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    fn card() -> PaymentCard {
        PaymentCard {
            card_number: "4242 4242 4242 4242".to_string(),
            expiry_date: "12/30".to_string(),
            cvv: "123".to_string(),
            card_name: "Jane Doe".to_string(),
        }
    }

    #[test]
    fn test_totals_free_shipping_boundary_is_exclusive() {
        let policy = CheckoutPolicy::default();

        // Exactly $100.00 still pays shipping
        let at = CheckoutTotals::for_subtotal(Money::from_cents(10_000), &policy);
        assert_eq!(at.shipping.cents(), 999);

        // One cent over ships free
        let over = CheckoutTotals::for_subtotal(Money::from_cents(10_001), &policy);
        assert!(over.shipping.is_zero());
    }

    #[test]
    fn test_totals_at_150_dollars() {
        let policy = CheckoutPolicy::default();
        let totals = CheckoutTotals::for_subtotal(Money::from_cents(15_000), &policy);

        assert!(totals.shipping.is_zero());
        assert_eq!(totals.tax.cents(), 1200);
        assert_eq!(totals.total.cents(), 16_200);
    }

    #[test]
    fn test_totals_below_threshold() {
        let policy = CheckoutPolicy::default();
        // $29.99 → shipping $9.99, tax $2.40, total $42.38
        let totals = CheckoutTotals::for_subtotal(Money::from_cents(2999), &policy);

        assert_eq!(totals.shipping.cents(), 999);
        assert_eq!(totals.tax.cents(), 240);
        assert_eq!(totals.total.cents(), 4238);
    }

    #[test]
    fn test_remaining_for_free_shipping() {
        let policy = CheckoutPolicy::default();

        let totals = CheckoutTotals::for_subtotal(Money::from_cents(7500), &policy);
        assert_eq!(
            totals.remaining_for_free_shipping(&policy),
            Some(Money::from_cents(2500))
        );

        let totals = CheckoutTotals::for_subtotal(Money::from_cents(15_000), &policy);
        assert_eq!(totals.remaining_for_free_shipping(&policy), None);
    }

    #[test]
    fn test_shipping_info_validation() {
        assert!(shipping().validate().is_ok());

        let mut missing = shipping();
        missing.city = "  ".to_string();
        assert!(missing.validate().is_err());
    }

    #[test]
    fn test_card_validation() {
        assert!(card().validate().is_ok());

        let mut short = card();
        short.card_number = "4242 4242".to_string();
        assert!(short.validate().is_err());

        let mut bad_expiry = card();
        bad_expiry.expiry_date = "1/3".to_string();
        assert!(bad_expiry.validate().is_err());

        let mut bad_cvv = card();
        bad_cvv.cvv = "12".to_string();
        assert!(bad_cvv.validate().is_err());
    }

    #[test]
    fn test_card_last4() {
        assert_eq!(card().last4(), "4242");

        let other = PaymentCard {
            card_number: "5555555555554444".to_string(),
            ..card()
        };
        assert_eq!(other.last4(), "4444");
    }

    #[test]
    fn test_order_holds_only_last4() {
        let totals =
            CheckoutTotals::for_subtotal(Money::from_cents(15_000), &CheckoutPolicy::default());
        let order = Order::build(
            "user-1".to_string(),
            Vec::new(),
            shipping(),
            &card(),
            totals,
        );

        assert_eq!(order.card_last4, "4242");
        assert_eq!(order.status, OrderStatus::Confirmed);
        let json = serde_json::to_string(&order).unwrap();
        assert!(!json.contains("4242 4242 4242 4242"));
    }
}
