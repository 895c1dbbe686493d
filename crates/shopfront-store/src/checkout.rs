//! # Order Placement
//!
//! Drives a checkout submission end to end against the state containers.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    place_order                                          │
//! │                                                                         │
//! │  1. cart empty? ───────────► error notification, abort                  │
//! │  2. shipping form valid? ──► first failure → error notification,        │
//! │  3. card form valid? ──────► abort, NO state mutated                    │
//! │  4. totals from subtotal (shipping boundary, 8% tax)                   │
//! │  5. simulated processing delay (always resolves)                       │
//! │  6. build Order — card number truncated to last 4 digits               │
//! │  7. log the order record (it is never sent anywhere)                   │
//! │  8. clear the cart                                                      │
//! │  9. success notification                                                │
//! │                                                                         │
//! │  Stock is NOT decremented — there is no reservation or fulfillment     │
//! │  behind this flow. Navigation after success is the UI's concern.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use tracing::{info, warn};

use shopfront_core::{
    CheckoutPolicy, CheckoutTotals, CoreError, Order, PaymentCard, ShippingInfo, User,
};

use crate::cart::CartStore;
use crate::error::StoreResult;
use crate::notify::NotificationHub;

/// Stand-in for the absent payment-gateway round-trip.
const PROCESSING_DELAY: Duration = Duration::from_millis(2000);

/// Places an order for the signed-in user's cart.
///
/// Route guarding is the UI's job; callers pass the authenticated `user`.
/// On any validation failure the error is surfaced through the hub and the
/// cart is left untouched. On success the cart is cleared (which persists
/// the empty line list) and the order record is returned.
pub async fn place_order(
    cart: &CartStore,
    hub: &NotificationHub,
    policy: &CheckoutPolicy,
    user: &User,
    shipping: ShippingInfo,
    card: PaymentCard,
) -> StoreResult<Order> {
    let lines = cart.lines();
    if lines.is_empty() {
        warn!("Checkout attempted with empty cart");
        hub.error("Your cart is empty");
        return Err(CoreError::EmptyCart.into());
    }

    if let Err(err) = shipping.validate() {
        hub.error(err.to_string());
        return Err(CoreError::from(err).into());
    }

    if let Err(err) = card.validate() {
        hub.error(err.to_string());
        return Err(CoreError::from(err).into());
    }

    let totals = CheckoutTotals::for_subtotal(cart.total_price(), policy);

    // Simulate order processing
    tokio::time::sleep(PROCESSING_DELAY).await;

    let order = Order::build(user.id.clone(), lines, shipping, &card, totals);

    // The record goes to the log and nowhere else
    info!(
        order_id = %order.id,
        user_id = %order.user_id,
        items = order.lines.len(),
        subtotal = %order.totals.subtotal,
        shipping = %order.totals.shipping,
        tax = %order.totals.tax,
        total = %order.totals.total,
        card_last4 = %order.card_last4,
        "Order placed"
    );

    cart.clear_cart();
    hub.success("Order placed successfully!");

    Ok(order)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{KeyValueStore, MemoryStore};
    use crate::notify::NotificationKind;
    use chrono::Utc;
    use shopfront_core::{Money, Product, Role};
    use std::sync::Arc;

    fn test_user() -> User {
        User {
            id: User::id_for_email("jane@x.com"),
            email: "jane@x.com".to_string(),
            name: "jane".to_string(),
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    fn test_product(id: &str, price_cents: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Product {}", id),
            description: String::new(),
            price_cents,
            category: "Test".to_string(),
            image: String::new(),
            stock,
            rating: 4.0,
            reviews: 1,
            created_at: Utc::now(),
        }
    }

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

    fn cart_with_watch() -> (CartStore, User) {
        let cart = CartStore::new(Arc::new(MemoryStore::new()));
        let user = test_user();
        cart.set_user(Some(&user));
        cart.add_to_cart(&test_product("3", 29999, 30));
        (cart, user)
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_order_clears_cart_and_notifies() {
        let (cart, user) = cart_with_watch();
        let hub = NotificationHub::new();

        let order = place_order(
            &cart,
            &hub,
            &CheckoutPolicy::default(),
            &user,
            shipping(),
            card(),
        )
        .await
        .unwrap();

        // $299.99 → free shipping, $24.00 tax, $323.99 total
        assert_eq!(order.totals.subtotal, Money::from_cents(29999));
        assert!(order.totals.shipping.is_zero());
        assert_eq!(order.totals.tax.cents(), 2400);
        assert_eq!(order.totals.total.cents(), 32399);
        assert_eq!(order.card_last4, "4242");

        assert!(cart.is_empty());
        let active = hub.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].kind, NotificationKind::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_shipping_aborts_without_mutating_cart() {
        let (cart, user) = cart_with_watch();
        let hub = NotificationHub::new();

        let mut bad = shipping();
        bad.zip_code = String::new();

        let result = place_order(
            &cart,
            &hub,
            &CheckoutPolicy::default(),
            &user,
            bad,
            card(),
        )
        .await;

        assert!(result.is_err());
        // Cart untouched, error surfaced
        assert_eq!(cart.total_items(), 1);
        let active = hub.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].kind, NotificationKind::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_card_aborts_without_mutating_cart() {
        let (cart, user) = cart_with_watch();
        let hub = NotificationHub::new();

        let mut bad = card();
        bad.card_number = "1234".to_string();

        let result = place_order(
            &cart,
            &hub,
            &CheckoutPolicy::default(),
            &user,
            shipping(),
            bad,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(cart.total_items(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_cart_is_rejected() {
        let cart = CartStore::new(Arc::new(MemoryStore::new()));
        let user = test_user();
        cart.set_user(Some(&user));
        let hub = NotificationHub::new();

        let result = place_order(
            &cart,
            &hub,
            &CheckoutPolicy::default(),
            &user,
            shipping(),
            card(),
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_does_not_decrement_stock_or_erase_saved_cart_key() {
        let kv: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let cart = CartStore::new(kv.clone());
        let user = test_user();
        cart.set_user(Some(&user));
        cart.add_to_cart(&test_product("3", 29999, 30));

        let hub = NotificationHub::new();
        place_order(
            &cart,
            &hub,
            &CheckoutPolicy::default(),
            &user,
            shipping(),
            card(),
        )
        .await
        .unwrap();

        // The persisted cart is now the empty list, not a removed key
        let raw = kv.get(&crate::cart::cart_key(&user.id)).unwrap();
        assert_eq!(raw, "[]");
    }
}
