//! # Cart Math
//!
//! Pure cart logic: merge-by-id inserts, stock clamping, and derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action            Operation              Cart Change           │
//! │  ──────────────            ─────────              ───────────           │
//! │                                                                         │
//! │  Click "Add to Cart" ────► add(product) ────────► merge or push line    │
//! │                                                                         │
//! │  Change quantity ────────► update_quantity() ───► qty = min(n, stock)   │
//! │                            (n ≤ 0 removes)                              │
//! │                                                                         │
//! │  Click remove ───────────► remove(id) ──────────► drop line (no-op if   │
//! │                                                    absent)              │
//! │                                                                         │
//! │  Click clear ────────────► clear() ─────────────► lines.clear()         │
//! │                                                                         │
//! │  INVARIANT: one line per product id; 1 ≤ quantity ≤ stock snapshot.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Cart Line
// =============================================================================

/// One product-and-quantity pair within a cart.
///
/// ## Design Notes
/// - `product_id`: reference back to the catalog entry
/// - title/price/image/stock: frozen copy of the product at the moment it
///   was added, so the cart displays consistent data even if the catalog
///   entry is later replaced. Lines are never live references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product id this line refers to.
    pub product_id: String,

    /// Title at time of adding (frozen).
    pub title: String,

    /// Price in cents at time of adding (frozen).
    pub price_cents: i64,

    /// Image URL at time of adding (frozen).
    pub image: String,

    /// Stock level at time of adding (frozen). Upper bound for quantity.
    pub stock: i64,

    /// Quantity in cart. Always within `[1, stock]`.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a cart line from a catalog product with quantity 1.
    ///
    /// The price (and the stock ceiling) is captured at this moment; later
    /// catalog changes do not flow into the line.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id.clone(),
            title: product.title.clone(),
            price_cents: product.price_cents,
            image: product.image.clone(),
            stock: product.stock,
            quantity: 1,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges by
///   incrementing quantity)
/// - Quantity stays within `[1, stock snapshot]`; a requested quantity of
///   zero or below removes the line instead of leaving a zero-quantity line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Ordered line items.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart, or increments its line if already present.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1, clamped to the line's stock
    ///   snapshot (adding past the snapshot silently holds at the ceiling)
    /// - Product not in cart: new line with quantity 1
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = (line.quantity + 1).min(line.stock);
            return;
        }

        self.lines.push(CartLine::from_product(product));
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity ≤ 0`: behaves exactly as [`Cart::remove`]
    /// - otherwise: quantity = `min(quantity, stock snapshot)`
    /// - unknown product id: no-op
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity.min(line.stock);
        }
    }

    /// Removes a line by product id. No-op when the id is not in the cart.
    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns the number of distinct lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Calculates the cart subtotal: Σ(price × quantity).
    pub fn total_price(&self) -> Money {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(Money::zero(), |acc, t| acc + t)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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

    #[test]
    fn test_add_new_line() {
        let mut cart = Cart::new();
        let product = test_product("1", 19999, 50);

        cart.add(&product);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_price().cents(), 19999);
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::new();
        let product = test_product("1", 19999, 50);

        cart.add(&product);
        cart.add(&product);
        cart.add(&product);

        // Still one line, quantity accumulated
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_add_clamps_to_stock_snapshot() {
        let mut cart = Cart::new();
        let product = test_product("1", 1000, 2);

        for _ in 0..5 {
            cart.add(&product);
        }

        // quantity = min(call count, stock)
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_update_quantity_clamps_to_stock() {
        let mut cart = Cart::new();
        let product = test_product("1", 1000, 30);
        cart.add(&product);

        cart.update_quantity("1", 10);
        assert_eq!(cart.total_items(), 10);

        cart.update_quantity("1", 500);
        assert_eq!(cart.total_items(), 30);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new();
        let product = test_product("1", 1000, 30);

        cart.add(&product);
        cart.update_quantity("1", 0);
        assert!(cart.is_empty());

        cart.add(&product);
        cart.update_quantity("1", -4);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        let product = test_product("1", 1000, 30);
        cart.add(&product);

        cart.remove("does-not-exist");
        assert_eq!(cart.line_count(), 1);

        cart.remove("1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_over_multiple_lines() {
        let mut cart = Cart::new();
        let headphones = test_product("1", 19999, 50);
        let shirt = test_product("2", 2999, 100);

        cart.add(&headphones);
        cart.add(&shirt);
        cart.update_quantity("2", 3);

        assert_eq!(cart.total_items(), 4);
        // 19999 + 3 × 2999
        assert_eq!(cart.total_price().cents(), 28996);
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let cart = Cart::new();
        assert_eq!(cart.total_items(), 0);
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_line_snapshot_is_frozen() {
        let mut cart = Cart::new();
        let mut product = test_product("1", 19999, 50);
        cart.add(&product);

        // Catalog-side change after the add must not leak into the line
        product.price_cents = 100;
        product.stock = 1;

        let line = &cart.lines[0];
        assert_eq!(line.price_cents, 19999);
        assert_eq!(line.stock, 50);
    }
}
