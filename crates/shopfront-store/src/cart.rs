//! # Cart Container
//!
//! Owns the active user's line items and keeps them persisted per identity.
//!
//! ## Identity Binding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart / Identity Interaction                          │
//! │                                                                         │
//! │  login(A) ──► set_user(Some(A)) ──► load cart_<A> from the kv store    │
//! │                                      (malformed ⇒ empty)               │
//! │                                                                         │
//! │  login(B) ──► set_user(Some(B)) ──► cart_<B> REPLACES the visible      │
//! │                                      cart — never a merge with A's     │
//! │                                                                         │
//! │  logout ───► set_user(None) ──────► in-memory cart cleared;            │
//! │                                      cart_<A> stays on disk            │
//! │                                                                         │
//! │  every mutation ──► full line list rewritten under cart_<owner>        │
//! │                                                                         │
//! │  Stock is never decremented anywhere — the snapshot on each line is    │
//! │  a display/clamp ceiling, not a reservation.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use shopfront_core::{Cart, CartLine, Money, Product, User};

use crate::kv::KeyValueStore;

/// Returns the persistence key for a user's cart.
pub fn cart_key(user_id: &str) -> String {
    format!("cart_{}", user_id)
}

struct Inner {
    cart: Cart,
    /// Id of the identity the visible cart belongs to, when bound.
    owner: Option<String>,
}

/// The cart state container.
///
/// ## Thread Safety
/// Cart and owner are updated together on identity switches, so both sit
/// behind one `Mutex` — two locks would allow a reader to observe user B
/// with user A's lines.
pub struct CartStore {
    kv: Arc<dyn KeyValueStore>,
    inner: Mutex<Inner>,
}

impl CartStore {
    /// Creates an unbound container with an empty cart.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        CartStore {
            kv,
            inner: Mutex::new(Inner {
                cart: Cart::new(),
                owner: None,
            }),
        }
    }

    /// Reacts to an identity change.
    ///
    /// ## Behavior
    /// - `Some(user)`: binds the cart to that identity and swaps in its
    ///   persisted lines (an unparseable record reads as an empty cart)
    /// - `None`: clears the in-memory cart only; persisted carts are left
    ///   untouched so they survive a later login
    pub fn set_user(&self, user: Option<&User>) {
        let mut inner = self.inner.lock().expect("cart mutex poisoned");

        match user {
            Some(user) => {
                inner.cart = self.load_cart(&user.id);
                inner.owner = Some(user.id.clone());
                debug!(user_id = %user.id, lines = inner.cart.line_count(), "Cart bound to identity");
            }
            None => {
                inner.cart.clear();
                inner.owner = None;
                debug!("Cart unbound");
            }
        }
    }

    /// Adds one unit of a product, merging into an existing line.
    ///
    /// The product's title/price/image/stock are copied by value into the
    /// line; quantity increments clamp at the line's stock snapshot.
    pub fn add_to_cart(&self, product: &Product) {
        let mut inner = self.inner.lock().expect("cart mutex poisoned");
        inner.cart.add(product);
        debug!(product_id = %product.id, "Added to cart");
        self.persist(&inner);
    }

    /// Removes a line by product id. No-op when absent.
    pub fn remove_from_cart(&self, product_id: &str) {
        let mut inner = self.inner.lock().expect("cart mutex poisoned");
        inner.cart.remove(product_id);
        debug!(product_id = %product_id, "Removed from cart");
        self.persist(&inner);
    }

    /// Sets a line's quantity; non-positive values remove the line and
    /// anything above the stock snapshot clamps down to it.
    pub fn update_quantity(&self, product_id: &str, quantity: i64) {
        let mut inner = self.inner.lock().expect("cart mutex poisoned");
        inner.cart.update_quantity(product_id, quantity);
        debug!(product_id = %product_id, quantity, "Updated cart quantity");
        self.persist(&inner);
    }

    /// Empties the cart (and persists the empty line list).
    pub fn clear_cart(&self) {
        let mut inner = self.inner.lock().expect("cart mutex poisoned");
        inner.cart.clear();
        debug!("Cart cleared");
        self.persist(&inner);
    }

    /// Returns a snapshot of the current lines.
    pub fn lines(&self) -> Vec<CartLine> {
        self.inner
            .lock()
            .expect("cart mutex poisoned")
            .cart
            .lines
            .clone()
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> i64 {
        self.inner.lock().expect("cart mutex poisoned").cart.total_items()
    }

    /// Cart subtotal: Σ(price × quantity).
    pub fn total_price(&self) -> Money {
        self.inner.lock().expect("cart mutex poisoned").cart.total_price()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().expect("cart mutex poisoned").cart.is_empty()
    }

    fn load_cart(&self, user_id: &str) -> Cart {
        let Some(raw) = self.kv.get(&cart_key(user_id)) else {
            return Cart::new();
        };

        match serde_json::from_str::<Vec<CartLine>>(&raw) {
            Ok(lines) => Cart { lines },
            Err(err) => {
                warn!(user_id = %user_id, %err, "Persisted cart malformed, starting empty");
                Cart::new()
            }
        }
    }

    /// Rewrites the owner's persisted line list. Unbound carts (no user)
    /// stay memory-only; there is no anonymous cart key.
    fn persist(&self, inner: &Inner) {
        let Some(owner) = &inner.owner else {
            return;
        };

        match serde_json::to_string(&inner.cart.lines) {
            Ok(raw) => self.kv.set(&cart_key(owner), &raw),
            Err(err) => warn!(user_id = %owner, %err, "Could not serialize cart"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use chrono::Utc;
    use shopfront_core::Role;

    fn test_user(email: &str) -> User {
        User {
            id: User::id_for_email(email),
            email: email.to_string(),
            name: email.split('@').next().unwrap().to_string(),
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

    #[test]
    fn test_mutations_persist_under_user_key() {
        let kv: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let cart = CartStore::new(kv.clone());
        let user = test_user("jane@x.com");

        cart.set_user(Some(&user));
        cart.add_to_cart(&test_product("1", 19999, 50));

        let raw = kv.get(&cart_key(&user.id)).unwrap();
        let lines: Vec<CartLine> = serde_json::from_str(&raw).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, "1");
    }

    #[test]
    fn test_cart_reloads_for_returning_user() {
        let kv: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let user = test_user("jane@x.com");

        {
            let cart = CartStore::new(kv.clone());
            cart.set_user(Some(&user));
            cart.add_to_cart(&test_product("1", 19999, 50));
            cart.update_quantity("1", 2);
        }

        // A fresh container (new session) sees the saved lines
        let cart = CartStore::new(kv);
        cart.set_user(Some(&user));
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price().cents(), 39998);
    }

    #[test]
    fn test_identity_switch_swaps_not_merges() {
        let kv: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let cart = CartStore::new(kv);
        let alice = test_user("alice@x.com");
        let bob = test_user("bob@x.com");

        cart.set_user(Some(&alice));
        cart.add_to_cart(&test_product("1", 19999, 50));

        cart.set_user(Some(&bob));
        cart.add_to_cart(&test_product("2", 2999, 100));
        cart.add_to_cart(&test_product("2", 2999, 100));

        // Bob sees only bob's cart
        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, "2");
        assert_eq!(cart.total_items(), 2);

        // Switching back restores alice's cart, not a merge
        cart.set_user(Some(&alice));
        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, "1");
    }

    #[test]
    fn test_logout_clears_memory_but_not_storage() {
        let kv: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let cart = CartStore::new(kv.clone());
        let user = test_user("jane@x.com");

        cart.set_user(Some(&user));
        cart.add_to_cart(&test_product("1", 19999, 50));

        cart.set_user(None);
        assert!(cart.is_empty());

        // The persisted record survived the logout
        assert!(kv.get(&cart_key(&user.id)).is_some());

        // ...and comes back on the next login
        cart.set_user(Some(&user));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_malformed_persisted_cart_reads_as_empty() {
        let kv: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let user = test_user("jane@x.com");
        kv.set(&cart_key(&user.id), "[{broken");

        let cart = CartStore::new(kv);
        cart.set_user(Some(&user));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unbound_cart_is_memory_only() {
        let kv: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let cart = CartStore::new(kv.clone());

        cart.add_to_cart(&test_product("1", 19999, 50));
        assert_eq!(cart.total_items(), 1);

        // No user bound, so nothing hit the store
        assert_eq!(kv.get(&cart_key("anything")), None);
    }

    #[test]
    fn test_repeated_adds_clamp_at_stock() {
        let kv: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let cart = CartStore::new(kv);
        let user = test_user("jane@x.com");
        cart.set_user(Some(&user));

        let scarce = test_product("1", 1000, 3);
        for _ in 0..10 {
            cart.add_to_cart(&scarce);
        }

        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_update_quantity_zero_removes_and_persists() {
        let kv: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let cart = CartStore::new(kv.clone());
        let user = test_user("jane@x.com");
        cart.set_user(Some(&user));

        cart.add_to_cart(&test_product("1", 1000, 5));
        cart.update_quantity("1", 0);

        assert!(cart.is_empty());
        let raw = kv.get(&cart_key(&user.id)).unwrap();
        assert_eq!(raw, "[]");
    }
}
