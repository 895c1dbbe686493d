//! # Shopfront Demo
//!
//! Runs one complete shopping session against the state containers.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Walkthrough                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Open the Key-Value Store ─────────────────────────────────────────► │
//! │     • Platform data dir, or SHOPFRONT_DATA_PATH override                │
//! │                                                                         │
//! │  3. Construct Containers ─────────────────────────────────────────────► │
//! │     • AuthStore::restore picks up a persisted session                   │
//! │     • CartStore binds to whatever identity restore resolved             │
//! │     • CatalogStore::load installs the seed set                          │
//! │                                                                         │
//! │  4. Shop ─────────────────────────────────────────────────────────────► │
//! │     • login, search, add to cart, adjust quantities, place the order   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use shopfront_core::{PaymentCard, ShippingInfo};
use shopfront_store::{
    place_order, AuthStore, CartStore, CatalogStore, JsonFileStore, NotificationHub,
    StorefrontConfig,
};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = StorefrontConfig::from_env();
    info!(store = %config.store_name, "Starting storefront session");

    // One store, shared by the auth and cart containers
    let kv = Arc::new(JsonFileStore::open_default());
    info!(path = ?kv.path(), "Key-value store opened");

    let auth = AuthStore::new(kv.clone());
    let cart = CartStore::new(kv);
    let catalog = CatalogStore::new();
    let hub = NotificationHub::new();

    // Surface notifications the way a toast rail would
    hub.subscribe(|list| {
        for n in list {
            println!("  [{:?}] {}", n.kind, n.message);
        }
    });

    // Resume any persisted session, then bind the cart to the result
    auth.restore();
    cart.set_user(auth.current_user().as_ref());

    // Fresh login for the walkthrough
    if auth.login("jane@x.com", "password123").await {
        cart.set_user(auth.current_user().as_ref());
    }
    let user = match auth.current_user() {
        Some(user) => user,
        None => {
            info!("Login did not produce a session; nothing to demo");
            return;
        }
    };
    info!(name = %user.name, role = ?user.role, "Signed in");

    // Browse the catalog
    catalog.load().await;
    for product in catalog.products() {
        info!(
            id = %product.id,
            title = %product.title,
            price = %config.format_currency(product.price_cents),
            stock = product.stock,
            "Catalog entry"
        );
    }

    // Search and fill the cart
    for hit in catalog.search("watch") {
        info!(title = %hit.title, "Search hit for 'watch'");
        cart.add_to_cart(&hit);
    }
    if let Some(shirt) = catalog.get_by_id("2") {
        cart.add_to_cart(&shirt);
        cart.update_quantity(&shirt.id, 3);
    }

    info!(
        items = cart.total_items(),
        subtotal = %cart.total_price(),
        "Cart ready for checkout"
    );

    // Place the order
    let shipping = ShippingInfo {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        address: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip_code: "62704".to_string(),
        phone: "555-0100".to_string(),
    };
    let card = PaymentCard {
        card_number: "4242 4242 4242 4242".to_string(),
        expiry_date: "12/30".to_string(),
        cvv: "123".to_string(),
        card_name: "Jane Doe".to_string(),
    };

    match place_order(&cart, &hub, &config.checkout_policy(), &user, shipping, card).await {
        Ok(order) => info!(
            order_id = %order.id,
            total = %order.totals.total,
            "Walkthrough order confirmed"
        ),
        Err(err) => info!(%err, "Checkout was rejected"),
    }

    // End the session
    auth.logout();
    cart.set_user(None);
    info!("Session ended");
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfront=trace` - Show trace for shopfront crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
