//! # Product Catalog Container
//!
//! Owns the list of purchasable items and its lookup/search operations.
//!
//! ## Catalog Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Container                                    │
//! │                                                                         │
//! │  startup ──► load() ──► simulated fetch delay ──► seed set installed   │
//! │                                                                         │
//! │  get_by_id("3") ───────► Option<Product>                                │
//! │  get_by_category("electronics") ──► case-insensitive exact match       │
//! │  search("watch") ──────► substring across title OR description OR      │
//! │                          category, case-insensitive                    │
//! │  add(NewProduct) ──────► validate ──► next id from monotonic counter   │
//! │                          ──► append (catalog is append-only)           │
//! │                                                                         │
//! │  Cart lines COPY product fields by value on add; nothing in the cart   │
//! │  is a live reference into this list.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids are sequential stringified integers issued by an `AtomicU64`. The
//! counter only moves forward, so interleaved additions can never hand out
//! the same id twice (a plain `len() + 1` scheme would).

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, info};

use shopfront_core::validation::{
    validate_price_cents, validate_product_title, validate_rating, validate_stock,
};
use shopfront_core::{NewProduct, Product};

use crate::error::StoreResult;

/// Stand-in for the absent product-service round-trip.
const FETCH_LATENCY: Duration = Duration::from_millis(1000);

/// The product catalog container.
///
/// ## Thread Safety
/// Reads vastly outnumber writes (one seed install, occasional admin adds),
/// so the list sits behind an `RwLock`; the id counter is an independent
/// atomic so allocation never contends with readers.
pub struct CatalogStore {
    products: RwLock<Vec<Product>>,
    next_id: AtomicU64,
    loaded: AtomicBool,
}

impl CatalogStore {
    /// Creates an empty, not-yet-loaded catalog.
    pub fn new() -> Self {
        CatalogStore {
            products: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            loaded: AtomicBool::new(false),
        }
    }

    /// Loads the catalog after a simulated fetch delay.
    ///
    /// Installs the fixed seed set and positions the id counter past it.
    /// Calling again is a no-op.
    pub async fn load(&self) {
        if self.loaded.load(Ordering::Acquire) {
            return;
        }

        tokio::time::sleep(FETCH_LATENCY).await;

        let seed = seed_products();
        self.next_id.store(seed.len() as u64 + 1, Ordering::Release);

        let mut products = self.products.write().expect("catalog lock poisoned");
        info!(count = seed.len(), "Catalog loaded");
        *products = seed;
        drop(products);

        self.loaded.store(true, Ordering::Release);
    }

    /// Checks whether the seed set has been installed yet.
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Returns a snapshot of all products.
    pub fn products(&self) -> Vec<Product> {
        self.products.read().expect("catalog lock poisoned").clone()
    }

    /// Looks up a product by id.
    pub fn get_by_id(&self, id: &str) -> Option<Product> {
        self.products
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Returns products in a category (case-insensitive exact match).
    pub fn get_by_category(&self, category: &str) -> Vec<Product> {
        let wanted = category.to_lowercase();
        self.products
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .filter(|p| p.category.to_lowercase() == wanted)
            .cloned()
            .collect()
    }

    /// Searches title, description, and category for the query.
    ///
    /// Case-insensitive substring match with OR semantics: a product is
    /// returned when ANY of the three fields contains the query. An empty
    /// query matches everything.
    pub fn search(&self, query: &str) -> Vec<Product> {
        let needle = query.trim().to_lowercase();
        debug!(query = %needle, "Searching catalog");

        self.products
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Appends a product after a simulated round-trip.
    ///
    /// Validates the payload, assigns the next sequential id and the
    /// current timestamp, and appends. The catalog is append-only; there
    /// is no update or delete.
    pub async fn add(&self, payload: NewProduct) -> StoreResult<Product> {
        validate_product_title(&payload.title).map_err(shopfront_core::CoreError::from)?;
        validate_price_cents(payload.price_cents).map_err(shopfront_core::CoreError::from)?;
        validate_stock(payload.stock).map_err(shopfront_core::CoreError::from)?;
        validate_rating(payload.rating).map_err(shopfront_core::CoreError::from)?;

        tokio::time::sleep(FETCH_LATENCY).await;

        let id = self.next_id.fetch_add(1, Ordering::AcqRel).to_string();
        let product = payload.into_product(id, Utc::now());

        let mut products = self.products.write().expect("catalog lock poisoned");
        products.push(product.clone());
        info!(id = %product.id, title = %product.title, "Product added");

        Ok(product)
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        CatalogStore::new()
    }
}

// =============================================================================
// Seed Data
// =============================================================================

fn seed_date(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The fixed six-product seed set the catalog starts from.
fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            title: "Wireless Bluetooth Headphones".to_string(),
            description: "High-quality wireless headphones with noise cancellation and \
                          30-hour battery life. Perfect for music lovers and professionals."
                .to_string(),
            price_cents: 19999,
            category: "Electronics".to_string(),
            image: "https://images.pexels.com/photos/3394650/pexels-photo-3394650.jpeg"
                .to_string(),
            stock: 50,
            rating: 4.5,
            reviews: 128,
            created_at: seed_date(1),
        },
        Product {
            id: "2".to_string(),
            title: "Organic Cotton T-Shirt".to_string(),
            description: "Comfortable and sustainable organic cotton t-shirt. Available in \
                          multiple colors and sizes."
                .to_string(),
            price_cents: 2999,
            category: "Clothing".to_string(),
            image: "https://images.pexels.com/photos/996329/pexels-photo-996329.jpeg".to_string(),
            stock: 100,
            rating: 4.3,
            reviews: 89,
            created_at: seed_date(2),
        },
        Product {
            id: "3".to_string(),
            title: "Smart Fitness Watch".to_string(),
            description: "Advanced fitness tracking watch with heart rate monitoring, GPS, \
                          and smartphone connectivity."
                .to_string(),
            price_cents: 29999,
            category: "Electronics".to_string(),
            image: "https://images.pexels.com/photos/393047/pexels-photo-393047.jpeg".to_string(),
            stock: 30,
            rating: 4.7,
            reviews: 203,
            created_at: seed_date(3),
        },
        Product {
            id: "4".to_string(),
            title: "Leather Laptop Bag".to_string(),
            description: "Professional leather laptop bag with multiple compartments and \
                          ergonomic design."
                .to_string(),
            price_cents: 14999,
            category: "Accessories".to_string(),
            image: "https://images.pexels.com/photos/2905238/pexels-photo-2905238.jpeg"
                .to_string(),
            stock: 25,
            rating: 4.4,
            reviews: 67,
            created_at: seed_date(4),
        },
        Product {
            id: "5".to_string(),
            title: "Coffee Maker Pro".to_string(),
            description: "Professional-grade coffee maker with programmable settings and \
                          thermal carafe."
                .to_string(),
            price_cents: 17999,
            category: "Home & Kitchen".to_string(),
            image: "https://images.pexels.com/photos/324028/pexels-photo-324028.jpeg".to_string(),
            stock: 40,
            rating: 4.6,
            reviews: 156,
            created_at: seed_date(5),
        },
        Product {
            id: "6".to_string(),
            title: "Running Shoes".to_string(),
            description: "Lightweight running shoes with advanced cushioning and breathable \
                          mesh upper."
                .to_string(),
            price_cents: 11999,
            category: "Sports".to_string(),
            image: "https://images.pexels.com/photos/2529148/pexels-photo-2529148.jpeg"
                .to_string(),
            stock: 75,
            rating: 4.2,
            reviews: 94,
            created_at: seed_date(6),
        },
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================
