//! # shopfront-store: State Containers for Shopfront
//!
//! The stateful edge of Shopfront: three cooperating state containers over
//! a key-value persistence abstraction, plus the notification hub and the
//! order placement flow.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Container Topology                                   │
//! │                                                                         │
//! │  ┌──────────────┐   identity    ┌──────────────┐                       │
//! │  │  AuthStore   │──────────────►│  CartStore   │                       │
//! │  │              │  set_user()   │              │                       │
//! │  │ restore      │               │ add/remove/  │                       │
//! │  │ login/logout │               │ update/clear │                       │
//! │  └──────┬───────┘               └──────┬───────┘                       │
//! │         │                              │                               │
//! │         │   ┌──────────────┐           │    ┌──────────────────┐       │
//! │         │   │ CatalogStore │ product   │    │ NotificationHub  │       │
//! │         │   │  (seed set)  │ snapshots─┘    │ (pub/sub, 5 s    │       │
//! │         │   └──────────────┘                │  auto-expiry)    │       │
//! │         │                                   └──────────────────┘       │
//! │         ▼                                                              │
//! │  ┌─────────────────────────────────────────────────────┐               │
//! │  │  KeyValueStore (auth_token / user_data / cart_<id>) │               │
//! │  │  MemoryStore · JsonFileStore                        │               │
//! │  └─────────────────────────────────────────────────────┘               │
//! │                                                                         │
//! │  The catalog is independent: cart lines copy product fields by value,  │
//! │  so nothing in a cart is a live reference into the catalog.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Order
//! 1. `AuthStore::restore` reads the persisted session
//! 2. `CartStore::set_user` binds the resolved identity and loads its cart
//! 3. `CatalogStore::load` installs the seed set after its simulated fetch
//!
//! Every "asynchronous" operation here is a fixed artificial delay standing
//! in for an absent network call; delays always resolve and there is no
//! cancellation or retry machinery.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod kv;
pub mod notify;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::{AuthStore, AUTH_TOKEN_KEY, USER_DATA_KEY};
pub use cart::{cart_key, CartStore};
pub use catalog::CatalogStore;
pub use checkout::place_order;
pub use config::StorefrontConfig;
pub use error::{StoreError, StoreResult};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use notify::{ListenerId, Notification, NotificationHub, NotificationKind};
