//! # Store Error Type
//!
//! Error type for the stateful edge of Shopfront.
//!
//! ## Where Errors Can Actually Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Surface                                        │
//! │                                                                         │
//! │  Read path:   malformed persisted value ──► treated as ABSENT, logged, │
//! │               never an error (the auth/cart contracts demand this)     │
//! │                                                                         │
//! │  Write path:  serialization of a record ──► StoreError::Serialization  │
//! │               (practically unreachable for these types, but typed)     │
//! │                                                                         │
//! │  Validation:  catalog add / checkout form ──► StoreError::Core         │
//! │               surfaced to the shopper via the notification hub         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use shopfront_core::CoreError;

/// Errors surfaced by the state containers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record could not be serialized for persistence.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Business rule or validation failure from the core layer.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
