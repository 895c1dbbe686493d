//! # Validation Module
//!
//! Input validation utilities for Shopfront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI form (out of scope here)                                  │
//! │  ├── Basic format checks, immediate feedback                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required / length / charset checks                                │
//! │  └── Runs before any container state is mutated                        │
//! │                                                                         │
//! │  A failed check surfaces through the notification hub and aborts the   │
//! │  operation; nothing is persisted on the failure path.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::validation::{validate_email, validate_quantity};
//!
//! validate_email("jane@x.com").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a free-text field is non-empty after trimming.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain a `@` with characters on both sides
///
/// The auth layer never verifies credentials against a backend, so this is
/// a shape check, not deliverability verification.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        }),
    }
}

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested quantity.
///
/// ## Rules
/// - Must be positive (> 0). The cart treats non-positive updates as
///   removal, so this is for inputs that must denote an actual quantity.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0). Zero is allowed (free items).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock count.
///
/// ## Rules
/// - Must be non-negative (>= 0). Zero means out of stock, not invalid.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a product rating.
///
/// ## Rules
/// - Must sit within the 0–5 star scale
pub fn validate_rating(rating: f32) -> ValidationResult<()> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 5,
        });
    }

    Ok(())
}

// =============================================================================
// Card Field Validators
// =============================================================================

/// Validates a card number.
///
/// ## Rules
/// - At least 16 digits once spaces are stripped. This mirrors the basic
///   length check of the checkout form; no issuer network is behind it, so
///   there is no Luhn or BIN validation.
pub fn validate_card_number(number: &str) -> ValidationResult<()> {
    let digit_count = number.chars().filter(|c| c.is_ascii_digit()).count();

    if digit_count < 16 {
        return Err(ValidationError::InvalidFormat {
            field: "card number".to_string(),
            reason: "must have at least 16 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates an expiry date in MM/YY form.
pub fn validate_expiry_date(expiry: &str) -> ValidationResult<()> {
    if expiry.len() < 5 {
        return Err(ValidationError::InvalidFormat {
            field: "expiry date".to_string(),
            reason: "must be MM/YY".to_string(),
        });
    }

    Ok(())
}

/// Validates a CVV (3 or 4 digits).
pub fn validate_cvv(cvv: &str) -> ValidationResult<()> {
    if cvv.len() < 3 || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "cvv".to_string(),
            reason: "must be 3 or 4 digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("city", "Springfield").is_ok());
        assert!(validate_required("city", "").is_err());
        assert!(validate_required("city", "   ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("jane@x.com").is_ok());
        assert!(validate_email("admin@shop.example").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@missing-local").is_err());
        assert!(validate_email("missing-domain@").is_err());
    }

    #[test]
    fn test_validate_product_title() {
        assert!(validate_product_title("Wireless Bluetooth Headphones").is_ok());
        assert!(validate_product_title("").is_err());
        assert!(validate_product_title(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  watch ").unwrap(), "watch");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price_and_stock() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(19999).is_ok());
        assert!(validate_price_cents(-1).is_err());

        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(50).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(4.5).is_ok());
        assert!(validate_rating(5.0).is_ok());
        assert!(validate_rating(5.1).is_err());
        assert!(validate_rating(-0.1).is_err());
    }

    #[test]
    fn test_validate_card_fields() {
        assert!(validate_card_number("4242 4242 4242 4242").is_ok());
        assert!(validate_card_number("4242424242424242").is_ok());
        assert!(validate_card_number("4242 4242").is_err());

        assert!(validate_expiry_date("12/30").is_ok());
        assert!(validate_expiry_date("1/3").is_err());

        assert!(validate_cvv("123").is_ok());
        assert!(validate_cvv("1234").is_ok());
        assert!(validate_cvv("12").is_err());
        assert!(validate_cvv("abc").is_err());
    }
}
