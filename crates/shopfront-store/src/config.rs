//! # Storefront Configuration
//!
//! Deployment-level settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHOPFRONT_*`)
//! 2. Defaults (this file — the storefront's fixed pricing rules)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no lock is needed.

use serde::{Deserialize, Serialize};

use shopfront_core::{CheckoutPolicy, Money, TaxRate};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// Store name (used in log output and any rendered header).
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Sales tax in basis points (800 = 8%)
    pub tax_rate_bps: u32,

    /// Orders strictly above this subtotal (in cents) ship free
    pub free_shipping_threshold_cents: i64,

    /// Flat shipping (in cents) below the threshold
    pub flat_shipping_cents: i64,
}

impl Default for StorefrontConfig {
    /// Returns the storefront's fixed rules: 8% tax, free shipping above
    /// $100.00, flat $9.99 otherwise.
    fn default() -> Self {
        StorefrontConfig {
            store_name: "Shopfront".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            tax_rate_bps: 800,
            free_shipping_threshold_cents: 10_000,
            flat_shipping_cents: 999,
        }
    }
}

impl StorefrontConfig {
    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SHOPFRONT_STORE_NAME`: Override store name
    /// - `SHOPFRONT_TAX_RATE`: Override tax rate as a percentage (e.g., "8.25")
    /// - `SHOPFRONT_FREE_SHIPPING_CENTS`: Override the free-shipping threshold
    pub fn from_env() -> Self {
        let mut config = StorefrontConfig::default();

        if let Ok(store_name) = std::env::var("SHOPFRONT_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(tax_rate_str) = std::env::var("SHOPFRONT_TAX_RATE") {
            if let Ok(rate) = tax_rate_str.parse::<f64>() {
                config.tax_rate_bps = (rate * 100.0) as u32;
            }
        }

        if let Ok(threshold_str) = std::env::var("SHOPFRONT_FREE_SHIPPING_CENTS") {
            if let Ok(cents) = threshold_str.parse::<i64>() {
                config.free_shipping_threshold_cents = cents;
            }
        }

        config
    }

    /// Returns the checkout policy these settings describe.
    pub fn checkout_policy(&self) -> CheckoutPolicy {
        CheckoutPolicy {
            tax_rate: TaxRate::from_bps(self.tax_rate_bps),
            free_shipping_threshold: Money::from_cents(self.free_shipping_threshold_cents),
            flat_shipping: Money::from_cents(self.flat_shipping_cents),
        }
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_store::config::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(19999), "$199.99");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}
