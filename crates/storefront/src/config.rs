//! Store configuration loaded from environment variables.
//!
//! Every business constant is tunable. Unset variables fall back to the
//! defaults below.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STORE_NAME` - Display name (default: SupplementStore)
//! - `STORE_FREE_SHIPPING_THRESHOLD` - Subtotal at/above which shipping is free (default: 50.00)
//! - `STORE_STANDARD_SHIPPING_COST` - Flat shipping fee below the threshold (default: 5.99)
//! - `STORE_TAX_RATE` - Fraction of the subtotal charged as tax (default: 0.08)
//! - `STORE_MAX_QUANTITY_PER_PRODUCT` - Per-product cart quantity cap (default: 1)
//! - `STORE_ORDERS_PER_PAGE` - Admin order list page size (default: 5)
//! - `STORE_PRODUCTS_PER_PAGE` - Catalog page size (default: 12)

use std::str::FromStr;

use rust_decimal::Decimal;
use supplement_store_core::Price;
use thiserror::Error;

use crate::pricing::PricingRules;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Out of range value for {0}: {1}")]
    OutOfRange(String, String),
}

/// Store application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Display name of the store
    pub name: String,
    /// Shipping and tax rules
    pub pricing: PricingRules,
    /// Cart limits
    pub cart: CartConfig,
    /// Page sizes
    pub pagination: PaginationConfig,
}

/// Cart limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartConfig {
    /// Maximum quantity of any single product in the cart
    pub max_quantity_per_product: u32,
}

/// Page sizes for list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Orders per page in the admin order list
    pub orders_per_page: usize,
    /// Products per page in the catalog
    pub products_per_page: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "SupplementStore".to_owned(),
            pricing: PricingRules::default(),
            cart: CartConfig::default(),
            pagination: PaginationConfig::default(),
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            max_quantity_per_product: 1,
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            orders_per_page: 5,
            products_per_page: 12,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or if
    /// a parsed value is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`StoreConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let env = Env(&lookup);

        let config = Self {
            name: lookup("STORE_NAME").unwrap_or(defaults.name),
            pricing: PricingRules {
                free_shipping_threshold: env
                    .parse_or(
                        "STORE_FREE_SHIPPING_THRESHOLD",
                        defaults.pricing.free_shipping_threshold.amount(),
                    )?
                    .into(),
                standard_shipping_cost: env
                    .parse_or(
                        "STORE_STANDARD_SHIPPING_COST",
                        defaults.pricing.standard_shipping_cost.amount(),
                    )?
                    .into(),
                tax_rate: env.parse_or("STORE_TAX_RATE", defaults.pricing.tax_rate)?,
            },
            cart: CartConfig {
                max_quantity_per_product: env.parse_or(
                    "STORE_MAX_QUANTITY_PER_PRODUCT",
                    defaults.cart.max_quantity_per_product,
                )?,
            },
            pagination: PaginationConfig {
                orders_per_page: env
                    .parse_or("STORE_ORDERS_PER_PAGE", defaults.pagination.orders_per_page)?,
                products_per_page: env
                    .parse_or("STORE_PRODUCTS_PER_PAGE", defaults.pagination.products_per_page)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::OutOfRange` for negative amounts, a tax rate
    /// outside `[0, 1]`, a zero quantity cap or a zero page size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative(
            "STORE_FREE_SHIPPING_THRESHOLD",
            self.pricing.free_shipping_threshold,
        )?;
        check_non_negative(
            "STORE_STANDARD_SHIPPING_COST",
            self.pricing.standard_shipping_cost,
        )?;

        if self.pricing.tax_rate < Decimal::ZERO || self.pricing.tax_rate > Decimal::ONE {
            return Err(ConfigError::OutOfRange(
                "STORE_TAX_RATE".to_string(),
                format!("{} is not between 0 and 1", self.pricing.tax_rate),
            ));
        }

        if self.cart.max_quantity_per_product == 0 {
            return Err(ConfigError::OutOfRange(
                "STORE_MAX_QUANTITY_PER_PRODUCT".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        for (key, size) in [
            ("STORE_ORDERS_PER_PAGE", self.pagination.orders_per_page),
            ("STORE_PRODUCTS_PER_PAGE", self.pagination.products_per_page),
        ] {
            if size == 0 {
                return Err(ConfigError::OutOfRange(
                    key.to_string(),
                    "must be at least 1".to_string(),
                ));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Typed access to an environment lookup.
struct Env<'a, F>(&'a F);

impl<F> Env<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Parse a variable, or return `default` if it is unset or blank.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match (self.0)(key) {
            Some(value) if !value.trim().is_empty() => value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
            _ => Ok(default),
        }
    }
}

fn check_non_negative(key: &str, price: Price) -> Result<(), ConfigError> {
    if price.amount() < Decimal::ZERO {
        return Err(ConfigError::OutOfRange(
            key.to_string(),
            format!("{} is negative", price.amount()),
        ));
    }
    Ok(())
}
