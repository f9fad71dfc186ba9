//! Shipping, tax and total calculation.
//!
//! Pure functions over a subtotal; the same rules price the live cart summary
//! and freeze an order's totals at checkout.

use rust_decimal::Decimal;
use serde::Serialize;
use supplement_store_core::Price;

/// Business rules that turn a subtotal into an order total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingRules {
    /// Subtotal at or above which shipping is waived.
    pub free_shipping_threshold: Price,
    /// Flat shipping fee below the threshold.
    pub standard_shipping_cost: Price,
    /// Fraction of the subtotal charged as tax (e.g. `0.08`).
    pub tax_rate: Decimal,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Price::from_cents(5000),
            standard_shipping_cost: Price::from_cents(599),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

impl PricingRules {
    /// Shipping charged on `subtotal`.
    #[must_use]
    pub fn shipping(&self, subtotal: Price) -> Price {
        if subtotal >= self.free_shipping_threshold {
            Price::ZERO
        } else {
            self.standard_shipping_cost
        }
    }

    /// Tax charged on `subtotal`, unrounded.
    #[must_use]
    pub fn tax(&self, subtotal: Price) -> Price {
        subtotal * self.tax_rate
    }

    /// Full breakdown for `subtotal`.
    #[must_use]
    pub fn quote(&self, subtotal: Price) -> OrderTotals {
        let shipping = self.shipping(subtotal);
        let tax = self.tax(subtotal);
        OrderTotals {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// How much more the shopper must add to qualify for free shipping.
    ///
    /// Returns `None` once the threshold is met.
    #[must_use]
    pub fn amount_until_free_shipping(&self, subtotal: Price) -> Option<Price> {
        (subtotal < self.free_shipping_threshold)
            .then(|| self.free_shipping_threshold - subtotal)
    }
}

/// Priced breakdown of a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl OrderTotals {
    /// Whether shipping was waived.
    #[must_use]
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// Shipping line as shown in order summaries (`FREE` or `$5.99`).
    #[must_use]
    pub fn shipping_label(&self) -> String {
        if self.is_free_shipping() {
            "FREE".to_owned()
        } else {
            self.shipping.display()
        }
    }
}
