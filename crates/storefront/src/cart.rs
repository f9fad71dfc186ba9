//! Cart ledger.
//!
//! The cart holds at most one entry per product. Adding a product that is
//! already present leaves its entry untouched, and quantities are clamped to
//! the configured per-product cap (one unit by default).

use rust_decimal::Decimal;
use serde::Serialize;
use supplement_store_core::{Price, Product, ProductId};

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartEntry {
    pub product: Product,
    pub quantity: u32,
}

impl CartEntry {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Ordered collection of cart entries keyed by product ID.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLedger {
    entries: Vec<CartEntry>,
    max_quantity: u32,
}

impl Default for CartLedger {
    fn default() -> Self {
        Self::new(1)
    }
}

impl CartLedger {
    /// Create an empty cart with a per-product quantity cap.
    ///
    /// A cap of zero is treated as one.
    #[must_use]
    pub fn new(max_quantity: u32) -> Self {
        Self {
            entries: Vec::new(),
            max_quantity: max_quantity.max(1),
        }
    }

    /// Per-product quantity cap.
    #[must_use]
    pub const fn max_quantity(&self) -> u32 {
        self.max_quantity
    }

    /// Add one unit of `product` unless it is already in the cart.
    ///
    /// Returns `true` if a new entry was inserted.
    pub fn add_item(&mut self, product: &Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.entries.push(CartEntry {
            product: product.clone(),
            quantity: 1,
        });
        true
    }

    /// Remove the entry for `product_id`.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.product.id != *product_id);
        self.entries.len() != before
    }

    /// Set the quantity for `product_id`.
    ///
    /// Zero or negative quantities remove the entry. Positive quantities are
    /// clamped to `1..=max_quantity`. Unknown products are ignored.
    ///
    /// Returns `true` if the cart changed.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        let clamped = u32::try_from(quantity)
            .unwrap_or(u32::MAX)
            .min(self.max_quantity);
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.product.id == *product_id)
        {
            Some(entry) if entry.quantity != clamped => {
                entry.quantity = clamped;
                true
            }
            _ => false,
        }
    }

    /// Remove the entries for every ID in `product_ids`.
    ///
    /// Returns `true` if any entry was removed.
    pub fn remove_items(&mut self, product_ids: &[ProductId]) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| !product_ids.contains(&entry.product.id));
        self.entries.len() != before
    }

    /// Remove every entry.
    ///
    /// Returns `true` if the cart was not already empty.
    pub fn clear(&mut self) -> bool {
        let was_empty = self.entries.is_empty();
        self.entries.clear();
        !was_empty
    }

    /// Owned copy of the current entries, in the order they were added.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartEntry> {
        self.entries.clone()
    }

    /// Entry for `product_id`, if present.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartEntry> {
        self.entries
            .iter()
            .find(|entry| entry.product.id == *product_id)
    }

    /// Whether `product_id` is in the cart.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Sum of unit price times quantity over all entries.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
