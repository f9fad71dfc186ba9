//! Catalog product type.
//!
//! Products are supplied by the catalog and are read-only to the cart and
//! order code: nothing in the store mutates a `Product`.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::status::ParseStatusError;

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    Protein,
    Vitamins,
    PreWorkout,
    Creatine,
    AminoAcids,
    WeightLoss,
    Health,
}

impl ProductCategory {
    /// Every category, in catalog menu order.
    pub const ALL: [Self; 7] = [
        Self::Protein,
        Self::Vitamins,
        Self::PreWorkout,
        Self::Creatine,
        Self::AminoAcids,
        Self::WeightLoss,
        Self::Health,
    ];

    /// The stable wire token (e.g. `pre-workout`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Protein => "protein",
            Self::Vitamins => "vitamins",
            Self::PreWorkout => "pre-workout",
            Self::Creatine => "creatine",
            Self::AminoAcids => "amino-acids",
            Self::WeightLoss => "weight-loss",
            Self::Health => "health",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Protein => "Protein",
            Self::Vitamins => "Vitamins",
            Self::PreWorkout => "Pre-Workout",
            Self::Creatine => "Creatine",
            Self::AminoAcids => "Amino Acids",
            Self::WeightLoss => "Weight Loss",
            Self::Health => "Health",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseStatusError::new("product category", s))
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price.
    pub price: Price,
    pub category: ProductCategory,
    pub image_url: String,
    /// Units available; informational only, never decremented by checkout.
    pub stock: u32,
    pub brand: String,
    /// Average review score (0-5).
    pub rating: Decimal,
    pub review_count: u32,
    pub featured: bool,
}

impl Product {
    /// Whether at least one unit is available.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tokens_roundtrip() {
        for category in ProductCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
            assert_eq!(category.as_str().parse::<ProductCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category() {
        assert!("snacks".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn test_deserialize_catalog_entry() {
        let json = r#"{
            "id": "1",
            "name": "Whey Protein Isolate",
            "description": "Fast-absorbing protein",
            "price": "49.99",
            "category": "protein",
            "imageUrl": "/images/whey.jpg",
            "stock": 0,
            "brand": "PureLift",
            "rating": "4.8",
            "reviewCount": 1250,
            "featured": true
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "1");
        assert_eq!(product.price, Price::from_cents(4999));
        assert_eq!(product.category, ProductCategory::Protein);
        assert!(!product.is_in_stock());
    }
}
