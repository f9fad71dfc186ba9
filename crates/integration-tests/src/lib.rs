//! Integration tests for SupplementStore.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p supplement-store-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart to order, frozen totals, cart clearing
//! - `notifications` - Listener ordering and re-entrancy across crates
//! - `admin_orders` - Admin listing and status changes on storefront orders
//!
//! This library holds the shared fixtures.

#![cfg_attr(not(test), forbid(unsafe_code))]

use rust_decimal::Decimal;
use supplement_store_core::{
    Address, Email, Price, Product, ProductCategory, ProductId, User, UserId, UserRole,
};
use supplement_store_storefront::Store;
use supplement_store_storefront::checkout::ShippingInfo;
use supplement_store_storefront::config::StoreConfig;

/// A catalog product priced in cents.
#[must_use]
pub fn product(id: &str, name: &str, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: format!("{name} description"),
        price: Price::from_cents(cents),
        category: ProductCategory::Protein,
        image_url: format!("/images/products/{id}.jpg"),
        stock: 25,
        brand: "PureLift".to_owned(),
        rating: Decimal::new(46, 1),
        review_count: 120,
        featured: false,
    }
}

/// A signed-in user.
///
/// # Panics
///
/// Panics if `email` is not a valid address.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn user(id: &str, name: &str, email: &str, role: UserRole) -> User {
    User {
        id: UserId::new(id),
        name: name.to_owned(),
        email: Email::parse(email).unwrap(),
        role,
        avatar: None,
    }
}

/// The default shopper.
#[must_use]
pub fn shopper() -> User {
    user("2", "John Doe", "john@example.com", UserRole::User)
}

/// The store admin.
#[must_use]
pub fn admin() -> User {
    user("1", "Admin User", "admin@supplementstore.com", UserRole::Admin)
}

/// A fresh store with default configuration, signed in as [`shopper`].
#[must_use]
pub fn store() -> Store {
    Store::new(StoreConfig::default(), shopper())
}

/// A complete shipping form.
#[must_use]
pub fn shipping_info() -> ShippingInfo {
    ShippingInfo {
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
        email: "john@example.com".to_owned(),
        phone: "+1 (555) 123-4567".to_owned(),
        address: Address {
            street: "123 Main St".to_owned(),
            street2: None,
            city: "Springfield".to_owned(),
            state: "IL".to_owned(),
            zip_code: "62701".to_owned(),
            country: Address::DEFAULT_COUNTRY.to_owned(),
        },
    }
}
