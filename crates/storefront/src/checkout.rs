//! Checkout: shipping form validation and order placement.
//!
//! Validation failures are reported per field and block order creation;
//! nothing in this module panics on bad input.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use supplement_store_core::{
    Address, Email, EmailError, Order, OrderId, OrderLineItem, OrderStatus, Price, ProductId,
    UserId,
};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::cart::CartEntry;
use crate::pricing::OrderTotals;
use crate::state::Store;

/// Errors that prevent an order from being placed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing in the cart to buy.
    #[error("cart is empty")]
    EmptyCart,

    /// One or more shipping fields are missing or malformed.
    #[error("invalid shipping information: {0}")]
    Validation(#[from] ValidationErrors),
}

/// A shipping form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShippingField {
    FirstName,
    LastName,
    Email,
    Phone,
    Street,
    City,
    State,
    ZipCode,
}

impl ShippingField {
    /// Form key used by the checkout page.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zipCode",
        }
    }

    const fn required_message(self) -> &'static str {
        match self {
            Self::FirstName => "First name is required",
            Self::LastName => "Last name is required",
            Self::Email => "Email is required",
            Self::Phone => "Phone is required",
            Self::Street => "Street address is required",
            Self::City => "City is required",
            Self::State => "State is required",
            Self::ZipCode => "ZIP code is required",
        }
    }
}

/// Field-keyed validation messages, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<ShippingField, &'static str>);

impl ValidationErrors {
    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: ShippingField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Iterate over failed fields and their messages.
    pub fn iter(&self) -> impl Iterator<Item = (ShippingField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether every field passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, field: ShippingField, message: &'static str) {
        self.0.insert(field, message);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {message}", field.key())?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Serializes as `{ "firstName": "First name is required", ... }`.
impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, message) in self.iter() {
            map.serialize_entry(field.key(), message)?;
        }
        map.end()
    }
}

/// Shipping form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

/// Shipping details that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedShipping {
    customer_name: String,
    email: Email,
    phone: String,
    address: Address,
}

impl ValidatedShipping {
    /// `"{first} {last}"`.
    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }
}

impl ShippingInfo {
    /// Check required fields and the email shape.
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message.
    pub fn validate(&self) -> Result<ValidatedShipping, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let required = [
            (ShippingField::FirstName, &self.first_name),
            (ShippingField::LastName, &self.last_name),
            (ShippingField::Phone, &self.phone),
            (ShippingField::Street, &self.address.street),
            (ShippingField::City, &self.address.city),
            (ShippingField::State, &self.address.state),
            (ShippingField::ZipCode, &self.address.zip_code),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.insert(field, field.required_message());
            }
        }

        let email = match Email::parse(self.email.trim()) {
            Ok(email) => Some(email),
            Err(EmailError::Empty) => {
                errors.insert(ShippingField::Email, ShippingField::Email.required_message());
                None
            }
            Err(_) => {
                errors.insert(ShippingField::Email, "Email is invalid");
                None
            }
        };

        match email {
            Some(email) if errors.is_empty() => Ok(ValidatedShipping {
                customer_name: format!("{} {}", self.first_name.trim(), self.last_name.trim()),
                email,
                phone: self.phone.trim().to_owned(),
                address: Address {
                    street2: self
                        .address
                        .street2
                        .clone()
                        .filter(|street2| !street2.trim().is_empty()),
                    ..self.address.clone()
                },
            }),
            _ => Err(errors),
        }
    }
}

/// Assemble an order from a cart snapshot.
///
/// Line items and totals are copies; later changes to the catalog or the
/// pricing rules do not reach the returned order.
#[must_use]
pub fn build_order(
    id: OrderId,
    user_id: UserId,
    shipping: ValidatedShipping,
    cart: &[CartEntry],
    totals: OrderTotals,
    created_at: DateTime<Utc>,
) -> Order {
    let items = cart
        .iter()
        .map(|entry| OrderLineItem {
            product_id: entry.product.id.clone(),
            product_name: entry.product.name.clone(),
            product_image: entry.product.image_url.clone(),
            quantity: entry.quantity,
            price: entry.product.price,
        })
        .collect();

    Order {
        id,
        user_id,
        user_name: shipping.customer_name,
        user_email: shipping.email,
        user_phone: shipping.phone,
        items,
        subtotal: totals.subtotal,
        shipping: totals.shipping,
        tax: totals.tax,
        total: totals.total,
        status: OrderStatus::Pending,
        created_at,
        shipping_address: shipping.address,
    }
}

/// Place an order for the store's current cart.
///
/// On success the order is stored, the purchased products leave the cart,
/// and the stored order is returned. Products a listener adds to the cart
/// while the order is being stored stay in the cart.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if the cart has no entries, or
/// `CheckoutError::Validation` if the shipping form is incomplete. The store
/// is left unchanged in both cases.
#[instrument(skip(store, info))]
pub fn place_order(store: &Store, info: &ShippingInfo) -> Result<Order, CheckoutError> {
    let cart = store.cart();
    if cart.is_empty() {
        warn!("checkout attempted with an empty cart");
        return Err(CheckoutError::EmptyCart);
    }

    let shipping = info.validate().inspect_err(|errors| {
        warn!(fields = errors.len(), %errors, "shipping validation failed");
    })?;

    let subtotal: Price = cart.iter().map(CartEntry::line_total).sum();
    let totals = store.pricing().quote(subtotal);
    let order = build_order(
        OrderId::generate(),
        store.current_user().id,
        shipping,
        &cart,
        totals,
        Utc::now(),
    );

    let purchased: Vec<ProductId> = cart.iter().map(|entry| entry.product.id.clone()).collect();
    store.create_order(order.clone());
    store.remove_cart_items(&purchased);

    info!(
        order_id = %order.id,
        items = order.item_count(),
        total = %order.total,
        "order placed"
    );
    Ok(order)
}
