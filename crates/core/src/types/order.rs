//! Order records.
//!
//! An [`Order`] is a snapshot taken at checkout: customer details, line items
//! and totals are copied in once and never recomputed. Only `status` changes
//! after creation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::address::Address;
use super::email::Email;
use super::id::{OrderId, ProductId, UserId};
use super::price::Price;
use super::status::OrderStatus;

/// A frozen copy of one purchased product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_image: String,
    pub quantity: u32,
    /// Unit price at the time of purchase.
    pub price: Price,
}

impl OrderLineItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * Decimal::from(self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Customer name as typed on the shipping form.
    pub user_name: String,
    pub user_email: Email,
    pub user_phone: String,
    pub items: Vec<OrderLineItem>,
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub shipping_address: Address,
}

impl Order {
    /// Number of line items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether the order was placed at or above the free-shipping threshold.
    #[must_use]
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        Order {
            id: OrderId::new("ORD-001"),
            user_id: UserId::new("2"),
            user_name: "John Doe".to_owned(),
            user_email: Email::parse("john@example.com").unwrap(),
            user_phone: "+1 (555) 123-4567".to_owned(),
            items: vec![OrderLineItem {
                product_id: ProductId::new("1"),
                product_name: "Whey Protein Isolate".to_owned(),
                product_image: "/images/whey.jpg".to_owned(),
                quantity: 2,
                price: Price::from_cents(2499),
            }],
            subtotal: Price::from_cents(4998),
            shipping: Price::from_cents(599),
            tax: Price::new(Decimal::new(39984, 4)),
            total: Price::new(Decimal::new(599684, 4)),
            status: OrderStatus::Shipped,
            created_at: DateTime::parse_from_rfc3339("2026-01-15T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            shipping_address: Address {
                street: "123 Main St".to_owned(),
                city: "Springfield".to_owned(),
                state: "IL".to_owned(),
                zip_code: "62701".to_owned(),
                ..Address::default()
            },
        }
    }

    #[test]
    fn test_line_total() {
        let order = sample_order();
        assert_eq!(order.items[0].line_total(), Price::from_cents(4998));
    }

    #[test]
    fn test_free_shipping_flag() {
        let mut order = sample_order();
        assert!(!order.has_free_shipping());
        order.shipping = Price::ZERO;
        assert!(order.has_free_shipping());
    }

    #[test]
    fn test_wire_format_uses_camel_case_and_status_tokens() {
        let json = serde_json::to_value(sample_order()).unwrap();
        assert_eq!(json["status"], "shipped");
        assert_eq!(json["userEmail"], "john@example.com");
        assert_eq!(json["items"][0]["productName"], "Whey Protein Isolate");
        assert_eq!(json["shippingAddress"]["zipCode"], "62701");
        assert_eq!(json["tax"], "3.9984");
    }

    #[test]
    fn test_serde_roundtrip_preserves_totals() {
        let order = sample_order();
        let json = serde_json::to_string(&order).unwrap();
        let parsed: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, order);
        assert_eq!(parsed.total.amount(), Decimal::new(599684, 4));
    }
}
