//! Display-ready order views for the admin pages.

use serde::Serialize;
use supplement_store_core::{Order, OrderLineItem, OrderStatus};

/// Badge style for an order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Outline,
    Destructive,
}

impl BadgeVariant {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Secondary => "secondary",
            Self::Outline => "outline",
            Self::Destructive => "destructive",
        }
    }
}

impl From<OrderStatus> for BadgeVariant {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Delivered => Self::Default,
            OrderStatus::Shipped => Self::Secondary,
            OrderStatus::Processing | OrderStatus::Pending => Self::Outline,
            OrderStatus::Cancelled => Self::Destructive,
        }
    }
}

// =============================================================================
// List View
// =============================================================================

/// Order row for the admin order table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummaryView {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    /// e.g. "Mar 1, 2026"
    pub created_at: String,
    pub item_count: usize,
    /// Formatted total, e.g. "$59.98"
    pub total: String,
    pub status: OrderStatus,
    pub status_label: &'static str,
    pub badge: BadgeVariant,
}

impl From<&Order> for OrderSummaryView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            customer_name: order.user_name.clone(),
            customer_email: order.user_email.to_string(),
            created_at: order.created_at.format("%b %-d, %Y").to_string(),
            item_count: order.item_count(),
            total: order.total.display(),
            status: order.status,
            status_label: order.status.label(),
            badge: order.status.into(),
        }
    }
}

// =============================================================================
// Detail View
// =============================================================================

/// Line item on the order detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLineView {
    pub product_id: String,
    pub product_name: String,
    pub product_image: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&OrderLineItem> for OrderLineView {
    fn from(item: &OrderLineItem) -> Self {
        Self {
            product_id: item.product_id.to_string(),
            product_name: item.product_name.clone(),
            product_image: item.product_image.clone(),
            quantity: item.quantity,
            unit_price: item.price.display(),
            line_total: item.line_total().display(),
        }
    }
}

/// Full order for the admin detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDetailView {
    pub id: String,
    pub user_id: String,
    pub status: OrderStatus,
    pub status_label: &'static str,
    /// Uppercase status token for the header badge.
    pub status_heading: String,
    pub badge: BadgeVariant,
    /// e.g. "March 1, 2026 at 12:00 PM"
    pub created_at: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    /// Street, optional second line, "City, ST ZIP", country.
    pub address_lines: Vec<String>,
    pub items: Vec<OrderLineView>,
    pub subtotal: String,
    /// "FREE" when shipping was waived.
    pub shipping: String,
    pub tax: String,
    pub total: String,
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        let address = &order.shipping_address;
        let mut address_lines = vec![address.street.clone()];
        if let Some(street2) = address.street2.as_deref().filter(|s| !s.trim().is_empty()) {
            address_lines.push(street2.to_owned());
        }
        address_lines.push(format!(
            "{}, {} {}",
            address.city, address.state, address.zip_code
        ));
        address_lines.push(address.country.clone());

        let shipping = if order.has_free_shipping() {
            "FREE".to_owned()
        } else {
            order.shipping.display()
        };

        Self {
            id: order.id.to_string(),
            user_id: order.user_id.to_string(),
            status: order.status,
            status_label: order.status.label(),
            status_heading: order.status.as_str().to_uppercase(),
            badge: order.status.into(),
            created_at: order.created_at.format("%B %-d, %Y at %-I:%M %p").to_string(),
            customer_name: order.user_name.clone(),
            customer_email: order.user_email.to_string(),
            customer_phone: order.user_phone.clone(),
            address_lines,
            items: order.items.iter().map(OrderLineView::from).collect(),
            subtotal: order.subtotal.display(),
            shipping,
            tax: order.tax.display(),
            total: order.total.display(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use supplement_store_core::Price;

    use super::*;
    use crate::query::tests::order;

    #[test]
    fn test_badge_variants() {
        let badges: Vec<&str> = OrderStatus::ALL
            .into_iter()
            .map(|status| BadgeVariant::from(status).as_str())
            .collect();
        assert_eq!(
            badges,
            ["outline", "outline", "secondary", "default", "destructive"]
        );
        assert_eq!(
            serde_json::to_value(BadgeVariant::Destructive).unwrap(),
            "destructive"
        );
    }

    #[test]
    fn test_summary_view() {
        let view = OrderSummaryView::from(&order("ORD-001", "John Doe", "Whey", 0));

        assert_eq!(view.id, "ORD-001");
        assert_eq!(view.created_at, "Mar 1, 2026");
        assert_eq!(view.item_count, 1);
        assert_eq!(view.total, "$38.38");
        assert_eq!(view.status_label, "Pending");
        assert_eq!(view.badge, BadgeVariant::Outline);
    }

    #[test]
    fn test_detail_view() {
        let mut placed = order("ORD-001", "John Doe", "Whey", 0);
        placed.items[0].quantity = 2;
        placed.shipping = Price::ZERO;
        placed.shipping_address.street2 = Some("Apt 4".to_owned());
        placed.status = OrderStatus::Shipped;

        let view = OrderDetailView::from(&placed);

        assert_eq!(view.status_heading, "SHIPPED");
        assert_eq!(view.badge, BadgeVariant::Secondary);
        assert_eq!(view.created_at, "March 1, 2026 at 12:00 PM");
        assert_eq!(view.shipping, "FREE");
        assert_eq!(view.items[0].unit_price, "$29.99");
        assert_eq!(view.items[0].line_total, "$59.98");
        assert_eq!(
            view.address_lines,
            ["123 Main St", "Apt 4", "Springfield, IL 62701", "USA"]
        );
    }
}
