//! Integration tests for the cart to order flow.

#![allow(clippy::unwrap_used)]

use std::str::FromStr;

use rust_decimal::Decimal;
use supplement_store_core::{OrderId, OrderStatus, Price, ProductId};
use supplement_store_integration_tests::{product, shipping_info, store};
use supplement_store_storefront::checkout::{self, CheckoutError, ShippingField};

fn price(s: &str) -> Price {
    Price::new(Decimal::from_str(s).unwrap())
}

// =============================================================================
// Cart Tests
// =============================================================================

#[test]
fn test_adding_same_product_twice_keeps_one_unit() {
    let store = store();
    let whey = product("1", "Whey Protein Isolate", 4999);

    store.add_to_cart(&whey);
    store.add_to_cart(&whey);

    let cart = store.cart();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].quantity, 1);
}

#[test]
fn test_remove_absent_product_leaves_cart_unchanged() {
    let store = store();
    store.add_to_cart(&product("1", "Whey Protein Isolate", 4999));
    let before = store.cart();

    store.remove_from_cart(&ProductId::new("404"));

    assert_eq!(store.cart(), before);
}

#[test]
fn test_subtotal_is_sum_of_distinct_unit_prices() {
    let store = store();
    store.add_to_cart(&product("1", "Whey", 4999));
    store.add_to_cart(&product("2", "Creatine", 2999));
    store.add_to_cart(&product("2", "Creatine", 2999));
    store.update_cart_item_quantity(&ProductId::new("1"), 4);

    assert_eq!(store.cart_subtotal(), price("79.98"));
    assert_eq!(store.cart_item_count(), 2);
}

#[test]
fn test_clear_cart_empties_everything() {
    let store = store();
    store.add_to_cart(&product("1", "Whey", 4999));
    store.clear_cart();

    assert!(store.cart().is_empty());
    assert_eq!(store.cart_item_count(), 0);
}

// =============================================================================
// Pricing Tests
// =============================================================================

#[test]
fn test_totals_just_below_free_shipping() {
    let store = store();
    store.add_to_cart(&product("1", "Whey", 4999));

    let totals = store.cart_totals();
    assert_eq!(totals.shipping, price("5.99"));
    assert_eq!(totals.tax, price("3.9992"));
    assert_eq!(totals.total, price("59.9792"));
    assert_eq!(totals.total.to_string(), "$59.98");
    assert_eq!(
        store.pricing().amount_until_free_shipping(totals.subtotal),
        Some(price("0.01"))
    );
}

#[test]
fn test_totals_at_free_shipping_threshold() {
    let store = store();
    store.add_to_cart(&product("1", "Whey", 2500));
    store.add_to_cart(&product("2", "Creatine", 2500));

    let totals = store.cart_totals();
    assert_eq!(totals.shipping, Price::ZERO);
    assert_eq!(totals.tax, price("4.00"));
    assert_eq!(totals.total, price("54.00"));
}

// =============================================================================
// Checkout Tests
// =============================================================================

#[test]
fn test_place_order_freezes_cart_and_clears_it() {
    let store = store();
    let whey = product("1", "Whey Protein Isolate", 4999);
    let creatine = product("2", "Creatine Monohydrate", 2999);
    let multi = product("3", "Daily Multivitamin", 1999);
    for p in [&whey, &creatine, &multi] {
        store.add_to_cart(p);
    }

    let order = checkout::place_order(&store, &shipping_info()).unwrap();

    assert!(order.id.as_str().starts_with(OrderId::PREFIX));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 3);
    assert_eq!(order.user_id, store.current_user().id);
    assert_eq!(order.user_name, "John Doe");
    assert_eq!(order.subtotal, price("99.97"));
    assert_eq!(order.shipping, Price::ZERO);
    assert_eq!(order.tax, price("7.9976"));
    assert_eq!(order.total, price("107.9676"));

    assert!(store.cart().is_empty());
    assert_eq!(store.order_by_id(&order.id), Some(order));
}

#[test]
fn test_order_line_items_ignore_later_price_changes() {
    let store = store();
    let mut whey = product("1", "Whey Protein Isolate", 4999);
    store.add_to_cart(&whey);
    store.add_to_cart(&product("2", "Creatine Monohydrate", 2999));
    store.add_to_cart(&product("3", "Daily Multivitamin", 1999));

    let order = checkout::place_order(&store, &shipping_info()).unwrap();

    // Reprice the live product and buy it again.
    whey.price = price("59.99");
    store.add_to_cart(&whey);

    let stored = store.order_by_id(&order.id).unwrap();
    assert_eq!(stored.items[0].price, price("49.99"));
    assert_eq!(stored.items[0].quantity, 1);
    assert_eq!(stored.subtotal, order.subtotal);
    assert_eq!(store.cart()[0].product.price, price("59.99"));
}

#[test]
fn test_status_update_leaves_totals_alone() {
    let store = store();
    store.add_to_cart(&product("1", "Whey", 4999));
    let order = checkout::place_order(&store, &shipping_info()).unwrap();

    assert!(store.update_order_status(&order.id, OrderStatus::Shipped));

    let stored = store.order_by_id(&order.id).unwrap();
    assert_eq!(stored.status, OrderStatus::Shipped);
    assert_eq!(stored.total, order.total);
    assert_eq!(stored.items, order.items);
}

#[test]
fn test_unknown_order_status_update_is_silent() {
    let store = store();
    store.add_to_cart(&product("1", "Whey", 4999));
    checkout::place_order(&store, &shipping_info()).unwrap();
    let before = store.orders();

    assert!(!store.update_order_status(&OrderId::new("ORD-404"), OrderStatus::Shipped));
    assert_eq!(store.orders(), before);
}

#[test]
fn test_consecutive_orders_get_distinct_ids() {
    let store = store();
    let mut ids = Vec::new();
    for _ in 0..20 {
        store.add_to_cart(&product("1", "Whey", 4999));
        ids.push(checkout::place_order(&store, &shipping_info()).unwrap().id);
    }

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[test]
fn test_empty_cart_is_refused() {
    let store = store();

    let result = checkout::place_order(&store, &shipping_info());

    assert_eq!(result, Err(CheckoutError::EmptyCart));
    assert!(store.orders().is_empty());
}

#[test]
fn test_invalid_form_blocks_order_and_keeps_cart() {
    let store = store();
    store.add_to_cart(&product("1", "Whey", 4999));
    let mut info = shipping_info();
    info.email = "john.example.com".to_owned();
    info.address.zip_code = " ".to_owned();

    let Err(CheckoutError::Validation(errors)) = checkout::place_order(&store, &info) else {
        panic!("expected validation errors");
    };

    assert_eq!(errors.get(ShippingField::Email), Some("Email is invalid"));
    assert_eq!(
        errors.get(ShippingField::ZipCode),
        Some("ZIP code is required")
    );
    assert!(store.orders().is_empty());
    assert_eq!(store.cart_item_count(), 1);
}

#[test]
fn test_order_wire_format() {
    let store = store();
    store.add_to_cart(&product("1", "Whey", 4999));
    let order = checkout::place_order(&store, &shipping_info()).unwrap();

    let json = serde_json::to_value(&order).unwrap();
    assert_eq!(json["status"], "pending");
    assert_eq!(json["total"], "59.9792");
    assert_eq!(json["shippingAddress"]["zipCode"], "62701");
    assert_eq!(json["items"][0]["productName"], "Whey");
}
