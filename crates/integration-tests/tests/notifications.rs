//! Integration tests for change notification across the store.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use supplement_store_admin::AdminOrders;
use supplement_store_core::{OrderId, OrderStatus, ProductId};
use supplement_store_integration_tests::{admin, product, shipping_info, store};
use supplement_store_storefront::checkout;

// =============================================================================
// Ordering Tests
// =============================================================================

#[test]
fn test_listeners_run_in_registration_order() {
    let store = store();
    let calls = Arc::new(Mutex::new(Vec::new()));

    let subscriptions: Vec<_> = ["first", "second", "third"]
        .into_iter()
        .map(|name| {
            let calls = Arc::clone(&calls);
            store.subscribe(move || calls.lock().unwrap().push(name))
        })
        .collect();

    store.add_to_cart(&product("1", "Whey", 4999));

    assert_eq!(*calls.lock().unwrap(), ["first", "second", "third"]);
    drop(subscriptions);
}

#[test]
fn test_checkout_notifies_order_then_cart() {
    let store = store();
    store.add_to_cart(&product("1", "Whey", 4999));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let _subscription = {
        let reader = store.clone();
        let seen = Arc::clone(&seen);
        store.subscribe(move || {
            seen.lock()
                .unwrap()
                .push((reader.orders().len(), reader.cart_item_count()));
        })
    };

    checkout::place_order(&store, &shipping_info()).unwrap();

    assert_eq!(*seen.lock().unwrap(), [(1, 1), (1, 0)]);
}

#[test]
fn test_failed_checkout_does_not_notify() {
    let store = store();
    let count = Arc::new(AtomicUsize::new(0));
    let _subscription = {
        let count = Arc::clone(&count);
        store.subscribe(move || {
            count.fetch_add(1, Ordering::SeqCst);
        })
    };

    assert!(checkout::place_order(&store, &shipping_info()).is_err());
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Unsubscribe Tests
// =============================================================================

#[test]
fn test_unsubscribe_is_idempotent() {
    let store = store();
    let count = Arc::new(AtomicUsize::new(0));
    let subscription = {
        let count = Arc::clone(&count);
        store.subscribe(move || {
            count.fetch_add(1, Ordering::SeqCst);
        })
    };

    store.clear_cart();
    subscription.unsubscribe();
    subscription.unsubscribe();
    store.clear_cart();
    drop(subscription);

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(store.notifier().listener_count(), 0);
}

#[test]
fn test_listener_can_unsubscribe_itself() {
    let store = store();
    let count = Arc::new(AtomicUsize::new(0));
    let id = {
        let count = Arc::clone(&count);
        let notifier = store.notifier().clone();
        let slot = Arc::new(Mutex::new(None));
        let own_id = Arc::clone(&slot);
        let id = store
            .subscribe(move || {
                count.fetch_add(1, Ordering::SeqCst);
                if let Some(id) = *own_id.lock().unwrap() {
                    notifier.unsubscribe(id);
                }
            })
            .detach();
        *slot.lock().unwrap() = Some(id);
        id
    };

    store.clear_cart();
    store.clear_cart();

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!store.notifier().unsubscribe(id));
}

// =============================================================================
// Cross-crate Tests
// =============================================================================

#[test]
fn test_admin_status_change_reaches_storefront_listeners() {
    let store = store();
    store.add_to_cart(&product("1", "Whey", 4999));
    let order = checkout::place_order(&store, &shipping_info()).unwrap();

    let statuses = Arc::new(Mutex::new(Vec::new()));
    let _subscription = {
        let reader = store.clone();
        let statuses = Arc::clone(&statuses);
        let id = order.id.clone();
        store.subscribe(move || {
            if let Some(order) = reader.order_by_id(&id) {
                statuses.lock().unwrap().push(order.status);
            }
        })
    };

    store.set_current_user(admin());
    let orders = AdminOrders::new(store.clone());
    orders.update_status(&order.id, "shipped").unwrap();
    assert!(orders.update_status(&OrderId::new("ORD-404"), "shipped").is_err());

    assert_eq!(
        *statuses.lock().unwrap(),
        [OrderStatus::Pending, OrderStatus::Shipped]
    );
}

#[test]
fn test_listener_reacting_with_a_mutation() {
    let store = store();
    let gift = product("99", "Shaker Bottle", 0);

    // Add a free shaker whenever the cart holds whey.
    let _subscription = {
        let writer = store.clone();
        store.subscribe(move || {
            let cart = writer.cart();
            let has_whey = cart.iter().any(|e| e.product.id == ProductId::new("1"));
            let has_gift = cart.iter().any(|e| e.product.id == gift.id);
            if has_whey && !has_gift {
                writer.add_to_cart(&gift);
            }
        })
    };

    store.add_to_cart(&product("1", "Whey", 4999));

    assert_eq!(store.cart_item_count(), 2);
}
