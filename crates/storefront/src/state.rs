//! The store container shared by every view.
//!
//! `Store` owns the cart, the order list and the current user, and fires its
//! [`ChangeNotifier`] after each mutation. Every mutation releases its lock
//! before notifying, so listeners may read or mutate the store re-entrantly.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use supplement_store_core::{Order, OrderId, OrderStatus, Price, Product, ProductId, User};
use tracing::{debug, info, instrument};

use crate::cart::{CartEntry, CartLedger};
use crate::config::StoreConfig;
use crate::notify::{ChangeNotifier, Subscription};
use crate::orders::{OrderRepository, StatusChange};
use crate::pricing::{OrderTotals, PricingRules};

/// Store state shared across all views.
///
/// This struct is cheaply cloneable via `Arc`; clones share the same cart,
/// orders and listeners.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    config: StoreConfig,
    cart: Mutex<CartLedger>,
    orders: Mutex<OrderRepository>,
    current_user: Mutex<User>,
    notifier: ChangeNotifier,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.inner.config.name)
            .field("cart_items", &self.cart_item_count())
            .field("orders", &lock(&self.inner.orders).len())
            .field("notifier", &self.inner.notifier)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Create a store with an empty cart and no orders.
    ///
    /// # Arguments
    ///
    /// * `config` - Business constants
    /// * `user` - The signed-in user
    #[must_use]
    pub fn new(config: StoreConfig, user: User) -> Self {
        let cart = CartLedger::new(config.cart.max_quantity_per_product);
        Self {
            inner: Arc::new(StoreInner {
                config,
                cart: Mutex::new(cart),
                orders: Mutex::new(OrderRepository::new()),
                current_user: Mutex::new(user),
                notifier: ChangeNotifier::new(),
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Shipping and tax rules.
    #[must_use]
    pub fn pricing(&self) -> &PricingRules {
        &self.inner.config.pricing
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of `product` unless it is already in the cart.
    ///
    /// Listeners are notified even when the product was already present.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&self, product: &Product) {
        let added = lock(&self.inner.cart).add_item(product);
        debug!(added, "add to cart");
        self.notify();
    }

    /// Remove `product_id` from the cart. Absent products are ignored.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&self, product_id: &ProductId) {
        let removed = lock(&self.inner.cart).remove_item(product_id);
        debug!(removed, "remove from cart");
        self.notify();
    }

    /// Set a cart entry's quantity.
    ///
    /// Zero or negative quantities remove the entry; positive ones are
    /// clamped to the configured per-product cap.
    #[instrument(skip(self))]
    pub fn update_cart_item_quantity(&self, product_id: &ProductId, quantity: i64) {
        let changed = lock(&self.inner.cart).set_quantity(product_id, quantity);
        debug!(changed, "update cart quantity");
        self.notify();
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear_cart(&self) {
        let cleared = lock(&self.inner.cart).clear();
        debug!(cleared, "clear cart");
        self.notify();
    }

    /// Remove several products with a single notification.
    #[instrument(skip(self, product_ids), fields(products = product_ids.len()))]
    pub fn remove_cart_items(&self, product_ids: &[ProductId]) {
        let removed = lock(&self.inner.cart).remove_items(product_ids);
        debug!(removed, "remove cart items");
        self.notify();
    }

    /// Owned snapshot of the cart entries.
    #[must_use]
    pub fn cart(&self) -> Vec<CartEntry> {
        lock(&self.inner.cart).snapshot()
    }

    /// Sum of unit price times quantity over the cart.
    #[must_use]
    pub fn cart_subtotal(&self) -> Price {
        lock(&self.inner.cart).subtotal()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn cart_item_count(&self) -> usize {
        lock(&self.inner.cart).item_count()
    }

    /// Live shipping, tax and total for the current cart.
    #[must_use]
    pub fn cart_totals(&self) -> OrderTotals {
        self.pricing().quote(self.cart_subtotal())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Append a fully-formed order.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub fn create_order(&self, order: Order) {
        lock(&self.inner.orders).create(order);
        info!("order created");
        self.notify();
    }

    /// Owned snapshot of every order, in creation order.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        lock(&self.inner.orders).all()
    }

    /// The order with `id`, if any.
    #[must_use]
    pub fn order_by_id(&self, id: &OrderId) -> Option<Order> {
        lock(&self.inner.orders).get(id)
    }

    /// Overwrite an order's status.
    ///
    /// Returns `false`, without notifying, if no order has that ID.
    #[instrument(skip(self))]
    pub fn update_order_status(&self, id: &OrderId, status: OrderStatus) -> bool {
        let previous = lock(&self.inner.orders).update_status(id, status);
        match previous {
            Some(previous) => {
                info!(%previous, "order status updated");
                self.notify();
                true
            }
            None => {
                debug!("order not found");
                false
            }
        }
    }

    /// Overwrite an order's status only if it still equals `expected`.
    ///
    /// Listeners are notified only when the status was written.
    #[instrument(skip(self))]
    pub fn compare_and_set_order_status(
        &self,
        id: &OrderId,
        expected: OrderStatus,
        status: OrderStatus,
    ) -> StatusChange {
        let change = lock(&self.inner.orders).compare_and_set_status(id, expected, status);
        match change {
            StatusChange::Updated { previous } => {
                info!(%previous, "order status updated");
                self.notify();
            }
            StatusChange::Conflict { current } => {
                debug!(%current, "order status changed concurrently");
            }
            StatusChange::NotFound => debug!("order not found"),
        }
        change
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// The signed-in user.
    #[must_use]
    pub fn current_user(&self) -> User {
        lock(&self.inner.current_user).clone()
    }

    /// Switch the signed-in user.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub fn set_current_user(&self, user: User) {
        *lock(&self.inner.current_user) = user;
        debug!("current user changed");
        self.notify();
    }

    /// Whether the signed-in user is an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        lock(&self.inner.current_user).is_admin()
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Register a change listener.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.notifier.subscribe(listener)
    }

    /// The underlying registry.
    #[must_use]
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.inner.notifier
    }

    fn notify(&self) {
        self.inner.notifier.notify();
    }
}

/// Each guarded value is replaced or mutated in a single call, so a poisoned
/// lock still holds consistent data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
