//! Admin order service over the shared store.

use chrono::{DateTime, Utc};
use supplement_store_core::{OrderId, OrderStatus};
use supplement_store_storefront::Store;
use supplement_store_storefront::orders::StatusChange;
use tracing::{info, instrument, warn};

use crate::error::{AdminError, Result};
use crate::query::{OrderPage, OrderQuery, filter_orders, paginate};
use crate::views::{OrderDetailView, OrderSummaryView};

/// Order list page ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderListView {
    pub rows: Vec<OrderSummaryView>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matching: usize,
    pub showing: (usize, usize),
    pub page_numbers: Vec<usize>,
    pub has_active_filters: bool,
}

/// Admin operations on orders.
///
/// Cheap to clone; wraps the same [`Store`] the storefront mutates.
#[derive(Debug, Clone)]
pub struct AdminOrders {
    store: Store,
}

impl AdminOrders {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Filtered, sorted page of orders as of now.
    #[must_use]
    pub fn list(&self, query: &OrderQuery) -> OrderPage {
        self.list_at(query, Utc::now())
    }

    /// Filtered, sorted page of orders with date filters measured from `now`.
    #[instrument(skip(self, now))]
    pub fn list_at(&self, query: &OrderQuery, now: DateTime<Utc>) -> OrderPage {
        let per_page = self.store.config().pagination.orders_per_page;
        let matching = filter_orders(self.store.orders(), query, now);
        let page = paginate(matching, query.page, per_page);
        info!(
            matching = page.total_matching,
            page = page.page,
            total_pages = page.total_pages,
            "Listed orders"
        );
        page
    }

    /// Rendered order table for `query`.
    #[must_use]
    pub fn list_view(&self, query: &OrderQuery) -> OrderListView {
        let page = self.list(query);
        OrderListView {
            rows: page.orders.iter().map(OrderSummaryView::from).collect(),
            page: page.page,
            total_pages: page.total_pages,
            total_matching: page.total_matching,
            showing: page.showing_range(),
            page_numbers: page.page_numbers(),
            has_active_filters: query.has_active_filters(),
        }
    }

    /// Detail view of one order.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::OrderNotFound` for an unknown ID.
    pub fn detail(&self, id: &OrderId) -> Result<OrderDetailView> {
        self.store
            .order_by_id(id)
            .map(|order| OrderDetailView::from(&order))
            .ok_or_else(|| AdminError::OrderNotFound(id.clone()))
    }

    /// Set an order's status from a status token such as `"shipped"`.
    ///
    /// Any status may replace any other.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::InvalidStatus` for an unknown token, or
    /// `AdminError::OrderNotFound` for an unknown ID.
    #[instrument(skip(self))]
    pub fn update_status(&self, id: &OrderId, status: &str) -> Result<OrderStatus> {
        let status: OrderStatus = status.parse()?;
        if self.store.update_order_status(id, status) {
            info!(%status, "Order status updated");
            Ok(status)
        } else {
            warn!("Order not found");
            Err(AdminError::OrderNotFound(id.clone()))
        }
    }

    /// Set an order's status only if it is still `expected`.
    ///
    /// Returns the new status.
    ///
    /// # Errors
    ///
    /// Same as [`AdminOrders::update_status`], plus
    /// `AdminError::StatusConflict` if the status changed since it was read.
    #[instrument(skip(self))]
    pub fn update_status_from(
        &self,
        id: &OrderId,
        expected: OrderStatus,
        status: &str,
    ) -> Result<OrderStatus> {
        let status: OrderStatus = status.parse()?;
        match self
            .store
            .compare_and_set_order_status(id, expected, status)
        {
            StatusChange::Updated { previous } => {
                info!(%previous, %status, "Order status updated");
                Ok(status)
            }
            StatusChange::NotFound => Err(AdminError::OrderNotFound(id.clone())),
            StatusChange::Conflict { current } => {
                warn!(%expected, %current, "Order status conflict");
                Err(AdminError::StatusConflict {
                    id: id.clone(),
                    expected,
                    current,
                })
            }
        }
    }
}
