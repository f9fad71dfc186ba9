//! In-memory order repository.
//!
//! Orders are appended once and never deleted. The repository does not
//! generate or deduplicate IDs; callers hand it fully-formed orders.

use supplement_store_core::{Order, OrderId, OrderStatus};

/// Outcome of a conditional status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// The status was written; `previous` is what it replaced.
    Updated { previous: OrderStatus },
    /// No order has that ID.
    NotFound,
    /// The order's status was no longer the expected one.
    Conflict { current: OrderStatus },
}

/// Append-only store of placed orders, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderRepository {
    orders: Vec<Order>,
}

impl OrderRepository {
    /// Create an empty repository.
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Append an order.
    pub fn create(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// Owned copy of every order, in insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<Order> {
        self.orders.clone()
    }

    /// Owned copy of the order with `id`.
    ///
    /// If several orders share an ID, the first one wins.
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<Order> {
        self.find(id).cloned()
    }

    /// Overwrite the status of the order with `id`.
    ///
    /// Returns the previous status, or `None` if no order has that ID.
    pub fn update_status(&mut self, id: &OrderId, status: OrderStatus) -> Option<OrderStatus> {
        let order = self.find_mut(id)?;
        Some(std::mem::replace(&mut order.status, status))
    }

    /// Overwrite the status only if it still equals `expected`.
    pub fn compare_and_set_status(
        &mut self,
        id: &OrderId,
        expected: OrderStatus,
        status: OrderStatus,
    ) -> StatusChange {
        match self.find_mut(id) {
            None => StatusChange::NotFound,
            Some(order) if order.status != expected => StatusChange::Conflict {
                current: order.status,
            },
            Some(order) => StatusChange::Updated {
                previous: std::mem::replace(&mut order.status, status),
            },
        }
    }

    /// Number of stored orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether no orders are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn find(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == *id)
    }

    fn find_mut(&mut self, id: &OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|order| order.id == *id)
    }
}
