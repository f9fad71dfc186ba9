//! Unified error handling for admin.

use supplement_store_core::{OrderId, OrderStatus, ParseStatusError};
use thiserror::Error;

/// Error type for admin order operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminError {
    /// No order has the requested ID.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The status token is not one of the known statuses.
    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] ParseStatusError),

    /// The date filter token is not recognised.
    #[error("Invalid date filter: {0}")]
    InvalidDateFilter(String),

    /// Someone else changed the status first.
    #[error("Order {id} is {current}, expected {expected}")]
    StatusConflict {
        id: OrderId,
        expected: OrderStatus,
        current: OrderStatus,
    },
}

/// Result type alias for admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;
