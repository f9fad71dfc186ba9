//! SupplementStore Admin library.
//!
//! Order management for store staff: a filtered, sorted and paginated order
//! list, an order detail view, and status updates. Everything here reads
//! and writes the same [`supplement_store_storefront::Store`] the shopping
//! side uses, so listeners registered there see admin changes too.
//!
//! # Modules
//!
//! - [`query`] - Search, status and date filters plus pagination
//! - [`views`] - Display strings and status badges
//! - [`orders`] - The [`AdminOrders`] service
//! - [`error`] - Admin error type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod orders;
pub mod query;
pub mod views;

pub use error::{AdminError, Result};
pub use orders::{AdminOrders, OrderListView};
pub use query::{DateFilter, OrderPage, OrderQuery};
pub use views::{BadgeVariant, OrderDetailView, OrderSummaryView};
