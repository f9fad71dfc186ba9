//! SupplementStore Storefront library.
//!
//! The shopping side of the store: the cart ledger, the pricing rules that
//! turn a subtotal into shipping, tax and a total, checkout validation and
//! order placement, and the [`state::Store`] container that ties them to a
//! change-notification registry.
//!
//! # Modules
//!
//! - [`config`] - Tunable business constants loaded from the environment
//! - [`notify`] - Observer registry fired after every mutation
//! - [`cart`] - One-unit-per-product cart ledger
//! - [`pricing`] - Shipping, tax and total calculation
//! - [`catalog`] - Product search, filters, sort order and pagination
//! - [`orders`] - Append-only order repository with mutable status
//! - [`checkout`] - Shipping form validation and order placement
//! - [`state`] - The injectable store container

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod notify;
pub mod orders;
pub mod pricing;
pub mod state;

pub use state::Store;
