//! SupplementStore Core - Shared types library.
//!
//! This crate provides common types used across all SupplementStore components:
//! - `storefront` - Cart, pricing, checkout and the in-memory order store
//! - `admin` - Order management views and status transitions
//! - `cli` - Command-line driver for scripted sessions
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no shared state,
//! no clocks beyond what callers pass in. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses,
//!   plus the product, user and order records built from them

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
