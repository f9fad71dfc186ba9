//! Core types for SupplementStore.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod email;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;
pub mod user;

pub use address::Address;
pub use email::{Email, EmailError};
pub use id::*;
pub use order::{Order, OrderLineItem};
pub use price::Price;
pub use product::{Product, ProductCategory};
pub use status::*;
pub use user::User;
