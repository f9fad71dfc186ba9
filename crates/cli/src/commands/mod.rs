//! CLI command implementations.

pub mod demo;
pub mod home;
pub mod orders;
pub mod products;
pub mod quote;
pub mod seed;
