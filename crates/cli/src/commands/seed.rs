//! Seed data loading.
//!
//! The store keeps everything in memory, so every command starts from a YAML
//! seed file holding the users, the catalog and any pre-existing orders.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use supplement_store_core::{Order, Product, ProductId, User};
use supplement_store_storefront::Store;
use supplement_store_storefront::config::StoreConfig;
use thiserror::Error;
use tracing::{debug, info};

/// Errors loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Seed file defines no users")]
    NoUsers,
    #[error("Duplicate product ID in seed file: {0}")]
    DuplicateProduct(ProductId),
}

/// Contents of a seed file.
#[derive(Debug, Deserialize)]
pub struct SeedData {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl SeedData {
    /// Catalog product with `id`.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == *id)
    }

    /// First admin user, if any.
    pub fn admin(&self) -> Option<&User> {
        self.users.iter().find(|user| user.is_admin())
    }

    /// The user a fresh session starts as: the first regular user, falling
    /// back to the first user of any role.
    fn default_user(&self) -> Option<&User> {
        self.users
            .iter()
            .find(|user| !user.is_admin())
            .or_else(|| self.users.first())
    }

    fn validate(&self) -> Result<(), SeedError> {
        if self.users.is_empty() {
            return Err(SeedError::NoUsers);
        }
        let mut seen = HashSet::new();
        for product in &self.products {
            if !seen.insert(&product.id) {
                return Err(SeedError::DuplicateProduct(product.id.clone()));
            }
        }
        Ok(())
    }

    /// Build a store holding the seeded orders, signed in as the default
    /// user.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::NoUsers` if the seed has no users.
    pub fn into_store(&self, config: StoreConfig) -> Result<Store, SeedError> {
        let user = self.default_user().ok_or(SeedError::NoUsers)?.clone();
        debug!(user_id = %user.id, "Starting session");

        let store = Store::new(config, user);
        for order in &self.orders {
            store.create_order(order.clone());
        }
        Ok(store)
    }
}

/// Load and validate a seed file.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or malformed.
pub async fn load(path: &Path) -> Result<SeedData, SeedError> {
    if !path.exists() {
        return Err(SeedError::NotFound(path.to_path_buf()));
    }

    info!(path = %path.display(), "Loading seed data");
    let content = tokio::fs::read_to_string(path).await?;
    let seed = parse(&content)?;

    info!(
        users = seed.users.len(),
        products = seed.products.len(),
        orders = seed.orders.len(),
        "Parsed seed data"
    );
    Ok(seed)
}

/// Parse and validate seed YAML.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or fails validation.
pub fn parse(content: &str) -> Result<SeedData, SeedError> {
    let seed: SeedData = serde_yaml::from_str(content)?;
    seed.validate()?;
    Ok(seed)
}
