//! Scripted shopping session: fill the cart, review totals, check out.

use std::path::Path;

use supplement_store_core::ProductId;
use supplement_store_storefront::Store;
use supplement_store_storefront::checkout::{self, CheckoutError, ShippingInfo};
use tracing::{debug, error, info, warn};

use super::seed::SeedData;

/// Load a shipping form from YAML.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn load_shipping(path: &Path) -> Result<ShippingInfo, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Add `product_ids` to the cart and place an order.
///
/// Out-of-stock products are skipped.
///
/// # Errors
///
/// Returns an error for unknown product IDs, an empty cart, or an
/// incomplete shipping form.
pub fn run(
    store: &Store,
    seed: &SeedData,
    product_ids: &[String],
    shipping: &ShippingInfo,
) -> Result<(), Box<dyn std::error::Error>> {
    let _subscription = store.subscribe({
        let store = store.clone();
        move || {
            debug!(
                cart_items = store.cart_item_count(),
                subtotal = %store.cart_subtotal(),
                orders = store.orders().len(),
                "Store changed"
            );
        }
    });

    for id in product_ids {
        let product = seed
            .product(&ProductId::new(id.as_str()))
            .ok_or_else(|| format!("Unknown product: {id}"))?;
        if !product.is_in_stock() {
            warn!(product_id = %product.id, "Out of stock, skipping");
            continue;
        }
        store.add_to_cart(product);
        info!("Added {} ({})", product.name, product.price.display());
    }

    let totals = store.cart_totals();
    info!("Cart: {} item(s)", store.cart_item_count());
    info!("  Subtotal: {}", totals.subtotal);
    info!("  Shipping: {}", totals.shipping_label());
    info!("  Tax:      {}", totals.tax);
    info!("  Total:    {}", totals.total);
    if let Some(remaining) = store.pricing().amount_until_free_shipping(totals.subtotal) {
        info!("Add {remaining} more for free shipping!");
    }

    let order = match checkout::place_order(store, shipping) {
        Ok(order) => order,
        Err(CheckoutError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                error!(field = field.key(), "{message}");
            }
            return Err(CheckoutError::Validation(errors).into());
        }
        Err(e) => return Err(e.into()),
    };

    info!("Order placed successfully!");
    info!("  Order #{}", order.id);
    info!("  Ship to: {}", order.user_name);
    info!("           {}", order.shipping_address.one_line());
    for item in &order.items {
        info!(
            "  {} x{} {}",
            item.product_name,
            item.quantity,
            item.line_total()
        );
    }
    info!("  Total: {}", order.total);
    info!("Cart now holds {} item(s)", store.cart_item_count());
    Ok(())
}
