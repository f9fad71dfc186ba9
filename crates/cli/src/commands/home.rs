//! Storefront landing summary: featured best sellers and category sizes.

use supplement_store_storefront::catalog;
use tracing::info;

use super::seed::SeedData;

/// Log the featured best sellers and the product count of every category.
pub fn run(seed: &SeedData) {
    info!("Best sellers:");
    for product in catalog::top_best_sellers(&seed.products, catalog::FEATURED_BEST_SELLERS) {
        info!(
            "  [{:>2}] {:<28} {:>8}  {} ({} reviews)",
            product.id,
            product.name,
            product.price.display(),
            product.rating,
            product.review_count
        );
    }

    info!("Shop by category:");
    for (category, count) in catalog::category_counts(&seed.products) {
        info!("  {:<12} {count} products", category.label());
    }
}
