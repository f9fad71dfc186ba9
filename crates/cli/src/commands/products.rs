//! Browse the catalog.

use supplement_store_storefront::catalog::{self, CatalogQuery};
use tracing::info;

use super::seed::SeedData;

/// Log one page of catalog results.
pub fn run(seed: &SeedData, query: &CatalogQuery, per_page: usize) {
    let page = catalog::browse(&seed.products, query, per_page);

    info!(
        "Showing {} of {} products (page {} of {}, sorted by {})",
        page.products.len(),
        page.total_matching,
        page.page,
        page.total_pages.max(1),
        query.sort.label()
    );

    for product in &page.products {
        let mut badges = Vec::new();
        if catalog::is_best_seller(product) {
            badges.push("best seller");
        }
        if product.featured {
            badges.push("featured");
        }
        if !product.is_in_stock() {
            badges.push("out of stock");
        }

        info!(
            "  [{:>2}] {:<28} {:>8}  {:<12} {} ({} reviews) {}",
            product.id,
            product.name,
            product.price.display(),
            product.category.label(),
            product.rating,
            product.review_count,
            badges.join(", ")
        );
    }

    if page.products.is_empty() {
        info!("No products found. Try adjusting your filters or search terms.");
    }
}
