//! Product catalog browsing: search, filters, sort order and pagination.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use supplement_store_core::{ParseStatusError, Price, Product, ProductCategory};
use thiserror::Error;

/// Minimum rating for the best-seller badge.
const BEST_SELLER_MIN_RATING: Decimal = Decimal::from_parts(47, 0, 0, false, 1);
/// Minimum review count for the best-seller badge.
const BEST_SELLER_MIN_REVIEWS: u32 = 200;

/// Errors parsing catalog query tokens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid category: {0}")]
    InvalidCategory(#[from] ParseStatusError),
    #[error("Invalid price range: {0}")]
    InvalidPriceRange(String),
    #[error("Invalid sort option: {0}")]
    InvalidSort(String),
}

/// Whether `product` earns the best-seller badge.
#[must_use]
pub fn is_best_seller(product: &Product) -> bool {
    product.rating >= BEST_SELLER_MIN_RATING && product.review_count >= BEST_SELLER_MIN_REVIEWS
}

/// Number of best sellers featured on the home page.
pub const FEATURED_BEST_SELLERS: usize = 6;

/// The `limit` most popular products, by rating times review count.
#[must_use]
pub fn top_best_sellers(products: &[Product], limit: usize) -> Vec<Product> {
    let mut ranked = products.to_vec();
    ranked.sort_by(|a, b| SortOption::BestSellers.compare(a, b));
    ranked.truncate(limit);
    ranked
}

/// Product count for every category, in menu order. Empty categories count zero.
#[must_use]
pub fn category_counts(products: &[Product]) -> Vec<(ProductCategory, usize)> {
    ProductCategory::ALL
        .into_iter()
        .map(|category| {
            let count = products.iter().filter(|p| p.category == category).count();
            (category, count)
        })
        .collect()
}

// =============================================================================
// Price Range
// =============================================================================

/// Price bucket filter. Lower bounds are inclusive, upper bounds exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PriceRange {
    #[default]
    All,
    Under25,
    From25To40,
    From40To50,
    From50,
}

impl PriceRange {
    pub const ALL: [Self; 5] = [
        Self::All,
        Self::Under25,
        Self::From25To40,
        Self::From40To50,
        Self::From50,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Under25 => "0-25",
            Self::From25To40 => "25-40",
            Self::From40To50 => "40-50",
            Self::From50 => "50+",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All Prices",
            Self::Under25 => "Under $25",
            Self::From25To40 => "$25 - $40",
            Self::From40To50 => "$40 - $50",
            Self::From50 => "$50+",
        }
    }

    /// Whether `price` falls in this bucket.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        let amount = price.amount();
        let (low, high) = match self {
            Self::All => return true,
            Self::Under25 => (None, Some(25)),
            Self::From25To40 => (Some(25), Some(40)),
            Self::From40To50 => (Some(40), Some(50)),
            Self::From50 => (Some(50), None),
        };
        low.is_none_or(|low| amount >= Decimal::from(low))
            && high.is_none_or(|high| amount < Decimal::from(high))
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceRange {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidPriceRange(s.to_owned()))
    }
}

// =============================================================================
// Sort
// =============================================================================

/// Catalog sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOption {
    /// Highest `rating * review_count` first.
    #[default]
    BestSellers,
    PriceLow,
    PriceHigh,
    NameAsc,
    NameDesc,
}

impl SortOption {
    pub const ALL: [Self; 5] = [
        Self::BestSellers,
        Self::PriceLow,
        Self::PriceHigh,
        Self::NameAsc,
        Self::NameDesc,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BestSellers => "best-sellers",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::BestSellers => "Best Sellers",
            Self::PriceLow => "Price: Low to High",
            Self::PriceHigh => "Price: High to Low",
            Self::NameAsc => "Name: A to Z",
            Self::NameDesc => "Name: Z to A",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::BestSellers => popularity(b).cmp(&popularity(a)),
            Self::PriceLow => a.price.cmp(&b.price),
            Self::PriceHigh => b.price.cmp(&a.price),
            Self::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidSort(s.to_owned()))
    }
}

fn popularity(product: &Product) -> Decimal {
    product.rating * Decimal::from(product.review_count)
}

// =============================================================================
// Query
// =============================================================================

/// Catalog filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive text matched against name and description.
    pub search: String,
    /// `None` means every category.
    pub category: Option<ProductCategory>,
    pub price_range: PriceRange,
    pub best_sellers_only: bool,
    pub sort: SortOption,
    /// 1-based page number.
    pub page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            price_range: PriceRange::All,
            best_sellers_only: false,
            sort: SortOption::BestSellers,
            page: 1,
        }
    }
}

impl CatalogQuery {
    /// Build a query from raw request parameters.
    ///
    /// A missing or `all` category means every category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for unknown category, price range or sort
    /// tokens.
    pub fn from_params(
        search: Option<&str>,
        category: Option<&str>,
        price_range: Option<&str>,
        sort: Option<&str>,
    ) -> Result<Self, CatalogError> {
        let category = match category {
            None | Some("all") => None,
            Some(token) => Some(token.parse::<ProductCategory>()?),
        };

        Ok(Self {
            search: search.unwrap_or_default().to_owned(),
            category,
            price_range: price_range.map(str::parse).transpose()?.unwrap_or_default(),
            sort: sort.map(str::parse).transpose()?.unwrap_or_default(),
            ..Self::default()
        })
    }

    /// Whether `product` passes every filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || product.name.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle);

        matches_search
            && self.category.is_none_or(|category| product.category == category)
            && self.price_range.contains(product.price)
            && (!self.best_sellers_only || is_best_seller(product))
    }

    /// Whether any filter narrows the catalog.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search.trim().is_empty()
            || self.category.is_some()
            || self.price_range != PriceRange::All
            || self.best_sellers_only
    }
}

/// One page of matching products.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub products: Vec<Product>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matching: usize,
}

/// Filter, sort and paginate `products`.
///
/// Ties keep catalog order. Out-of-range pages clamp to the last page.
#[must_use]
pub fn browse(products: &[Product], query: &CatalogQuery, per_page: usize) -> CatalogPage {
    let mut matching: Vec<Product> = products
        .iter()
        .filter(|product| query.matches(product))
        .cloned()
        .collect();
    matching.sort_by(|a, b| query.sort.compare(a, b));

    let per_page = per_page.max(1);
    let total_matching = matching.len();
    let total_pages = total_matching.div_ceil(per_page);
    let page = query.page.clamp(1, total_pages.max(1));

    CatalogPage {
        products: matching
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect(),
        page,
        total_pages,
        total_matching,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::tests::product;

    fn catalog() -> Vec<Product> {
        let mut whey = product("1", 4999);
        whey.name = "Whey Protein Isolate".to_owned();
        whey.rating = Decimal::new(48, 1);
        whey.review_count = 1250;

        let mut creatine = product("2", 2499);
        creatine.name = "creatine Monohydrate".to_owned();
        creatine.category = ProductCategory::Creatine;
        creatine.rating = Decimal::new(49, 1);
        creatine.review_count = 150;

        let mut multi = product("3", 2500);
        multi.name = "Daily Multivitamin".to_owned();
        multi.description = "Complete vitamin support".to_owned();
        multi.category = ProductCategory::Vitamins;
        multi.rating = Decimal::new(47, 1);
        multi.review_count = 200;

        let mut preworkout = product("4", 5000);
        preworkout.name = "Ignite Pre-Workout".to_owned();
        preworkout.category = ProductCategory::PreWorkout;
        preworkout.review_count = 90;

        vec![whey, creatine, multi, preworkout]
    }

    fn ids(page: &CatalogPage) -> Vec<&str> {
        page.products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_best_seller_thresholds_are_inclusive() {
        let products = catalog();
        let flags: Vec<bool> = products.iter().map(is_best_seller).collect();
        assert_eq!(flags, [true, false, true, false]);
    }

    #[test]
    fn test_top_best_sellers_ranks_by_popularity() {
        let top: Vec<String> = top_best_sellers(&catalog(), 2)
            .into_iter()
            .map(|p| p.id.into_inner())
            .collect();
        assert_eq!(top, ["1", "3"]);
        assert_eq!(top_best_sellers(&catalog(), FEATURED_BEST_SELLERS).len(), 4);
        assert!(top_best_sellers(&catalog(), 0).is_empty());
    }

    #[test]
    fn test_category_counts_cover_every_category() {
        let counts = category_counts(&catalog());

        assert_eq!(counts.len(), ProductCategory::ALL.len());
        assert_eq!(counts[0], (ProductCategory::Protein, 1));
        assert!(counts.contains(&(ProductCategory::Vitamins, 1)));
        assert!(counts.contains(&(ProductCategory::Creatine, 1)));
        assert!(counts.contains(&(ProductCategory::Health, 0)));
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 4);
    }

    #[test]
    fn test_price_range_bounds() {
        assert!(PriceRange::Under25.contains(Price::from_cents(2499)));
        assert!(!PriceRange::Under25.contains(Price::from_cents(2500)));
        assert!(PriceRange::From25To40.contains(Price::from_cents(2500)));
        assert!(PriceRange::From40To50.contains(Price::from_cents(4999)));
        assert!(PriceRange::From50.contains(Price::from_cents(5000)));
        assert_eq!("50+".parse::<PriceRange>().unwrap(), PriceRange::From50);
        assert_eq!(
            "cheap".parse::<PriceRange>(),
            Err(CatalogError::InvalidPriceRange("cheap".to_owned()))
        );
    }

    #[test]
    fn test_default_sort_is_best_sellers() {
        let page = browse(&catalog(), &CatalogQuery::default(), 12);
        assert_eq!(ids(&page), ["1", "3", "2", "4"]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_sorts() {
        let sorted = |sort: &str| {
            let query = CatalogQuery {
                sort: sort.parse().unwrap(),
                ..CatalogQuery::default()
            };
            let page = browse(&catalog(), &query, 12);
            ids(&page).into_iter().map(str::to_owned).collect::<Vec<_>>()
        };

        assert_eq!(sorted("price-low"), ["2", "3", "1", "4"]);
        assert_eq!(sorted("price-high"), ["4", "1", "3", "2"]);
        assert_eq!(sorted("name-asc"), ["2", "3", "4", "1"]);
        assert_eq!(sorted("name-desc"), ["1", "4", "3", "2"]);
    }

    #[test]
    fn test_filters_combine() {
        let query = CatalogQuery {
            search: "VITAMIN".to_owned(),
            category: Some(ProductCategory::Vitamins),
            price_range: PriceRange::From25To40,
            best_sellers_only: true,
            ..CatalogQuery::default()
        };
        let page = browse(&catalog(), &query, 12);

        assert_eq!(ids(&page), ["3"]);
        assert!(query.has_active_filters());
        assert!(!CatalogQuery::default().has_active_filters());
    }

    #[test]
    fn test_from_params() {
        let query =
            CatalogQuery::from_params(Some("whey"), Some("protein"), Some("40-50"), None).unwrap();
        assert_eq!(query.category, Some(ProductCategory::Protein));
        assert_eq!(query.price_range, PriceRange::From40To50);
        assert_eq!(query.sort, SortOption::BestSellers);

        assert!(matches!(
            CatalogQuery::from_params(None, Some("snacks"), None, None),
            Err(CatalogError::InvalidCategory(_))
        ));
        assert_eq!(
            CatalogQuery::from_params(None, Some("all"), None, Some("newest")),
            Err(CatalogError::InvalidSort("newest".to_owned()))
        );
    }

    #[test]
    fn test_pagination_clamps() {
        let query = CatalogQuery {
            page: 9,
            ..CatalogQuery::default()
        };
        let page = browse(&catalog(), &query, 3);

        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(ids(&page), ["4"]);
    }
}
