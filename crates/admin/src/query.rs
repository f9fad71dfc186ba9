//! Order list filtering, sorting and pagination.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use supplement_store_core::{Order, OrderStatus};

use crate::error::{AdminError, Result};

/// Number of page links shown around the current page.
const PAGE_WINDOW: usize = 5;

// =============================================================================
// Date Filter
// =============================================================================

/// How far back the order list reaches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum DateFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "1day")]
    LastDay,
    #[serde(rename = "7days")]
    Last7Days,
    #[serde(rename = "30days")]
    Last30Days,
    #[serde(rename = "90days")]
    Last90Days,
}

impl DateFilter {
    /// Every filter, in the order the filter picker lists them.
    pub const ALL: [Self; 5] = [
        Self::All,
        Self::LastDay,
        Self::Last7Days,
        Self::Last30Days,
        Self::Last90Days,
    ];

    /// The query-string token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::LastDay => "1day",
            Self::Last7Days => "7days",
            Self::Last30Days => "30days",
            Self::Last90Days => "90days",
        }
    }

    /// Picker label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::LastDay => "Last 24 Hours",
            Self::Last7Days => "Last 7 Days",
            Self::Last30Days => "Last 30 Days",
            Self::Last90Days => "Last 90 Days",
        }
    }

    /// Maximum order age, or `None` for no limit.
    #[must_use]
    pub fn max_age(&self) -> Option<Duration> {
        match self {
            Self::All => None,
            Self::LastDay => Some(Duration::days(1)),
            Self::Last7Days => Some(Duration::days(7)),
            Self::Last30Days => Some(Duration::days(30)),
            Self::Last90Days => Some(Duration::days(90)),
        }
    }

    /// Whether an order placed at `created_at` is inside the window ending
    /// at `now`. The window is inclusive.
    #[must_use]
    pub fn matches(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.max_age()
            .is_none_or(|max_age| now.signed_duration_since(created_at) <= max_age)
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFilter {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str() == s)
            .ok_or_else(|| AdminError::InvalidDateFilter(s.to_owned()))
    }
}

// =============================================================================
// Query
// =============================================================================

/// Filters applied to the admin order list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    /// Case-insensitive text matched against order ID, customer name and
    /// product names. Empty matches everything.
    pub search: String,
    /// `None` means every status.
    pub status: Option<OrderStatus>,
    pub date: DateFilter,
    /// 1-based page number.
    pub page: usize,
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
            date: DateFilter::All,
            page: 1,
        }
    }
}

impl OrderQuery {
    /// Build a query from raw request parameters.
    ///
    /// A missing or `all` status means every status.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::InvalidStatus` or `AdminError::InvalidDateFilter`
    /// for unknown tokens.
    pub fn from_params(
        search: Option<&str>,
        status: Option<&str>,
        date: Option<&str>,
        page: Option<usize>,
    ) -> Result<Self> {
        let status = match status {
            None | Some("all") => None,
            Some(token) => Some(token.parse::<OrderStatus>()?),
        };
        let date = date.map(str::parse).transpose()?.unwrap_or_default();

        Ok(Self {
            search: search.unwrap_or_default().trim().to_owned(),
            status,
            date,
            page: page.unwrap_or(1),
        })
    }

    /// Whether any filter narrows the list.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty() || self.status.is_some() || self.date != DateFilter::All
    }

    /// Whether `order` passes every filter.
    #[must_use]
    pub fn matches(&self, order: &Order, now: DateTime<Utc>) -> bool {
        self.matches_search(order)
            && self.status.is_none_or(|status| order.status == status)
            && self.date.matches(order.created_at, now)
    }

    fn matches_search(&self, order: &Order) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

        contains(order.id.as_str())
            || contains(&order.user_name)
            || order.items.iter().any(|item| contains(&item.product_name))
    }
}

// =============================================================================
// Page
// =============================================================================

/// One page of matching orders, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    /// Current page, clamped into `1..=total_pages`.
    pub page: usize,
    /// Zero when nothing matched.
    pub total_pages: usize,
    pub total_matching: usize,
    pub per_page: usize,
}

impl OrderPage {
    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based positions of the first and last order on this page, as in
    /// "Showing 6 to 10 of 12". `(0, 0)` when nothing matched.
    #[must_use]
    pub fn showing_range(&self) -> (usize, usize) {
        if self.orders.is_empty() {
            return (0, 0);
        }
        let start = (self.page - 1) * self.per_page;
        (start + 1, start + self.orders.len())
    }

    /// Page numbers to link, at most five, centred on the current page
    /// where possible.
    #[must_use]
    pub fn page_numbers(&self) -> Vec<usize> {
        if self.total_pages <= PAGE_WINDOW {
            return (1..=self.total_pages).collect();
        }
        let first = if self.page <= 3 {
            1
        } else if self.page >= self.total_pages - 2 {
            self.total_pages - (PAGE_WINDOW - 1)
        } else {
            self.page - 2
        };
        (first..first + PAGE_WINDOW).collect()
    }
}

/// Filter `orders` by `query` and sort them newest first.
///
/// Orders with equal timestamps keep their relative order.
#[must_use]
pub fn filter_orders(orders: Vec<Order>, query: &OrderQuery, now: DateTime<Utc>) -> Vec<Order> {
    let mut matching: Vec<Order> = orders
        .into_iter()
        .filter(|order| query.matches(order, now))
        .collect();
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matching
}

/// Cut one page out of already-sorted orders.
///
/// Pages are 1-based. A page past the end clamps to the last page and page
/// zero clamps to the first.
#[must_use]
pub fn paginate(matching: Vec<Order>, page: usize, per_page: usize) -> OrderPage {
    let per_page = per_page.max(1);
    let total_matching = matching.len();
    let total_pages = total_matching.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let orders = matching
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    OrderPage {
        orders,
        page,
        total_pages,
        total_matching,
        per_page,
    }
}
