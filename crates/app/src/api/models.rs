//! Orders API models.

use foxi::{ids::RestaurantId, orders::OrderStatus};
use jiff::civil::Date;
use smallvec::SmallVec;

/// Query pairs appended to a list request.
pub(crate) type QueryPairs = SmallVec<[(&'static str, String); 4]>;

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items on this page
    pub results: Vec<T>,

    /// Total number of items across all pages
    pub count: u64,

    /// URL of the next page
    pub next: Option<String>,

    /// URL of the previous page
    pub previous: Option<String>,
}

impl<T> Page<T> {
    /// A single page holding every result.
    pub fn of(results: Vec<T>) -> Self {
        Self {
            count: results.len() as u64,
            results,
            next: None,
            previous: None,
        }
    }
}

/// Filters for the order listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    /// Only orders in this status
    pub status: Option<OrderStatus>,

    /// Only orders for this restaurant
    pub restaurant: Option<RestaurantId>,

    /// Page number, starting at 1
    pub page: Option<u32>,

    /// Page size
    pub limit: Option<u32>,
}

impl OrderFilter {
    pub(crate) fn query(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();

        if let Some(status) = &self.status {
            pairs.push(("status", status.to_string()));
        }

        if let Some(restaurant) = self.restaurant {
            pairs.push(("restaurant", restaurant.to_string()));
        }

        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }

        pairs
    }
}

/// Filters for a restaurant's order listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantOrdersFilter {
    /// Only orders in this status
    pub status: Option<OrderStatus>,

    /// Page number, starting at 1
    pub page: Option<u32>,

    /// Earliest order date, inclusive
    pub date_from: Option<Date>,

    /// Latest order date, inclusive
    pub date_to: Option<Date>,
}

impl RestaurantOrdersFilter {
    pub(crate) fn query(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();

        if let Some(status) = &self.status {
            pairs.push(("status", status.to_string()));
        }

        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }

        if let Some(date_from) = self.date_from {
            pairs.push(("date_from", date_from.to_string()));
        }

        if let Some(date_to) = self.date_to {
            pairs.push(("date_to", date_to.to_string()));
        }

        pairs
    }
}
