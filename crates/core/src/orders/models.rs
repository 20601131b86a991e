//! Order Models

use jiff::{Timestamp, civil::Date};
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::{
    ids::{CustomerId, MenuItemId, RestaurantId, TypedId},
    orders::status::OrderStatus,
};

/// Order Id
pub type OrderId = TypedId<Order>;

/// Server-authoritative order.
///
/// The client never edits an order in place; fresher representations from
/// the server replace the cached copy wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Order id
    pub id: OrderId,

    /// Restaurant the order was placed with
    pub restaurant: RestaurantId,

    /// Restaurant name, when the server includes it
    pub restaurant_name: Option<String>,

    /// Ordering customer
    pub customer: CustomerId,

    /// Ordered lines
    pub items: Vec<OrderLine>,

    /// Current lifecycle stage
    pub status: OrderStatus,

    /// Amount charged, as computed by the server
    pub total_amount: Decimal,

    /// Delivery address
    pub delivery_address: String,

    /// Delivery contact phone
    pub delivery_phone: String,

    /// Order-level instructions
    pub special_instructions: Option<String>,

    /// Delivery estimate set by the restaurant
    pub estimated_delivery_time: Option<Timestamp>,

    /// Creation time
    pub created_at: Timestamp,

    /// Last modification time
    pub updated_at: Timestamp,
}

/// Order line as priced by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    /// Ordered menu item
    pub menu_item: MenuItemId,

    /// Menu item name, when the server includes it
    pub name: Option<String>,

    /// Quantity
    pub quantity: u32,

    /// Unit price at order time
    pub unit_price: Option<Decimal>,

    /// Line total, quantity times unit price.
    pub price: Decimal,

    /// Per-line instructions
    pub special_instructions: Option<String>,
}

/// Status change requested by restaurant staff.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    /// Target status
    pub status: OrderStatus,

    /// Optional delivery estimate
    pub estimated_delivery_time: Option<Timestamp>,
}

impl StatusUpdate {
    /// Status change without a delivery estimate.
    pub fn new(status: OrderStatus) -> Self {
        Self {
            status,
            estimated_delivery_time: None,
        }
    }
}

/// Aggregated order figures for one restaurant.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderStatistics {
    /// Number of orders in the period
    pub total_orders: u64,

    /// Revenue in the period
    pub total_revenue: Decimal,

    /// Mean order value
    pub average_order_value: Decimal,

    /// Order count per status
    pub orders_by_status: FxHashMap<OrderStatus, u64>,

    /// Day-by-day breakdown
    pub revenue_by_day: Vec<DailyRevenue>,
}

/// Revenue for a single day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRevenue {
    /// Calendar day
    pub date: Date,

    /// Revenue for the day
    pub revenue: Decimal,

    /// Orders placed that day
    pub orders: u64,
}
