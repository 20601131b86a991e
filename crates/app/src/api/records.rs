//! Orders API records.
//!
//! Wire shapes returned by the REST API. Every record is parsed and checked
//! here, at the boundary, before it becomes a domain type.

use std::str::FromStr;

use foxi::{
    ids::{CustomerId, MenuItemId, RestaurantId},
    orders::{DailyRevenue, Order, OrderId, OrderLine, OrderStatistics, OrderStatus},
};
use jiff::{Timestamp, civil::Date};
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::api::models::Page;

/// Values that parsed as JSON but are not acceptable.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A monetary field does not hold a decimal number.
    #[error("invalid amount in `{field}`: {value}")]
    InvalidAmount {
        /// Field name
        field: &'static str,

        /// Offending value
        value: String,
    },
}

/// Monetary amount, sent as a string by decimal fields and as a number by aggregates.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum AmountRecord {
    Text(String),
    Number(serde_json::Number),
}

impl AmountRecord {
    fn parse(&self, field: &'static str) -> Result<Decimal, RecordError> {
        let text = match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Number(number) => number.to_string(),
        };

        Decimal::from_str(&text)
            .or_else(|_err| Decimal::from_scientific(&text))
            .map_err(|_err| RecordError::InvalidAmount { field, value: text })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamedRecord {
    name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderItemRecord {
    menu_item: u64,
    #[serde(default)]
    item_name: Option<String>,
    #[serde(default)]
    menu_item_details: Option<NamedRecord>,
    quantity: u32,
    #[serde(default)]
    unit_price: Option<AmountRecord>,
    #[serde(alias = "total_price")]
    price: AmountRecord,
    #[serde(default)]
    special_instructions: Option<String>,
}

impl TryFrom<OrderItemRecord> for OrderLine {
    type Error = RecordError;

    fn try_from(record: OrderItemRecord) -> Result<Self, Self::Error> {
        let unit_price = record
            .unit_price
            .as_ref()
            .map(|amount| amount.parse("unit_price"))
            .transpose()?;

        Ok(OrderLine {
            menu_item: MenuItemId::new(record.menu_item),
            name: record
                .item_name
                .or_else(|| record.menu_item_details.map(|details| details.name)),
            quantity: record.quantity,
            unit_price,
            price: record.price.parse("price")?,
            special_instructions: non_blank(record.special_instructions),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderRecord {
    id: u64,
    restaurant: u64,
    #[serde(default)]
    restaurant_name: Option<String>,
    #[serde(default)]
    restaurant_details: Option<NamedRecord>,
    customer: u64,
    #[serde(default)]
    items: Vec<OrderItemRecord>,
    status: OrderStatus,
    total_amount: AmountRecord,
    delivery_address: String,
    delivery_phone: String,
    #[serde(default, alias = "delivery_notes")]
    special_instructions: Option<String>,
    #[serde(default)]
    estimated_delivery_time: Option<Timestamp>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl TryFrom<OrderRecord> for Order {
    type Error = RecordError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        let items = record
            .items
            .into_iter()
            .map(OrderLine::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Order {
            id: OrderId::new(record.id),
            restaurant: RestaurantId::new(record.restaurant),
            restaurant_name: record
                .restaurant_name
                .or_else(|| record.restaurant_details.map(|details| details.name)),
            customer: CustomerId::new(record.customer),
            items,
            status: record.status,
            total_amount: record.total_amount.parse("total_amount")?,
            delivery_address: record.delivery_address,
            delivery_phone: record.delivery_phone,
            special_instructions: non_blank(record.special_instructions),
            estimated_delivery_time: record.estimated_delivery_time,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageRecord<T> {
    results: Vec<T>,
    count: u64,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    previous: Option<String>,
}

impl TryFrom<PageRecord<OrderRecord>> for Page<Order> {
    type Error = RecordError;

    fn try_from(record: PageRecord<OrderRecord>) -> Result<Self, Self::Error> {
        let results = record
            .results
            .into_iter()
            .map(Order::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            results,
            count: record.count,
            next: record.next,
            previous: record.previous,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DailyRevenueRecord {
    date: Date,
    revenue: AmountRecord,
    orders: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatisticsRecord {
    total_orders: u64,
    total_revenue: AmountRecord,
    average_order_value: AmountRecord,
    #[serde(default)]
    orders_by_status: FxHashMap<String, u64>,
    #[serde(default)]
    revenue_by_day: Vec<DailyRevenueRecord>,
}

impl TryFrom<StatisticsRecord> for OrderStatistics {
    type Error = RecordError;

    fn try_from(record: StatisticsRecord) -> Result<Self, Self::Error> {
        let revenue_by_day = record
            .revenue_by_day
            .into_iter()
            .map(|day| {
                Ok(DailyRevenue {
                    date: day.date,
                    revenue: day.revenue.parse("revenue")?,
                    orders: day.orders,
                })
            })
            .collect::<Result<Vec<_>, RecordError>>()?;

        Ok(OrderStatistics {
            total_orders: record.total_orders,
            total_revenue: record.total_revenue.parse("total_revenue")?,
            average_order_value: record.average_order_value.parse("average_order_value")?,
            orders_by_status: record
                .orders_by_status
                .into_iter()
                .map(|(code, count)| (OrderStatus::from(code), count))
                .collect(),
            revenue_by_day,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
