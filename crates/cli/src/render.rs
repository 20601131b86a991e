//! Table output

use std::io;

use foxi::{
    money::koruna,
    orders::{Order, OrderStatistics},
};
use jiff::Timestamp;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

fn timestamp(value: Timestamp) -> String {
    value.strftime("%Y-%m-%d %H:%M").to_string()
}

/// Write an order listing, one row per order.
pub(crate) fn write_orders(out: &mut impl io::Write, orders: &[Order]) -> io::Result<()> {
    if orders.is_empty() {
        return writeln!(out, "no orders found");
    }

    let mut builder = Builder::default();

    builder.push_record(["Order", "Restaurant", "Status", "Items", "Total", "Created"]);

    for order in orders {
        builder.push_record([
            order.id.to_string(),
            order
                .restaurant_name
                .clone()
                .unwrap_or_else(|| order.restaurant.to_string()),
            order.status.display_name().to_string(),
            order.items.len().to_string(),
            koruna(order.total_amount).to_string(),
            timestamp(order.created_at),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..5), Alignment::right());

    writeln!(out, "{table}")
}

/// Write a single order with its lines.
pub(crate) fn write_order(out: &mut impl io::Write, order: &Order) -> io::Result<()> {
    writeln!(out, "Order {}: {}", order.id, order.status.display_name())?;
    writeln!(
        out,
        "Restaurant: {}",
        order
            .restaurant_name
            .as_deref()
            .map_or_else(|| order.restaurant.to_string(), str::to_string)
    )?;
    writeln!(out, "Deliver to: {}, {}", order.delivery_address, order.delivery_phone)?;

    if let Some(instructions) = &order.special_instructions {
        writeln!(out, "Instructions: {instructions}")?;
    }

    if let Some(estimate) = order.estimated_delivery_time {
        writeln!(out, "Estimated delivery: {}", timestamp(estimate))?;
    }

    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Unit", "Price", "Notes"]);

    for line in &order.items {
        builder.push_record([
            line.name
                .clone()
                .unwrap_or_else(|| format!("#{}", line.menu_item)),
            line.quantity.to_string(),
            line.unit_price
                .map(|price| koruna(price).to_string())
                .unwrap_or_default(),
            koruna(line.price).to_string(),
            line.special_instructions.clone().unwrap_or_default(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..4), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, "Total: {}", koruna(order.total_amount))
}

/// Write a one-line status summary.
pub(crate) fn write_status(out: &mut impl io::Write, order: &Order) -> io::Result<()> {
    writeln!(
        out,
        "{} order {}: {}",
        timestamp(order.updated_at),
        order.id,
        order.status.display_name()
    )
}

/// Write restaurant statistics.
pub(crate) fn write_statistics(
    out: &mut impl io::Write,
    statistics: &OrderStatistics,
) -> io::Result<()> {
    writeln!(out, "Orders: {}", statistics.total_orders)?;
    writeln!(out, "Revenue: {}", koruna(statistics.total_revenue))?;
    writeln!(
        out,
        "Average order: {}",
        koruna(statistics.average_order_value)
    )?;

    let mut by_status: Vec<_> = statistics.orders_by_status.iter().collect();

    by_status.sort_by(|(left, _), (right, _)| left.as_str().cmp(right.as_str()));

    let mut builder = Builder::default();

    builder.push_record(["Status", "Orders"]);

    for (status, count) in by_status {
        builder.push_record([status.display_name().to_string(), count.to_string()]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());

    writeln!(out, "{table}")?;

    if statistics.revenue_by_day.is_empty() {
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Date", "Orders", "Revenue"]);

    for day in &statistics.revenue_by_day {
        builder.push_record([
            day.date.to_string(),
            day.orders.to_string(),
            koruna(day.revenue).to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..3), Alignment::right());

    writeln!(out, "{table}")
}

#[cfg(test)]
mod tests {
    use foxi::{
        ids::{CustomerId, MenuItemId, RestaurantId},
        orders::{DailyRevenue, OrderId, OrderLine, OrderStatus},
    };
    use jiff::civil::date;
    use rust_decimal::Decimal;
    use rustc_hash::FxHashMap;
    use testresult::TestResult;

    use super::*;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(12),
            restaurant: RestaurantId::new(3),
            restaurant_name: Some("U Fleků".to_string()),
            customer: CustomerId::new(8),
            items: vec![OrderLine {
                menu_item: MenuItemId::new(21),
                name: Some("Řízek".to_string()),
                quantity: 2,
                unit_price: Some(Decimal::new(890, 2)),
                price: Decimal::new(1780, 2),
                special_instructions: Some("bez citronu".to_string()),
            }],
            status,
            total_amount: Decimal::new(1780, 2),
            delivery_address: "Národní 1, Praha".to_string(),
            delivery_phone: "777000111".to_string(),
            special_instructions: None,
            estimated_delivery_time: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn empty_listing_says_so() -> TestResult {
        let mut out = Vec::new();

        write_orders(&mut out, &[])?;

        assert_eq!(String::from_utf8(out)?, "no orders found\n");

        Ok(())
    }

    #[test]
    fn listing_uses_localized_status() -> TestResult {
        let mut out = Vec::new();

        write_orders(&mut out, &[order(OrderStatus::OutForDelivery)])?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("U Fleků"), "missing restaurant: {text}");
        assert!(text.contains("Na cestě"), "missing status label: {text}");

        Ok(())
    }

    #[test]
    fn unknown_status_is_shown_verbatim() -> TestResult {
        let mut out = Vec::new();

        write_status(&mut out, &order(OrderStatus::Other("refunded".to_string())))?;

        assert_eq!(
            String::from_utf8(out)?,
            "1970-01-01 00:00 order 12: refunded\n"
        );

        Ok(())
    }

    #[test]
    fn order_detail_lists_lines() -> TestResult {
        let mut out = Vec::new();

        write_order(&mut out, &order(OrderStatus::Preparing))?;

        let text = String::from_utf8(out)?;

        assert!(text.starts_with("Order 12: Připravuje se\n"), "{text}");
        assert!(text.contains("Řízek"), "missing line name: {text}");
        assert!(text.contains("bez citronu"), "missing line notes: {text}");

        Ok(())
    }

    #[test]
    fn statistics_render_each_day() -> TestResult {
        let mut orders_by_status = FxHashMap::default();

        orders_by_status.insert(OrderStatus::Delivered, 3);
        orders_by_status.insert(OrderStatus::Cancelled, 1);

        let statistics = OrderStatistics {
            total_orders: 4,
            total_revenue: Decimal::new(125_050, 2),
            average_order_value: Decimal::new(31_263, 2),
            orders_by_status,
            revenue_by_day: vec![DailyRevenue {
                date: date(2024, 5, 1),
                revenue: Decimal::new(125_050, 2),
                orders: 4,
            }],
        };

        let mut out = Vec::new();

        write_statistics(&mut out, &statistics)?;

        let text = String::from_utf8(out)?;

        assert!(text.starts_with("Orders: 4\n"), "{text}");
        assert!(text.contains("Doručeno"), "missing status label: {text}");
        assert!(text.contains("2024-05-01"), "missing day: {text}");

        Ok(())
    }
}
