use std::io;

use clap::Args;
use foxi::{ids::RestaurantId, orders::OrderStatus};
use foxi_app::{
    api::{OrderFilter, RestaurantOrdersFilter},
    session::OrderSession,
};
use jiff::civil::Date;

use crate::{
    commands::{CommandError, orders::parse_status},
    render,
};

#[derive(Debug, Args)]
pub(crate) struct ListOrdersArgs {
    /// Only orders in this status
    #[arg(long, value_parser = parse_status)]
    status: Option<OrderStatus>,

    /// Only orders for this restaurant
    #[arg(long)]
    restaurant: Option<RestaurantId>,

    /// Page number
    #[arg(long)]
    page: Option<u32>,

    /// Page size
    #[arg(long)]
    limit: Option<u32>,
}

#[derive(Debug, Args)]
pub(crate) struct RestaurantOrdersArgs {
    /// Restaurant id
    restaurant: RestaurantId,

    /// Only orders in this status
    #[arg(long, value_parser = parse_status)]
    status: Option<OrderStatus>,

    /// Page number
    #[arg(long)]
    page: Option<u32>,

    /// Earliest order date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<Date>,

    /// Latest order date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<Date>,
}

pub(crate) async fn run(
    args: ListOrdersArgs,
    session: &OrderSession,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    let filter = OrderFilter {
        status: args.status,
        restaurant: args.restaurant,
        page: args.page,
        limit: args.limit,
    };

    session.fetch_orders(&filter).await?;

    render::write_orders(out, &session.orders())?;

    Ok(())
}

pub(crate) async fn run_mine(
    session: &OrderSession,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    session.fetch_my_orders().await?;

    render::write_orders(out, &session.my_orders())?;

    Ok(())
}

pub(crate) async fn run_restaurant(
    args: RestaurantOrdersArgs,
    session: &OrderSession,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    let filter = RestaurantOrdersFilter {
        status: args.status,
        page: args.page,
        date_from: args.from,
        date_to: args.to,
    };

    session
        .fetch_restaurant_orders(args.restaurant, &filter)
        .await?;

    render::write_orders(out, &session.orders())?;

    Ok(())
}
