use std::io;

use clap::Args;
use foxi::orders::{OrderId, OrderStatus, StatusUpdate};
use foxi_app::session::OrderSession;
use jiff::Timestamp;

use crate::{
    commands::{CommandError, orders::parse_status},
    render,
};

#[derive(Debug, Args)]
pub(crate) struct UpdateStatusArgs {
    /// Order id
    id: OrderId,

    /// New status
    #[arg(value_parser = parse_status)]
    status: OrderStatus,

    /// Estimated delivery time (RFC 3339)
    #[arg(long)]
    eta: Option<Timestamp>,
}

#[derive(Debug, Args)]
pub(crate) struct CancelOrderArgs {
    /// Order id
    id: OrderId,

    /// Reason passed on to the restaurant
    #[arg(long)]
    reason: Option<String>,
}

pub(crate) async fn run(
    args: UpdateStatusArgs,
    session: &OrderSession,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    let update = StatusUpdate {
        status: args.status,
        estimated_delivery_time: args.eta,
    };

    let order = session.update_order_status(args.id, update).await?;

    render::write_status(out, &order)?;

    Ok(())
}

pub(crate) async fn run_cancel(
    args: CancelOrderArgs,
    session: &OrderSession,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    let order = session.cancel_order(args.id, args.reason).await?;

    render::write_status(out, &order)?;

    Ok(())
}
