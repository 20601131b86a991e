use std::io;

use clap::Args;
use foxi::orders::OrderId;
use foxi_app::session::{OrderError, OrderSession};

use crate::{commands::CommandError, render};

#[derive(Debug, Args)]
pub(crate) struct ShowOrderArgs {
    /// Order id
    id: OrderId,
}

pub(crate) async fn run(
    args: ShowOrderArgs,
    session: &OrderSession,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    session.fetch_order_by_id(args.id).await?;

    let order = session.current_order().ok_or(OrderError::NotFound)?;

    render::write_order(out, &order)?;

    Ok(())
}
