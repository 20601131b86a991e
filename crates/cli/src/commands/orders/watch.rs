use std::{io, time::Duration};

use clap::Args;
use foxi::orders::OrderId;
use foxi_app::session::{DEFAULT_POLL_INTERVAL, OrderError, OrderSession};
use tracing::info;

use crate::{commands::CommandError, render, shutdown};

#[derive(Debug, Args)]
pub(crate) struct WatchOrderArgs {
    /// Order id
    id: OrderId,

    /// Seconds between polls
    #[arg(
        long,
        env = "FOXI_POLL_INTERVAL_SECONDS",
        default_value_t = DEFAULT_POLL_INTERVAL.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    interval_seconds: u64,
}

pub(crate) async fn run(
    args: WatchOrderArgs,
    session: &OrderSession,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    session.fetch_order_by_id(args.id).await?;

    let order = session.current_order().ok_or(OrderError::NotFound)?;

    render::write_status(out, &order)?;

    if order.status.is_terminal() {
        return Ok(());
    }

    let mut last_status = order.status;
    let mut watch = session.watch_order(args.id, Duration::from_secs(args.interval_seconds));

    let shutdown = shutdown::signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                result?;
                break;
            }
            changed = watch.changed() => {
                let Some(order) = changed else {
                    break;
                };

                if order.status == last_status {
                    continue;
                }

                render::write_status(out, &order)?;
                out.flush()?;

                if order.status.is_terminal() {
                    info!(order_id = %args.id, status = %order.status, "order finished");
                    break;
                }

                last_status = order.status;
            }
        }
    }

    watch.cancel();

    Ok(())
}
