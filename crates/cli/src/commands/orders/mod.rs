use std::io;

use clap::{Args, Subcommand};
use foxi::orders::OrderStatus;
use foxi_app::context::AppContext;

use crate::commands::CommandError;

mod list;
mod show;
mod stats;
mod status;
mod watch;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders visible to the caller
    List(list::ListOrdersArgs),

    /// List the caller's own orders
    Mine,

    /// List a restaurant's orders
    Restaurant(list::RestaurantOrdersArgs),

    /// Show a single order
    Show(show::ShowOrderArgs),

    /// Change an order's status
    Status(status::UpdateStatusArgs),

    /// Cancel an order
    Cancel(status::CancelOrderArgs),

    /// Show restaurant statistics
    Stats(stats::StatsArgs),

    /// Follow an order's status until it is delivered or cancelled
    Watch(watch::WatchOrderArgs),
}

pub(crate) async fn run(
    command: OrdersCommand,
    context: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    let session = context.session();

    match command.command {
        OrdersSubcommand::List(args) => list::run(args, &session, out).await,
        OrdersSubcommand::Mine => list::run_mine(&session, out).await,
        OrdersSubcommand::Restaurant(args) => list::run_restaurant(args, &session, out).await,
        OrdersSubcommand::Show(args) => show::run(args, &session, out).await,
        OrdersSubcommand::Status(args) => status::run(args, &session, out).await,
        OrdersSubcommand::Cancel(args) => status::run_cancel(args, &session, out).await,
        OrdersSubcommand::Stats(args) => stats::run(args, &session, out).await,
        OrdersSubcommand::Watch(args) => watch::run(args, &session, out).await,
    }
}

/// Accept only the statuses the platform defines.
fn parse_status(code: &str) -> Result<OrderStatus, String> {
    OrderStatus::parse_known(code).ok_or_else(|| {
        let known = OrderStatus::KNOWN.map(|status| status.as_str().to_string());

        format!("unknown status `{code}`, expected one of: {}", known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_status() {
        assert_eq!(parse_status("ready"), Ok(OrderStatus::Ready));
    }

    #[test]
    fn rejects_unknown_status() {
        let result = parse_status("refunded");

        assert!(
            result.as_ref().is_err_and(|message| message.contains("out_for_delivery")),
            "expected error listing known statuses, got {result:?}"
        );
    }
}
