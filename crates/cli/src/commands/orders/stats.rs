use std::io;

use clap::Args;
use foxi::ids::RestaurantId;
use foxi_app::session::{DEFAULT_STATISTICS_PERIOD, OrderSession};

use crate::{commands::CommandError, render};

#[derive(Debug, Args)]
pub(crate) struct StatsArgs {
    /// Restaurant id
    restaurant: RestaurantId,

    /// Reporting period, e.g. 7d or 30d
    #[arg(long, default_value = DEFAULT_STATISTICS_PERIOD)]
    period: String,
}

pub(crate) async fn run(
    args: StatsArgs,
    session: &OrderSession,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    session
        .fetch_order_statistics(args.restaurant, Some(&args.period))
        .await?;

    if let Some(statistics) = session.statistics() {
        render::write_statistics(out, &statistics)?;
    }

    Ok(())
}
