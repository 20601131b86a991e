//! Foxi ordering client CLI

use std::{error::Error, io, process};

use foxi_app::context::AppContext;
use tracing::debug;

use crate::{commands::CommandError, config::CliConfig};

mod cart_file;
mod commands;
mod config;
mod observability;
mod render;
mod shutdown;

#[tokio::main]
async fn main() {
    let config = CliConfig::load();

    if let Err(error) = observability::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("Logging setup error: {error}");
        }

        process::exit(1);
    }

    let context = match AppContext::from_config(&config.api) {
        Ok(context) => context,
        Err(error) => {
            report(&error);
            process::exit(1);
        }
    };

    debug!(api_url = %config.api.api_url, "starting");

    if let Err(error) = run(config, &context).await {
        report(&error);
        process::exit(1);
    }
}

async fn run(config: CliConfig, context: &AppContext) -> Result<(), CommandError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    config.command.run(context, &mut out).await
}

/// Print an error and its sources.
fn report(error: &dyn Error) {
    #[expect(
        clippy::print_stderr,
        reason = "command failures are reported to the terminal, not the log"
    )]
    {
        eprintln!("error: {error}");

        let mut source = error.source();

        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
    }
}
