//! CLI configuration module

use clap::Parser;
use foxi_app::config::ApiConfig;

use crate::{commands::Command, config::logging::LoggingConfig};

pub(crate) mod logging;

pub(crate) use logging::LogFormat;

/// Foxi ordering client configuration
#[derive(Debug, Parser)]
#[command(name = "foxi", about = "Foxi ordering client", long_about = None)]
pub(crate) struct CliConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Ordering API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    pub(crate) fn load() -> Self {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::parse()
    }
}
