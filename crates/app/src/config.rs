//! API Config

use clap::Args;

/// Ordering backend connection settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Base URL of the REST API
    #[arg(long, env = "FOXI_API_URL", default_value = "http://localhost:8000/api")]
    pub api_url: String,

    /// Bearer token sent with every request
    #[arg(long, env = "FOXI_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "FOXI_API_TIMEOUT_SECONDS", default_value_t = 15u64)]
    pub api_timeout_seconds: u64,
}
