//! Jitbit connectivity check.
//!
//! Verifies the configured credentials against a Jitbit Helpdesk instance
//! and prints the helpdesk statistics as JSON.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `JITBIT_URL`: Base URL of the helpdesk
//! - `JITBIT_USERNAME`: Account username
//! - `JITBIT_PASSWORD`: Account password
//!
//! # Usage
//!
//! ```bash
//! JITBIT_URL=https://support.example.com JITBIT_USERNAME=admin JITBIT_PASSWORD=xxx ./jitbit
//! ```

use anyhow::{bail, Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use jitbit::{Config, JitbitClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the JSON output
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jitbit=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(base_url = %config.base_url, "Configuration loaded");

    let client = JitbitClient::new(&config)
        .await
        .context("Failed to connect to Jitbit")?;
    tracing::info!("Credentials accepted by {}", client.base_url());

    let Some(stats) = client.get_stats().await else {
        bail!("Jitbit did not return statistics");
    };

    let pretty = serde_json::to_string_pretty(&stats).context("Failed to format statistics")?;
    println!("{}", pretty);

    Ok(())
}
