#![allow(non_snake_case)]

use anyhow::Result;
use slotFinder::cli;
use slotFinder::config::AppConfig;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "slotFinder=info";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load().map_err(anyhow::Error::msg)?;
    cli::run(config).await
}
