use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use portfolio_server::{config::Config, start_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG se presente, altrimenti info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::from_env().context("load configuration")?;
    start_server(config).await
}
