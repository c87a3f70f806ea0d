use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use soap_server::config::{Args, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::try_from(Args::parse())?;
    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!(
        addr = %config.listen_addr,
        target_url = %config.target_url,
        "soap-server listening"
    );
    soap_server::run(listener, config).await?;
    Ok(())
}
