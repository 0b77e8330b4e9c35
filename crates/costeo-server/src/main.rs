mod config;
mod wiring;

use std::error::Error;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "costeo_server=debug,api=debug,costeo=info,info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = config::Config::from_env()?;
    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!(
        addr = %config.listen_addr,
        max_quantity = config.max_quantity,
        volume_margin_pct = config.volume_margin_pct,
        "costeo server listening"
    );

    axum::serve(listener, wiring::build_app(config.engine_limits())).await?;
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
