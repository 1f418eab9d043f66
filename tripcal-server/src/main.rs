mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tripcal_core::config::TripcalConfig;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = TripcalConfig::load()?;
    let state = AppState::new(&config)?;

    let addr: SocketAddr = config
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen))?;

    info!(
        provider = state.planner().provider().provider_name(),
        model = state.planner().provider().model_name(),
        "tripcal-server listening on http://{}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, routes::router(state)).await?;

    Ok(())
}
