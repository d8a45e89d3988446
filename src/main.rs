use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod anthropic;
mod companion;
mod config;
mod prompts;

use companion::AppState;
use config::CompanionConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // -----------------------------
    // Logging
    // -----------------------------
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // -----------------------------
    // Configuration / shared state
    // -----------------------------
    let config = CompanionConfig::from_env();
    if config.api_key.is_none() {
        warn!("ANTHROPIC_API_KEY is not set; every request gets the canned message");
    }
    let state = AppState::from_config(&config)?;

    let app = Router::new().merge(companion::router()).with_state(state);

    info!(
        addr = %config.bind_addr,
        upstream = %config.base_url,
        timeout_secs = config.upstream_timeout.as_secs(),
        "study companion listening"
    );

    let listener = TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
