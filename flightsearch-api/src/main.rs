use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use flightsearch_api::{app, AppState};
use flightsearch_provider::{app_config::Config, build_http_client, AmadeusClient, TokenManager};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "flightsearch_api=debug,flightsearch_provider=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting flight search API on port {}", config.server.port);
    tracing::info!("Using flight data provider at {}", config.amadeus.base_url);

    let http = build_http_client(&config.amadeus).context("Failed to build HTTP client")?;
    let tokens = Arc::new(TokenManager::from_config(&config.amadeus, http.clone()));
    let provider = Arc::new(AmadeusClient::new(http, &config.amadeus.base_url, tokens.clone()));

    let app_state = AppState {
        tokens,
        provider,
        allowed_origin: config.server.allowed_origin.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}
