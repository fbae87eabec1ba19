mod config;
mod handler;
mod service;

use axum::{routing::get, Router};
use config::ApiConfig;
use connectors::kucoin::{KucoinConfig, KucoinConnector};
use service::CandleService;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting KuCoin candle API");

    // Load configuration from environment
    let api_config = ApiConfig::from_env()
        .map_err(|e| format!("Failed to load API configuration: {}", e))?;
    let kucoin_config = KucoinConfig::from_env()
        .map_err(|e| format!("Failed to load KuCoin configuration: {}", e))?;

    info!(
        "Using KuCoin endpoint {} ({})",
        kucoin_config.base_url,
        if kucoin_config.credentials.is_some() {
            "credentials configured"
        } else {
            "public access"
        }
    );

    let kucoin = Arc::new(KucoinConnector::new(kucoin_config));
    let service = Arc::new(CandleService::new(kucoin.clone(), kucoin, &api_config));

    // Create CORS middleware
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/v1/candles/:pair", get(handler::get_candles))
        .route("/api/v1/account", get(handler::get_account))
        .route("/api/v1/positions/:pair", get(handler::get_position))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service);

    info!("Listening on {}", api_config.addr);

    axum::Server::bind(&api_config.addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
