//! ward-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket relay endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use ward_gateway::api;
use ward_gateway::app_state::AppState;
use ward_gateway::config::WardConfig;
use ward_gateway::domain::ChannelBus;
use ward_gateway::persistence::WardStore;
use ward_gateway::service::WardService;
use ward_gateway::ws::handler::relay_handler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = WardConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting ward-gateway");

    // Connect to PostgreSQL and apply migrations
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Build domain and service layers
    let bus = ChannelBus::new(config.channel_queue_capacity);
    let ward_service = Arc::new(WardService::new(WardStore::new(pool), bus.clone()));

    // Build application state
    let app_state = AppState { ward_service, bus };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws/{channel_id}", get(relay_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
