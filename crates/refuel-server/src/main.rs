//! Refuel server - fuel-cost-optimized route planning over HTTP.

use anyhow::Result;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use refuel_providers::{NominatimClient, OrsClient};
use refuel_server::config::Config;
use refuel_server::persistence::{self, SqliteCatalog};
use refuel_server::render::HtmlMapRenderer;
use refuel_server::state::AppState;
use refuel_server::api;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("refuel_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting refuel server...");

    let config = Config::from_env();
    if config.ors_api_key.is_empty() {
        anyhow::bail!(
            "OpenRouteService API key not found. Set the ORS_API_KEY environment variable."
        );
    }

    let database =
        persistence::init_database(&config.database_path, config.database_max_connections).await?;
    let station_count = persistence::count_stations(database.pool()).await?;
    tracing::info!("Station catalog holds {} stations", station_count);
    if station_count == 0 {
        tracing::warn!("Station catalog is empty; run import-prices first");
    }

    std::fs::create_dir_all(&config.static_dir)?;

    let state = Arc::new(AppState {
        geocoder: Arc::new(NominatimClient::new(
            &config.nominatim_url,
            &config.geocoder_user_agent,
        )?),
        directions: Arc::new(OrsClient::new(&config.ors_base_url, &config.ors_api_key)?),
        catalog: Arc::new(SqliteCatalog::new(&database)),
        renderer: Arc::new(HtmlMapRenderer::new(&config.static_dir)),
    });

    // Build the app
    let app = api::routes()
        .route("/health", get(|| async { "OK" }))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .with_state(state)
        .layer(CorsLayer::permissive());

    // Run server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
