//! geotrack Service - HTTP microservice for driver location tracking.
//!
//! Keeps drivers and their recorded locations in memory and exposes each
//! location's 12-symbol geohash.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `GEOTRACK_PORT` | HTTP server port | 8080 |
//! | `GEOTRACK_STRICT_COORDINATES` | Reject coordinates outside ±90° / ±180° | false |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `POST /drivers?firstName=X&lastName=Y` - Register a driver
//! - `GET /drivers`, `GET /drivers/{id}` - Look up drivers
//! - `POST|GET /drivers/{id}/locations` - Record / list locations
//! - `GET /drivers/{id}/locations/current` - Latest location
//! - `GET|PUT|DELETE /drivers/{id}/locations/{locationId}` - Single location
//! - `POST /drivers/{id}/locations/{locationId}/delete` - Delete via POST
//! - `GET /drivers/{id}/track` - Track as GeoJSON (`?as=linestring` for a LineString)
//! - `GET /geohash/encode?lat=X&lon=Y`, `GET /geohash/decode/{hash}` - Codec
//! - `GET /health` - Health check
//! - `GET /api-docs/openapi.json` - OpenAPI document

use std::net::SocketAddr;
use std::sync::Arc;

use geotrack_service::{router, AppState, ServiceConfig};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geotrack_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env();
    let port = config.port;

    tracing::info!(
        port = port,
        strict_coordinates = config.strict_coordinates,
        "Starting geotrack service"
    );

    let state = Arc::new(AppState::new(config));

    let app = router(state).layer(
        ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        ),
    );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
