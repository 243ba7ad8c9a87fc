//! geotrack Service Library
//!
//! HTTP handlers, routing and configuration for the driver location service.
//! This library is used by both the geotrack-service binary and integration tests.

pub mod config;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use geotrack::{DriverRegistry, LocationRegistry};
use tokio::sync::RwLock;
use utoipa::OpenApi;

pub use config::ServiceConfig;

/// Application state shared across handlers.
pub struct AppState {
    /// Registered drivers.
    pub drivers: RwLock<DriverRegistry>,
    /// Location tracks, keyed by driver id.
    pub locations: RwLock<LocationRegistry>,
    /// Runtime settings.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create empty registries with the given settings.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            drivers: RwLock::new(DriverRegistry::new()),
            locations: RwLock::new(LocationRegistry::new()),
            config,
        }
    }
}

/// OpenAPI documentation for the geotrack service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "geotrack Location Service",
        version = "0.1.0",
        description = "In-memory driver location tracking with geohash encoding.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    paths(
        handlers::create_driver,
        handlers::list_drivers,
        handlers::get_driver,
        handlers::create_location,
        handlers::list_locations,
        handlers::current_location,
        handlers::get_location,
        handlers::update_location,
        handlers::delete_location,
        handlers::delete_location_by_post,
        handlers::get_track,
        handlers::encode_geohash,
        handlers::decode_geohash,
        handlers::health_check,
    ),
    components(
        schemas(
            handlers::DriverResponse,
            handlers::LocationInput,
            handlers::LocationResponse,
            handlers::TrackShape,
            handlers::EncodeResponse,
            handlers::DecodeResponse,
            handlers::ErrorResponse,
            handlers::HealthResponse,
        )
    ),
    tags(
        (name = "drivers", description = "Driver registration"),
        (name = "locations", description = "Per-driver location tracks"),
        (name = "geohash", description = "Geohash encoding and decoding"),
        (name = "system", description = "System and health endpoints")
    )
)]
pub struct ApiDoc;

/// Build the router with all routes. Middleware layers are added by the caller.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/drivers",
            get(handlers::list_drivers).post(handlers::create_driver),
        )
        .route("/drivers/:id", get(handlers::get_driver))
        .route("/drivers/:id/track", get(handlers::get_track))
        .route(
            "/drivers/:id/locations",
            get(handlers::list_locations).post(handlers::create_location),
        )
        .route(
            "/drivers/:id/locations/current",
            get(handlers::current_location),
        )
        .route(
            "/drivers/:id/locations/:location_id",
            get(handlers::get_location)
                .put(handlers::update_location)
                .delete(handlers::delete_location),
        )
        .route(
            "/drivers/:id/locations/:location_id/delete",
            post(handlers::delete_location_by_post),
        )
        .route("/geohash/encode", get(handlers::encode_geohash))
        .route("/geohash/decode/:geohash", get(handlers::decode_geohash))
        .route("/health", get(handlers::health_check))
        .route("/api-docs/openapi.json", get(handlers::openapi_json))
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use handlers::{
    DecodeResponse, DriverResponse, EncodeResponse, ErrorResponse, HealthResponse, LocationInput,
    LocationResponse, TrackQuery, TrackShape,
};
