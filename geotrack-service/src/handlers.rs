//! HTTP request handlers for the location service.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use geotrack::{geohash, Coordinate, Driver, Location, TrackError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::{ApiDoc, AppState};

/// Query parameters for registering a driver.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CreateDriverParams {
    /// Driver's first name.
    pub first_name: String,
    /// Driver's last name.
    pub last_name: String,
}

/// A registered driver.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverResponse {
    /// Driver id, assigned sequentially from 1.
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
}

impl From<&Driver> for DriverResponse {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id,
            first_name: driver.first_name.clone(),
            last_name: driver.last_name.clone(),
        }
    }
}

/// Coordinates of a location to record or update.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LocationInput {
    /// Latitude in decimal degrees (-90 to 90).
    pub latitude: f64,
    /// Longitude in decimal degrees (-180 to 180).
    pub longitude: f64,
}

impl LocationInput {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A recorded location.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    /// Location id, sequential per driver.
    pub id: u64,
    pub latitude: f64,
    pub longitude: f64,
    /// When the location was first recorded.
    pub timestamp: DateTime<Utc>,
    /// 12-symbol geohash of the current coordinates.
    pub geo_hash: String,
}

impl From<&Location> for LocationResponse {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id(),
            latitude: location.latitude(),
            longitude: location.longitude(),
            timestamp: location.timestamp(),
            geo_hash: location.geo_hash(),
        }
    }
}

/// Query parameters for geohash encoding.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EncodeQuery {
    /// Latitude in decimal degrees (-90 to 90).
    pub lat: f64,
    /// Longitude in decimal degrees (-180 to 180).
    pub lon: f64,
}

/// GeoJSON shape of an exported track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrackShape {
    /// FeatureCollection with one Point per location.
    #[default]
    Features,
    /// A single LineString through all locations.
    Linestring,
}

/// Query parameters for track export.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrackQuery {
    /// `features` (default) or `linestring`.
    #[serde(rename = "as", default)]
    pub shape: TrackShape,
}

/// Geohash of a coordinate.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EncodeResponse {
    pub lat: f64,
    pub lon: f64,
    pub geo_hash: String,
}

/// Center and error margins of a geohash.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecodeResponse {
    pub geo_hash: String,
    /// Latitude of the box center.
    pub lat: f64,
    /// Longitude of the box center.
    pub lon: f64,
    /// Half the box height in degrees.
    pub lat_error: f64,
    /// Half the box width in degrees.
    pub lon_error: f64,
}

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Create an error response for a failed registry or codec call.
fn error_response(e: TrackError) -> Response {
    // lookup misses are reported as 400 like codec errors, not 404
    tracing::warn!(error = %e, "Request failed");

    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

fn bad_request(message: String) -> Response {
    tracing::warn!(error = %message, "Bad request");
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
}

/// Parse an optional JSON location body.
///
/// Returns `Ok(None)` for an empty (or whitespace-only) body. The
/// `Content-Type` header is not checked.
fn parse_location_body(body: &Bytes) -> Result<Option<LocationInput>, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<LocationInput>(body)
        .map(Some)
        .map_err(|e| bad_request(format!("Invalid location body: {}", e)))
}

/// Apply the strict-coordinates setting.
fn check_coordinate(state: &AppState, coord: &Coordinate) -> Result<(), Response> {
    if state.config.strict_coordinates {
        coord.validate().map_err(error_response)
    } else {
        Ok(())
    }
}

/// Register a new driver.
#[utoipa::path(
    post,
    path = "/drivers",
    tag = "drivers",
    params(CreateDriverParams),
    responses(
        (status = 201, description = "Driver registered", body = DriverResponse),
        (status = 400, description = "Missing firstName or lastName", body = ErrorResponse),
    )
)]
pub async fn create_driver(
    State(state): State<Arc<AppState>>,
    params: Result<Query<CreateDriverParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let driver = state
        .drivers
        .write()
        .await
        .create(params.first_name, params.last_name);

    tracing::info!(driver_id = driver.id, "Driver registered");

    (StatusCode::CREATED, Json(DriverResponse::from(&driver))).into_response()
}

/// List all registered drivers.
#[utoipa::path(
    get,
    path = "/drivers",
    tag = "drivers",
    responses((status = 200, description = "All drivers in id order", body = Vec<DriverResponse>))
)]
pub async fn list_drivers(State(state): State<Arc<AppState>>) -> Json<Vec<DriverResponse>> {
    let drivers = state.drivers.read().await;
    Json(drivers.all().iter().map(DriverResponse::from).collect())
}

/// Get a driver by id.
#[utoipa::path(
    get,
    path = "/drivers/{id}",
    tag = "drivers",
    params(("id" = u64, Path, description = "Driver id")),
    responses(
        (status = 200, description = "Driver found", body = DriverResponse),
        (status = 400, description = "Unknown driver", body = ErrorResponse),
    )
)]
pub async fn get_driver(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Response {
    tracing::debug!(driver_id = id, "Driver lookup");

    match state.drivers.read().await.get(id) {
        Some(driver) => (StatusCode::OK, Json(DriverResponse::from(driver))).into_response(),
        None => error_response(TrackError::DriverNotFound { driver_id: id }),
    }
}

/// Record a location for a driver.
///
/// The body is optional. Without one, the location gets random whole-degree
/// coordinates in `[0, 90)`.
#[utoipa::path(
    post,
    path = "/drivers/{id}/locations",
    tag = "locations",
    params(("id" = u64, Path, description = "Driver id")),
    request_body(content = LocationInput, description = "Coordinates; omit for a random placeholder"),
    responses(
        (status = 201, description = "Location recorded", body = LocationResponse),
        (status = 400, description = "Malformed body or coordinates out of range", body = ErrorResponse),
    )
)]
#[axum::debug_handler]
pub async fn create_location(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<u64>,
    body: Bytes,
) -> Response {
    let coord = match parse_location_body(&body) {
        Ok(Some(input)) => input.coordinate(),
        Ok(None) => Coordinate::new(
            (rand::random::<u32>() % 90) as f64,
            (rand::random::<u32>() % 90) as f64,
        ),
        Err(response) => return response,
    };

    if let Err(response) = check_coordinate(&state, &coord) {
        return response;
    }

    let mut locations = state.locations.write().await;
    let stored = locations.record(driver_id, Location::new(coord.latitude, coord.longitude));

    tracing::info!(
        driver_id = driver_id,
        location_id = stored.id(),
        lat = coord.latitude,
        lon = coord.longitude,
        "Location recorded"
    );

    (StatusCode::CREATED, Json(LocationResponse::from(stored))).into_response()
}

/// List all locations of a driver.
#[utoipa::path(
    get,
    path = "/drivers/{id}/locations",
    tag = "locations",
    params(("id" = u64, Path, description = "Driver id")),
    responses(
        (status = 200, description = "Locations in recording order", body = Vec<LocationResponse>),
        (status = 400, description = "No locations were ever recorded for the driver", body = Vec<LocationResponse>),
    )
)]
pub async fn list_locations(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<u64>,
) -> Response {
    let locations = state.locations.read().await;
    match locations.track(driver_id) {
        Ok(track) => {
            let body: Vec<LocationResponse> =
                track.all().iter().map(LocationResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Location listing failed");
            (StatusCode::BAD_REQUEST, Json(Vec::<LocationResponse>::new())).into_response()
        }
    }
}

/// Get the latest location of a driver.
#[utoipa::path(
    get,
    path = "/drivers/{id}/locations/current",
    tag = "locations",
    params(("id" = u64, Path, description = "Driver id")),
    responses(
        (status = 200, description = "Most recent remaining location", body = LocationResponse),
        (status = 400, description = "Unknown driver or empty track", body = ErrorResponse),
    )
)]
pub async fn current_location(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<u64>,
) -> Response {
    let locations = state.locations.read().await;
    let track = match locations.track(driver_id) {
        Ok(track) => track,
        Err(e) => return error_response(e),
    };

    match track.last() {
        Some(location) => (StatusCode::OK, Json(LocationResponse::from(location))).into_response(),
        None => bad_request(format!("Driver {} has no locations", driver_id)),
    }
}

/// Get one location of a driver.
#[utoipa::path(
    get,
    path = "/drivers/{id}/locations/{location_id}",
    tag = "locations",
    params(
        ("id" = u64, Path, description = "Driver id"),
        ("location_id" = u64, Path, description = "Location id"),
    ),
    responses(
        (status = 200, description = "Location found", body = LocationResponse),
        (status = 400, description = "Unknown driver or location", body = ErrorResponse),
    )
)]
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Path((driver_id, location_id)): Path<(u64, u64)>,
) -> Response {
    let locations = state.locations.read().await;
    let result = locations.track(driver_id).and_then(|track| {
        track.get(location_id).ok_or(TrackError::LocationNotFound {
            driver_id,
            location_id,
        })
    });

    match result {
        Ok(location) => (StatusCode::OK, Json(LocationResponse::from(location))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Move an existing location.
///
/// The id and timestamp are kept; the geohash follows the new coordinates.
#[utoipa::path(
    put,
    path = "/drivers/{id}/locations/{location_id}",
    tag = "locations",
    params(
        ("id" = u64, Path, description = "Driver id"),
        ("location_id" = u64, Path, description = "Location id"),
    ),
    request_body = LocationInput,
    responses(
        (status = 200, description = "Location updated", body = LocationResponse),
        (status = 400, description = "Missing or malformed body, coordinates out of range, or unknown driver or location", body = ErrorResponse),
    )
)]
pub async fn update_location(
    State(state): State<Arc<AppState>>,
    Path((driver_id, location_id)): Path<(u64, u64)>,
    body: Bytes,
) -> Response {
    let coord = match parse_location_body(&body) {
        Ok(Some(input)) => input.coordinate(),
        Ok(None) => return bad_request("Location body required".to_string()),
        Err(response) => return response,
    };
    if let Err(response) = check_coordinate(&state, &coord) {
        return response;
    }

    let mut locations = state.locations.write().await;
    let result = locations
        .track_mut(driver_id)
        .and_then(|track| track.update(location_id, coord));

    match result {
        Ok(location) => {
            tracing::info!(driver_id, location_id, "Location updated");
            (StatusCode::OK, Json(LocationResponse::from(location))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Delete a location.
#[utoipa::path(
    delete,
    path = "/drivers/{id}/locations/{location_id}",
    tag = "locations",
    params(
        ("id" = u64, Path, description = "Driver id"),
        ("location_id" = u64, Path, description = "Location id"),
    ),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 400, description = "Unknown driver or location", body = ErrorResponse),
    )
)]
pub async fn delete_location(
    State(state): State<Arc<AppState>>,
    Path((driver_id, location_id)): Path<(u64, u64)>,
) -> Response {
    let mut locations = state.locations.write().await;
    let result = locations
        .track_mut(driver_id)
        .and_then(|track| track.delete(location_id));

    match result {
        Ok(_) => {
            tracing::info!(driver_id, location_id, "Location deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Delete a location through POST, for clients that cannot send DELETE.
#[utoipa::path(
    post,
    path = "/drivers/{id}/locations/{location_id}/delete",
    tag = "locations",
    params(
        ("id" = u64, Path, description = "Driver id"),
        ("location_id" = u64, Path, description = "Location id"),
    ),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 400, description = "Unknown driver or location", body = ErrorResponse),
    )
)]
pub async fn delete_location_by_post(
    state: State<Arc<AppState>>,
    path: Path<(u64, u64)>,
) -> Response {
    delete_location(state, path).await
}

/// Export a driver's track as GeoJSON.
///
/// By default one Point feature per location; `?as=linestring` joins the
/// locations into a single LineString geometry.
#[utoipa::path(
    get,
    path = "/drivers/{id}/track",
    tag = "locations",
    params(("id" = u64, Path, description = "Driver id"), TrackQuery),
    responses(
        (status = 200, description = "GeoJSON FeatureCollection or LineString of the track"),
        (status = 400, description = "Unknown driver or shape", body = ErrorResponse),
    )
)]
pub async fn get_track(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<u64>,
    query: Result<Query<TrackQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let locations = state.locations.read().await;
    let track = match locations.track(driver_id) {
        Ok(track) => track.all(),
        Err(e) => return error_response(e),
    };

    match query.shape {
        TrackShape::Features => {
            let collection = geotrack::geojson::track_to_feature_collection(&track);
            (StatusCode::OK, Json(collection)).into_response()
        }
        TrackShape::Linestring => {
            let geometry = geotrack::geojson::track_to_geometry(&track);
            (StatusCode::OK, Json(geometry)).into_response()
        }
    }
}

/// Encode coordinates as a geohash.
#[utoipa::path(
    get,
    path = "/geohash/encode",
    tag = "geohash",
    params(EncodeQuery),
    responses(
        (status = 200, description = "12-symbol geohash", body = EncodeResponse),
        (status = 400, description = "Missing parameters or coordinates out of range", body = ErrorResponse),
    )
)]
pub async fn encode_geohash(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EncodeQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    tracing::debug!(lat = query.lat, lon = query.lon, "Geohash encode");

    let coord = Coordinate::new(query.lat, query.lon);
    if let Err(response) = check_coordinate(&state, &coord) {
        return response;
    }

    (
        StatusCode::OK,
        Json(EncodeResponse {
            lat: query.lat,
            lon: query.lon,
            geo_hash: coord.geo_hash(),
        }),
    )
        .into_response()
}

/// Decode a geohash to the center of its box.
#[utoipa::path(
    get,
    path = "/geohash/decode/{geohash}",
    tag = "geohash",
    params(("geohash" = String, Path, description = "Geohash of any length")),
    responses(
        (status = 200, description = "Box center and error margins", body = DecodeResponse),
        (status = 400, description = "Symbol outside the base-32 alphabet", body = ErrorResponse),
    )
)]
pub async fn decode_geohash(Path(hash): Path<String>) -> Response {
    tracing::debug!(geohash = %hash, "Geohash decode");

    match geohash::decode_bbox(&hash) {
        Ok(bbox) => {
            let center = bbox.center();
            (
                StatusCode::OK,
                Json(DecodeResponse {
                    geo_hash: hash,
                    lat: center.latitude,
                    lon: center.longitude,
                    lat_error: bbox.lat_error(),
                    lon_error: bbox.lon_error(),
                }),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// OpenAPI document of this service.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
