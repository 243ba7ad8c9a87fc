//! Error types for the geotrack library.

use thiserror::Error;

/// Errors that can occur when encoding, decoding or tracking locations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    /// A geohash contained a character outside the base-32 alphabet.
    #[error("Invalid geohash symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// Coordinates are outside the valid latitude/longitude range.
    #[error("Coordinates out of bounds: lat={lat}, lon={lon} (valid: lat ±90°, lon ±180°)")]
    OutOfBounds { lat: f64, lon: f64 },

    /// No locations were ever recorded for the driver.
    #[error("Driver not found: {driver_id}")]
    DriverNotFound { driver_id: u64 },

    /// The driver has no location with the given id.
    #[error("Location {location_id} not found for driver {driver_id}")]
    LocationNotFound { driver_id: u64, location_id: u64 },
}

/// Result type alias using [`TrackError`].
pub type Result<T> = std::result::Result<T, TrackError>;
