//! Geographic coordinate type and range validation.

use crate::error::{Result, TrackError};
use crate::geohash;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;
/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// A (latitude, longitude) pair in decimal degrees (WGS84).
///
/// Construction does not validate the range. Call [`Coordinate::validate`]
/// when out-of-range input should be rejected instead of being folded onto
/// the nearest edge by the geohash bisection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate without range checks.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components lie within their global ranges.
    ///
    /// NaN is never valid.
    pub fn is_valid(&self) -> bool {
        (MIN_LAT..=MAX_LAT).contains(&self.latitude)
            && (MIN_LON..=MAX_LON).contains(&self.longitude)
    }

    /// Reject coordinates outside ±90° latitude / ±180° longitude.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::OutOfBounds`] if either component is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(TrackError::OutOfBounds {
                lat: self.latitude,
                lon: self.longitude,
            })
        }
    }

    /// Encode this coordinate as a 12-symbol geohash.
    pub fn geo_hash(&self) -> String {
        geohash::encode(self.latitude, self.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(Coordinate::new(40.5187, 74.4121).validate().is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(!Coordinate::new(90.0001, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.5).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());

        let err = Coordinate::new(100.0, 200.0).validate().unwrap_err();
        assert_eq!(
            err,
            TrackError::OutOfBounds {
                lat: 100.0,
                lon: 200.0
            }
        );
    }

    #[test]
    fn test_from_tuple() {
        let coord: Coordinate = (35.5, 138.7).into();
        assert_eq!(coord.latitude, 35.5);
        assert_eq!(coord.longitude, 138.7);
    }
}
