//! Recorded driver positions.

use chrono::{DateTime, Utc};

use crate::coord::Coordinate;
use crate::geohash;

/// A single recorded position of a driver.
///
/// The geohash is not stored. [`Location::geo_hash`] recomputes it from the
/// current coordinate, so it stays correct after [`Location::set_coordinate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    id: u64,
    latitude: f64,
    longitude: f64,
    timestamp: DateTime<Utc>,
}

impl Location {
    /// Create an unsaved location stamped with the current time.
    ///
    /// The id stays 0 until the location is added to a
    /// [`DriverLocations`](crate::registry::DriverLocations).
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self::with_timestamp(latitude, longitude, Utc::now())
    }

    /// Create an unsaved location with an explicit timestamp.
    pub fn with_timestamp(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            latitude,
            longitude,
            timestamp,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// When the location was first recorded. Updates keep the original time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Move the location, keeping its id and timestamp.
    pub fn set_coordinate(&mut self, coord: Coordinate) {
        self.latitude = coord.latitude;
        self.longitude = coord.longitude;
    }

    /// Geohash of the current coordinate.
    pub fn geo_hash(&self) -> String {
        geohash::encode(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_location() {
        let before = Utc::now();
        let location = Location::new(40.5187, 74.4121);
        assert_eq!(location.id(), 0);
        assert_eq!(location.latitude(), 40.5187);
        assert_eq!(location.longitude(), 74.4121);
        assert!(location.timestamp() >= before);
    }

    #[test]
    fn test_geo_hash_follows_coordinate() {
        let mut location = Location::new(40.5187, 74.4121);
        assert_eq!(location.geo_hash(), "txhyt21nx95k");

        let timestamp = location.timestamp();
        location.set_coordinate(Coordinate::new(0.0, 0.0));
        assert_eq!(location.geo_hash(), "7zzzzzzzzzzz");
        assert_eq!(location.timestamp(), timestamp);
    }
}
