//! GeoJSON export of driver tracks.
//!
//! Enable the `geojson` feature to use this module.
//!
//! # Example
//!
//! ```ignore
//! use geotrack::geojson::track_to_feature_collection;
//!
//! let locations = registry.track(driver_id)?.all();
//! let collection = track_to_feature_collection(&locations);
//! println!("{}", geojson::GeoJson::from(collection));
//! ```

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value as GeoJsonValue};

use crate::location::Location;

/// GeoJSON position of a location, in `[longitude, latitude]` order.
fn position(location: &Location) -> Vec<f64> {
    vec![location.longitude(), location.latitude()]
}

/// Convert a location into a Point feature.
///
/// The feature carries `id`, `timestamp` (RFC 3339) and `geoHash` properties.
pub fn location_to_feature(location: &Location) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), JsonValue::from(location.id()));
    properties.insert(
        "timestamp".to_string(),
        JsonValue::from(location.timestamp().to_rfc3339()),
    );
    properties.insert("geoHash".to_string(), JsonValue::from(location.geo_hash()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoJsonValue::Point(position(location)))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Join the locations into a LineString, in the order given.
pub fn track_to_geometry(locations: &[Location]) -> Geometry {
    Geometry::new(GeoJsonValue::LineString(
        locations.iter().map(position).collect(),
    ))
}

/// One Point feature per location.
pub fn track_to_feature_collection(locations: &[Location]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: locations.iter().map(location_to_feature).collect(),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DriverLocations;
    use geojson::GeoJson;

    fn sample_track() -> Vec<Location> {
        let mut track = DriverLocations::new(1);
        track.add(Location::new(40.5187, 74.4121));
        track.add(Location::new(0.0, 0.0));
        track.all()
    }

    #[test]
    fn test_location_to_feature() {
        let locations = sample_track();
        let feature = location_to_feature(&locations[0]);

        let geometry = feature.geometry.as_ref().unwrap();
        assert_eq!(geometry.value, GeoJsonValue::Point(vec![74.4121, 40.5187]));
        assert_eq!(
            feature.property("geoHash").and_then(JsonValue::as_str),
            Some("txhyt21nx95k")
        );
        assert_eq!(
            feature.property("id").and_then(JsonValue::as_u64),
            Some(1)
        );
        assert!(feature.property("timestamp").is_some());
    }

    #[test]
    fn test_track_to_geometry() {
        let geometry = track_to_geometry(&sample_track());
        assert_eq!(
            geometry.value,
            GeoJsonValue::LineString(vec![vec![74.4121, 40.5187], vec![0.0, 0.0]])
        );
    }

    #[test]
    fn test_track_to_feature_collection() {
        let collection = track_to_feature_collection(&sample_track());
        assert_eq!(collection.features.len(), 2);

        let json = GeoJson::from(collection).to_string();
        assert!(json.contains("FeatureCollection"));
        assert!(json.contains("7zzzzzzzzzzz"));
    }

    #[test]
    fn test_empty_track() {
        assert!(track_to_feature_collection(&[]).features.is_empty());
        assert_eq!(
            track_to_geometry(&[]).value,
            GeoJsonValue::LineString(vec![])
        );
    }
}
