//! # geotrack - Geohash codec and driver location tracking
//!
//! Encodes latitude/longitude pairs as fixed-length geohashes and keeps
//! in-memory tracks of driver positions.
//!
//! ## Features
//!
//! - **Geohash**: 12-symbol base-32 encoding with checked decoding
//! - **Tracks**: per-driver location history with sequential ids
//! - **GeoJSON**: export tracks as features (`geojson` feature)
//!
//! ## Quick Start
//!
//! ```
//! use geotrack::{geohash, Location, LocationRegistry};
//!
//! assert_eq!(geohash::encode(40.5187, 74.4121), "txhyt21nx95k");
//!
//! let mut registry = LocationRegistry::new();
//! let stored = registry.record(1, Location::new(40.5187, 74.4121));
//! assert_eq!(stored.id(), 1);
//! assert_eq!(stored.geo_hash(), "txhyt21nx95k");
//! ```
//!
//! ## Geohash Format
//!
//! - Alphabet: `0123456789bcdefghjkmnpqrstuvwxyz` (no `a`, `i`, `l`, `o`)
//! - Bits alternate longitude, latitude, starting with longitude
//! - Five bits per symbol, most significant first
//!
//! See <https://en.wikipedia.org/wiki/Geohash>.

pub mod coord;
pub mod error;
pub mod geohash;
pub mod location;
pub mod registry;

#[cfg(feature = "geojson")]
pub mod geojson;

// Re-export main types at crate root for convenience
pub use coord::Coordinate;
pub use error::{Result, TrackError};
pub use geohash::{GeohashBox, PRECISION};
pub use location::Location;
pub use registry::{Driver, DriverLocations, DriverRegistry, LocationRegistry};
