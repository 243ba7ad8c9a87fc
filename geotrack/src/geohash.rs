//! Geohash encoding and decoding.
//!
//! A geohash packs a latitude/longitude pair into a short base-32 string by
//! repeatedly halving the latitude and longitude ranges and recording which
//! half the coordinate falls into. Bits alternate between the two axes,
//! starting with longitude, and every five bits become one symbol.
//!
//! # Precision
//!
//! Hashes produced here are always [`PRECISION`] (12) symbols long: 60 bits,
//! 30 per axis. The resulting box is roughly 3.7cm × 1.9cm at the equator.
//!
//! # Example
//!
//! ```
//! use geotrack::geohash;
//!
//! let hash = geohash::encode(37.7749, -122.4194);
//! assert_eq!(hash, "9q8yyk8ytpxr");
//!
//! let coord = geohash::decode(&hash).unwrap();
//! assert!((coord.latitude - 37.7749).abs() < 1e-6);
//! assert!((coord.longitude + 122.4194).abs() < 1e-6);
//! ```

use crate::coord::{Coordinate, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use crate::error::{Result, TrackError};

/// The base-32 geohash alphabet (digits and lowercase letters without `a i l o`).
pub const BASE_32: [u8; 32] = *b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Number of symbols in every encoded geohash.
pub const PRECISION: usize = 12;

/// Bit weights within one symbol, most significant first.
pub const BITS: [u8; 5] = [16, 8, 4, 2, 1];

const NO_SYMBOL: u8 = u8::MAX;

/// Inverse of [`BASE_32`], indexed by ASCII code.
const DECODE_MAP: [u8; 128] = build_decode_map();

const fn build_decode_map() -> [u8; 128] {
    let mut map = [NO_SYMBOL; 128];
    let mut i = 0;
    while i < BASE_32.len() {
        map[BASE_32[i] as usize] = i as u8;
        i += 1;
    }
    map
}

/// Look up the 5-bit value of a geohash symbol.
///
/// Returns `None` for anything outside the alphabet, including non-ASCII
/// characters and uppercase letters.
fn symbol_value(symbol: char) -> Option<u8> {
    DECODE_MAP
        .get(symbol as usize)
        .copied()
        .filter(|&value| value != NO_SYMBOL)
}

/// One axis of the bisection state.
#[derive(Debug, Clone, Copy)]
struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    fn mid(&self) -> f64 {
        (self.lo + self.hi) / 2.0
    }

    /// Keep the upper half if `upper`, otherwise the lower half.
    fn narrow(&mut self, upper: bool) {
        let mid = self.mid();
        if upper {
            self.lo = mid;
        } else {
            self.hi = mid;
        }
    }

    /// Narrow towards `value` and report which half was kept.
    ///
    /// A value exactly on the midpoint goes to the lower half.
    fn bisect(&mut self, value: f64) -> bool {
        let upper = value > self.mid();
        self.narrow(upper);
        upper
    }
}

/// The bounding box a geohash stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeohashBox {
    /// Southern boundary.
    pub min_lat: f64,
    /// Northern boundary.
    pub max_lat: f64,
    /// Western boundary.
    pub min_lon: f64,
    /// Eastern boundary.
    pub max_lon: f64,
}

impl GeohashBox {
    /// Center of the box, which is what [`decode`] returns.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Maximum latitude error of the center (half the box height).
    pub fn lat_error(&self) -> f64 {
        (self.max_lat - self.min_lat) / 2.0
    }

    /// Maximum longitude error of the center (half the box width).
    pub fn lon_error(&self) -> f64 {
        (self.max_lon - self.min_lon) / 2.0
    }

    /// Whether the coordinate lies inside the box (edges inclusive).
    pub fn contains(&self, coord: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coord.latitude)
            && (self.min_lon..=self.max_lon).contains(&coord.longitude)
    }
}

/// Encode a latitude/longitude pair as a 12-symbol geohash.
///
/// Inputs are not validated. Values outside ±90° / ±180° end up in the box on
/// the nearest edge, so `encode(100.0, 200.0)` equals `encode(90.0, 180.0)`.
/// Use [`encode_checked`] to reject them instead.
///
/// # Example
///
/// ```
/// use geotrack::geohash::encode;
///
/// assert_eq!(encode(40.5187, 74.4121), "txhyt21nx95k");
/// assert_eq!(encode(0.0, 0.0), "7zzzzzzzzzzz");
/// ```
pub fn encode(latitude: f64, longitude: f64) -> String {
    let mut lat = Interval::new(MIN_LAT, MAX_LAT);
    let mut lon = Interval::new(MIN_LON, MAX_LON);
    let mut geohash = String::with_capacity(PRECISION);
    let mut is_lon = true;

    for _ in 0..PRECISION {
        let mut ch = 0u8;
        for bit in BITS {
            let upper = if is_lon {
                lon.bisect(longitude)
            } else {
                lat.bisect(latitude)
            };
            if upper {
                ch |= bit;
            }
            is_lon = !is_lon;
        }
        geohash.push(BASE_32[ch as usize] as char);
    }

    geohash
}

/// Encode a coordinate after checking that it is within the global ranges.
///
/// # Errors
///
/// Returns [`TrackError::OutOfBounds`] if latitude is outside ±90°, longitude
/// is outside ±180°, or either is NaN.
pub fn encode_checked(latitude: f64, longitude: f64) -> Result<String> {
    Coordinate::new(latitude, longitude).validate()?;
    Ok(encode(latitude, longitude))
}

/// Decode a geohash into the bounding box it represents.
///
/// Any length is accepted; shorter hashes yield larger boxes and the empty
/// string yields the whole globe.
///
/// # Errors
///
/// Returns [`TrackError::InvalidSymbol`] for the first character that is not
/// part of the base-32 alphabet.
pub fn decode_bbox(geohash: &str) -> Result<GeohashBox> {
    let mut lat = Interval::new(MIN_LAT, MAX_LAT);
    let mut lon = Interval::new(MIN_LON, MAX_LON);
    let mut is_lon = true;

    for (position, symbol) in geohash.chars().enumerate() {
        let value =
            symbol_value(symbol).ok_or(TrackError::InvalidSymbol { symbol, position })?;

        for mask in BITS {
            let upper = value & mask != 0;
            if is_lon {
                lon.narrow(upper);
            } else {
                lat.narrow(upper);
            }
            is_lon = !is_lon;
        }
    }

    Ok(GeohashBox {
        min_lat: lat.lo,
        max_lat: lat.hi,
        min_lon: lon.lo,
        max_lon: lon.hi,
    })
}

/// Decode a geohash to the center of its bounding box.
///
/// `decode("")` returns `(0.0, 0.0)`.
///
/// # Errors
///
/// Returns [`TrackError::InvalidSymbol`] for the first character that is not
/// part of the base-32 alphabet.
pub fn decode(geohash: &str) -> Result<Coordinate> {
    decode_bbox(geohash).map(|bbox| bbox.center())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Half the height of a 12-symbol box: 180° / 2^30 / 2.
    const LAT_HALF_BOX: f64 = 90.0 / (1u64 << 30) as f64;
    /// Half the width of a 12-symbol box: 360° / 2^30 / 2.
    const LON_HALF_BOX: f64 = 180.0 / (1u64 << 30) as f64;

    #[test]
    fn test_decode_map_matches_alphabet() {
        for (i, &symbol) in BASE_32.iter().enumerate() {
            assert_eq!(symbol_value(symbol as char), Some(i as u8));
        }
        let valid = DECODE_MAP.iter().filter(|&&v| v != NO_SYMBOL).count();
        assert_eq!(valid, 32);
        for excluded in ['a', 'i', 'l', 'o', 'A', 'Z', ' ', 'é'] {
            assert_eq!(symbol_value(excluded), None);
        }
    }

    #[test]
    fn test_encode_known_vectors() {
        assert_eq!(encode(0.0, 0.0), "7zzzzzzzzzzz");
        assert_eq!(encode(40.5187, 74.4121), "txhyt21nx95k");
        assert_eq!(encode(37.7749, -122.4194), "9q8yyk8ytpxr");
        assert_eq!(encode(-33.8688, 151.2093), "r3gx2f77bn44");
    }

    #[test]
    fn test_encode_boundaries() {
        assert_eq!(encode(90.0, 180.0), "zzzzzzzzzzzz");
        assert_eq!(encode(-90.0, -180.0), "000000000000");
    }

    #[test]
    fn test_encode_out_of_range_folds_to_edge() {
        assert_eq!(encode(100.0, 200.0), encode(90.0, 180.0));
        assert_eq!(encode(-1000.0, -1000.0), encode(-90.0, -180.0));
    }

    #[test]
    fn test_encode_checked() {
        assert_eq!(encode_checked(40.5187, 74.4121).unwrap(), "txhyt21nx95k");
        assert!(matches!(
            encode_checked(91.0, 0.0),
            Err(TrackError::OutOfBounds { .. })
        ));
        assert!(matches!(
            encode_checked(0.0, f64::NAN),
            Err(TrackError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_decode_reference_point() {
        let coord = decode("txhyt21nx95k").unwrap();
        assert!((coord.latitude - 40.5187).abs() < 1e-6);
        assert!((coord.longitude - 74.4121).abs() < 1e-6);
    }

    #[test]
    fn test_decode_empty_is_origin() {
        let coord = decode("").unwrap();
        assert_eq!(coord.latitude, 0.0);
        assert_eq!(coord.longitude, 0.0);
    }

    #[test]
    fn test_decode_prefix() {
        let bbox = decode_bbox("t").unwrap();
        assert_eq!(bbox.min_lat, 0.0);
        assert_eq!(bbox.max_lat, 45.0);
        assert_eq!(bbox.min_lon, 45.0);
        assert_eq!(bbox.max_lon, 90.0);

        let coord = decode("tx").unwrap();
        assert_eq!(coord.latitude, 42.1875);
        assert_eq!(coord.longitude, 73.125);
    }

    #[test]
    fn test_decode_invalid_symbol() {
        let err = decode("!@#$%^&*()12").unwrap_err();
        assert_eq!(
            err,
            TrackError::InvalidSymbol {
                symbol: '!',
                position: 0
            }
        );

        // 'a' is excluded from the alphabet
        let err = decode("txhya21nx95k").unwrap_err();
        assert_eq!(
            err,
            TrackError::InvalidSymbol {
                symbol: 'a',
                position: 4
            }
        );

        assert!(decode("TXHYT21NX95K").is_err());
        assert!(decode("txhyt21nx95ü").is_err());
    }

    #[test]
    fn test_bbox_error_margins() {
        let bbox = decode_bbox("txhyt21nx95k").unwrap();
        assert_eq!(bbox.lat_error(), LAT_HALF_BOX);
        assert_eq!(bbox.lon_error(), LON_HALF_BOX);
        assert!(bbox.contains(&Coordinate::new(40.5187, 74.4121)));
        assert!(!bbox.contains(&Coordinate::new(40.5188, 74.4121)));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(encode(12.345, -67.89), encode(12.345, -67.89));

        let a = decode("9q8yyk8ytpxr").unwrap();
        let b = decode("9q8yyk8ytpxr").unwrap();
        assert_eq!(a.latitude.to_bits(), b.latitude.to_bits());
        assert_eq!(a.longitude.to_bits(), b.longitude.to_bits());
    }

    proptest! {
        #[test]
        fn prop_encode_length_and_alphabet(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            let hash = encode(lat, lon);
            prop_assert_eq!(hash.len(), PRECISION);
            prop_assert!(hash.bytes().all(|b| BASE_32.contains(&b)));
        }

        #[test]
        fn prop_round_trip_within_box(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            let coord = decode(&encode(lat, lon)).unwrap();
            prop_assert!((coord.latitude - lat).abs() <= LAT_HALF_BOX);
            prop_assert!((coord.longitude - lon).abs() <= LON_HALF_BOX);
        }

        #[test]
        fn prop_reencode_is_idempotent(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            let hash = encode(lat, lon);
            let coord = decode(&hash).unwrap();
            prop_assert_eq!(encode(coord.latitude, coord.longitude), hash);
        }
    }
}
