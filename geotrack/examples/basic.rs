//! Basic example demonstrating geotrack library usage.
//!
//! Run with: cargo run --example basic

use geotrack::{geohash, Location, LocationRegistry, TrackError};

fn main() -> Result<(), TrackError> {
    let places = [
        ("Mount Fuji, Japan", 35.3606, 138.7274),
        ("Mount Everest, Nepal", 27.9881, 86.9250),
        ("Denali, Alaska", 63.0695, -151.0074),
    ];

    println!("Geohashes:");
    println!("{:-<50}", "");

    let mut registry = LocationRegistry::new();
    for (name, lat, lon) in &places {
        let stored = registry.record(1, Location::new(*lat, *lon));
        println!("{}: {} (id {})", name, stored.geo_hash(), stored.id());
    }

    println!("\nRound trip:");
    for location in registry.track(1)?.all() {
        let bbox = geohash::decode_bbox(&location.geo_hash())?;
        let center = bbox.center();
        println!(
            "  {} -> {:.7}, {:.7} (±{:.1e}°, ±{:.1e}°)",
            location.geo_hash(),
            center.latitude,
            center.longitude,
            bbox.lat_error(),
            bbox.lon_error()
        );
    }

    match geohash::decode("not-a-hash") {
        Ok(coord) => println!("\nUnexpected: {:?}", coord),
        Err(e) => println!("\nRejected: {}", e),
    }

    Ok(())
}
