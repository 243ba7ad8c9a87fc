use anyhow::{Context, Result};
use geotrack::geohash;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DecodeOutput<'a> {
    geo_hash: &'a str,
    lat: f64,
    lon: f64,
    lat_error: f64,
    lon_error: f64,
}

pub fn run(hash: &str, json: bool) -> Result<()> {
    let bbox = geohash::decode_bbox(hash)
        .with_context(|| format!("Failed to decode geohash '{}'", hash))?;
    let center = bbox.center();

    if json {
        let output = DecodeOutput {
            geo_hash: hash,
            lat: center.latitude,
            lon: center.longitude,
            lat_error: bbox.lat_error(),
            lon_error: bbox.lon_error(),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{} {}", center.latitude, center.longitude);
    }

    Ok(())
}
