use anyhow::{Context, Result};
use geotrack::geohash;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EncodeOutput {
    lat: f64,
    lon: f64,
    geo_hash: String,
}

pub fn run(lat: f64, lon: f64, strict: bool, json: bool) -> Result<()> {
    let geo_hash = if strict {
        geohash::encode_checked(lat, lon).context("Failed to encode coordinates")?
    } else {
        geohash::encode(lat, lon)
    };

    if json {
        let output = EncodeOutput { lat, lon, geo_hash };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", geo_hash);
    }

    Ok(())
}
