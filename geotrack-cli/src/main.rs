use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Geohash encoding and decoding tool
#[derive(Parser)]
#[command(name = "geotrack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Reject coordinates outside ±90° latitude / ±180° longitude
    #[arg(
        short,
        long,
        env = "GEOTRACK_STRICT_COORDINATES",
        global = true
    )]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a coordinate as a 12-symbol geohash
    Encode {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Decode a geohash to the center of its box
    Decode {
        /// Geohash of any length
        geohash: String,

        /// Output result as JSON, including error margins
        #[arg(short, long)]
        json: bool,
    },

    /// Add a geohash column to a CSV file
    Batch {
        /// Input CSV file
        input: PathBuf,

        /// Output file (defaults to <input>_geohash.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Column name for latitude
        #[arg(long, default_value = "lat")]
        lat_col: String,

        /// Column name for longitude
        #[arg(long, default_value = "lon")]
        lon_col: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { lat, lon, json } => commands::encode::run(lat, lon, cli.strict, json),
        Commands::Decode { geohash, json } => commands::decode::run(&geohash, json),
        Commands::Batch {
            input,
            output,
            lat_col,
            lon_col,
        } => commands::batch::run(input, output, &lat_col, &lon_col, cli.strict),
    }
}
