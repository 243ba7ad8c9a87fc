use anyhow::{bail, Context, Result};
use geotrack::geohash;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    lat_col: &str,
    lon_col: &str,
    strict: bool,
) -> Result<()> {
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "csv" {
        bail!("Unsupported file format: {}. Use .csv", extension);
    }

    let file = File::open(&input).context("Failed to open input file")?;
    let output_path = output.unwrap_or_else(|| default_output_path(&input));
    let output_file = File::create(&output_path).context("Failed to create output file")?;

    let rows = add_geohash_column(
        BufReader::new(file),
        BufWriter::new(output_file),
        lat_col,
        lon_col,
        strict,
    )?;

    println!("{} rows written to: {}", rows, output_path.display());
    Ok(())
}

/// `<dir>/<stem>_geohash.csv` next to the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_geohash.csv", stem))
}

/// Copy CSV records from `input` to `output`, appending a `geohash` column.
///
/// Returns the number of data rows written.
fn add_geohash_column<R: Read, W: Write>(
    input: R,
    output: W,
    lat_col: &str,
    lon_col: &str,
    strict: bool,
) -> Result<usize> {
    let mut reader = csv::Reader::from_reader(input);

    // Find column indices
    let headers = reader.headers()?.clone();
    let lat_idx = headers
        .iter()
        .position(|h| h == lat_col)
        .with_context(|| format!("Column '{}' not found in CSV", lat_col))?;
    let lon_idx = headers
        .iter()
        .position(|h| h == lon_col)
        .with_context(|| format!("Column '{}' not found in CSV", lon_col))?;

    // Collect records for progress bar
    let records: Vec<_> = reader.records().collect::<Result<_, _>>()?;

    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );

    let mut writer = csv::Writer::from_writer(output);

    let mut new_headers: Vec<&str> = headers.iter().collect();
    new_headers.push("geohash");
    writer.write_record(&new_headers)?;

    for (row, record) in records.iter().enumerate() {
        let lat: f64 = record
            .get(lat_idx)
            .context("Missing latitude")?
            .trim()
            .parse()
            .with_context(|| format!("Invalid latitude on row {}", row + 1))?;
        let lon: f64 = record
            .get(lon_idx)
            .context("Missing longitude")?
            .trim()
            .parse()
            .with_context(|| format!("Invalid longitude on row {}", row + 1))?;

        let hash = if strict {
            geohash::encode_checked(lat, lon)
                .with_context(|| format!("Row {} out of range", row + 1))?
        } else {
            geohash::encode(lat, lon)
        };

        let mut new_record: Vec<&str> = record.iter().collect();
        new_record.push(&hash);
        writer.write_record(&new_record)?;

        pb.inc(1);
    }

    pb.finish_with_message("done");
    writer.flush()?;

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "name,lat,lon\nnj,40.5187,74.4121\norigin,0,0\n";

    fn convert(input: &str, strict: bool) -> Result<String> {
        let mut output = Vec::new();
        add_geohash_column(input.as_bytes(), &mut output, "lat", "lon", strict)?;
        Ok(String::from_utf8(output)?)
    }

    #[test]
    fn test_adds_geohash_column() {
        let output = convert(SAMPLE, false).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "name,lat,lon,geohash");
        assert_eq!(lines[1], "nj,40.5187,74.4121,txhyt21nx95k");
        assert_eq!(lines[2], "origin,0,0,7zzzzzzzzzzz");
    }

    #[test]
    fn test_custom_columns() {
        let mut output = Vec::new();
        let rows = add_geohash_column(
            "y,x\n90,180\n".as_bytes(),
            &mut output,
            "y",
            "x",
            false,
        )
        .unwrap();
        assert_eq!(rows, 1);
        assert!(String::from_utf8(output)
            .unwrap()
            .contains("90,180,zzzzzzzzzzzz"));
    }

    #[test]
    fn test_missing_column() {
        let err = convert("name,latitude,lon\na,1,2\n", false).unwrap_err();
        assert!(err.to_string().contains("'lat'"));
    }

    #[test]
    fn test_invalid_number() {
        let err = convert("lat,lon\nabc,2\n", false).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_strict_rejects_out_of_range() {
        assert!(convert("lat,lon\n100,200\n", false).is_ok());
        assert!(convert("lat,lon\n100,200\n", true).is_err());
    }

    #[test]
    fn test_run_writes_default_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("points.csv");
        std::fs::write(&input, SAMPLE).unwrap();

        run(input, None, "lat", "lon", false).unwrap();

        let output = std::fs::read_to_string(temp_dir.path().join("points_geohash.csv")).unwrap();
        assert!(output.contains("txhyt21nx95k"));
    }

    #[test]
    fn test_run_rejects_other_formats() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("points.geojson");
        std::fs::write(&input, "{}").unwrap();

        assert!(run(input, None, "lat", "lon", false).is_err());
    }
}
