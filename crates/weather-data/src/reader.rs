//! CSV discovery and loading for Weather Insights.
//!
//! Reads sensor exports with a `Datum,Plats,Temp,Luftfuktighet` header (or
//! the English `timestamp,location,temperature,humidity`) and converts each
//! row into a [`Reading`]. A bad row is logged and skipped; it never aborts
//! the load.

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use weather_core::error::{Result, WeatherError};
use weather_core::models::{Location, Reading};
use weather_core::time_utils::parse_timestamp;

// ── Public types ──────────────────────────────────────────────────────────────

/// A row that could not be turned into a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub file: PathBuf,
    /// 1-based line number in the source file.
    pub line: u64,
    pub message: String,
}

/// Output of [`load_readings`].
#[derive(Debug, Clone, Default)]
pub struct LoadResult {
    /// Valid readings in file order, then row order. Not deduplicated.
    pub readings: Vec<Reading>,
    pub row_errors: Vec<RowError>,
    pub files_read: usize,
}

/// Column layout of a sensor export row.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(alias = "Datum", alias = "Timestamp")]
    timestamp: String,
    #[serde(alias = "Plats", alias = "Location")]
    location: String,
    #[serde(alias = "Temp", alias = "Temperature")]
    temperature: String,
    #[serde(alias = "Luftfuktighet", alias = "Humidity")]
    humidity: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.csv` files recursively under `data_path`, sorted by path.
pub fn find_csv_files(data_path: &Path) -> Vec<PathBuf> {
    if !data_path.exists() {
        warn!("Data path does not exist: {}", data_path.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load readings from a single CSV file or every CSV file under a directory.
///
/// A missing path, or a directory without CSV files, is an error. Inside a
/// directory, a file that cannot be opened is logged and skipped.
pub fn load_readings(data_path: &Path) -> Result<LoadResult> {
    if !data_path.exists() {
        return Err(WeatherError::DataPathNotFound(data_path.to_path_buf()));
    }

    let mut result = LoadResult::default();

    if data_path.is_file() {
        let (readings, errors) = read_csv_file(data_path)?;
        result.readings = readings;
        result.row_errors = errors;
        result.files_read = 1;
    } else {
        let files = find_csv_files(data_path);
        if files.is_empty() {
            return Err(WeatherError::NoDataFiles(data_path.to_path_buf()));
        }
        for file in &files {
            match read_csv_file(file) {
                Ok((readings, errors)) => {
                    result.readings.extend(readings);
                    result.row_errors.extend(errors);
                    result.files_read += 1;
                }
                Err(e) => warn!("Skipping {}: {}", file.display(), e),
            }
        }
    }

    info!(
        "Loaded {} valid readings from {} file(s), skipped {} rows",
        result.readings.len(),
        result.files_read,
        result.row_errors.len()
    );

    Ok(result)
}

/// Read one CSV file.
pub fn read_csv_file(path: &Path) -> Result<(Vec<Reading>, Vec<RowError>)> {
    let file = std::fs::File::open(path).map_err(|source| WeatherError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file, path)
}

/// Parse CSV content from any reader. `source` names it in row errors.
///
/// Fails only when the header row itself cannot be read.
pub fn read_csv<R: Read>(input: R, source: &Path) -> Result<(Vec<Reading>, Vec<RowError>)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();

    let mut readings = Vec::new();
    let mut errors = Vec::new();
    let mut record = StringRecord::new();

    loop {
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                match parse_record(&record, &headers) {
                    Ok(reading) => readings.push(reading),
                    Err(e) => errors.push(skip_row(source, line, e.to_string())),
                }
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                let recoverable = !matches!(e.kind(), csv::ErrorKind::Io(_));
                errors.push(skip_row(source, line, e.to_string()));
                if !recoverable {
                    break;
                }
            }
        }
    }

    debug!(
        "File {}: {} readings, {} rows skipped",
        source.display(),
        readings.len(),
        errors.len()
    );

    Ok((readings, errors))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn skip_row(source: &Path, line: u64, message: String) -> RowError {
    warn!("Error reading row {} of {}: {}", line, source.display(), message);
    RowError {
        file: source.to_path_buf(),
        line,
        message,
    }
}

/// Map one CSV record to a [`Reading`].
fn parse_record(record: &StringRecord, headers: &StringRecord) -> Result<Reading> {
    let raw: RawRow = record.deserialize(Some(headers))?;

    let timestamp = parse_timestamp(&raw.timestamp)
        .ok_or_else(|| WeatherError::TimestampParse(raw.timestamp.clone()))?;
    let location = Location::from(raw.location);
    let temperature = parse_temperature(&raw.temperature)?;
    let humidity = parse_humidity(&raw.humidity)?;

    Ok(Reading::new(timestamp, location, temperature, humidity))
}

/// Decimal point only; rejects NaN and infinities.
fn parse_temperature(value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(t) if t.is_finite() => Ok(t),
        _ => Err(WeatherError::InvalidNumber {
            field: "temperature",
            value: value.to_string(),
        }),
    }
}

/// Whole percent; `45.0` is accepted, `45.5` is not.
fn parse_humidity(value: &str) -> Result<i32> {
    let invalid = || WeatherError::InvalidNumber {
        field: "humidity",
        value: value.to_string(),
    };

    if let Ok(h) = value.parse::<i32>() {
        return Ok(h);
    }
    match value.parse::<f64>() {
        Ok(h) if h.is_finite() && h.fract() == 0.0 && h.abs() <= f64::from(i32::MAX) => {
            Ok(h as i32)
        }
        _ => Err(invalid()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
