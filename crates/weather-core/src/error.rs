use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while loading and preparing weather readings.
///
/// The analytics engine itself never fails; missing results are `None`.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected a file or a record.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A numeric column held something that is not a number.
    #[error("Invalid {field} value: {value}")]
    InvalidNumber { field: &'static str, value: String },

    /// The given data file or directory does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// No CSV files were found under the given directory.
    #[error("No CSV files found in {0}")]
    NoDataFiles(PathBuf),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the weather crates.
pub type Result<T> = std::result::Result<T, WeatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = WeatherError::FileRead {
            path: PathBuf::from("/some/TempFuktData.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/TempFuktData.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_timestamp_parse() {
        let err = WeatherError::TimestampParse("yesterday".to_string());
        assert_eq!(err.to_string(), "Invalid timestamp format: yesterday");
    }

    #[test]
    fn test_error_display_invalid_number() {
        let err = WeatherError::InvalidNumber {
            field: "temperature",
            value: "12,5x".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid temperature value: 12,5x");
    }

    #[test]
    fn test_error_display_data_path_not_found() {
        let err = WeatherError::DataPathNotFound(PathBuf::from("/missing/data.csv"));
        assert_eq!(err.to_string(), "Data path not found: /missing/data.csv");
    }

    #[test]
    fn test_error_display_no_data_files() {
        let err = WeatherError::NoDataFiles(PathBuf::from("/empty/dir"));
        assert_eq!(err.to_string(), "No CSV files found in /empty/dir");
    }

    #[test]
    fn test_error_display_config() {
        let err = WeatherError::Config("bad date".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad date");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: WeatherError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: WeatherError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
