use chrono::NaiveDate;
use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::Location;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Daily insights from paired indoor/outdoor temperature and humidity readings
#[derive(Parser, Debug, Clone)]
#[command(
    name = "weather-insights",
    about = "Daily insights from paired indoor/outdoor temperature and humidity readings",
    version
)]
pub struct Settings {
    /// CSV file or directory of CSV files to analyse
    #[arg(long, env = "WEATHER_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Sensor location used by the per-location rankings
    #[arg(long, default_value = "outdoor", value_parser = ["indoor", "outdoor"])]
    pub location: String,

    /// Report the average temperature for this day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Which report section to print
    #[arg(long, default_value = "all", value_parser = [
        "summary", "temperature", "humidity", "mold", "seasons", "balcony", "difference", "all",
    ])]
    pub report: String,

    /// Number of days listed per ranking (1-100)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub top: u32,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

impl Settings {
    /// The location selected with `--location`.
    pub fn location(&self) -> Location {
        match self.location.as_str() {
            "indoor" => Location::Indoor,
            _ => Location::Outdoor,
        }
    }

    /// Number of ranking rows to show.
    pub fn top(&self) -> usize {
        self.top as usize
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    crate::time_utils::parse_date(s).ok_or_else(|| format!("expected YYYY-MM-DD, got \"{}\"", s))
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.weather-insights/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
}

impl LastUsedParams {
    /// Default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".weather-insights").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    ///
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at `path` if it exists.
    pub fn clear_at(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings loading ───────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, fill unset values from the last run, and persist
    /// the merged result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with explicit arguments and
    /// config path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return Self::resolve_debug(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI (and env for data_file) always wins over the saved values.
        if settings.data_file.is_none() {
            settings.data_file = last.data_file;
        }
        if !is_arg_explicitly_set(&matches, "location") {
            if let Some(v) = last.location {
                if v == "indoor" || v == "outdoor" {
                    settings.location = v;
                }
            }
        }
        if !is_arg_explicitly_set(&matches, "top") {
            if let Some(v) = last.top.filter(|t| (1..=100).contains(t)) {
                settings.top = v;
            }
        }

        settings = Self::resolve_debug(settings);

        let params = LastUsedParams::from(&settings);
        let _ = params.save_to(config_path);

        settings
    }

    /// `--debug` overrides the log level.
    fn resolve_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            data_file: s.data_file.clone(),
            location: Some(s.location.clone()),
            top: Some(s.top),
        }
    }
}

/// `true` when `name` was supplied on the command line (not by default or env).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
