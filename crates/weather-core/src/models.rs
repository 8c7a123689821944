use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Where a sensor sample was taken.
///
/// Only [`Location::Indoor`] and [`Location::Outdoor`] take part in
/// location-filtered queries. Any other label is kept verbatim in
/// [`Location::Other`] and never matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Location {
    Indoor,
    Outdoor,
    Other(String),
}

impl Location {
    /// `true` for the two labels the engine recognises.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Location::Other(_))
    }

    /// Whether a reading taken at `self` belongs to a query for `target`.
    ///
    /// Unrecognised labels never match, not even themselves.
    pub fn matches(&self, target: &Location) -> bool {
        self.is_recognized() && self == target
    }

    /// Canonical label written back to CSV / JSON output.
    pub fn label(&self) -> &str {
        match self {
            Location::Indoor => "Inne",
            Location::Outdoor => "Ute",
            Location::Other(label) => label,
        }
    }
}

impl FromStr for Location {
    type Err = std::convert::Infallible;

    /// Parse a location label. Never fails: unknown labels become
    /// [`Location::Other`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Location::from(s.to_string()))
    }
}

impl From<String> for Location {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Inne" | "Indoor" => Location::Indoor,
            "Ute" | "Outdoor" => Location::Outdoor,
            _ => Location::Other(s),
        }
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        match location {
            Location::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Indoor => write!(f, "indoor"),
            Location::Outdoor => write!(f, "outdoor"),
            Location::Other(label) => write!(f, "{}", label),
        }
    }
}

/// One timestamped sensor sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Naive local sampling instant; no timezone conversion is ever applied.
    pub timestamp: NaiveDateTime,
    /// Sensor placement.
    pub location: Location,
    /// Degrees Celsius, may be negative.
    pub temperature: f64,
    /// Relative humidity in percent. Not range-checked.
    pub humidity: i32,
}

impl Reading {
    pub fn new(
        timestamp: NaiveDateTime,
        location: Location,
        temperature: f64,
        humidity: i32,
    ) -> Self {
        Self {
            timestamp,
            location,
            temperature,
            humidity,
        }
    }

    /// Calendar day of the sample.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// A `(day, metric)` pair as returned by every per-day ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyValue<T> {
    pub date: NaiveDate,
    pub value: T,
}

impl<T> DailyValue<T> {
    pub fn new(date: NaiveDate, value: T) -> Self {
        Self { date, value }
    }
}
