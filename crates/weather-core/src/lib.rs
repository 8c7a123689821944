//! Shared building blocks for Weather Insights.
//!
//! Holds the reading model, the error type, pure per-day calculations,
//! display formatting helpers and command-line settings used by the data
//! and binary crates.

pub mod calculations;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{Result, WeatherError};
pub use models::{DailyValue, Location, Reading};
