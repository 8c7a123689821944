//! Data layer for Weather Insights.
//!
//! Loads sensor readings from CSV exports and runs the analytics engine over
//! them: per-day aggregation, rankings, season onset detection, the
//! balcony-door heuristic and the full report pipeline.

pub mod aggregator;
pub mod analysis;
pub mod analyzer;
pub mod heuristics;
pub mod reader;
pub mod seasons;

pub use weather_core as core;
