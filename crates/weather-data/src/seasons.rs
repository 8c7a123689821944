//! Meteorological season onset detection.
//!
//! A season starts on the first day of the earliest run of
//! [`ONSET_RUN_LENGTH`] daily outdoor means that all satisfy the season's
//! threshold. "Consecutive" means adjacent entries of the per-day series:
//! a day without outdoor data is simply skipped, it does not break a run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use weather_core::models::DailyValue;

/// Number of consecutive qualifying days that mark a season onset.
pub const ONSET_RUN_LENGTH: usize = 5;

/// Autumn: daily mean strictly below this many °C.
pub const AUTUMN_THRESHOLD: f64 = 10.0;

/// Winter: daily mean at or below this many °C.
pub const WINTER_THRESHOLD: f64 = 0.0;

/// The two seasons whose onset can be detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Autumn,
    Winter,
}

impl Season {
    /// Whether a day with this outdoor mean temperature counts toward the season.
    pub fn qualifies(self, avg_temp: f64) -> bool {
        match self {
            Season::Autumn => avg_temp < AUTUMN_THRESHOLD,
            Season::Winter => avg_temp <= WINTER_THRESHOLD,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }
}

/// Start date of the first window of `run_length` adjacent entries in
/// `series` that all satisfy `predicate`.
///
/// `series` must already be in chronological order. Returns `None` when no
/// window qualifies, when `series` is shorter than `run_length`, or when
/// `run_length` is zero.
pub fn find_run_start<T, F>(series: &[DailyValue<T>], run_length: usize, predicate: F) -> Option<NaiveDate>
where
    F: Fn(&T) -> bool,
{
    if run_length == 0 {
        return None;
    }
    series
        .windows(run_length)
        .find(|window| window.iter().all(|day| predicate(&day.value)))
        .map(|window| window[0].date)
}

/// Onset of `season` in a chronological series of daily outdoor means.
pub fn find_onset(daily_outdoor: &[DailyValue<f64>], season: Season) -> Option<NaiveDate> {
    find_run_start(daily_outdoor, ONSET_RUN_LENGTH, |&avg| season.qualifies(avg))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
