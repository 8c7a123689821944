//! Full analysis pipeline for Weather Insights.
//!
//! Runs every [`WeatherAnalyzer`] operation once over a loaded snapshot and
//! collects the results into a [`WeatherReport`] for the presentation layer.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use weather_core::models::{DailyValue, Location, Reading};

use crate::analyzer::WeatherAnalyzer;

// ── Public types ──────────────────────────────────────────────────────────────

/// Parameters for [`analyze_readings`].
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Location used by the per-location rankings.
    pub location: Location,
    /// Day for the single-day average, if any.
    pub date: Option<NaiveDate>,
    /// Maximum rows kept per ranking.
    pub top: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            location: Location::Outdoor,
            date: None,
            top: 5,
        }
    }
}

/// Metadata produced alongside the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// ISO-8601 timestamp when this report was generated.
    pub generated_at: String,
    pub readings_processed: usize,
    pub indoor_readings: usize,
    pub outdoor_readings: usize,
    /// Readings whose location label was not recognised.
    pub unrecognized_readings: usize,
    pub first_day: Option<NaiveDate>,
    pub last_day: Option<NaiveDate>,
    /// Distinct calendar days with at least one reading.
    pub days_covered: usize,
    /// Wall-clock seconds spent in the analyses.
    pub analysis_time_seconds: f64,
}

/// Mean temperature on one requested day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedAverage {
    pub date: NaiveDate,
    pub location: Location,
    /// `None` when the location has no readings that day.
    pub average_temperature: Option<f64>,
}

/// The complete output of [`analyze_readings`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub metadata: ReportMetadata,
    pub location: Location,
    pub average_for_date: Option<DatedAverage>,
    pub warmest_days: Vec<DailyValue<f64>>,
    pub coldest_days: Vec<DailyValue<f64>>,
    pub driest_days: Vec<DailyValue<f64>>,
    pub most_humid_days: Vec<DailyValue<f64>>,
    pub lowest_mold_risk_days: Vec<DailyValue<f64>>,
    pub highest_mold_risk_days: Vec<DailyValue<f64>>,
    pub autumn_onset: Option<NaiveDate>,
    pub winter_onset: Option<NaiveDate>,
    pub balcony_door_open: Vec<DailyValue<i64>>,
    pub largest_temperature_differences: Vec<DailyValue<f64>>,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run every analysis over `readings`.
///
/// Ranked lists are cut to `options.top` rows. "Coldest", "most humid" and
/// "highest mold risk" come from the tail of the engine's ordering,
/// reversed so the most extreme day is first.
pub fn analyze_readings(readings: &[Reading], options: &AnalysisOptions) -> WeatherReport {
    let start = std::time::Instant::now();
    let location = &options.location;
    let top = options.top;

    let average_for_date = options.date.map(|date| DatedAverage {
        date,
        location: location.clone(),
        average_temperature: WeatherAnalyzer::average_temperature_for_date(readings, date, location),
    });

    let by_temperature = WeatherAnalyzer::sort_days_by_temperature(readings, location);
    let by_humidity = WeatherAnalyzer::sort_days_by_humidity(readings, location);
    let by_mold_risk = WeatherAnalyzer::sort_days_by_mold_risk(readings, location);

    let autumn_onset = WeatherAnalyzer::find_meteorological_autumn(readings);
    let winter_onset = WeatherAnalyzer::find_meteorological_winter(readings);

    let mut balcony_door_open = WeatherAnalyzer::balcony_door_open_minutes(readings);
    balcony_door_open.truncate(top);

    let differences = WeatherAnalyzer::sort_days_by_temperature_difference(readings);

    let mut metadata = summarize(readings);
    metadata.analysis_time_seconds = start.elapsed().as_secs_f64();

    debug!(
        "Analysed {} readings over {} days in {:.3}s",
        metadata.readings_processed, metadata.days_covered, metadata.analysis_time_seconds
    );

    WeatherReport {
        metadata,
        location: location.clone(),
        average_for_date,
        warmest_days: head(&by_temperature, top),
        coldest_days: tail_reversed(&by_temperature, top),
        driest_days: head(&by_humidity, top),
        most_humid_days: tail_reversed(&by_humidity, top),
        lowest_mold_risk_days: head(&by_mold_risk, top),
        highest_mold_risk_days: tail_reversed(&by_mold_risk, top),
        autumn_onset,
        winter_onset,
        balcony_door_open,
        largest_temperature_differences: head(&differences, top),
    }
}

/// Counts and date range of a snapshot.
pub fn summarize(readings: &[Reading]) -> ReportMetadata {
    let mut indoor = 0;
    let mut outdoor = 0;
    let mut other = 0;
    let mut days = BTreeSet::new();

    for reading in readings {
        match reading.location {
            Location::Indoor => indoor += 1,
            Location::Outdoor => outdoor += 1,
            Location::Other(_) => other += 1,
        }
        days.insert(reading.date());
    }

    ReportMetadata {
        generated_at: Utc::now().to_rfc3339(),
        readings_processed: readings.len(),
        indoor_readings: indoor,
        outdoor_readings: outdoor,
        unrecognized_readings: other,
        first_day: days.first().copied(),
        last_day: days.last().copied(),
        days_covered: days.len(),
        analysis_time_seconds: 0.0,
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn head<T: Clone>(ranked: &[T], n: usize) -> Vec<T> {
    ranked.iter().take(n).cloned().collect()
}

fn tail_reversed<T: Clone>(ranked: &[T], n: usize) -> Vec<T> {
    ranked.iter().rev().take(n).cloned().collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Seven days of outdoor readings cooling into autumn, plus indoor pairs.
    fn week() -> Vec<Reading> {
        let temps = [12.0, 9.0, 8.0, 7.0, 6.0, 5.0, 11.0];
        let mut readings = Vec::new();
        for (i, &t) in temps.iter().enumerate() {
            let date = day("2016-09-20") + chrono::Days::new(i as u64);
            let noon = date.and_hms_opt(12, 0, 0).unwrap();
            readings.push(Reading::new(noon, Location::Outdoor, t, 70 + i as i32 * 4));
            readings.push(Reading::new(noon, Location::Indoor, 21.0, 40));
        }
        readings
    }

    // ── analyze_readings ──────────────────────────────────────────────────────

    #[test]
    fn test_report_rankings_and_onsets() {
        let options = AnalysisOptions {
            top: 3,
            ..AnalysisOptions::default()
        };
        let report = analyze_readings(&week(), &options);

        assert_eq!(report.location, Location::Outdoor);
        assert_eq!(report.warmest_days.len(), 3);
        assert_eq!(report.warmest_days[0].date, day("2016-09-20"));
        assert_eq!(report.coldest_days[0].date, day("2016-09-25"));
        assert_eq!(report.driest_days[0].date, day("2016-09-20"));
        assert_eq!(report.most_humid_days[0].date, day("2016-09-26"));
        assert_eq!(report.autumn_onset, Some(day("2016-09-21")));
        assert_eq!(report.winter_onset, None);
        assert!(report.balcony_door_open.is_empty());
        // Largest gap: 21 - 5 on 2016-09-25.
        assert_eq!(
            report.largest_temperature_differences[0],
            DailyValue::new(day("2016-09-25"), 16.0)
        );
    }

    #[test]
    fn test_report_highest_mold_risk_first() {
        let report = analyze_readings(&week(), &AnalysisOptions::default());
        let highest = &report.highest_mold_risk_days;
        assert!(highest.windows(2).all(|w| w[0].value >= w[1].value));
        let lowest = &report.lowest_mold_risk_days;
        assert!(lowest.windows(2).all(|w| w[0].value <= w[1].value));
    }

    #[test]
    fn test_report_average_for_date() {
        let options = AnalysisOptions {
            date: Some(day("2016-09-22")),
            ..AnalysisOptions::default()
        };
        let report = analyze_readings(&week(), &options);
        let avg = report.average_for_date.unwrap();
        assert_eq!(avg.average_temperature, Some(8.0));

        let options = AnalysisOptions {
            date: Some(day("2017-01-01")),
            ..AnalysisOptions::default()
        };
        let report = analyze_readings(&week(), &options);
        assert_eq!(report.average_for_date.unwrap().average_temperature, None);
    }

    #[test]
    fn test_report_without_date_has_no_average() {
        let report = analyze_readings(&week(), &AnalysisOptions::default());
        assert!(report.average_for_date.is_none());
    }

    #[test]
    fn test_report_on_empty_snapshot() {
        let report = analyze_readings(&[], &AnalysisOptions::default());
        assert_eq!(report.metadata.readings_processed, 0);
        assert!(report.warmest_days.is_empty());
        assert!(report.coldest_days.is_empty());
        assert_eq!(report.autumn_onset, None);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = analyze_readings(&week(), &AnalysisOptions::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["location"], "Ute");
        assert_eq!(json["autumn_onset"], "2016-09-21");
        assert!(json["winter_onset"].is_null());
    }

    // ── summarize ─────────────────────────────────────────────────────────────

    #[test]
    fn test_summarize_counts_locations_and_days() {
        let mut readings = week();
        readings.push(Reading::new(
            ts("2016-10-05 08:00:00"),
            Location::Other("Vind".to_string()),
            1.0,
            1,
        ));
        let meta = summarize(&readings);
        assert_eq!(meta.readings_processed, 15);
        assert_eq!(meta.indoor_readings, 7);
        assert_eq!(meta.outdoor_readings, 7);
        assert_eq!(meta.unrecognized_readings, 1);
        assert_eq!(meta.first_day, Some(day("2016-09-20")));
        assert_eq!(meta.last_day, Some(day("2016-10-05")));
        assert_eq!(meta.days_covered, 8);
    }
}
