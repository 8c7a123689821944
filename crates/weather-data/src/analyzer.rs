//! Analytics engine over a snapshot of readings.
//!
//! Every operation is a pure function of its input slice: no state survives
//! between calls and the slice is never mutated. Rankings use a stable sort
//! over the chronologically ordered per-day map, so equal values keep date
//! order regardless of how the input was ordered.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;
use weather_core::calculations::mold_risk_index;
use weather_core::models::{DailyValue, Location, Reading};

use crate::aggregator::DailyAggregator;
use crate::heuristics::{detect_divergence, PairedDeltaRule, Signal};
use crate::seasons::{find_onset, Season};

/// Stateless collection of weather analyses.
pub struct WeatherAnalyzer;

impl WeatherAnalyzer {
    // ── Temperature ───────────────────────────────────────────────────────────

    /// Mean temperature at `location` on `date`, or `None` without data.
    pub fn average_temperature_for_date(
        readings: &[Reading],
        date: NaiveDate,
        location: &Location,
    ) -> Option<f64> {
        DailyAggregator::aggregate(
            readings
                .iter()
                .filter(|r| r.location.matches(location) && r.date() == date),
        )
        .get(&date)
        .and_then(|stats| stats.mean_temperature())
    }

    /// Days at `location` ordered warmest first.
    pub fn sort_days_by_temperature(
        readings: &[Reading],
        location: &Location,
    ) -> Vec<DailyValue<f64>> {
        let mut days = DailyAggregator::daily_temperatures(readings, location);
        sort_descending(&mut days);
        debug!("Ranked {} days by {} temperature", days.len(), location);
        days
    }

    // ── Humidity ──────────────────────────────────────────────────────────────

    /// Days at `location` ordered driest first.
    pub fn sort_days_by_humidity(readings: &[Reading], location: &Location) -> Vec<DailyValue<f64>> {
        let mut days = DailyAggregator::daily_humidities(readings, location);
        sort_ascending(&mut days);
        debug!("Ranked {} days by {} humidity", days.len(), location);
        days
    }

    // ── Mold ──────────────────────────────────────────────────────────────────

    /// Days at `location` ordered by mold-risk index, lowest risk first.
    ///
    /// The highest-risk days are at the tail.
    pub fn sort_days_by_mold_risk(
        readings: &[Reading],
        location: &Location,
    ) -> Vec<DailyValue<f64>> {
        let mut days: Vec<DailyValue<f64>> = DailyAggregator::aggregate_location(readings, location)
            .into_iter()
            .filter_map(|(date, stats)| {
                let risk = mold_risk_index(stats.mean_temperature()?, stats.mean_humidity()?);
                Some(DailyValue::new(date, risk))
            })
            .collect();
        sort_ascending(&mut days);
        days
    }

    // ── Seasons ───────────────────────────────────────────────────────────────

    /// First day of `season` according to outdoor daily means.
    pub fn find_season_onset(readings: &[Reading], season: Season) -> Option<NaiveDate> {
        let daily = DailyAggregator::daily_temperatures(readings, &Location::Outdoor);
        let onset = find_onset(&daily, season);
        debug!(
            "Season {} onset over {} outdoor days: {:?}",
            season.name(),
            daily.len(),
            onset
        );
        onset
    }

    /// First day of five consecutive outdoor days below 10 °C.
    pub fn find_meteorological_autumn(readings: &[Reading]) -> Option<NaiveDate> {
        Self::find_season_onset(readings, Season::Autumn)
    }

    /// First day of five consecutive outdoor days at or below 0 °C.
    pub fn find_meteorological_winter(readings: &[Reading]) -> Option<NaiveDate> {
        Self::find_season_onset(readings, Season::Winter)
    }

    // ── Indoor / outdoor comparisons ──────────────────────────────────────────

    /// Estimated minutes per day the balcony door stood open, most first.
    ///
    /// Consecutive indoor samples at most 15 minutes apart where indoor
    /// temperature fell while outdoor temperature rose count as "open" for
    /// the whole interval. Days with no such interval are omitted.
    pub fn balcony_door_open_minutes(readings: &[Reading]) -> Vec<DailyValue<i64>> {
        let indoor = Signal::first_seen(readings, &Location::Indoor, |r| r.temperature);
        let outdoor = Signal::first_seen(readings, &Location::Outdoor, |r| r.temperature);

        let intervals = detect_divergence(&indoor, &outdoor, &PairedDeltaRule::balcony_door());

        let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for interval in &intervals {
            *per_day.entry(interval.day()).or_insert(0) += interval.whole_minutes();
        }

        let mut days: Vec<DailyValue<i64>> = per_day
            .into_iter()
            .filter(|&(_, minutes)| minutes != 0)
            .map(|(date, minutes)| DailyValue::new(date, minutes))
            .collect();
        days.sort_by(|a, b| b.value.cmp(&a.value));

        debug!(
            "Balcony heuristic: {} intervals over {} days",
            intervals.len(),
            days.len()
        );
        days
    }

    /// Days ordered by mean absolute indoor/outdoor temperature difference,
    /// largest first.
    ///
    /// Readings are paired on exact timestamp equality; every indoor reading
    /// is paired with every outdoor reading at the same instant.
    pub fn sort_days_by_temperature_difference(readings: &[Reading]) -> Vec<DailyValue<f64>> {
        let mut outdoor: HashMap<NaiveDateTime, Vec<f64>> = HashMap::new();
        for r in readings.iter().filter(|r| r.location.matches(&Location::Outdoor)) {
            outdoor.entry(r.timestamp).or_default().push(r.temperature);
        }

        let diffs = readings
            .iter()
            .filter(|r| r.location.matches(&Location::Indoor))
            .filter_map(|inside| {
                outdoor
                    .get(&inside.timestamp)
                    .map(|temps| (inside, temps))
            })
            .flat_map(|(inside, temps)| {
                temps
                    .iter()
                    .map(move |&outside| (inside.timestamp, (inside.temperature - outside).abs()))
            });

        let mut days = DailyAggregator::daily_means(diffs);
        sort_descending(&mut days);
        days
    }
}

// ── Ordering helpers ──────────────────────────────────────────────────────────

fn sort_ascending(days: &mut [DailyValue<f64>]) {
    days.sort_by(|a, b| a.value.total_cmp(&b.value));
}

fn sort_descending(days: &mut [DailyValue<f64>]) {
    days.sort_by(|a, b| b.value.total_cmp(&a.value));
}

// ── Tests ─────────────────────────────────────────────────────────────────────
