//! Per-day aggregation of readings.
//!
//! Every ranking is built on the same fold: filter, group by calendar day,
//! reduce each day to arithmetic means. Days without matching readings never
//! produce a row.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use weather_core::calculations::mean;
use weather_core::models::{DailyValue, Location, Reading};

// ── DailyStats ────────────────────────────────────────────────────────────────

/// Running sums for one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyStats {
    pub temperature_sum: f64,
    /// Integer sum, so the humidity mean does not depend on reading order.
    pub humidity_sum: i64,
    pub count: u32,
}

impl DailyStats {
    /// Add a single reading to the running totals.
    pub fn add_reading(&mut self, reading: &Reading) {
        self.temperature_sum += reading.temperature;
        self.humidity_sum += i64::from(reading.humidity);
        self.count += 1;
    }

    /// Mean temperature of the day, `None` if nothing was added.
    pub fn mean_temperature(&self) -> Option<f64> {
        mean(self.temperature_sum, self.count)
    }

    /// Mean humidity of the day, `None` if nothing was added.
    pub fn mean_humidity(&self) -> Option<f64> {
        mean(self.humidity_sum as f64, self.count)
    }
}

// ── DailyAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that groups readings by calendar day.
pub struct DailyAggregator;

impl DailyAggregator {
    /// Fold `readings` into per-day stats, keyed and ordered by date.
    pub fn aggregate<'a, I>(readings: I) -> BTreeMap<NaiveDate, DailyStats>
    where
        I: IntoIterator<Item = &'a Reading>,
    {
        let mut map: BTreeMap<NaiveDate, DailyStats> = BTreeMap::new();
        for reading in readings {
            map.entry(reading.date()).or_default().add_reading(reading);
        }
        map
    }

    /// [`DailyAggregator::aggregate`] restricted to one location.
    ///
    /// Unrecognised locations yield an empty map.
    pub fn aggregate_location(
        readings: &[Reading],
        location: &Location,
    ) -> BTreeMap<NaiveDate, DailyStats> {
        Self::aggregate(readings.iter().filter(|r| r.location.matches(location)))
    }

    /// Chronological `(day, mean temperature)` series for one location.
    pub fn daily_temperatures(readings: &[Reading], location: &Location) -> Vec<DailyValue<f64>> {
        Self::aggregate_location(readings, location)
            .into_iter()
            .filter_map(|(date, stats)| Some(DailyValue::new(date, stats.mean_temperature()?)))
            .collect()
    }

    /// Chronological `(day, mean humidity)` series for one location.
    pub fn daily_humidities(readings: &[Reading], location: &Location) -> Vec<DailyValue<f64>> {
        Self::aggregate_location(readings, location)
            .into_iter()
            .filter_map(|(date, stats)| Some(DailyValue::new(date, stats.mean_humidity()?)))
            .collect()
    }

    /// Per-day mean of arbitrary timestamped samples, ordered by date.
    pub fn daily_means<I>(samples: I) -> Vec<DailyValue<f64>>
    where
        I: IntoIterator<Item = (NaiveDateTime, f64)>,
    {
        let mut sums: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
        for (timestamp, value) in samples {
            let slot = sums.entry(timestamp.date()).or_insert((0.0, 0));
            slot.0 += value;
            slot.1 += 1;
        }
        sums.into_iter()
            .filter_map(|(date, (sum, count))| Some(DailyValue::new(date, mean(sum, count)?)))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn reading(at: &str, location: Location, temp: f64, hum: i32) -> Reading {
        Reading::new(ts(at), location, temp, hum)
    }

    // ── aggregate ─────────────────────────────────────────────────────────────

    #[test]
    fn test_aggregate_groups_by_date() {
        let readings = vec![
            reading("2016-10-01 08:00:00", Location::Outdoor, 10.0, 80),
            reading("2016-10-01 20:00:00", Location::Outdoor, 14.0, 60),
            reading("2016-10-02 10:00:00", Location::Outdoor, 5.0, 90),
        ];
        let map = DailyAggregator::aggregate(&readings);

        assert_eq!(map.len(), 2);
        let first = map[&day("2016-10-01")];
        assert_eq!(first.count, 2);
        assert_eq!(first.mean_temperature(), Some(12.0));
        assert_eq!(first.mean_humidity(), Some(70.0));
        assert_eq!(map[&day("2016-10-02")].count, 1);
    }

    #[test]
    fn test_aggregate_empty() {
        let readings: Vec<Reading> = Vec::new();
        assert!(DailyAggregator::aggregate(&readings).is_empty());
    }

    #[test]
    fn test_aggregate_location_filters() {
        let readings = vec![
            reading("2016-10-01 08:00:00", Location::Outdoor, 10.0, 80),
            reading("2016-10-01 08:00:00", Location::Indoor, 22.0, 40),
            reading("2016-10-02 08:00:00", Location::Indoor, 21.0, 41),
        ];
        let map = DailyAggregator::aggregate_location(&readings, &Location::Outdoor);
        assert_eq!(map.len(), 1);
        assert_eq!(map[&day("2016-10-01")].mean_temperature(), Some(10.0));
    }

    #[test]
    fn test_aggregate_location_ignores_unrecognised_labels() {
        let garage = Location::Other("Garage".to_string());
        let readings = vec![reading("2016-10-01 08:00:00", garage.clone(), 3.0, 50)];
        assert!(DailyAggregator::aggregate_location(&readings, &garage).is_empty());
    }

    // ── daily series ──────────────────────────────────────────────────────────

    #[test]
    fn test_daily_temperatures_sorted_by_date() {
        let readings = vec![
            reading("2016-10-03 08:00:00", Location::Outdoor, 3.0, 80),
            reading("2016-10-01 08:00:00", Location::Outdoor, 1.0, 80),
            reading("2016-10-02 08:00:00", Location::Outdoor, 2.0, 80),
        ];
        let series = DailyAggregator::daily_temperatures(&readings, &Location::Outdoor);
        let dates: Vec<NaiveDate> = series.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![day("2016-10-01"), day("2016-10-02"), day("2016-10-03")]
        );
        assert_eq!(series[0].value, 1.0);
    }

    #[test]
    fn test_daily_humidities_mean() {
        let readings = vec![
            reading("2016-10-01 08:00:00", Location::Indoor, 20.0, 41),
            reading("2016-10-01 09:00:00", Location::Indoor, 20.0, 42),
        ];
        let series = DailyAggregator::daily_humidities(&readings, &Location::Indoor);
        assert_eq!(series, vec![DailyValue::new(day("2016-10-01"), 41.5)]);
    }

    #[test]
    fn test_daily_means_of_samples() {
        let samples = vec![
            (ts("2016-10-02 01:00:00"), 4.0),
            (ts("2016-10-01 01:00:00"), 1.0),
            (ts("2016-10-01 02:00:00"), 3.0),
        ];
        let series = DailyAggregator::daily_means(samples);
        assert_eq!(
            series,
            vec![
                DailyValue::new(day("2016-10-01"), 2.0),
                DailyValue::new(day("2016-10-02"), 4.0),
            ]
        );
    }
}
