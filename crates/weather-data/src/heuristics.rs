//! Windowed pairwise comparison of two signals.
//!
//! An event is reported for every pair of consecutive primary samples, no
//! more than `max_gap` apart, where the primary signal moved one way and
//! the secondary signal moved the configured way between the same two
//! instants. The balcony-door heuristic is one instance: indoor falling
//! while outdoor rises within 15 minutes.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use weather_core::models::{Location, Reading};

// ── Direction ─────────────────────────────────────────────────────────────────

/// Required sign of a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Strictly positive change.
    Rising,
    /// Strictly negative change.
    Falling,
}

impl Direction {
    pub fn matches(self, delta: f64) -> bool {
        match self {
            Direction::Rising => delta > 0.0,
            Direction::Falling => delta < 0.0,
        }
    }
}

// ── Signal ────────────────────────────────────────────────────────────────────

/// One value per exact timestamp, ordered by time.
#[derive(Debug, Clone, Default)]
pub struct Signal {
    values: BTreeMap<NaiveDateTime, f64>,
}

impl Signal {
    /// Build a signal from the readings at `location`.
    ///
    /// When the same timestamp occurs more than once, the first reading in
    /// input order wins and later ones are dropped.
    pub fn first_seen<F>(readings: &[Reading], location: &Location, metric: F) -> Self
    where
        F: Fn(&Reading) -> f64,
    {
        let mut values = BTreeMap::new();
        for reading in readings.iter().filter(|r| r.location.matches(location)) {
            values.entry(reading.timestamp).or_insert_with(|| metric(reading));
        }
        Self { values }
    }

    pub fn get(&self, timestamp: &NaiveDateTime) -> Option<f64> {
        self.values.get(timestamp).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distinct timestamps in chronological order.
    pub fn timestamps(&self) -> impl Iterator<Item = &NaiveDateTime> {
        self.values.keys()
    }
}

impl FromIterator<(NaiveDateTime, f64)> for Signal {
    /// Collect samples; the first value for a timestamp wins.
    fn from_iter<I: IntoIterator<Item = (NaiveDateTime, f64)>>(iter: I) -> Self {
        let mut values = BTreeMap::new();
        for (timestamp, value) in iter {
            values.entry(timestamp).or_insert(value);
        }
        Self { values }
    }
}

// ── PairedDeltaRule ───────────────────────────────────────────────────────────

/// Declarative description of a divergence event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairedDeltaRule {
    /// Pairs further apart than this are treated as a data gap.
    pub max_gap: TimeDelta,
    /// Required movement of the primary signal.
    pub primary: Direction,
    /// Required movement of the secondary signal.
    pub secondary: Direction,
}

impl PairedDeltaRule {
    /// Indoor cooling while outdoor warming, at most 15 minutes apart.
    pub fn balcony_door() -> Self {
        Self {
            max_gap: TimeDelta::minutes(15),
            primary: Direction::Falling,
            secondary: Direction::Rising,
        }
    }
}

/// A `(previous, current)` pair of instants that matched a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivergenceInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DivergenceInterval {
    /// Elapsed time truncated to whole minutes.
    pub fn whole_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// The day an interval is booked to: the day of its later instant.
    pub fn day(&self) -> NaiveDate {
        self.end.date()
    }
}

/// Walk consecutive `primary` timestamps and return every interval where
/// both signals moved as `rule` requires.
///
/// A pair is skipped when it spans more than `rule.max_gap`, or when the
/// secondary signal lacks a value at either instant.
pub fn detect_divergence(
    primary: &Signal,
    secondary: &Signal,
    rule: &PairedDeltaRule,
) -> Vec<DivergenceInterval> {
    let timestamps: Vec<NaiveDateTime> = primary.timestamps().copied().collect();
    let mut intervals = Vec::new();

    for pair in timestamps.windows(2) {
        let (previous, current) = (pair[0], pair[1]);

        if current - previous > rule.max_gap {
            continue;
        }

        let (Some(p_prev), Some(p_cur), Some(s_prev), Some(s_cur)) = (
            primary.get(&previous),
            primary.get(&current),
            secondary.get(&previous),
            secondary.get(&current),
        ) else {
            continue;
        };

        if rule.primary.matches(p_cur - p_prev) && rule.secondary.matches(s_cur - s_prev) {
            intervals.push(DivergenceInterval {
                start: previous,
                end: current,
            });
        }
    }

    intervals
}

// ── Tests ─────────────────────────────────────────────────────────────────────
