// ── Mold risk ─────────────────────────────────────────────────────────────────

/// Relative humidity (percent) below which mold cannot grow.
pub const MOLD_HUMIDITY_THRESHOLD: f64 = 78.0;

/// Temperature scale applied to the humidity excess.
pub const MOLD_TEMPERATURE_DIVISOR: f64 = 15.0;

/// Simplified mold-growth index for one day.
///
/// `(avg_humidity - 78) * (avg_temp / 15)`, but exactly `0.0` when the day
/// is below freezing, below the humidity threshold, or the product would be
/// negative.
///
/// # Examples
///
/// ```
/// use weather_core::calculations::mold_risk_index;
///
/// assert!((mold_risk_index(20.0, 90.0) - 16.0).abs() < 1e-9);
/// assert_eq!(mold_risk_index(-1.0, 95.0), 0.0);
/// assert_eq!(mold_risk_index(25.0, 60.0), 0.0);
/// ```
pub fn mold_risk_index(avg_temp: f64, avg_humidity: f64) -> f64 {
    if avg_temp < 0.0 || avg_humidity < MOLD_HUMIDITY_THRESHOLD {
        return 0.0;
    }
    let risk = (avg_humidity - MOLD_HUMIDITY_THRESHOLD) * (avg_temp / MOLD_TEMPERATURE_DIVISOR);
    if risk < 0.0 {
        0.0
    } else {
        risk
    }
}

// ── Means ─────────────────────────────────────────────────────────────────────

/// Arithmetic mean of `sum` over `count` samples; `None` when `count` is 0.
pub fn mean(sum: f64, count: u32) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(sum / f64::from(count))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
