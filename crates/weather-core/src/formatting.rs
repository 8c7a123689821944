/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use weather_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-12.25, 1), "-12.3");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by an ULP-scaled epsilon so exact midpoints round away from zero.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // "0.50" -> ".50"
        format!("{}{}", grouped, &frac_str[1..])
    };

    // Avoid "-0.0" once rounding has eaten the magnitude.
    if negative && rounded != 0.0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a temperature in degrees Celsius with one decimal.
///
/// ```
/// use weather_core::formatting::format_temperature;
///
/// assert_eq!(format_temperature(21.04), "21.0 °C");
/// assert_eq!(format_temperature(-3.56), "-3.6 °C");
/// ```
pub fn format_temperature(celsius: f64) -> String {
    format!("{} °C", format_number(celsius, 1))
}

/// Format a relative humidity figure with one decimal.
pub fn format_percentage(value: f64) -> String {
    format!("{}%", format_number(value, 1))
}

/// Format a whole number of minutes as `"45m"`, `"3h"` or `"3h 45m"`.
///
/// ```
/// use weather_core::formatting::format_minutes;
///
/// assert_eq!(format_minutes(45), "45m");
/// assert_eq!(format_minutes(180), "3h");
/// assert_eq!(format_minutes(225), "3h 45m");
/// ```
pub fn format_minutes(minutes: i64) -> String {
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        let hours = minutes / 60;
        let mins = minutes % 60;
        if mins == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, mins)
        }
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
