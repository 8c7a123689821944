//! Plain-text and JSON rendering of a [`WeatherReport`].

use std::fmt;

use weather_core::formatting::{format_minutes, format_number, format_percentage, format_temperature};
use weather_core::models::DailyValue;
use weather_data::analysis::WeatherReport;

/// Serialise the report as pretty-printed JSON.
pub fn render_json(report: &WeatherReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Displays one section (or all sections) of a report as text.
pub struct TextReport<'a> {
    report: &'a WeatherReport,
    section: &'a str,
}

impl<'a> TextReport<'a> {
    pub fn new(report: &'a WeatherReport, section: &'a str) -> Self {
        Self { report, section }
    }

    fn shows(&self, name: &str) -> bool {
        self.section == "all" || self.section == name
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;
        let where_ = r.location.to_string();

        if self.shows("summary") {
            write_summary(f, r)?;
        }
        if self.shows("temperature") {
            write_ranking(f, &format!("Warmest days ({})", where_), &r.warmest_days, format_temperature)?;
            write_ranking(f, &format!("Coldest days ({})", where_), &r.coldest_days, format_temperature)?;
        }
        if self.shows("humidity") {
            write_ranking(f, &format!("Driest days ({})", where_), &r.driest_days, format_percentage)?;
            write_ranking(f, &format!("Most humid days ({})", where_), &r.most_humid_days, format_percentage)?;
        }
        if self.shows("mold") {
            let risk = |v: f64| format_number(v, 2);
            write_ranking(f, &format!("Highest mold risk ({})", where_), &r.highest_mold_risk_days, risk)?;
            write_ranking(f, &format!("Lowest mold risk ({})", where_), &r.lowest_mold_risk_days, risk)?;
        }
        if self.shows("seasons") {
            writeln!(f, "Meteorological seasons (outdoor)")?;
            write_onset(f, "Autumn", r.autumn_onset)?;
            write_onset(f, "Winter", r.winter_onset)?;
            writeln!(f)?;
        }
        if self.shows("balcony") {
            write_ranking(f, "Balcony door open (estimated)", &r.balcony_door_open, format_minutes)?;
        }
        if self.shows("difference") {
            write_ranking(
                f,
                "Largest indoor/outdoor difference",
                &r.largest_temperature_differences,
                format_temperature,
            )?;
        }
        Ok(())
    }
}

fn write_summary(f: &mut fmt::Formatter<'_>, r: &WeatherReport) -> fmt::Result {
    let m = &r.metadata;
    writeln!(f, "Summary")?;
    writeln!(
        f,
        "  {} readings ({} indoor, {} outdoor, {} unrecognised)",
        m.readings_processed, m.indoor_readings, m.outdoor_readings, m.unrecognized_readings
    )?;
    match (m.first_day, m.last_day) {
        (Some(first), Some(last)) => {
            writeln!(f, "  {} to {}, {} days with data", first, last, m.days_covered)?
        }
        _ => writeln!(f, "  no data")?,
    }
    if let Some(avg) = &r.average_for_date {
        match avg.average_temperature {
            Some(t) => writeln!(
                f,
                "  Average {} temperature on {}: {}",
                avg.location,
                avg.date,
                format_temperature(t)
            )?,
            None => writeln!(f, "  Average {} temperature on {}: no data", avg.location, avg.date)?,
        }
    }
    writeln!(f)
}

fn write_ranking<T, F>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    rows: &[DailyValue<T>],
    format_value: F,
) -> fmt::Result
where
    T: Copy,
    F: Fn(T) -> String,
{
    writeln!(f, "{}", title)?;
    if rows.is_empty() {
        writeln!(f, "  no data")?;
    }
    for (i, row) in rows.iter().enumerate() {
        writeln!(f, "  {:>2}. {}  {}", i + 1, row.date, format_value(row.value))?;
    }
    writeln!(f)
}

fn write_onset(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    onset: Option<chrono::NaiveDate>,
) -> fmt::Result {
    match onset {
        Some(date) => writeln!(f, "  {}: {}", name, date),
        None => writeln!(f, "  {}: not found", name),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use weather_core::models::{Location, Reading};
    use weather_data::analysis::{analyze_readings, AnalysisOptions};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_report(date: Option<NaiveDate>) -> WeatherReport {
        let at = |d: &str, h: u32, m: u32| day(d).and_hms_opt(h, m, 0).unwrap();
        let readings = vec![
            Reading::new(at("2016-10-01", 10, 0), Location::Indoor, 22.0, 40),
            Reading::new(at("2016-10-01", 10, 10), Location::Indoor, 21.0, 40),
            Reading::new(at("2016-10-01", 10, 0), Location::Outdoor, 5.0, 85),
            Reading::new(at("2016-10-01", 10, 10), Location::Outdoor, 6.0, 85),
        ];
        let options = AnalysisOptions {
            date,
            ..AnalysisOptions::default()
        };
        analyze_readings(&readings, &options)
    }

    #[test]
    fn test_text_all_sections() {
        let text = TextReport::new(&sample_report(None), "all").to_string();
        assert!(text.contains("Summary"));
        assert!(text.contains("4 readings (2 indoor, 2 outdoor, 0 unrecognised)"));
        assert!(text.contains("Warmest days (outdoor)"));
        assert!(text.contains("5.5 °C"));
        assert!(text.contains("Autumn: not found"));
        assert!(text.contains("2016-10-01  10m"));
        assert!(text.contains("Largest indoor/outdoor difference"));
    }

    #[test]
    fn test_text_single_section() {
        let text = TextReport::new(&sample_report(None), "balcony").to_string();
        assert!(text.starts_with("Balcony door open (estimated)"));
        assert!(!text.contains("Summary"));
    }

    #[test]
    fn test_text_average_for_missing_date() {
        let text = TextReport::new(&sample_report(Some(day("2017-01-01"))), "summary").to_string();
        assert!(text.contains("Average outdoor temperature on 2017-01-01: no data"));
    }

    #[test]
    fn test_text_average_for_present_date() {
        let text = TextReport::new(&sample_report(Some(day("2016-10-01"))), "summary").to_string();
        assert!(text.contains("Average outdoor temperature on 2016-10-01: 5.5 °C"));
    }

    #[test]
    fn test_json_output() {
        let json = render_json(&sample_report(None)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["balcony_door_open"][0]["value"], 10);
        assert_eq!(value["balcony_door_open"][0]["date"], "2016-10-01");
    }
}
