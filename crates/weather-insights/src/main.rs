mod bootstrap;
mod report;

use anyhow::{Context, Result};
use weather_core::settings::Settings;
use weather_data::analysis::{analyze_readings, AnalysisOptions};
use weather_data::reader::load_readings;

use crate::report::{render_json, TextReport};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Weather Insights v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Location: {}, Report: {}, Top: {}",
        settings.location,
        settings.report,
        settings.top
    );

    let data_path = settings
        .data_file
        .clone()
        .or_else(bootstrap::discover_data_path)
        .with_context(|| {
            format!(
                "no data file given and {} not found; pass --data-file or set WEATHER_DATA_FILE",
                bootstrap::DEFAULT_DATA_FILE
            )
        })?;

    let loaded = load_readings(&data_path)
        .with_context(|| format!("failed to load readings from {}", data_path.display()))?;

    if loaded.readings.is_empty() {
        tracing::warn!("No valid readings in {}", data_path.display());
    }
    if !loaded.row_errors.is_empty() {
        tracing::warn!("{} rows skipped", loaded.row_errors.len());
    }

    let options = AnalysisOptions {
        location: settings.location(),
        date: settings.date,
        top: settings.top(),
    };
    let report = analyze_readings(&loaded.readings, &options);

    match settings.format.as_str() {
        "json" => println!("{}", render_json(&report)?),
        _ => print!("{}", TextReport::new(&report, &settings.report)),
    }

    Ok(())
}
