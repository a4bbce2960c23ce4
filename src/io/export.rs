//! CSV export for generated demand, weather and forecast collections.
//!
//! Column layout is a demo-harness convenience, not a stable interchange
//! format.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::forecast::ForecastSample;
use crate::series::{DemandSample, WeatherSample};

/// Timestamp layout used in every CSV column, e.g. `2024-06-09T13:00:00`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DEMAND_HEADER: [&str; 3] = ["timestamp", "city_id", "demand_kwh"];

const WEATHER_HEADER: [&str; 6] = [
    "timestamp",
    "city_id",
    "temperature_f",
    "humidity_pct",
    "wind_speed_mph",
    "precipitation",
];

const FORECAST_HEADER: [&str; 6] = [
    "timestamp",
    "relative_hour",
    "city_id",
    "model",
    "actual",
    "predicted",
];

/// Exports demand samples to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_demand_csv(samples: &[DemandSample], path: &Path) -> io::Result<()> {
    write_demand_csv(samples, io::BufWriter::new(File::create(path)?))
}

/// Writes demand samples as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_demand_csv(samples: &[DemandSample], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(DEMAND_HEADER)?;

    for s in samples {
        wtr.write_record(&[
            s.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            s.city_id.clone(),
            format!("{:.2}", s.demand_kwh),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports weather samples to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_weather_csv(samples: &[WeatherSample], path: &Path) -> io::Result<()> {
    write_weather_csv(samples, io::BufWriter::new(File::create(path)?))
}

/// Writes weather samples as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_weather_csv(samples: &[WeatherSample], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(WEATHER_HEADER)?;

    for s in samples {
        wtr.write_record(&[
            s.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            s.city_id.clone(),
            format!("{:.1}", s.temperature_f),
            format!("{:.1}", s.humidity_pct),
            format!("{:.1}", s.wind_speed_mph),
            format!("{:.2}", s.precipitation),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports forecast samples to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_forecast_csv(samples: &[ForecastSample], path: &Path) -> io::Result<()> {
    write_forecast_csv(samples, io::BufWriter::new(File::create(path)?))
}

/// Writes forecast samples as CSV to any writer.
///
/// Horizon rows leave the `actual` column empty.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_forecast_csv(samples: &[ForecastSample], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(FORECAST_HEADER)?;

    for s in samples {
        wtr.write_record(&[
            s.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            s.relative_hour.to_string(),
            s.city_id.clone(),
            s.model.name().to_string(),
            s.actual.map(|a| format!("{a:.2}")).unwrap_or_default(),
            format!("{:.2}", s.predicted),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
