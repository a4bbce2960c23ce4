//! Hourly demand and weather records.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Electricity demand for one city and hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandSample {
    pub timestamp: NaiveDateTime,
    /// Demand in kWh, never negative.
    #[serde(rename = "demandKWh")]
    pub demand_kwh: f64,
    pub city_id: String,
}

/// Weather observation for one city and hour, aligned 1:1 with
/// [`DemandSample`] timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    pub timestamp: NaiveDateTime,
    #[serde(rename = "temperatureF")]
    pub temperature_f: f64,
    /// Relative humidity, clamped to `[0, 100]`.
    pub humidity_pct: f64,
    /// Never negative.
    pub wind_speed_mph: f64,
    /// Never negative.
    pub precipitation: f64,
    pub city_id: String,
}
