//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use city_demand_sim::forecast::{ForecastModel, ForecastSample};

/// Fixed generation hour: Wednesday 2024-06-12 09:00.
pub fn anchor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 12)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid anchor timestamp")
}

/// Historical rows for `model` whose predictions all miss by exactly `error`.
///
/// Actual values are taken from `actuals`, one hour apart, ending an hour
/// before [`anchor`].
pub fn known_error_samples(model: ForecastModel, actuals: &[f64], error: f64) -> Vec<ForecastSample> {
    let n = actuals.len() as i64;
    actuals
        .iter()
        .zip(0_i64..)
        .map(|(&actual, i)| {
            let relative_hour = i - n;
            ForecastSample {
                timestamp: anchor() + Duration::hours(relative_hour),
                relative_hour,
                actual: Some(actual),
                predicted: actual + error,
                city_id: "nyc".to_string(),
                model,
            }
        })
        .collect()
}

/// A horizon row, which carries no actual.
pub fn future_sample(model: ForecastModel, relative_hour: i64, predicted: f64) -> ForecastSample {
    ForecastSample {
        timestamp: anchor() + Duration::hours(relative_hour),
        relative_hour,
        actual: None,
        predicted,
        city_id: "nyc".to_string(),
        model,
    }
}
