use std::f64::consts::PI;
use std::ops::Range;

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use super::model::ForecastModel;
use crate::error::EngineError;
use crate::random::{RandomSource, round_to};
use crate::series::clock;

/// One model's value at one timestamp.
///
/// Historical rows (`relative_hour < 0`) always carry `actual`; future rows
/// never do.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSample {
    pub timestamp: NaiveDateTime,
    /// Hours from the generation hour; negative is history.
    pub relative_hour: i64,
    pub actual: Option<f64>,
    pub predicted: f64,
    pub city_id: String,
    pub model: ForecastModel,
}

impl ForecastSample {
    pub fn is_historical(&self) -> bool {
        self.actual.is_some()
    }
}

/// Span simulated around the generation hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastWindow {
    /// Hours of history with actuals, ending just before now.
    pub history_hours: u32,
    /// Hours of prediction-only horizon, starting at now.
    pub horizon_hours: u32,
}

impl Default for ForecastWindow {
    fn default() -> Self {
        Self {
            history_hours: 72,
            horizon_hours: 24,
        }
    }
}

impl ForecastWindow {
    /// Longest history or horizon accepted: 30 days.
    pub const MAX_HOURS: u32 = 30 * 24;

    /// Checks both spans against [`Self::MAX_HOURS`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidArgument`] naming the oversized span.
    pub fn check(&self) -> Result<(), EngineError> {
        if self.history_hours > Self::MAX_HOURS {
            return Err(EngineError::invalid(
                "history_hours",
                format!("must be <= {}", Self::MAX_HOURS),
            ));
        }
        if self.horizon_hours > Self::MAX_HOURS {
            return Err(EngineError::invalid(
                "horizon_hours",
                format!("must be <= {}", Self::MAX_HOURS),
            ));
        }
        Ok(())
    }

    /// Relative hours covered, `[-history, horizon)`.
    pub fn hours(&self) -> Range<i64> {
        -i64::from(self.history_hours)..i64::from(self.horizon_hours)
    }

    /// Number of distinct timestamps.
    pub fn len(&self) -> usize {
        let hours = u64::from(self.history_hours) + u64::from(self.horizon_hours);
        usize::try_from(hours).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Daily demand shape shared by actuals and future baselines.
fn base_signal(relative_hour: i64) -> f64 {
    500.0 + 300.0 * ((relative_hour as f64 + 24.0) * PI / 12.0).sin()
}

/// Simulates history and horizon rows for every [`ForecastModel`].
#[derive(Debug, Clone, Copy)]
pub struct ForecastSimulator {
    now: NaiveDateTime,
    window: ForecastWindow,
}

impl ForecastSimulator {
    /// Simulator over the default `[-72h, +24h)` window around `now`'s hour.
    pub fn new(now: NaiveDateTime) -> Self {
        Self::with_window(now, ForecastWindow::default())
    }

    pub fn with_window(now: NaiveDateTime, window: ForecastWindow) -> Self {
        Self {
            now: clock::truncate_to_hour(now),
            window,
        }
    }

    pub fn window(&self) -> ForecastWindow {
        self.window
    }

    /// Generates one row per model per hour, timestamp ascending and models
    /// in declaration order within a timestamp.
    ///
    /// History: the actual is the base signal plus `U(-50, 50)`, shared by
    /// all models; each model predicts `actual * (1 + U(-e, e))` with its
    /// own error factor. Horizon: each model predicts the base signal plus
    /// its waveform plus `U(-s, s)` noise. Values are rounded to two decimals.
    pub fn generate(&self, city_id: &str, rng: &mut impl RandomSource) -> Vec<ForecastSample> {
        let reserved = self.window.len().min(2 * ForecastWindow::MAX_HOURS as usize);
        let mut samples = Vec::with_capacity(reserved * ForecastModel::ALL.len());

        for relative_hour in self.window.hours() {
            let Some(timestamp) = self.now.checked_add_signed(Duration::hours(relative_hour))
            else {
                debug!(relative_hour, "forecast hour outside the calendar range");
                continue;
            };
            let base = base_signal(relative_hour);

            if relative_hour < 0 {
                let actual = base + rng.symmetric(50.0);
                for model in ForecastModel::ALL {
                    let e = model.profile().historical_error_factor;
                    let predicted = actual * (1.0 + rng.symmetric(e));
                    samples.push(ForecastSample {
                        timestamp,
                        relative_hour,
                        actual: Some(round_to(actual, 2)),
                        predicted: round_to(predicted, 2),
                        city_id: city_id.to_string(),
                        model,
                    });
                }
            } else {
                let hour = relative_hour as f64;
                for model in ForecastModel::ALL {
                    let profile = model.profile();
                    let predicted = base
                        + profile.waveform_at(hour)
                        + rng.symmetric(profile.future_noise_scale);
                    samples.push(ForecastSample {
                        timestamp,
                        relative_hour,
                        actual: None,
                        predicted: round_to(predicted, 2),
                        city_id: city_id.to_string(),
                        model,
                    });
                }
            }
        }

        debug!(
            city_id,
            history_hours = self.window.history_hours,
            horizon_hours = self.window.horizon_hours,
            samples = samples.len(),
            "generated forecast samples"
        );
        samples
    }
}

/// All rows of one model, history and horizon, in input order.
pub fn for_model(samples: &[ForecastSample], model: ForecastModel) -> Vec<&ForecastSample> {
    samples.iter().filter(|s| s.model == model).collect()
}
