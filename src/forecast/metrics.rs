//! Post-hoc forecast error metrics from simulated samples.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::model::ForecastModel;
use super::simulator::ForecastSample;

/// Aggregate error of one model over the historical rows.
///
/// All zeros doubles as the "no data" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ErrorMetrics {
    /// Mean absolute error (kWh).
    pub mae: f64,
    /// Root-mean-square error (kWh).
    pub rmse: f64,
    /// Mean absolute percentage error (%), denominator floored at 1.
    pub mape: f64,
}

impl fmt::Display for ErrorMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MAE {:.2} kWh, RMSE {:.2} kWh, MAPE {:.2}%",
            self.mae, self.rmse, self.mape
        )
    }
}

/// One row of the model comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelMetrics {
    pub model: ForecastModel,
    #[serde(flatten)]
    pub metrics: ErrorMetrics,
}

/// Signed error of one historical row, for the error-analysis chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastError {
    pub timestamp: NaiveDateTime,
    /// `predicted - actual` (kWh); positive is over-forecast.
    pub error: f64,
}

/// Computes error metrics over paired actual/predicted rows.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// MAE, RMSE and MAPE over the rows of `model` that carry an actual.
    ///
    /// Returns all zeros when no row qualifies.
    pub fn compute(&self, samples: &[ForecastSample], model: ForecastModel) -> ErrorMetrics {
        let mut n = 0_usize;
        let mut abs_sum = 0.0_f64;
        let mut sq_sum = 0.0_f64;
        let mut pct_sum = 0.0_f64;

        for s in samples.iter().filter(|s| s.model == model) {
            let Some(actual) = s.actual else {
                continue;
            };
            let err = s.predicted - actual;
            n += 1;
            abs_sum += err.abs();
            sq_sum += err * err;
            pct_sum += err.abs() / actual.abs().max(1.0);
        }

        if n == 0 {
            return ErrorMetrics::default();
        }

        let n = n as f64;
        ErrorMetrics {
            mae: abs_sum / n,
            rmse: (sq_sum / n).sqrt(),
            mape: 100.0 * pct_sum / n,
        }
    }

    /// One row per model, in declaration order.
    pub fn compare(&self, samples: &[ForecastSample]) -> Vec<ModelMetrics> {
        ForecastModel::ALL
            .into_iter()
            .map(|model| ModelMetrics {
                model,
                metrics: self.compute(samples, model),
            })
            .collect()
    }
}

/// Signed errors of `model`'s historical rows, in input order.
pub fn error_series(samples: &[ForecastSample], model: ForecastModel) -> Vec<ForecastError> {
    samples
        .iter()
        .filter(|s| s.model == model)
        .filter_map(|s| {
            s.actual.map(|actual| ForecastError {
                timestamp: s.timestamp,
                error: s.predicted - actual,
            })
        })
        .collect()
}
