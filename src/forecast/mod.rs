//! Multi-model forecast simulation and error metrics.

pub mod metrics;
pub mod model;
mod simulator;

pub use metrics::{ErrorMetrics, ForecastError, MetricsCalculator, ModelMetrics, error_series};
pub use model::{ForecastModel, ModelProfile, Waveform};
pub use simulator::{ForecastSample, ForecastSimulator, ForecastWindow, for_model};
