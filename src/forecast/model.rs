//! Forecast model identities and their simulated error profiles.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::EngineError;

/// The fixed set of simulated forecast models, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ForecastModel {
    #[serde(rename = "ARIMA")]
    Arima,
    #[serde(rename = "XGBoost")]
    XgBoost,
    #[serde(rename = "LSTM")]
    Lstm,
    Linear,
    Polynomial,
    RandomForest,
    Ensemble,
}

impl ForecastModel {
    /// Every model in declaration order.
    pub const ALL: [ForecastModel; 7] = [
        Self::Arima,
        Self::XgBoost,
        Self::Lstm,
        Self::Linear,
        Self::Polynomial,
        Self::RandomForest,
        Self::Ensemble,
    ];

    /// Canonical short name, e.g. `"XGBoost"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Arima => "ARIMA",
            Self::XgBoost => "XGBoost",
            Self::Lstm => "LSTM",
            Self::Linear => "Linear",
            Self::Polynomial => "Polynomial",
            Self::RandomForest => "RandomForest",
            Self::Ensemble => "Ensemble",
        }
    }

    /// Long label for model pickers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Linear => "Linear Regression",
            Self::Polynomial => "Polynomial Regression",
            Self::RandomForest => "Random Forest",
            other => other.name(),
        }
    }

    /// Simulation profile for this model.
    pub fn profile(self) -> &'static ModelProfile {
        &PROFILES[self as usize]
    }
}

impl fmt::Display for ForecastModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ForecastModel {
    type Err = EngineError;

    /// Accepts canonical names and labels, ignoring case, spaces, `_`, `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "arima" => Ok(Self::Arima),
            "xgboost" => Ok(Self::XgBoost),
            "lstm" => Ok(Self::Lstm),
            "linear" | "linearregression" => Ok(Self::Linear),
            "polynomial" | "polynomialregression" => Ok(Self::Polynomial),
            "randomforest" => Ok(Self::RandomForest),
            "ensemble" => Ok(Self::Ensemble),
            _ => Err(EngineError::invalid(
                "model",
                format!("unknown forecast model \"{s}\""),
            )),
        }
    }
}

/// Deterministic periodic offset added to a model's future predictions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waveform {
    /// Peak offset (kWh).
    pub amplitude: f64,
    /// Half-period in hours: the argument is `(hour + phase) * π / period`.
    pub period_hours: f64,
    /// Phase shift in hours.
    pub phase_hours: f64,
}

impl Waveform {
    pub fn at(&self, hour: f64) -> f64 {
        self.amplitude * ((hour + self.phase_hours) * PI / self.period_hours).sin()
    }
}

/// How a model's simulated predictions deviate from the signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelProfile {
    pub model: ForecastModel,
    /// History: `predicted = actual * (1 + U(-e, e))`.
    pub historical_error_factor: f64,
    /// Future: half-width of the uniform noise added to the prediction (kWh).
    pub future_noise_scale: f64,
    /// Future: model-specific systematic wiggle, if any.
    pub future_waveform: Option<Waveform>,
}

impl ModelProfile {
    /// Deterministic part of the future prediction offset at `hour`.
    pub fn waveform_at(&self, hour: f64) -> f64 {
        self.future_waveform.map_or(0.0, |w| w.at(hour))
    }
}

const fn wave(amplitude: f64, period_hours: f64, phase_hours: f64) -> Option<Waveform> {
    Some(Waveform {
        amplitude,
        period_hours,
        phase_hours,
    })
}

/// Indexed by `ForecastModel as usize`.
static PROFILES: [ModelProfile; 7] = [
    ModelProfile {
        model: ForecastModel::Arima,
        historical_error_factor: 0.12,
        future_noise_scale: 45.0,
        future_waveform: wave(30.0, 12.0, 0.0),
    },
    ModelProfile {
        model: ForecastModel::XgBoost,
        historical_error_factor: 0.09,
        future_noise_scale: 35.0,
        future_waveform: wave(20.0, 8.0, 2.0),
    },
    ModelProfile {
        model: ForecastModel::Lstm,
        historical_error_factor: 0.08,
        future_noise_scale: 30.0,
        future_waveform: wave(25.0, 6.0, 1.0),
    },
    ModelProfile {
        model: ForecastModel::Linear,
        historical_error_factor: 0.11,
        future_noise_scale: 40.0,
        future_waveform: wave(40.0, 24.0, 6.0),
    },
    ModelProfile {
        model: ForecastModel::Polynomial,
        historical_error_factor: 0.095,
        future_noise_scale: 38.0,
        future_waveform: wave(35.0, 16.0, 4.0),
    },
    ModelProfile {
        model: ForecastModel::RandomForest,
        historical_error_factor: 0.085,
        future_noise_scale: 32.0,
        future_waveform: wave(15.0, 4.0, 3.0),
    },
    ModelProfile {
        model: ForecastModel::Ensemble,
        historical_error_factor: 0.07,
        future_noise_scale: 15.0,
        future_waveform: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_table_is_indexed_by_model() {
        for model in ForecastModel::ALL {
            assert_eq!(model.profile().model, model);
        }
    }

    #[test]
    fn ensemble_is_the_smoothest() {
        let ensemble = ForecastModel::Ensemble.profile();
        assert!(ensemble.future_waveform.is_none());
        for model in &ForecastModel::ALL[..6] {
            let p = model.profile();
            assert!(p.future_noise_scale > ensemble.future_noise_scale);
            assert!(p.historical_error_factor > ensemble.historical_error_factor);
        }
    }

    #[test]
    fn parses_names_and_labels() {
        assert_eq!("Ensemble".parse::<ForecastModel>(), Ok(ForecastModel::Ensemble));
        assert_eq!("ensemble".parse::<ForecastModel>(), Ok(ForecastModel::Ensemble));
        assert_eq!("Random_Forest".parse::<ForecastModel>(), Ok(ForecastModel::RandomForest));
        assert_eq!("Random Forest".parse::<ForecastModel>(), Ok(ForecastModel::RandomForest));
        assert_eq!("xgboost".parse::<ForecastModel>(), Ok(ForecastModel::XgBoost));
        assert_eq!(
            "Linear Regression".parse::<ForecastModel>(),
            Ok(ForecastModel::Linear)
        );
        assert!("prophet".parse::<ForecastModel>().is_err());
    }

    #[test]
    fn names_round_trip_through_display() {
        for model in ForecastModel::ALL {
            assert_eq!(model.to_string().parse::<ForecastModel>(), Ok(model));
            assert_eq!(model.label().parse::<ForecastModel>(), Ok(model));
        }
    }

    #[test]
    fn waveform_peaks_at_amplitude() {
        let w = Waveform {
            amplitude: 10.0,
            period_hours: 12.0,
            phase_hours: 0.0,
        };
        assert!((w.at(6.0) - 10.0).abs() < 1e-9);
        assert!(w.at(0.0).abs() < 1e-9);
    }
}
