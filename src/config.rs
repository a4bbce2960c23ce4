//! TOML-based dashboard configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::CityCatalog;
use crate::forecast::{ForecastModel, ForecastWindow};

/// Top-level configuration parsed from TOML.
///
/// All fields have defaults matching the dashboard's initial state. Load
/// from TOML with [`DashboardConfig::from_toml_file`] or use
/// [`DashboardConfig::default_preset`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// City selection and randomness.
    #[serde(default)]
    pub dashboard: DashboardSection,
    /// Demand/weather window.
    #[serde(default)]
    pub series: SeriesConfig,
    /// Cluster scatter parameters.
    #[serde(default)]
    pub clustering: ClusteringConfig,
    /// Forecast simulation parameters.
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Log output format.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// City selection and randomness.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardSection {
    /// Catalog id of the selected city.
    pub city: String,
    /// Master seed; absent means a fresh entropy-seeded run.
    pub seed: Option<u64>,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            city: "nyc".to_string(),
            seed: None,
        }
    }
}

/// Demand/weather window.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeriesConfig {
    /// Number of complete days to generate (1–90).
    pub days: usize,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self { days: 7 }
    }
}

/// Cluster scatter parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusteringConfig {
    /// Number of clusters (2–6).
    pub cluster_count: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self { cluster_count: 4 }
    }
}

/// Forecast simulation parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// Model whose metrics are reported, e.g. `"Ensemble"` or `"LSTM"`.
    pub model: String,
    /// Hours of history with actuals (1–720).
    pub history_hours: u32,
    /// Hours of prediction-only horizon (8–72, multiple of 8).
    pub horizon_hours: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        let window = ForecastWindow::default();
        Self {
            model: ForecastModel::Ensemble.name().to_string(),
            history_hours: window.history_hours,
            horizon_hours: window.horizon_hours,
        }
    }
}

impl ForecastConfig {
    pub fn window(&self) -> ForecastWindow {
        ForecastWindow {
            history_hours: self.history_hours,
            horizon_hours: self.horizon_hours,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"clustering.cluster_count"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl DashboardConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["default", "quick", "extended"];

    /// The dashboard's initial state: New York, 7 days, k = 4, Ensemble.
    pub fn default_preset() -> Self {
        Self::default()
    }

    /// One day of data, two clusters and an 8-hour horizon.
    pub fn quick() -> Self {
        Self {
            series: SeriesConfig { days: 1 },
            clustering: ClusteringConfig { cluster_count: 2 },
            forecast: ForecastConfig {
                horizon_hours: 8,
                ..ForecastConfig::default()
            },
            ..Self::default()
        }
    }

    /// A month of data, six clusters and a 72-hour horizon.
    pub fn extended() -> Self {
        Self {
            series: SeriesConfig { days: 30 },
            clustering: ClusteringConfig { cluster_count: 6 },
            forecast: ForecastConfig {
                horizon_hours: 72,
                ..ForecastConfig::default()
            },
            ..Self::default()
        }
    }

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "default" => Ok(Self::default_preset()),
            "quick" => Ok(Self::quick()),
            "extended" => Ok(Self::extended()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// The configured forecast model.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `forecast.model` names no known model.
    pub fn model(&self) -> Result<ForecastModel, ConfigError> {
        self.forecast.model.parse().map_err(|e| ConfigError {
            field: "forecast.model".to_string(),
            message: format!("{e}"),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if CityCatalog.resolve(&self.dashboard.city).is_err() {
            let ids: Vec<&str> = CityCatalog.list().iter().map(|c| c.id).collect();
            errors.push(ConfigError {
                field: "dashboard.city".into(),
                message: format!(
                    "unknown city \"{}\", available: {}",
                    self.dashboard.city,
                    ids.join(", ")
                ),
            });
        }

        if !(1..=90).contains(&self.series.days) {
            errors.push(ConfigError {
                field: "series.days".into(),
                message: "must be in [1, 90]".into(),
            });
        }

        if !(2..=6).contains(&self.clustering.cluster_count) {
            errors.push(ConfigError {
                field: "clustering.cluster_count".into(),
                message: "must be in [2, 6]".into(),
            });
        }

        let f = &self.forecast;
        if let Err(e) = self.model() {
            errors.push(e);
        }
        if !(1..=ForecastWindow::MAX_HOURS).contains(&f.history_hours) {
            errors.push(ConfigError {
                field: "forecast.history_hours".into(),
                message: format!("must be in [1, {}]", ForecastWindow::MAX_HOURS),
            });
        }
        if !(8..=72).contains(&f.horizon_hours) || f.horizon_hours % 8 != 0 {
            errors.push(ConfigError {
                field: "forecast.horizon_hours".into(),
                message: "must be a multiple of 8 in [8, 72]".into(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preset_valid() {
        let cfg = DashboardConfig::default_preset();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
        assert_eq!(cfg.dashboard.city, "nyc");
        assert_eq!(cfg.series.days, 7);
        assert_eq!(cfg.clustering.cluster_count, 4);
        assert_eq!(cfg.model().ok(), Some(ForecastModel::Ensemble));
        assert_eq!(cfg.forecast.window(), ForecastWindow::default());
    }

    #[test]
    fn from_preset_unknown() {
        let err = DashboardConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in DashboardConfig::PRESETS {
            let cfg = DashboardConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[dashboard]
city = "hou"
seed = 7

[series]
days = 14

[clustering]
cluster_count = 5

[forecast]
model = "Random_Forest"
history_hours = 48
horizon_hours = 16

[logging]
json = true
"#;
        let cfg = DashboardConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| &*c.dashboard.city), Some("hou"));
        assert_eq!(cfg.as_ref().and_then(|c| c.dashboard.seed), Some(7));
        assert_eq!(cfg.as_ref().map(|c| c.series.days), Some(14));
        assert_eq!(
            cfg.as_ref().and_then(|c| c.model().ok()),
            Some(ForecastModel::RandomForest)
        );
        assert_eq!(cfg.as_ref().map(|c| c.logging.json), Some(true));
        assert!(cfg.map(|c| c.validate().is_empty()).unwrap_or(false));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[clustering]
cluster_count = 3
algorithm = "dbscan"
"#;
        assert!(DashboardConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[dashboard]
seed = 99
"#;
        let cfg = DashboardConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().and_then(|c| c.dashboard.seed), Some(99));
        assert_eq!(cfg.as_ref().map(|c| &*c.dashboard.city), Some("nyc"));
        assert_eq!(cfg.as_ref().map(|c| c.forecast.horizon_hours), Some(24));
    }

    #[test]
    fn validation_catches_unknown_city() {
        let mut cfg = DashboardConfig::default_preset();
        cfg.dashboard.city = "gotham".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "dashboard.city"));
    }

    #[test]
    fn validation_catches_cluster_count_outside_slider() {
        for k in [0, 1, 7] {
            let mut cfg = DashboardConfig::default_preset();
            cfg.clustering.cluster_count = k;
            let errors = cfg.validate();
            assert!(errors.iter().any(|e| e.field == "clustering.cluster_count"));
        }
    }

    #[test]
    fn validation_catches_bad_model_and_horizon() {
        let mut cfg = DashboardConfig::default_preset();
        cfg.forecast.model = "prophet".to_string();
        cfg.forecast.horizon_hours = 20;
        cfg.series.days = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "forecast.model"));
        assert!(errors.iter().any(|e| e.field == "forecast.horizon_hours"));
        assert!(errors.iter().any(|e| e.field == "series.days"));
    }

    #[test]
    fn validation_bounds_history_hours() {
        for hours in [0, ForecastWindow::MAX_HOURS + 1, u32::MAX] {
            let mut cfg = DashboardConfig::default_preset();
            cfg.forecast.history_hours = hours;
            let errors = cfg.validate();
            assert!(
                errors.iter().any(|e| e.field == "forecast.history_hours"),
                "history_hours = {hours} should be rejected"
            );
        }

        let mut cfg = DashboardConfig::default_preset();
        cfg.forecast.history_hours = ForecastWindow::MAX_HOURS;
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn extended_is_larger_than_quick() {
        let quick = DashboardConfig::quick();
        let extended = DashboardConfig::extended();
        assert!(extended.series.days > quick.series.days);
        assert!(extended.clustering.cluster_count > quick.clustering.cluster_count);
        assert!(extended.forecast.horizon_hours > quick.forecast.horizon_hours);
    }
}
