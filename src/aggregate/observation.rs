use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::cluster::ClusterPoint;
use crate::error::EngineError;
use crate::forecast::ForecastSample;
use crate::series::{DemandSample, WeatherSample};

/// Numeric field an aggregation averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueField {
    DemandKwh,
    TemperatureF,
    HumidityPct,
    WindSpeedMph,
    Precipitation,
    Actual,
    Predicted,
}

impl ValueField {
    pub const ALL: [ValueField; 7] = [
        Self::DemandKwh,
        Self::TemperatureF,
        Self::HumidityPct,
        Self::WindSpeedMph,
        Self::Precipitation,
        Self::Actual,
        Self::Predicted,
    ];

    /// Key of this field in serialized records.
    pub fn key(self) -> &'static str {
        match self {
            Self::DemandKwh => "demandKWh",
            Self::TemperatureF => "temperatureF",
            Self::HumidityPct => "humidityPct",
            Self::WindSpeedMph => "windSpeedMph",
            Self::Precipitation => "precipitation",
            Self::Actual => "actual",
            Self::Predicted => "predicted",
        }
    }
}

impl fmt::Display for ValueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ValueField {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| EngineError::invalid("value_field", format!("unknown field \"{s}\"")))
    }
}

/// A timestamped record the aggregator can read.
///
/// Either accessor may come back empty; such records are skipped rather than
/// counted as zero.
pub trait Observation {
    fn timestamp(&self) -> Option<NaiveDateTime>;

    /// The value of `field`, or `None` if this record has no such field.
    fn value(&self, field: ValueField) -> Option<f64>;
}

impl<T: Observation + ?Sized> Observation for &T {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        (**self).timestamp()
    }

    fn value(&self, field: ValueField) -> Option<f64> {
        (**self).value(field)
    }
}

impl Observation for DemandSample {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        Some(self.timestamp)
    }

    fn value(&self, field: ValueField) -> Option<f64> {
        match field {
            ValueField::DemandKwh => Some(self.demand_kwh),
            _ => None,
        }
    }
}

impl Observation for WeatherSample {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        Some(self.timestamp)
    }

    fn value(&self, field: ValueField) -> Option<f64> {
        match field {
            ValueField::TemperatureF => Some(self.temperature_f),
            ValueField::HumidityPct => Some(self.humidity_pct),
            ValueField::WindSpeedMph => Some(self.wind_speed_mph),
            ValueField::Precipitation => Some(self.precipitation),
            _ => None,
        }
    }
}

impl Observation for ClusterPoint {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        Some(self.timestamp)
    }

    fn value(&self, field: ValueField) -> Option<f64> {
        match field {
            ValueField::DemandKwh => Some(self.demand_kwh),
            ValueField::TemperatureF => Some(self.temperature_f),
            ValueField::HumidityPct => Some(self.humidity_pct),
            ValueField::WindSpeedMph => Some(self.wind_speed_mph),
            ValueField::Precipitation => Some(self.precipitation),
            ValueField::Actual | ValueField::Predicted => None,
        }
    }
}

impl Observation for ForecastSample {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        Some(self.timestamp)
    }

    fn value(&self, field: ValueField) -> Option<f64> {
        match field {
            ValueField::Actual => self.actual,
            ValueField::Predicted => Some(self.predicted),
            _ => None,
        }
    }
}
