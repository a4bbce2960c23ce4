//! Hourly demand and weather series for a city over a day window.

/// Hourly wall-clock stepping.
pub mod clock;
mod demand;
pub mod types;
mod weather;

use chrono::NaiveDateTime;

use crate::error::EngineError;

pub use clock::HourClock;
pub use demand::demand_kwh;
pub use types::{DemandSample, WeatherSample};
pub use weather::WeatherReading;

/// Produces hourly demand and weather samples for a city.
///
/// The window covers the `days` complete calendar days before the day that
/// contains `now`: `days * 24` samples, oldest first, one hour apart, midnight
/// to 23:00 of each day. Demand and weather for the same `(city, days, now)`
/// share every timestamp.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use city_demand_sim::random::SeededRandom;
/// use city_demand_sim::series::TimeSeriesGenerator;
///
/// let now = NaiveDate::from_ymd_opt(2024, 6, 12)
///     .and_then(|d| d.and_hms_opt(9, 0, 0))
///     .unwrap();
/// let generator = TimeSeriesGenerator::new(now);
/// let demand = generator.generate_demand("nyc", 2, &mut SeededRandom::new(1));
/// assert_eq!(demand.len(), 48);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeSeriesGenerator {
    now: NaiveDateTime,
}

impl TimeSeriesGenerator {
    /// Default window length in days.
    pub const DEFAULT_DAYS: usize = 7;
    /// Longest window callers that validate their input accept.
    pub const MAX_DAYS: usize = 366;

    /// Rejects windows longer than [`Self::MAX_DAYS`].
    ///
    /// The generators themselves accept any `days`; this is the check the
    /// dashboard layer runs before calling them.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidArgument`] for `days > MAX_DAYS`.
    pub fn check_days(days: usize) -> Result<(), EngineError> {
        if days > Self::MAX_DAYS {
            return Err(EngineError::invalid(
                "days",
                format!("must be <= {}", Self::MAX_DAYS),
            ));
        }
        Ok(())
    }

    /// Generator anchored at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Generator anchored at the current local hour.
    pub fn at_current_hour() -> Self {
        Self::new(clock::current_hour())
    }

    /// The anchor timestamp.
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Capacity to reserve for a `days` window, bounded so an oversized
    /// request grows the buffer on demand instead of aborting up front.
    fn reserve_hint(days: usize) -> usize {
        days.min(Self::MAX_DAYS) * 24
    }

    fn clock(&self, days: usize) -> HourClock {
        HourClock::new(
            clock::day_window_start(self.now, days),
            days.saturating_mul(24),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_days_caps_the_window() {
        assert!(TimeSeriesGenerator::check_days(0).is_ok());
        assert!(TimeSeriesGenerator::check_days(TimeSeriesGenerator::MAX_DAYS).is_ok());
        let err = TimeSeriesGenerator::check_days(usize::MAX).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument { name: "days", .. }));
    }

    #[test]
    fn reserve_hint_is_bounded() {
        assert_eq!(TimeSeriesGenerator::reserve_hint(2), 48);
        assert_eq!(
            TimeSeriesGenerator::reserve_hint(usize::MAX),
            TimeSeriesGenerator::MAX_DAYS * 24
        );
    }
}
