use std::f64::consts::PI;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use tracing::debug;

use super::TimeSeriesGenerator;
use super::types::DemandSample;
use crate::random::{RandomSource, round_to};

/// Weekend demand multiplier.
const WEEKEND_FACTOR: f64 = 0.8;

/// Demand in kWh at `timestamp`, before rounding.
///
/// `max(0, (base + 300 sin((hour - 6) π / 12)) * weekend + noise)` with
/// `base ~ U(500, 600)` and `noise ~ U(-25, 25)`. The daily term peaks at
/// noon and bottoms out at midnight.
pub fn demand_kwh(timestamp: NaiveDateTime, rng: &mut impl RandomSource) -> f64 {
    let hour = f64::from(timestamp.hour());
    let base_load = rng.uniform(500.0, 600.0);
    let time_of_day = 300.0 * ((hour - 6.0) * PI / 12.0).sin();
    let weekend = match timestamp.weekday() {
        Weekday::Sat | Weekday::Sun => WEEKEND_FACTOR,
        _ => 1.0,
    };
    let noise = rng.symmetric(25.0);

    ((base_load + time_of_day) * weekend + noise).max(0.0)
}

impl TimeSeriesGenerator {
    /// Hourly demand samples for `city_id` over the last `days` full days.
    ///
    /// Values are rounded to two decimals. Never fails; `days == 0` yields an
    /// empty series.
    pub fn generate_demand(
        &self,
        city_id: &str,
        days: usize,
        rng: &mut impl RandomSource,
    ) -> Vec<DemandSample> {
        let mut samples = Vec::with_capacity(Self::reserve_hint(days));
        self.clock(days).run(|_, timestamp| {
            samples.push(DemandSample {
                timestamp,
                demand_kwh: round_to(demand_kwh(timestamp, rng), 2),
                city_id: city_id.to_string(),
            });
        });
        debug!(city_id, days, samples = samples.len(), "generated demand series");
        samples
    }
}
