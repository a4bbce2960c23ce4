use std::f64::consts::PI;

use chrono::{NaiveDateTime, Timelike};
use tracing::debug;

use super::TimeSeriesGenerator;
use super::types::WeatherSample;
use crate::random::{RandomSource, round_to};

/// Unrounded weather values for one hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherReading {
    pub temperature_f: f64,
    pub humidity_pct: f64,
    pub wind_speed_mph: f64,
    pub precipitation: f64,
}

impl WeatherReading {
    /// Samples the weather at `hour_index` hours into the window, where
    /// `hour` is the hour of day.
    ///
    /// Temperature follows a 7-day cycle around 60°F plus a daily swing;
    /// humidity, wind and precipitation follow slower cycles with bounded
    /// noise. Humidity is clamped to `[0, 100]`, wind and precipitation to
    /// `>= 0`.
    pub fn sample(hour_index: usize, hour: u32, rng: &mut impl RandomSource) -> Self {
        let i = hour_index as f64;
        let h = f64::from(hour);

        let base_temp = 60.0 + 15.0 * (i * PI / 84.0).sin();
        let hourly_variation = 10.0 * ((h - 6.0) * PI / 12.0).sin();
        let temperature_f = base_temp + hourly_variation + rng.symmetric(2.5);

        let humidity = 50.0 + 20.0 * (i * PI / 72.0).sin() + rng.symmetric(5.0);
        let wind = 5.0 + 3.0 * (i * PI / 48.0).sin() + rng.uniform(0.0, 3.0);
        let precipitation = 2.0 * (i * PI / 60.0).sin() + rng.uniform(0.0, 0.5);

        Self {
            temperature_f,
            humidity_pct: humidity.clamp(0.0, 100.0),
            wind_speed_mph: wind.max(0.0),
            precipitation: precipitation.max(0.0),
        }
    }

    fn into_sample(self, timestamp: NaiveDateTime, city_id: &str) -> WeatherSample {
        WeatherSample {
            timestamp,
            temperature_f: round_to(self.temperature_f, 1),
            humidity_pct: round_to(self.humidity_pct, 1),
            wind_speed_mph: round_to(self.wind_speed_mph, 1),
            precipitation: round_to(self.precipitation, 2),
            city_id: city_id.to_string(),
        }
    }
}

impl TimeSeriesGenerator {
    /// Hourly weather samples for `city_id`, timestamp-aligned with
    /// [`TimeSeriesGenerator::generate_demand`] for the same `days`.
    ///
    /// Temperature, humidity and wind are rounded to one decimal,
    /// precipitation to two.
    pub fn generate_weather(
        &self,
        city_id: &str,
        days: usize,
        rng: &mut impl RandomSource,
    ) -> Vec<WeatherSample> {
        let mut samples = Vec::with_capacity(Self::reserve_hint(days));
        self.clock(days).run(|hour_index, timestamp| {
            let reading = WeatherReading::sample(hour_index, timestamp.hour(), rng);
            samples.push(reading.into_sample(timestamp, city_id));
        });
        debug!(city_id, days, samples = samples.len(), "generated weather series");
        samples
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::random::SeededRandom;
    use crate::random::testing::FixedSource;

    fn anchor() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 20)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap()
    }

    #[test]
    fn midpoint_draws_at_window_start() {
        let r = WeatherReading::sample(0, 0, &mut FixedSource(0.5));
        // base 60, daily swing 10 * sin(-pi/2)
        assert!((r.temperature_f - 50.0).abs() < 1e-9);
        assert!((r.humidity_pct - 50.0).abs() < 1e-9);
        assert!((r.wind_speed_mph - 6.5).abs() < 1e-9);
        assert!((r.precipitation - 0.25).abs() < 1e-9);
    }

    #[test]
    fn bounds_hold_at_extreme_draws() {
        for draw in [0.0, 0.999_999] {
            let mut rng = FixedSource(draw);
            for i in 0..24 * 30 {
                let r = WeatherReading::sample(i, (i % 24) as u32, &mut rng);
                assert!((0.0..=100.0).contains(&r.humidity_pct));
                assert!(r.wind_speed_mph >= 0.0);
                assert!(r.precipitation >= 0.0);
            }
        }
    }

    #[test]
    fn precipitation_floors_at_zero_in_dry_phase() {
        // sin(90 * pi / 60) = -1, so the periodic term is -2
        let r = WeatherReading::sample(90, 18, &mut FixedSource(0.999));
        assert_eq!(r.precipitation, 0.0);
    }

    #[test]
    fn weather_aligns_with_demand() {
        let generator = TimeSeriesGenerator::new(anchor());
        let demand = generator.generate_demand("la", 2, &mut SeededRandom::new(1));
        let weather = generator.generate_weather("la", 2, &mut SeededRandom::new(2));
        assert_eq!(demand.len(), weather.len());
        for (d, w) in demand.iter().zip(&weather) {
            assert_eq!(d.timestamp, w.timestamp);
            assert_eq!(w.city_id, "la");
        }
    }
}
