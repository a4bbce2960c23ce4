//! Day and hour-of-day means over timestamped records.
//!
//! Records whose requested field is missing or not a finite number are left
//! out of both the sum and the count of their bucket, but a timestamped record
//! still opens its day bucket. Records without a timestamp are skipped
//! entirely. A bucket nobody contributed to reports a mean of zero.

pub mod json;
mod observation;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use tracing::debug;

pub use observation::{Observation, ValueField};

/// Hours in a day; `by_hour_of_day` always returns this many buckets.
pub const HOURS_PER_DAY: usize = 24;

/// Bucket identity: a rendered calendar date or an hour of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BucketKey {
    Day(String),
    Hour(u32),
}

/// Mean of one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPoint {
    pub bucket_key: BucketKey,
    pub mean_value: f64,
    /// Records that contributed to the mean.
    pub sample_count: usize,
}

/// Renders a date the way the dashboard labels days, e.g. `6/9/2024`.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Groups records into buckets and averages one field.
#[derive(Debug, Default, Clone, Copy)]
pub struct Aggregator;

impl Aggregator {
    /// Daily means, one point per calendar day present, in order of first
    /// appearance. Empty input yields an empty result.
    pub fn by_day<I>(&self, samples: I, field: ValueField) -> Vec<AggregatedPoint>
    where
        I: IntoIterator,
        I::Item: Observation,
    {
        by_day_readings(readings(samples, field), field)
    }

    /// Hour-of-day means: always 24 points, hour 0 first.
    pub fn by_hour_of_day<I>(&self, samples: I, field: ValueField) -> Vec<AggregatedPoint>
    where
        I: IntoIterator,
        I::Item: Observation,
    {
        by_hour_readings(readings(samples, field), field)
    }
}

/// A record's timestamp and, if present and finite, its field value.
pub(crate) type Reading = (Option<NaiveDateTime>, Option<f64>);

fn readings<I>(samples: I, field: ValueField) -> impl Iterator<Item = Reading>
where
    I: IntoIterator,
    I::Item: Observation,
{
    samples
        .into_iter()
        .map(move |s| (s.timestamp(), s.value(field).filter(|v| v.is_finite())))
}

/// Running sum for one bucket.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn add(&mut self, v: Option<f64>) {
        if let Some(v) = v {
            self.sum += v;
            self.count += 1;
        }
    }

    fn point(self, bucket_key: BucketKey) -> AggregatedPoint {
        let mean_value = if self.count > 0 {
            self.sum / self.count as f64
        } else {
            0.0
        };
        AggregatedPoint {
            bucket_key,
            mean_value,
            sample_count: self.count,
        }
    }
}

pub(crate) fn by_day_readings(
    readings: impl Iterator<Item = Reading>,
    field: ValueField,
) -> Vec<AggregatedPoint> {
    let mut days: Vec<(NaiveDate, Accumulator)> = Vec::new();
    let mut skipped = 0_usize;

    for (ts, v) in readings {
        if ts.is_none() || v.is_none() {
            skipped += 1;
        }
        let Some(ts) = ts else {
            continue;
        };
        let date = ts.date();
        match days.iter_mut().find(|(d, _)| *d == date) {
            Some((_, acc)) => acc.add(v),
            None => {
                let mut acc = Accumulator::default();
                acc.add(v);
                days.push((date, acc));
            }
        }
    }

    log_skipped(skipped, field, "day");
    days.into_iter()
        .map(|(date, acc)| acc.point(BucketKey::Day(day_label(date))))
        .collect()
}

pub(crate) fn by_hour_readings(
    readings: impl Iterator<Item = Reading>,
    field: ValueField,
) -> Vec<AggregatedPoint> {
    let mut hours = [Accumulator::default(); HOURS_PER_DAY];
    let mut skipped = 0_usize;

    for reading in readings {
        match reading {
            (Some(ts), Some(v)) => hours[ts.hour() as usize].add(Some(v)),
            _ => skipped += 1,
        }
    }

    log_skipped(skipped, field, "hour");
    hours
        .into_iter()
        .zip(0_u32..)
        .map(|(acc, hour)| acc.point(BucketKey::Hour(hour)))
        .collect()
}

fn log_skipped(skipped: usize, field: ValueField, bucket: &str) {
    if skipped > 0 {
        debug!(skipped, %field, bucket, "skipped malformed samples");
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::forecast::{ForecastModel, ForecastSample};
    use crate::series::{DemandSample, WeatherSample};

    fn midnight(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    fn demand(ts: NaiveDateTime, v: f64) -> DemandSample {
        DemandSample {
            timestamp: ts,
            demand_kwh: v,
            city_id: "nyc".to_string(),
        }
    }

    #[test]
    fn hour_of_day_recovers_per_hour_values() {
        let samples: Vec<DemandSample> = (0..24)
            .map(|h| demand(midnight(3) + Duration::hours(h), h as f64))
            .collect();
        let points = Aggregator.by_hour_of_day(&samples, ValueField::DemandKwh);
        assert_eq!(points.len(), 24);
        for (h, p) in points.iter().enumerate() {
            assert_eq!(p.bucket_key, BucketKey::Hour(h as u32));
            assert_eq!(p.mean_value, h as f64);
            assert_eq!(p.sample_count, 1);
        }
    }

    #[test]
    fn hour_of_day_averages_across_days() {
        let samples = vec![
            demand(midnight(1) + Duration::hours(5), 100.0),
            demand(midnight(2) + Duration::hours(5), 300.0),
        ];
        let points = Aggregator.by_hour_of_day(&samples, ValueField::DemandKwh);
        assert_eq!(points[5].mean_value, 200.0);
        assert_eq!(points[5].sample_count, 2);
        assert_eq!(points[6].mean_value, 0.0);
        assert_eq!(points[6].sample_count, 0);
    }

    #[test]
    fn empty_input() {
        let none: Vec<DemandSample> = Vec::new();
        assert!(Aggregator.by_day(&none, ValueField::DemandKwh).is_empty());
        let hours = Aggregator.by_hour_of_day(&none, ValueField::DemandKwh);
        assert_eq!(hours.len(), 24);
        assert!(hours.iter().all(|p| p.mean_value == 0.0));
    }

    #[test]
    fn days_in_first_seen_order() {
        let samples = vec![
            demand(midnight(9) + Duration::hours(1), 10.0),
            demand(midnight(10), 40.0),
            demand(midnight(9) + Duration::hours(2), 20.0),
        ];
        let points = Aggregator.by_day(&samples, ValueField::DemandKwh);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].bucket_key, BucketKey::Day("6/9/2024".to_string()));
        assert_eq!(points[0].mean_value, 15.0);
        assert_eq!(points[1].bucket_key, BucketKey::Day("6/10/2024".to_string()));
        assert_eq!(points[1].mean_value, 40.0);
    }

    #[test]
    fn missing_fields_are_excluded_not_zeroed() {
        let ts = midnight(4) + Duration::hours(3);
        let forecast = |actual: Option<f64>, predicted: f64| ForecastSample {
            timestamp: ts,
            relative_hour: -1,
            actual,
            predicted,
            city_id: "nyc".to_string(),
            model: ForecastModel::Ensemble,
        };
        let samples = vec![forecast(Some(100.0), 1.0), forecast(None, 2.0)];
        let points = Aggregator.by_hour_of_day(&samples, ValueField::Actual);
        assert_eq!(points[3].mean_value, 100.0);
        assert_eq!(points[3].sample_count, 1);
    }

    #[test]
    fn non_finite_values_are_excluded() {
        let samples = vec![
            demand(midnight(4), f64::NAN),
            demand(midnight(4), 8.0),
            demand(midnight(4), f64::INFINITY),
        ];
        let points = Aggregator.by_day(&samples, ValueField::DemandKwh);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].mean_value, 8.0);
        assert_eq!(points[0].sample_count, 1);
    }

    #[test]
    fn field_absent_from_record_type_gives_zero_buckets() {
        let weather = vec![WeatherSample {
            timestamp: midnight(4),
            temperature_f: 70.0,
            humidity_pct: 40.0,
            wind_speed_mph: 3.0,
            precipitation: 0.0,
            city_id: "la".to_string(),
        }];
        let demand = Aggregator.by_day(&weather, ValueField::DemandKwh);
        assert_eq!(demand.len(), 1);
        assert_eq!(demand[0].bucket_key, BucketKey::Day("6/4/2024".to_string()));
        assert_eq!(demand[0].mean_value, 0.0);
        assert_eq!(demand[0].sample_count, 0);
        let temps = Aggregator.by_day(&weather, ValueField::TemperatureF);
        assert_eq!(temps[0].mean_value, 70.0);
    }

    #[test]
    fn day_with_only_missing_values_reports_zero() {
        let ts = midnight(5) + Duration::hours(5);
        let forecast = |timestamp: NaiveDateTime, actual: Option<f64>| ForecastSample {
            timestamp,
            relative_hour: 0,
            actual,
            predicted: 1.0,
            city_id: "nyc".to_string(),
            model: ForecastModel::Lstm,
        };
        let samples = vec![
            forecast(ts, Some(100.0)),
            forecast(ts + Duration::days(1), None),
            forecast(ts + Duration::days(1) + Duration::hours(2), Some(f64::NAN)),
        ];
        let points = Aggregator.by_day(&samples, ValueField::Actual);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].bucket_key, BucketKey::Day("6/5/2024".to_string()));
        assert_eq!(points[0].mean_value, 100.0);
        assert_eq!(points[1].bucket_key, BucketKey::Day("6/6/2024".to_string()));
        assert_eq!(points[1].mean_value, 0.0);
        assert_eq!(points[1].sample_count, 0);
    }

    #[test]
    fn value_fields_parse_from_keys() {
        assert_eq!("demandKWh".parse::<ValueField>(), Ok(ValueField::DemandKwh));
        assert_eq!("HUMIDITYPCT".parse::<ValueField>(), Ok(ValueField::HumidityPct));
        assert!("voltage".parse::<ValueField>().is_err());
    }
}
