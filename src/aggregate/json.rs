//! Aggregation over loosely shaped JSON records.
//!
//! Presentation code may hand back records it has already serialized. Any
//! value that is not an array aggregates like an empty batch. Array elements
//! that are not objects or lack a parseable `timestamp` are skipped; a
//! non-numeric field value still opens its day bucket without contributing.

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use super::{AggregatedPoint, Reading, ValueField, by_day_readings, by_hour_readings};

const TIMESTAMP_KEY: &str = "timestamp";

/// [`super::Aggregator::by_day`] over a JSON array of records.
pub fn by_day(records: &Value, field: ValueField) -> Vec<AggregatedPoint> {
    by_day_readings(readings(records, field), field)
}

/// [`super::Aggregator::by_hour_of_day`] over a JSON array of records.
pub fn by_hour_of_day(records: &Value, field: ValueField) -> Vec<AggregatedPoint> {
    by_hour_readings(readings(records, field), field)
}

fn readings(records: &Value, field: ValueField) -> impl Iterator<Item = Reading> + '_ {
    records
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .map(move |record| {
            let ts = record
                .get(TIMESTAMP_KEY)
                .and_then(Value::as_str)
                .and_then(parse_timestamp);
            let v = record
                .get(field.key())
                .and_then(Value::as_f64)
                .filter(|v| v.is_finite());
            (ts, v)
        })
}

/// Parses naive ISO-8601 timestamps as written by the engine, and RFC 3339
/// timestamps with an offset, kept at their own wall-clock time.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    s.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::aggregate::BucketKey;

    #[test]
    fn non_array_input() {
        for input in [json!(null), json!({"timestamp": "2024-06-01T00:00:00"}), json!(42)] {
            assert!(by_day(&input, ValueField::DemandKwh).is_empty());
            let hours = by_hour_of_day(&input, ValueField::DemandKwh);
            assert_eq!(hours.len(), 24);
            assert!(hours.iter().all(|p| p.mean_value == 0.0 && p.sample_count == 0));
        }
    }

    #[test]
    fn malformed_records_are_skipped() {
        let records = json!([
            {"timestamp": "2024-06-01T05:00:00", "demandKWh": 100.0},
            {"timestamp": "2024-06-01T05:00:00", "demandKWh": "n/a"},
            {"demandKWh": 999.0},
            {"timestamp": "yesterday", "demandKWh": 999.0},
            {"timestamp": "2024-06-01T05:30:00Z", "demandKWh": 300},
            "not an object",
            {"timestamp": "2024-06-01T06:00:00"}
        ]);
        let hours = by_hour_of_day(&records, ValueField::DemandKwh);
        assert_eq!(hours[5].mean_value, 200.0);
        assert_eq!(hours[5].sample_count, 2);
        assert_eq!(hours[6].sample_count, 0);

        let days = by_day(&records, ValueField::DemandKwh);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].bucket_key, BucketKey::Day("6/1/2024".to_string()));
    }

    #[test]
    fn day_of_non_numeric_values_is_kept_at_zero() {
        let records = json!([
            {"timestamp": "2024-06-01T05:00:00", "demandKWh": 100.0},
            {"timestamp": "2024-06-02T05:00:00", "demandKWh": "n/a"}
        ]);
        let days = by_day(&records, ValueField::DemandKwh);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].bucket_key, BucketKey::Day("6/1/2024".to_string()));
        assert_eq!(days[0].mean_value, 100.0);
        assert_eq!(days[1].bucket_key, BucketKey::Day("6/2/2024".to_string()));
        assert_eq!(days[1].mean_value, 0.0);
        assert_eq!(days[1].sample_count, 0);
    }

    #[test]
    fn offset_timestamps_keep_wall_clock() {
        let ts = parse_timestamp("2024-06-01T23:15:00-05:00").unwrap();
        assert_eq!(ts.to_string(), "2024-06-01 23:15:00");
    }
}
