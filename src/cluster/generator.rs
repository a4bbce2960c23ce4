use chrono::{Days, NaiveDateTime, NaiveTime};
use serde::Serialize;
use tracing::debug;

use super::labeler::{Labeler, RoundRobinLabeler};
use crate::error::EngineError;
use crate::random::RandomSource;

/// One point of the synthetic 2-D embedding scatter.
///
/// Demand and weather attributes are drawn independently of the position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterPoint {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    /// Always in `[0, cluster_count)`.
    pub cluster_label: usize,
    #[serde(rename = "demandKWh")]
    pub demand_kwh: f64,
    #[serde(rename = "temperatureF")]
    pub temperature_f: f64,
    pub humidity_pct: f64,
    pub wind_speed_mph: f64,
    pub precipitation: f64,
    pub timestamp: NaiveDateTime,
    pub city_id: String,
}

/// Center of one cluster in embedding space.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Center {
    x: f64,
    y: f64,
}

/// Generates a fixed-size labelled point cloud around random centers.
#[derive(Debug, Clone)]
pub struct ClusterPointGenerator<L = RoundRobinLabeler> {
    now: NaiveDateTime,
    labeler: L,
}

/// Points produced per call.
pub const POINT_COUNT: usize = 200;
/// Default number of clusters.
pub const DEFAULT_CLUSTER_COUNT: usize = 4;

impl ClusterPointGenerator {
    /// Round-robin generator anchored at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self::with_labeler(now, RoundRobinLabeler)
    }
}

impl<L: Labeler> ClusterPointGenerator<L> {
    /// Generator with a custom labelling strategy.
    pub fn with_labeler(now: NaiveDateTime, labeler: L) -> Self {
        Self { now, labeler }
    }

    /// Generates [`POINT_COUNT`] points in `cluster_count` groups.
    ///
    /// Centers are uniform in `[-4, 4]²`; each point sits within ±1 of its
    /// cluster center on both axes. Timestamps fall on a random hour of one
    /// of the seven days ending today.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidArgument`] if `cluster_count` is zero or
    /// exceeds [`POINT_COUNT`].
    pub fn generate(
        &self,
        city_id: &str,
        cluster_count: usize,
        rng: &mut impl RandomSource,
    ) -> Result<Vec<ClusterPoint>, EngineError> {
        if cluster_count == 0 {
            return Err(EngineError::invalid("cluster_count", "must be > 0"));
        }
        if cluster_count > POINT_COUNT {
            return Err(EngineError::invalid(
                "cluster_count",
                format!("must be <= {POINT_COUNT}"),
            ));
        }

        let centers: Vec<Center> = (0..cluster_count)
            .map(|_| Center {
                x: rng.uniform(-4.0, 4.0),
                y: rng.uniform(-4.0, 4.0),
            })
            .collect();

        let today = self.now.date();
        let points: Vec<ClusterPoint> = (0..POINT_COUNT)
            .map(|id| {
                let cluster_label = self.labeler.label(id, cluster_count) % cluster_count;
                let center = centers[cluster_label];
                let x = center.x + rng.symmetric(1.0);
                let y = center.y + rng.symmetric(1.0);

                let days_back = rng.index(7) as u64;
                let hour = rng.index(24) as u32;
                let timestamp = today
                    .checked_sub_days(Days::new(days_back))
                    .unwrap_or(today)
                    .and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN));

                ClusterPoint {
                    id,
                    x,
                    y,
                    cluster_label,
                    demand_kwh: rng.uniform(500.0, 1000.0),
                    temperature_f: rng.uniform(50.0, 90.0),
                    humidity_pct: rng.uniform(30.0, 90.0),
                    wind_speed_mph: rng.uniform(0.0, 15.0),
                    precipitation: rng.uniform(0.0, 0.5),
                    timestamp,
                    city_id: city_id.to_string(),
                }
            })
            .collect();

        debug!(
            city_id,
            cluster_count,
            labeler = self.labeler.name(),
            points = points.len(),
            "generated cluster points"
        );
        Ok(points)
    }
}
