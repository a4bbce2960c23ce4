//! One-call dataset for a city: everything a dashboard page renders.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use crate::aggregate::{AggregatedPoint, Aggregator, ValueField};
use crate::catalog::{City, CityCatalog};
use crate::cluster::{self, ClusterPoint, ClusterPointGenerator, ClusterStats};
use crate::config::DashboardConfig;
use crate::error::EngineError;
use crate::forecast::{
    ErrorMetrics, ForecastError, ForecastModel, ForecastSample, ForecastSimulator,
    ForecastWindow, MetricsCalculator, ModelMetrics,
};
use crate::random::{SeededRandom, derive_seed, stream};
use crate::series::{DemandSample, TimeSeriesGenerator, WeatherSample, clock};

/// The four collections generated for one city.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDataset {
    pub city: City,
    pub demand: Vec<DemandSample>,
    pub weather: Vec<WeatherSample>,
    pub clusters: Vec<ClusterPoint>,
    pub forecasts: Vec<ForecastSample>,
    /// Cluster count the scatter was generated with.
    #[serde(skip)]
    pub cluster_count: usize,
}

impl CityDataset {
    /// Daily mean demand, oldest day first.
    pub fn daily_demand(&self) -> Vec<AggregatedPoint> {
        Aggregator.by_day(&self.demand, ValueField::DemandKwh)
    }

    /// Mean demand per hour of day (24 points).
    pub fn hourly_demand(&self) -> Vec<AggregatedPoint> {
        Aggregator.by_hour_of_day(&self.demand, ValueField::DemandKwh)
    }

    /// Daily mean of one weather field.
    pub fn daily_weather(&self, field: ValueField) -> Vec<AggregatedPoint> {
        Aggregator.by_day(&self.weather, field)
    }

    pub fn metrics(&self, model: ForecastModel) -> ErrorMetrics {
        MetricsCalculator.compute(&self.forecasts, model)
    }

    pub fn comparison(&self) -> Vec<ModelMetrics> {
        MetricsCalculator.compare(&self.forecasts)
    }

    pub fn error_series(&self, model: ForecastModel) -> Vec<ForecastError> {
        crate::forecast::error_series(&self.forecasts, model)
    }

    pub fn cluster_stats(&self) -> Vec<ClusterStats> {
        cluster::summarize(&self.clusters, self.cluster_count)
    }
}

/// Builds [`CityDataset`]s with one random stream per generator.
///
/// With a master seed every stream is derived from `(seed, city, generator)`,
/// so the same seed reproduces a city's data regardless of which other
/// cities were loaded first. Without one each stream is seeded from entropy.
#[derive(Debug, Clone)]
pub struct DashboardEngine {
    now: NaiveDateTime,
    seed: Option<u64>,
    days: usize,
    cluster_count: usize,
    window: ForecastWindow,
}

impl DashboardEngine {
    /// Engine anchored at `now` with the dashboard defaults.
    pub fn new(now: NaiveDateTime, seed: Option<u64>) -> Self {
        Self {
            now,
            seed,
            days: TimeSeriesGenerator::DEFAULT_DAYS,
            cluster_count: cluster::DEFAULT_CLUSTER_COUNT,
            window: ForecastWindow::default(),
        }
    }

    /// Engine configured from a validated [`DashboardConfig`], anchored at
    /// the current local hour.
    pub fn from_config(cfg: &DashboardConfig) -> Self {
        Self::from_config_at(cfg, clock::current_hour())
    }

    pub fn from_config_at(cfg: &DashboardConfig, now: NaiveDateTime) -> Self {
        Self::new(now, cfg.dashboard.seed)
            .with_days(cfg.series.days)
            .with_cluster_count(cfg.clustering.cluster_count)
            .with_window(cfg.forecast.window())
    }

    pub fn with_days(mut self, days: usize) -> Self {
        self.days = days;
        self
    }

    pub fn with_cluster_count(mut self, cluster_count: usize) -> Self {
        self.cluster_count = cluster_count;
        self
    }

    pub fn with_window(mut self, window: ForecastWindow) -> Self {
        self.window = window;
        self
    }

    /// Generates every collection for `city_id`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] for ids outside the catalog and
    /// [`EngineError::InvalidArgument`] for a day window, cluster count or
    /// forecast window out of range.
    pub fn load(&self, city_id: &str) -> Result<CityDataset, EngineError> {
        let city = *CityCatalog.resolve(city_id)?;
        TimeSeriesGenerator::check_days(self.days)?;
        self.window.check()?;

        let series = TimeSeriesGenerator::new(self.now);
        let demand =
            series.generate_demand(city.id, self.days, &mut self.rng(city.id, stream::DEMAND));
        let weather =
            series.generate_weather(city.id, self.days, &mut self.rng(city.id, stream::WEATHER));
        let clusters = ClusterPointGenerator::new(self.now).generate(
            city.id,
            self.cluster_count,
            &mut self.rng(city.id, stream::CLUSTER),
        )?;
        let forecasts = ForecastSimulator::with_window(self.now, self.window)
            .generate(city.id, &mut self.rng(city.id, stream::FORECAST));

        info!(
            city_id = city.id,
            seeded = self.seed.is_some(),
            demand = demand.len(),
            weather = weather.len(),
            clusters = clusters.len(),
            forecasts = forecasts.len(),
            "city dataset built"
        );

        Ok(CityDataset {
            city,
            demand,
            weather,
            clusters,
            forecasts,
            cluster_count: self.cluster_count,
        })
    }

    fn rng(&self, city_id: &str, stream: u64) -> SeededRandom {
        match self.seed {
            Some(master) => SeededRandom::new(derive_seed(master, city_id, stream)),
            None => SeededRandom::from_entropy(),
        }
    }
}
