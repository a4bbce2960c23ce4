//! Synthetic city electricity analytics: hourly demand and weather series,
//! a clustered embedding scatter, multi-model forecast simulation, and the
//! aggregations and error metrics a dashboard renders from them.
//!
//! Every generator draws from an injected [`random::RandomSource`], so a
//! seeded source reproduces its output exactly.

pub mod aggregate;
pub mod catalog;
pub mod cluster;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod io;
pub mod random;
pub mod series;
pub mod telemetry;

pub use catalog::{City, CityCatalog};
pub use dashboard::{CityDataset, DashboardEngine};
pub use error::EngineError;
