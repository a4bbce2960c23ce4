//! Synthetic embedding-space point clouds for the clustering view.

mod generator;
/// Label assignment strategies.
pub mod labeler;
mod stats;

pub use generator::{ClusterPoint, ClusterPointGenerator, DEFAULT_CLUSTER_COUNT, POINT_COUNT};
pub use labeler::{Labeler, RoundRobinLabeler};
pub use stats::{ClusterStats, summarize};
