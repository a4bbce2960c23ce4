//! Cluster label assignment strategies.

/// Assigns a cluster label to the `index`-th generated point.
///
/// Implementations must return a label in `[0, cluster_count)` for every
/// `cluster_count > 0`.
pub trait Labeler {
    fn label(&self, index: usize, cluster_count: usize) -> usize;

    /// Short name for logs and display.
    fn name(&self) -> &'static str;
}

/// Deals labels out in turn: `index mod cluster_count`.
///
/// No distances are computed. Clusters end up balanced to within one point.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundRobinLabeler;

impl Labeler for RoundRobinLabeler {
    fn label(&self, index: usize, cluster_count: usize) -> usize {
        index % cluster_count
    }

    fn name(&self) -> &'static str {
        "round-robin"
    }
}
