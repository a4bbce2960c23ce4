//! Error taxonomy surfaced by the engine.

use thiserror::Error;

/// Errors returned by generators, the catalog and the dashboard layer.
///
/// Malformed records handed to the aggregator are not represented here: they
/// are skipped and counted, never surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A parameter was malformed or out of range.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// The city identifier is not in the catalog.
    #[error("unknown city `{city_id}`")]
    NotFound { city_id: String },
}

impl EngineError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Whether the caller should treat this as "no data available".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
