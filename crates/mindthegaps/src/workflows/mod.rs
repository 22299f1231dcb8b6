pub(crate) mod cascade;
pub mod intake;
pub mod pillar;
pub mod quiz;
pub mod scan;
mod thresholds;

pub use pillar::{is_answered, is_uncertain, Pillar, UNCERTAIN};
pub use thresholds::EngineThresholds;

/// Invalid input handed to one of the pipelines.
///
/// Raised before any rule runs; there is never a partial result alongside it.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("{what} is missing")]
    Missing { what: &'static str },
    #[error("{what} must be a JSON object")]
    NotAnObject { what: &'static str },
    #[error("{what} could not be read: {source}")]
    Malformed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
