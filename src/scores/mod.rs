pub mod ascvd;
pub mod bands;
pub mod cac;
pub mod chads_vasc;
pub mod composer;
pub mod framingham;
pub mod grace;
pub mod has_bled;
pub mod heart;
pub mod recommendations;
pub mod registry;
pub mod timi;

pub use composer::compose;
pub use registry::{compute, compute_by_name, SUPPORTED_TYPES};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Unknown score type: {0}")]
    UnknownScoreType(String),

    #[error("Malformed {score_type} payload: {source}")]
    MalformedPayload {
        score_type: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {score_type} input: {}", .problems.join("; "))]
    InvalidInput {
        score_type: &'static str,
        problems: Vec<String>,
    },
}
