use thiserror::Error;

/// Failures of a simulation run. A run is deterministic, so none of these are retryable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// The configuration was rejected before any trace was produced.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A mean or percentile was requested over zero samples.
    #[error("no samples available to compute {0}")]
    EmptyData(&'static str),

    /// Traces handed to the aggregator do not belong together.
    #[error("inconsistent traces: {0}")]
    Inconsistent(String),
}

pub type SimResult<T> = Result<T, SimError>;
