// src/error.rs

use thiserror::Error;

/// Errors raised by the environment facade and its configuration.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid observation: {0}")]
    InvalidObservation(String),

    #[error("invalid reset options: {0}")]
    InvalidOptions(String),

    #[error("episode already finished after {horizon} days; call reset()")]
    EpisodeFinished { horizon: usize },

    #[error("failed to write report: {0}")]
    Report(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Recoverable forecast failures. The two-tier engine never lets these
/// escape into a step; it falls back to the short-history average.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    #[error("history is empty")]
    EmptyHistory,

    #[error("history is degenerate (all values zero)")]
    DegenerateHistory,

    #[error("normal equations are singular")]
    SingularSystem,

    #[error("fitted model produced a non-finite value")]
    NonFinite,
}
