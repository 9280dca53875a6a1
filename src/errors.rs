use thiserror::Error;

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Failures surfaced by the tracker engine and its data sources.
///
/// None of these are fatal to the dashboard: callers recover to an empty or
/// previous cache, or render "No budget data available".
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("No budget data available for client `{0}`")]
    ClientNotFound(String),
    #[error("Unknown month name: {0}")]
    InvalidMonth(String),
    #[error("Unknown quarter label: {0}")]
    InvalidQuarter(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
