//! Error type shared by the API client, the data model and configuration loading.

use thiserror::Error;

/// Errors surfaced by the dashboard library.
///
/// None of these are fatal to the dashboard as a whole: a listing failure shows
/// an error banner, a detail failure only affects the row that requested it.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Transport-level failure (connection refused, timeout, TLS, ...).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    /// The API answered 404 for the requested resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Parallel sequences of a time-series record differ in length.
    #[error("{field} has {left} values but {other} has {right}")]
    LengthMismatch {
        field: &'static str,
        other: &'static str,
        left: usize,
        right: usize,
    },

    /// A date string in a time-series record could not be parsed.
    #[error("invalid date {0:?}")]
    InvalidDate(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
