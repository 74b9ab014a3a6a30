//! Error types returned by calendar and refresh date operations.

use thiserror::Error;

/// Errors produced when building a trading calendar or querying it.
///
/// Overruns of `step` or of the neighbour navigation at either edge of the known calendar are
/// not errors; they clamp to the nearest available date.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// Invalid construction arguments or an empty or unknown trading day source.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No trading day qualifies for the request within the loaded calendar.
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// An input could not be normalised to a canonical `YYYYMMDD` date.
    #[error("Invalid date: '{0}' cannot be normalised to YYYYMMDD")]
    InvalidDate(String),

    #[error("Trading day source I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Trading day source JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results carrying a [`CalendarError`].
pub type CalendarResult<T> = Result<T, CalendarError>;
