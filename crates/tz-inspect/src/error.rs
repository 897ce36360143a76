//! Error types for tz-inspect operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InspectError {
    /// An instant before the epoch was passed in.
    #[error("Invalid system time: {0}")]
    InvalidInstant(i64),

    #[error("Unable to determine system time: {0}")]
    ClockUnavailable(String),

    #[error("Unable to convert between system time and calendar time: {0}")]
    CalendarConversionFailed(String),

    #[error("Unknown time zone: {0}")]
    UnknownZone(String),

    /// The DST status did not change within the scan horizon.
    #[error("No DST transition within {horizon_days} days of {from}")]
    NoTransition { from: i64, horizon_days: i64 },
}

pub type Result<T> = std::result::Result<T, InspectError>;
