//! Error types for the layout engine.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors raised by layout computation and its configuration boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("event #{index} '{title}' ends at {end} before it starts at {start}")]
    InvalidRange {
        index: usize,
        title: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("visible hours {min_hour}..={max_hour} must satisfy 0 <= min <= max <= 23")]
    OutOfRangeHourConfig { min_hour: u32, max_hour: u32 },
}

pub type Result<T, E = LayoutError> = std::result::Result<T, E>;
