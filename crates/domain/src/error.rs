// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::AssignmentId;
use thiserror::Error;
use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A date range whose start falls after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// The requested start date.
        start: Date,
        /// The requested end date.
        end: Date,
    },
    /// Failed to parse a calendar date from a string.
    #[error("Failed to parse date '{date_string}': {error}")]
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    #[error("Date arithmetic overflow while {operation}")]
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A week grid must contain at least one week.
    #[error("Invalid week count: {count}. Must be at least 1")]
    InvalidWeekCount {
        /// The invalid count value.
        count: usize,
    },
    /// A week index outside the current grid.
    #[error("Week index {index} is outside the grid of {len} weeks")]
    WeekIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of weeks in the grid.
        len: usize,
    },
    /// Two records with the same worker, project and trade overlap in time.
    #[error("Assignments '{first}' and '{second}' overlap for the same worker, project and trade")]
    OverlappingSegments {
        /// The earlier of the two records.
        first: AssignmentId,
        /// The later of the two records.
        second: AssignmentId,
    },
    /// Weekday name could not be parsed.
    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),
}
