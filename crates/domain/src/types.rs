// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dates::{format_date, serde_date};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;

/// Opaque identifier of a persisted assignment, assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentId(String);

impl AssignmentId {
    /// Creates a new `AssignmentId`.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to an employee.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(String);

impl WorkerId {
    /// Creates a new `WorkerId`.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Reference to a project. May be blank on placeholder records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a new `ProjectId`.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Returns true when no project has been chosen.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// A discipline label such as `Piping` or `Duct`.
///
/// Trades are free-form; they are not normalized, so `Piping` and `piping`
/// group into different rows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Trade(String);

impl Trade {
    /// Creates a new `Trade`.
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self(label.to_string())
    }

    /// Returns the trade label.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Returns true when the label is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for Trade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Percentage of full-time effort.
///
/// Values above 100 are explicit over-allocation and are accepted as-is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Allocation(u16);

impl Allocation {
    /// One full-time worker.
    pub const FULL_TIME: Self = Self(100);

    /// Creates a new `Allocation`.
    #[must_use]
    pub const fn new(percent: u16) -> Self {
        Self(percent)
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn percent(self) -> u16 {
        self.0
    }

    /// Returns true for a zero allocation.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true when the allocation exceeds full time.
    #[must_use]
    pub const fn is_over_allocated(self) -> bool {
        self.0 > Self::FULL_TIME.0
    }
}

impl std::fmt::Display for Allocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// An inclusive range of calendar days with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    #[serde(rename = "start_date", with = "serde_date")]
    start: Date,
    #[serde(rename = "end_date", with = "serde_date")]
    end: Date,
}

#[derive(Deserialize)]
struct RawDateRange {
    #[serde(with = "serde_date")]
    start_date: Date,
    #[serde(with = "serde_date")]
    end_date: Date,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = DomainError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start_date, raw.end_date)
    }
}

impl DateRange {
    /// Creates a new `DateRange`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `start` is after `end`.
    pub fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the first day of the range.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the last day of the range.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns true if `date` falls within the range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true if the two ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", format_date(self.start), format_date(self.end))
    }
}

/// A persisted allocation of one worker to one project under one trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Store-assigned identifier.
    pub id: AssignmentId,
    /// The employee.
    pub worker_id: WorkerId,
    /// The project. Blank on placeholders.
    #[serde(default)]
    pub project_id: ProjectId,
    /// The discipline.
    #[serde(default)]
    pub trade: Trade,
    /// Effort in percent of full time.
    #[serde(default)]
    pub allocation: Allocation,
    #[serde(flatten)]
    range: DateRange,
    /// Locked records are history that the grid should not rewrite.
    #[serde(default)]
    pub locked: bool,
}

impl Assignment {
    /// Creates a new `Assignment`.
    #[must_use]
    pub const fn new(
        id: AssignmentId,
        worker_id: WorkerId,
        project_id: ProjectId,
        trade: Trade,
        allocation: Allocation,
        range: DateRange,
        locked: bool,
    ) -> Self {
        Self {
            id,
            worker_id,
            project_id,
            trade,
            allocation,
            range,
            locked,
        }
    }

    /// Returns the first day of the assignment.
    #[must_use]
    pub const fn start_date(&self) -> Date {
        self.range.start()
    }

    /// Returns the last day of the assignment.
    #[must_use]
    pub const fn end_date(&self) -> Date {
        self.range.end()
    }

    /// Returns the assignment's date range.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.range
    }

    /// Replaces the date range.
    pub const fn set_range(&mut self, range: DateRange) {
        self.range = range;
    }

    /// Returns a copy of this record without its identifier.
    #[must_use]
    pub fn to_draft(&self) -> AssignmentDraft {
        AssignmentDraft {
            worker_id: self.worker_id.clone(),
            project_id: self.project_id.clone(),
            trade: self.trade.clone(),
            allocation: self.allocation,
            range: self.range,
            locked: self.locked,
        }
    }
}

/// An assignment that has not been stored yet and has no identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDraft {
    /// The employee.
    pub worker_id: WorkerId,
    /// The project. Blank on placeholders.
    #[serde(default)]
    pub project_id: ProjectId,
    /// The discipline.
    #[serde(default)]
    pub trade: Trade,
    /// Effort in percent of full time.
    #[serde(default)]
    pub allocation: Allocation,
    /// The date range.
    #[serde(flatten)]
    pub range: DateRange,
    /// Locked flag.
    #[serde(default)]
    pub locked: bool,
}

impl AssignmentDraft {
    /// Attaches a store-assigned identifier.
    #[must_use]
    pub fn with_id(self, id: AssignmentId) -> Assignment {
        Assignment {
            id,
            worker_id: self.worker_id,
            project_id: self.project_id,
            trade: self.trade,
            allocation: self.allocation,
            range: self.range,
            locked: self.locked,
        }
    }
}
