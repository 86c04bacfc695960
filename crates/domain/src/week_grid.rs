// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The rolling week grid.
//!
//! The grid is a fixed-size, ordered run of week anchors derived from a pivot
//! date. It owns no data of its own: moving the pivot recomputes every anchor.
//!
//! ## Invariants
//!
//! - Anchors are consecutive, exactly 7 days apart
//! - Every anchor falls on the configured week-start weekday
//! - The first anchor is on or before the pivot
//! - Visibility of a record in a column is decided only by [`week_overlaps`]

use crate::dates::{add_days, week_start_on_or_before};
use crate::error::DomainError;
use crate::types::{DateRange, Trade};
use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

/// Number of days from a week anchor to the last day of its week.
const DAYS_TO_WEEK_END: i64 = 6;

/// Default number of columns in the grid.
pub const DEFAULT_WEEK_COUNT: usize = 25;

/// Grid and drag settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of consecutive weeks shown.
    pub week_count: usize,
    /// Weekday on which every week starts.
    #[serde(with = "crate::dates::serde_weekday")]
    pub week_start: Weekday,
    /// Trade given to a placeholder that is dragged out without one.
    pub fallback_trade: Trade,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            week_count: DEFAULT_WEEK_COUNT,
            week_start: Weekday::Monday,
            fallback_trade: Trade::new("Piping"),
        }
    }
}

/// Returns true if the week beginning at `anchor` shares a day with
/// `[start, end]`.
///
/// This is the only overlap test in the crate; display and editing both use
/// it so they cannot disagree about which column a record appears in.
#[must_use]
pub fn week_overlaps(anchor: Date, start: Date, end: Date) -> bool {
    // The last day of the week saturates at the maximum date instead of failing.
    let week_end: Date = add_days(anchor, DAYS_TO_WEEK_END).unwrap_or(Date::MAX);
    start <= week_end && end >= anchor
}

/// An ordered sequence of week anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGrid {
    pivot: Date,
    week_start: Weekday,
    anchors: Vec<Date>,
}

impl WeekGrid {
    /// Builds the grid for a pivot date.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured week count is zero or the anchors
    /// overflow the supported date range.
    pub fn new(pivot: Date, config: &GridConfig) -> Result<Self, DomainError> {
        Self::build(pivot, config.week_start, config.week_count)
    }

    fn build(pivot: Date, week_start: Weekday, week_count: usize) -> Result<Self, DomainError> {
        if week_count == 0 {
            return Err(DomainError::InvalidWeekCount { count: week_count });
        }

        let first: Date = week_start_on_or_before(pivot, week_start)?;
        let mut anchors: Vec<Date> = Vec::with_capacity(week_count);
        let mut anchor: Date = first;
        for index in 0..week_count {
            if index > 0 {
                anchor = add_days(anchor, 7)?;
            }
            anchors.push(anchor);
        }

        Ok(Self {
            pivot,
            week_start,
            anchors,
        })
    }

    /// Returns the pivot the grid was built from.
    #[must_use]
    pub const fn pivot(&self) -> Date {
        self.pivot
    }

    /// Returns the weekday every anchor falls on.
    #[must_use]
    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Returns all anchors in order.
    #[must_use]
    pub fn anchors(&self) -> &[Date] {
        &self.anchors
    }

    /// Returns the number of weeks in the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Always false; a grid has at least one week.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Returns the anchor (first day) of week `index`.
    #[must_use]
    pub fn anchor(&self, index: usize) -> Option<Date> {
        self.anchors.get(index).copied()
    }

    /// Returns the anchor of week `index`, or an error when it is off the grid.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::WeekIndexOutOfRange` for indexes past the end.
    pub fn require_anchor(&self, index: usize) -> Result<Date, DomainError> {
        self.anchor(index)
            .ok_or(DomainError::WeekIndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Returns the last day of week `index`.
    ///
    /// # Errors
    ///
    /// Returns an error when `index` is off the grid.
    pub fn week_end(&self, index: usize) -> Result<Date, DomainError> {
        add_days(self.require_anchor(index)?, DAYS_TO_WEEK_END)
    }

    /// Returns the full seven-day range of week `index`.
    ///
    /// # Errors
    ///
    /// Returns an error when `index` is off the grid.
    pub fn week_range(&self, index: usize) -> Result<DateRange, DomainError> {
        DateRange::new(self.require_anchor(index)?, self.week_end(index)?)
    }

    /// Returns the index of the week containing `date`, if it is on the grid.
    #[must_use]
    pub fn index_of(&self, date: Date) -> Option<usize> {
        self.anchors
            .iter()
            .position(|anchor| week_overlaps(*anchor, date, date))
    }

    /// Returns true iff `[start, end]` overlaps week `index`.
    ///
    /// Indexes off the grid never overlap anything.
    #[must_use]
    pub fn overlaps(&self, index: usize, start: Date, end: Date) -> bool {
        self.anchor(index)
            .is_some_and(|anchor| week_overlaps(anchor, start, end))
    }

    /// Returns the indexes of every week that `[start, end]` touches.
    #[must_use]
    pub fn overlapping_weeks(&self, start: Date, end: Date) -> Vec<usize> {
        (0..self.len())
            .filter(|index| self.overlaps(*index, start, end))
            .collect()
    }

    /// Moves the pivot forward by `weeks` and recomputes the anchors.
    ///
    /// # Errors
    ///
    /// Returns an error on date overflow.
    pub fn page_forward(&self, weeks: usize) -> Result<Self, DomainError> {
        self.shift(i64::try_from(weeks).unwrap_or(i64::MAX))
    }

    /// Moves the pivot back by `weeks` and recomputes the anchors.
    ///
    /// # Errors
    ///
    /// Returns an error on date overflow.
    pub fn page_back(&self, weeks: usize) -> Result<Self, DomainError> {
        self.shift(-i64::try_from(weeks).unwrap_or(i64::MAX))
    }

    fn shift(&self, weeks: i64) -> Result<Self, DomainError> {
        let days: i64 = weeks
            .checked_mul(7)
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("paging the grid by {weeks} weeks"),
            })?;
        let pivot: Date = add_days(self.pivot, days)?;
        Self::build(pivot, self.week_start, self.len())
    }
}
