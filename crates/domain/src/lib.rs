// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod consolidation;
mod dates;
mod error;
mod incomplete;
mod types;
mod week_grid;

#[cfg(test)]
mod tests;

pub use consolidation::{Row, RowKey, Segments, consolidate, validate_no_overlaps};
pub use dates::{
    add_days, format_date, next_day, parse_local_date, parse_weekday, previous_day, serde_date,
    serde_weekday, week_start_on_or_before,
};
pub use error::DomainError;
pub use incomplete::{ProjectInfo, ReferenceDirectory, ReferenceLookup, WorkerInfo, is_incomplete};
pub use types::{
    Allocation, Assignment, AssignmentDraft, AssignmentId, DateRange, ProjectId, Trade, WorkerId,
};
pub use week_grid::{DEFAULT_WEEK_COUNT, GridConfig, WeekGrid, week_overlaps};
