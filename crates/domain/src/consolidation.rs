// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Grouping of raw assignment records into display rows.
//!
//! Every record with the same `(worker, project, trade)` lands in one row.
//! A lone record is shown as-is; several records become a consolidated row
//! whose segments are the records themselves, sorted by start date.
//!
//! ## Invariants
//!
//! - Consolidation is a partition: each record appears in exactly one row
//! - Records are never merged, rewritten or dropped here
//! - A week in a gap between segments is unassigned, even though it falls
//!   inside the row's overall span

use crate::error::DomainError;
use crate::incomplete::{ReferenceLookup, is_incomplete};
use crate::types::{Assignment, AssignmentId, DateRange, ProjectId, Trade, WorkerId};
use crate::week_grid::{WeekGrid, week_overlaps};
use std::collections::BTreeMap;

/// The grouping key of a row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowKey {
    /// The employee.
    pub worker_id: WorkerId,
    /// The project.
    pub project_id: ProjectId,
    /// The discipline.
    pub trade: Trade,
}

impl RowKey {
    /// Returns the key a record groups under.
    #[must_use]
    pub fn of(assignment: &Assignment) -> Self {
        Self {
            worker_id: assignment.worker_id.clone(),
            project_id: assignment.project_id.clone(),
            trade: assignment.trade.clone(),
        }
    }
}

/// The members of a consolidated row, sorted by start date. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments {
    first: Assignment,
    rest: Vec<Assignment>,
}

impl Segments {
    /// Sorts records by start date into a segment list.
    ///
    /// Returns `None` for an empty input.
    #[must_use]
    pub fn from_records(mut records: Vec<Assignment>) -> Option<Self> {
        records.sort_by(|a, b| {
            a.start_date()
                .cmp(&b.start_date())
                .then_with(|| a.id.cmp(&b.id))
        });
        let mut iter = records.into_iter();
        let first: Assignment = iter.next()?;
        Some(Self {
            first,
            rest: iter.collect(),
        })
    }

    /// Returns the earliest segment.
    #[must_use]
    pub const fn first(&self) -> &Assignment {
        &self.first
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    /// Always false.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the segments in start order.
    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }

    /// Returns the segments as an owned vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Assignment> {
        self.iter().cloned().collect()
    }
}

/// One line of the schedule grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// A key with exactly one record.
    Simple(Assignment),
    /// A key with several records.
    Consolidated {
        /// Display record: the first segment stretched over the whole span.
        summary: Assignment,
        /// Every underlying record, in start order.
        segments: Segments,
    },
}

impl Row {
    /// Returns the record used for row labels and overall span.
    #[must_use]
    pub const fn summary(&self) -> &Assignment {
        match self {
            Self::Simple(assignment) | Self::Consolidated {
                summary: assignment,
                ..
            } => assignment,
        }
    }

    /// Returns the grouping key.
    #[must_use]
    pub fn key(&self) -> RowKey {
        RowKey::of(self.summary())
    }

    /// Returns every underlying record of the row.
    #[must_use]
    pub fn segments(&self) -> Vec<&Assignment> {
        match self {
            Self::Simple(assignment) => vec![assignment],
            Self::Consolidated { segments, .. } => segments.iter().collect(),
        }
    }

    /// Returns true if the record with `id` belongs to this row.
    #[must_use]
    pub fn contains(&self, id: &AssignmentId) -> bool {
        match self {
            Self::Simple(assignment) => &assignment.id == id,
            Self::Consolidated { segments, .. } => segments.iter().any(|s| &s.id == id),
        }
    }

    /// Returns the underlying record with `id`.
    #[must_use]
    pub fn segment(&self, id: &AssignmentId) -> Option<&Assignment> {
        match self {
            Self::Simple(assignment) => (&assignment.id == id).then_some(assignment),
            Self::Consolidated { segments, .. } => segments.iter().find(|s| &s.id == id),
        }
    }

    /// Returns the record that applies in week `index`, if any.
    #[must_use]
    pub fn segment_for_week(&self, grid: &WeekGrid, index: usize) -> Option<&Assignment> {
        let anchor = grid.anchor(index)?;
        let applies = |a: &&Assignment| week_overlaps(anchor, a.start_date(), a.end_date());
        match self {
            Self::Simple(assignment) => Some(assignment).filter(applies),
            Self::Consolidated { segments, .. } => segments.iter().find(applies),
        }
    }

    /// Returns true if the row is a placeholder still being defined.
    #[must_use]
    pub fn is_incomplete<L: ReferenceLookup + ?Sized>(&self, lookup: &L) -> bool {
        match self {
            Self::Simple(assignment) => is_incomplete(assignment, lookup),
            Self::Consolidated { segments, .. } => {
                segments.iter().all(|s| is_incomplete(s, lookup))
            }
        }
    }
}

/// Groups records into rows ordered by key.
#[must_use]
pub fn consolidate<'a, I>(records: I) -> Vec<Row>
where
    I: IntoIterator<Item = &'a Assignment>,
{
    let mut groups: BTreeMap<RowKey, Vec<Assignment>> = BTreeMap::new();
    for record in records {
        groups
            .entry(RowKey::of(record))
            .or_default()
            .push(record.clone());
    }

    groups
        .into_values()
        .filter_map(Segments::from_records)
        .map(build_row)
        .collect()
}

fn build_row(segments: Segments) -> Row {
    if segments.len() == 1 {
        return Row::Simple(segments.first);
    }

    let start = segments.first().start_date();
    // Segments are sorted by start, so the latest end must be searched for.
    let end = segments
        .iter()
        .map(Assignment::end_date)
        .max()
        .unwrap_or_else(|| segments.first().end_date());

    let mut summary: Assignment = segments.first().clone();
    if let Ok(span) = DateRange::new(start, end) {
        summary.set_range(span);
    }

    Row::Consolidated { summary, segments }
}

/// Checks that no two records sharing a key overlap in time.
///
/// # Errors
///
/// Returns `DomainError::OverlappingSegments` naming the first offending pair.
pub fn validate_no_overlaps<'a, I>(records: I) -> Result<(), DomainError>
where
    I: IntoIterator<Item = &'a Assignment>,
{
    for row in consolidate(records) {
        if let Row::Consolidated { segments, .. } = row {
            let ordered: Vec<&Assignment> = segments.iter().collect();
            for pair in ordered.windows(2) {
                if pair[0].range().overlaps(&pair[1].range()) {
                    return Err(DomainError::OverlappingSegments {
                        first: pair[0].id.clone(),
                        second: pair[1].id.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}
