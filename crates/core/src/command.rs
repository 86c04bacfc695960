// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::merge::plan_merge;
use crate::split::{SegmentUpdates, SplitPlan, plan_split};
use crate::store::{Batch, BatchOp, Snapshot};
use crew_schedule_domain::{
    Allocation, Assignment, AssignmentDraft, AssignmentId, DateRange, ProjectId, ReferenceLookup,
    Row, RowKey, Trade, WeekGrid, WorkerId, consolidate, is_incomplete,
};
use time::Date;

/// A command represents user intent as data only.
///
/// Drag gestures are not commands; they go through the drag machine and
/// reconciliation instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Change trade and/or allocation from a week forward.
    EditSegment {
        /// The record (or segment) being edited.
        target: AssignmentId,
        /// The first week the change applies to.
        week_index: usize,
        /// The new values.
        updates: SegmentUpdates,
    },
    /// Delete a placeholder record.
    DeleteIncomplete {
        /// The placeholder.
        target: AssignmentId,
    },
    /// Add a placeholder row for a worker, to be carved into a real range.
    AddPlaceholder {
        /// The employee.
        worker_id: WorkerId,
        /// The single day the placeholder occupies until it is carved.
        date: Date,
    },
    /// Merge contiguous, equal-allocation segments of one row.
    MergeRow {
        /// The row to merge.
        key: RowKey,
    },
}

impl Command {
    /// Returns the name used in log lines and user messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EditSegment { .. } => "EditSegment",
            Self::DeleteIncomplete { .. } => "DeleteIncomplete",
            Self::AddPlaceholder { .. } => "AddPlaceholder",
            Self::MergeRow { .. } => "MergeRow",
        }
    }
}

/// Turns a command into the batch that carries it out.
///
/// Planning is read-only: it inspects `snapshot` and returns the writes to
/// perform. The returned batch is checked against `snapshot` before it is
/// handed back, so a batch that the store would reject for an overlap is
/// refused here without any write.
///
/// # Arguments
///
/// * `snapshot` - The collection the command is planned against
/// * `grid` - The grid any week index refers to
/// * `lookup` - Reference data for placeholder detection
/// * `command` - The command to plan
///
/// # Returns
///
/// * `Ok(None)` if the command is a no-op
/// * `Ok(Some(batch))` with the writes to commit atomically
///
/// # Errors
///
/// Returns an error if:
/// - The target record or row does not exist
/// - A deletion targets a record that is not a placeholder
/// - A week index is off the grid
/// - The resulting collection would break a domain invariant
pub fn plan<L: ReferenceLookup + ?Sized>(
    snapshot: &Snapshot,
    grid: &WeekGrid,
    lookup: &L,
    command: Command,
) -> Result<Option<Batch>, CoreError> {
    let batch: Option<Batch> = match command {
        Command::EditSegment {
            target,
            week_index,
            updates,
        } => {
            let record: &Assignment = find(snapshot, &target)?;
            plan_split(record, grid, week_index, &updates)?.map(SplitPlan::into_batch)
        }
        Command::DeleteIncomplete { target } => {
            let record: &Assignment = find(snapshot, &target)?;
            if !is_incomplete(record, lookup) {
                return Err(CoreError::NotIncomplete(target));
            }
            Some(Batch::single(BatchOp::Delete {
                expected: record.clone(),
            }))
        }
        Command::AddPlaceholder { worker_id, date } => {
            Some(Batch::single(BatchOp::Insert(AssignmentDraft {
                worker_id,
                project_id: ProjectId::default(),
                trade: Trade::default(),
                allocation: Allocation::new(0),
                range: DateRange::new(date, date)?,
                locked: false,
            })))
        }
        Command::MergeRow { key } => {
            let rows: Vec<Row> = consolidate(snapshot.records());
            let row: &Row = rows
                .iter()
                .find(|row| row.key() == key)
                .ok_or_else(|| CoreError::RowNotFound {
                    worker: key.worker_id.value().to_string(),
                    project: key.project_id.value().to_string(),
                    trade: key.trade.value().to_string(),
                })?;
            plan_merge(row)?
        }
    };

    if let Some(batch) = &batch {
        check(snapshot, batch)?;
    }
    Ok(batch)
}

/// Checks a batch against `snapshot` without writing anything.
///
/// # Errors
///
/// Returns the error the store would report for this batch.
pub fn check(snapshot: &Snapshot, batch: &Batch) -> Result<Snapshot, CoreError> {
    let mut counter: u64 = 0;
    let projected: Snapshot = snapshot.apply(batch, || {
        counter += 1;
        AssignmentId::new(&format!("pending-{counter}"))
    })?;
    Ok(projected)
}

fn find<'a>(snapshot: &'a Snapshot, id: &AssignmentId) -> Result<&'a Assignment, CoreError> {
    snapshot
        .get(id)
        .ok_or_else(|| CoreError::AssignmentNotFound(id.clone()))
}
