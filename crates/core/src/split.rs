// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Split-on-edit: changing trade or allocation from a given week forward.
//!
//! The edited record is replaced by an unchanged "before" record covering
//! the days up to the edit week, and an "after" record carrying the change
//! from the edit week to the original end. History before the edit week is
//! never rewritten.
//!
//! ## Invariants
//!
//! - An edit that changes nothing produces no plan and therefore no writes
//! - `before` and `after` exactly cover the original range, with no gap or overlap
//! - `before` keeps the original `locked` flag; `after` is always unlocked
//! - Only the targeted record is touched; sibling segments stay as they are

use crate::error::CoreError;
use crate::store::{Batch, BatchOp};
use crew_schedule_domain::{
    Allocation, Assignment, AssignmentDraft, DateRange, Trade, WeekGrid, previous_day,
};
use time::Date;
use tracing::debug;

/// Property changes for a split-on-edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SegmentUpdates {
    /// New trade, if it is being changed.
    pub trade: Option<Trade>,
    /// New allocation, if it is being changed.
    pub allocation: Option<Allocation>,
}

impl SegmentUpdates {
    /// Returns true if applying the updates to `target` would change it.
    #[must_use]
    pub fn differs_from(&self, target: &Assignment) -> bool {
        self.trade.as_ref().is_some_and(|t| t != &target.trade)
            || self.allocation.is_some_and(|a| a != target.allocation)
    }
}

/// The records that replace an edited assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    /// The record being replaced.
    pub original: Assignment,
    /// The untouched history before the edit week, if any.
    pub before: Option<AssignmentDraft>,
    /// The edited record from the edit week to the original end.
    pub after: AssignmentDraft,
}

impl SplitPlan {
    /// Returns the atomic batch: delete the original, insert the replacements.
    #[must_use]
    pub fn into_batch(self) -> Batch {
        let mut batch: Batch = Batch::single(BatchOp::Delete {
            expected: self.original,
        });
        if let Some(before) = self.before {
            batch.push(BatchOp::Insert(before));
        }
        batch.push(BatchOp::Insert(self.after));
        batch
    }
}

/// Plans a split-on-edit of `target` at week `week_index`.
///
/// # Arguments
///
/// * `target` - The record (or consolidated-row segment) being edited
/// * `grid` - The grid `week_index` refers to
/// * `week_index` - The first week the change applies to
/// * `updates` - The trade and/or allocation change
///
/// # Returns
///
/// * `Ok(None)` if the updates change nothing, or the edit week starts after the record ends
/// * `Ok(Some(plan))` otherwise
///
/// # Errors
///
/// Returns an error if `week_index` is off the grid or date arithmetic overflows.
pub fn plan_split(
    target: &Assignment,
    grid: &WeekGrid,
    week_index: usize,
    updates: &SegmentUpdates,
) -> Result<Option<SplitPlan>, CoreError> {
    if !updates.differs_from(target) {
        debug!(target = %target.id, "Ignoring edit that changes nothing");
        return Ok(None);
    }

    let change_date: Date = grid.require_anchor(week_index)?;
    if change_date > target.end_date() {
        debug!(
            target = %target.id,
            %change_date,
            "Ignoring edit at a week after the record ends"
        );
        return Ok(None);
    }

    let before: Option<AssignmentDraft> = if target.start_date() < change_date {
        let mut draft: AssignmentDraft = target.to_draft();
        draft.range = DateRange::new(target.start_date(), previous_day(change_date)?)?;
        Some(draft)
    } else {
        None
    };

    // A record starting mid-week keeps its own start rather than growing backwards.
    let after_start: Date = change_date.max(target.start_date());
    let mut after: AssignmentDraft = target.to_draft();
    after.range = DateRange::new(after_start, target.end_date())?;
    after.locked = false;
    if let Some(trade) = &updates.trade {
        after.trade = trade.clone();
    }
    if let Some(allocation) = updates.allocation {
        after.allocation = allocation;
    }

    Ok(Some(SplitPlan {
        original: target.clone(),
        before,
        after,
    }))
}
