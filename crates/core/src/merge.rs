// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Explicit merging of contiguous segments.
//!
//! Split-on-edit never merges on its own, so repeated edits leave a row with
//! ever more segments. This operation folds back runs of segments that touch
//! day-to-day and carry the same allocation. It only runs when asked.

use crate::error::CoreError;
use crate::store::{Batch, BatchOp};
use crew_schedule_domain::{Assignment, AssignmentDraft, DateRange, Row, next_day};
use tracing::debug;

/// Plans the merge of every contiguous, equal-allocation run in `row`.
///
/// The merged record is locked only if every record in its run was.
///
/// # Returns
///
/// * `Ok(None)` if no two neighbouring segments can be merged
/// * `Ok(Some(batch))` deleting each merged segment and inserting one record per run
///
/// # Errors
///
/// Returns an error on date arithmetic overflow.
pub fn plan_merge(row: &Row) -> Result<Option<Batch>, CoreError> {
    let segments: Vec<&Assignment> = row.segments();
    let mut runs: Vec<Vec<&Assignment>> = Vec::new();

    for segment in segments {
        let extends_run: bool = match runs.last().and_then(|run| run.last()) {
            Some(previous) => {
                previous.allocation == segment.allocation
                    && next_day(previous.end_date())? == segment.start_date()
            }
            None => false,
        };
        match runs.last_mut() {
            Some(run) if extends_run => run.push(segment),
            _ => runs.push(vec![segment]),
        }
    }

    let mut batch: Batch = Batch::new();
    for run in runs.into_iter().filter(|run| run.len() > 1) {
        let (Some(first), Some(last)) = (run.first(), run.last()) else {
            continue;
        };
        let mut merged: AssignmentDraft = first.to_draft();
        merged.range = DateRange::new(first.start_date(), last.end_date())?;
        merged.locked = run.iter().all(|segment| segment.locked);

        for segment in &run {
            batch.push(BatchOp::Delete {
                expected: (*segment).clone(),
            });
        }
        batch.push(BatchOp::Insert(merged));
    }

    if batch.is_empty() {
        debug!("No contiguous segments to merge");
        return Ok(None);
    }
    Ok(Some(batch))
}
