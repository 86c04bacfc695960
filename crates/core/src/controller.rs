// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The interaction controller behind the workload grid.
//!
//! A UI shell forwards discrete events here: pointer down on a handle or a
//! cell, pointer enter, pointer up, Escape, confirmation of a proposed range,
//! and property edits. Every event is handled synchronously. Commits go
//! through [`ScheduleView::stage`] and [`ScheduleView::settle`], so a failed
//! write always falls back to the last known-good snapshot.

use crate::command::{Command, plan};
use crate::drag::{DragKind, DragMachine, resolve};
use crate::error::CoreError;
use crate::notify::Notifier;
use crate::reconcile::PendingReconciliation;
use crate::split::SegmentUpdates;
use crate::state::ScheduleView;
use crate::store::{AssignmentStore, Batch, Snapshot};
use crew_schedule_domain::{
    Assignment, AssignmentId, GridConfig, ReferenceLookup, Row, RowKey, WeekGrid, WorkerId,
};
use std::sync::Arc;
use time::Date;
use tracing::{debug, info, warn};

/// Owns the grid, the drag machine, the pending reconciliation and the view.
pub struct ScheduleController<S, N, L> {
    store: S,
    notifier: N,
    lookup: L,
    config: GridConfig,
    grid: WeekGrid,
    view: ScheduleView,
    drag: DragMachine,
    pending: Option<PendingReconciliation>,
}

impl<S, N, L> ScheduleController<S, N, L>
where
    S: AssignmentStore,
    N: Notifier,
    L: ReferenceLookup,
{
    /// Creates a controller showing the grid around `pivot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be built from `config`.
    pub fn new(
        store: S,
        notifier: N,
        lookup: L,
        config: GridConfig,
        pivot: Date,
    ) -> Result<Self, CoreError> {
        let grid: WeekGrid = WeekGrid::new(pivot, &config)?;
        let view: ScheduleView = ScheduleView::new(store.snapshot());
        Ok(Self {
            store,
            notifier,
            lookup,
            config,
            grid,
            view,
            drag: DragMachine::new(),
            pending: None,
        })
    }

    /// Returns the week grid.
    #[must_use]
    pub const fn grid(&self) -> &WeekGrid {
        &self.grid
    }

    /// Returns the view on screen.
    #[must_use]
    pub const fn view(&self) -> &ScheduleView {
        &self.view
    }

    /// Returns the consolidated rows on screen.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        self.view.rows()
    }

    /// Returns the store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the reference data used for placeholder detection.
    #[must_use]
    pub const fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Returns the notifier.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns the store mutably, for shells that write outside the controller.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Returns the drag machine.
    #[must_use]
    pub const fn drag(&self) -> &DragMachine {
        &self.drag
    }

    /// Returns the record shown in week `week` of the row with `key`.
    #[must_use]
    pub fn cell(&self, key: &RowKey, week: usize) -> Option<&Assignment> {
        self.view.row(key)?.segment_for_week(&self.grid, week)
    }

    /// Returns the week span highlighted by the active drag.
    #[must_use]
    pub fn drag_preview(&self) -> Option<(usize, usize)> {
        self.drag.preview()
    }

    /// Moves the grid forward by `weeks`. Any active drag is cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error on date overflow.
    pub fn page_forward(&mut self, weeks: usize) -> Result<(), CoreError> {
        self.drag.cancel();
        self.grid = self.grid.page_forward(weeks)?;
        Ok(())
    }

    /// Moves the grid back by `weeks`. Any active drag is cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error on date overflow.
    pub fn page_back(&mut self, weeks: usize) -> Result<(), CoreError> {
        self.drag.cancel();
        self.grid = self.grid.page_back(weeks)?;
        Ok(())
    }

    /// Accepts a change notification from the store.
    pub fn on_snapshot(&mut self, snapshot: Arc<Snapshot>) {
        if self.view.accept(snapshot) {
            debug!(rows = self.view.rows().len(), "Rows recomputed");
        }
    }

    /// Pointer down on the left edge handle of an assigned cell.
    ///
    /// Returns true if a drag started.
    ///
    /// # Errors
    ///
    /// Returns an error if a drag or reconciliation is already active.
    pub fn press_start_handle(&mut self, key: &RowKey, week: usize) -> Result<bool, CoreError> {
        self.press_handle(DragKind::MoveStart, key, week)
    }

    /// Pointer down on the right edge handle of an assigned cell.
    ///
    /// Returns true if a drag started.
    ///
    /// # Errors
    ///
    /// Returns an error if a drag or reconciliation is already active.
    pub fn press_end_handle(&mut self, key: &RowKey, week: usize) -> Result<bool, CoreError> {
        self.press_handle(DragKind::ExtendEnd, key, week)
    }

    fn press_handle(&mut self, kind: DragKind, key: &RowKey, week: usize) -> Result<bool, CoreError> {
        self.ensure_idle()?;
        let Some(target) = self.cell(key, week).map(|a| a.id.clone()) else {
            debug!(week, "Ignoring handle press on an unassigned cell");
            return Ok(false);
        };
        self.drag.press(kind, target, key.clone(), week)?;
        Ok(true)
    }

    /// Pointer down on any cell of a row.
    ///
    /// Only placeholder rows start a `CarveNew` drag; other rows ignore the press.
    ///
    /// # Errors
    ///
    /// Returns an error if a drag or reconciliation is already active, or the
    /// row does not exist.
    pub fn press_cell(&mut self, key: &RowKey, week: usize) -> Result<bool, CoreError> {
        self.ensure_idle()?;
        let row: &Row = self.view.row(key).ok_or_else(|| row_not_found(key))?;
        if !row.is_incomplete(&self.lookup) {
            debug!(week, "Ignoring cell press on a populated row");
            return Ok(false);
        }
        let target: AssignmentId = row
            .segment_for_week(&self.grid, week)
            .unwrap_or_else(|| row.summary())
            .id
            .clone();
        self.drag.press(DragKind::CarveNew, target, key.clone(), week)?;
        Ok(true)
    }

    /// Pointer entered week `week` of the row with `key`.
    ///
    /// Returns true if the drag preview changed.
    pub fn pointer_enter(&mut self, key: &RowKey, week: usize) -> bool {
        self.drag.enter(key, week)
    }

    /// Pointer released anywhere.
    ///
    /// Ends the active drag and, if there was one, resolves it into a pending
    /// reconciliation awaiting confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if the dragged record vanished or the drag cannot be resolved.
    pub fn pointer_up(&mut self) -> Result<Option<&PendingReconciliation>, CoreError> {
        let Some(session) = self.drag.release() else {
            return Ok(None);
        };
        let Some(row) = self.view.row(&session.row) else {
            warn!(target = %session.target, "Dragged row no longer exists");
            return Err(CoreError::AssignmentNotFound(session.target));
        };
        let pending: PendingReconciliation =
            resolve(&session, row, &self.grid, &self.config.fallback_trade)?;
        let pending: &PendingReconciliation = self.pending.insert(pending);
        Ok(Some(pending))
    }

    /// Escape: cancels the active drag, or else the pending reconciliation.
    pub fn escape(&mut self) {
        if self.drag.is_active() {
            self.drag.cancel();
        } else {
            self.cancel_pending();
        }
    }

    /// Returns the proposal awaiting confirmation.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingReconciliation> {
        self.pending.as_ref()
    }

    /// Returns the proposal awaiting confirmation, for day-level correction.
    pub const fn pending_mut(&mut self) -> Option<&mut PendingReconciliation> {
        self.pending.as_mut()
    }

    /// Discards the proposal awaiting confirmation.
    pub fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    /// Confirms the proposal awaiting confirmation and commits it.
    ///
    /// Returns true if a write was committed.
    ///
    /// # Errors
    ///
    /// Returns an error if the change is rejected or the write fails.
    pub fn confirm_pending(&mut self) -> Result<bool, CoreError> {
        let Some(pending) = self.pending.take() else {
            return Ok(false);
        };
        let label: &'static str = match pending.kind() {
            DragKind::MoveStart => "Start date change",
            DragKind::ExtendEnd => "End date change",
            DragKind::CarveNew => "New assignment range",
        };
        match pending.confirm() {
            Some(batch) => self.commit(&batch, label),
            None => Ok(false),
        }
    }

    /// Changes trade and/or allocation of a record from week `week` forward.
    ///
    /// Returns true if a write was committed.
    ///
    /// # Errors
    ///
    /// Returns an error if the change is rejected or the write fails.
    pub fn edit_segment(
        &mut self,
        target: AssignmentId,
        week: usize,
        updates: SegmentUpdates,
    ) -> Result<bool, CoreError> {
        self.execute(Command::EditSegment {
            target,
            week_index: week,
            updates,
        })
    }

    /// Deletes a placeholder record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not a placeholder or the write fails.
    pub fn delete_incomplete(&mut self, target: AssignmentId) -> Result<bool, CoreError> {
        self.execute(Command::DeleteIncomplete { target })
    }

    /// Adds a placeholder row for `worker_id` at the first week of the grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker already has an overlapping placeholder
    /// or the write fails.
    pub fn add_placeholder(&mut self, worker_id: WorkerId) -> Result<bool, CoreError> {
        let date: Date = self.grid.require_anchor(0)?;
        self.execute(Command::AddPlaceholder { worker_id, date })
    }

    /// Merges contiguous, equal-allocation segments of a row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row does not exist or the write fails.
    pub fn merge_row(&mut self, key: RowKey) -> Result<bool, CoreError> {
        self.execute(Command::MergeRow { key })
    }

    /// Plans and commits a command.
    ///
    /// Returns true if a write was committed, false for a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if planning fails or the write is rejected. Either way
    /// the notifier has been told.
    pub fn execute(&mut self, command: Command) -> Result<bool, CoreError> {
        let name: &'static str = command.name();
        let planned: Result<Option<Batch>, CoreError> =
            plan(self.view.committed(), &self.grid, &self.lookup, command);
        match planned {
            Ok(Some(batch)) => self.commit(&batch, name),
            Ok(None) => Ok(false),
            Err(err) => {
                warn!(command = name, error = %err, "Command rejected");
                self.notifier.error(&err.to_string());
                Err(err)
            }
        }
    }

    fn commit(&mut self, batch: &Batch, label: &str) -> Result<bool, CoreError> {
        if let Err(err) = self.view.stage(batch) {
            warn!(label, error = %err, "Change rejected before writing");
            self.notifier.error(&err.to_string());
            return Err(err);
        }

        let result = self.store.apply_batch(batch.clone());
        match self.view.settle(result) {
            Ok(snapshot) => {
                info!(label, version = snapshot.version(), ops = batch.len(), "Change committed");
                self.notifier.success(&format!("{label} saved"));
                Ok(true)
            }
            Err(err) => {
                warn!(label, error = %err, "Write failed; restored last known-good rows");
                self.notifier.error(&format!("{label} failed: {err}"));
                Err(err)
            }
        }
    }

    fn ensure_idle(&self) -> Result<(), CoreError> {
        if self.drag.is_active() || self.pending.is_some() {
            return Err(CoreError::DragInProgress);
        }
        Ok(())
    }
}

fn row_not_found(key: &RowKey) -> CoreError {
    CoreError::RowNotFound {
        worker: key.worker_id.value().to_string(),
        project: key.project_id.value().to_string(),
        trade: key.trade.value().to_string(),
    }
}
