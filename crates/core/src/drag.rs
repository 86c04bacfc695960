// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pointer-driven range editing on the week grid.
//!
//! At most one drag session exists at a time. The session is a plain value
//! owned by [`DragMachine`]; nothing about an active drag lives in shared
//! state. A release hands the finished session back to the caller, which
//! resolves it into a [`PendingReconciliation`] with [`resolve`].
//!
//! ## Resolution rules
//!
//! - `MoveStart`: dragging to an earlier week no segment of the row covers
//!   moves the start to that week's anchor; dragging later moves the start to the week after the
//!   furthest week reached; the end never moves
//! - `ExtendEnd`: the end becomes the last day of the furthest week reached
//! - `CarveNew`: the range spans the first to the last week touched, and a
//!   placeholder's zero allocation and blank trade get defaults
//!
//! Resolution reads only `(kind, anchor_week, current_week)`, so the order of
//! the pointer-enter events in between cannot change the outcome.

use crate::error::CoreError;
use crate::reconcile::PendingReconciliation;
use crew_schedule_domain::{
    Allocation, Assignment, AssignmentId, Row, RowKey, Trade, WeekGrid, add_days,
};
use time::Date;
use tracing::debug;

/// The operation a drag performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragKind {
    /// Dragging the left edge handle of an assigned cell.
    MoveStart,
    /// Dragging the right edge handle of an assigned cell.
    ExtendEnd,
    /// Dragging across the cells of a placeholder row.
    CarveNew,
}

/// One active pointer gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    /// The operation.
    pub kind: DragKind,
    /// The record being edited.
    pub target: AssignmentId,
    /// The row the gesture started in.
    pub row: RowKey,
    /// The week the pointer went down on.
    pub anchor_week: usize,
    /// The week the pointer is over now.
    pub current_week: usize,
}

impl DragSession {
    /// Returns the highlighted span `[min, max]` of weeks.
    #[must_use]
    pub fn span(&self) -> (usize, usize) {
        (
            self.anchor_week.min(self.current_week),
            self.anchor_week.max(self.current_week),
        )
    }
}

/// The drag machine's state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A gesture is in progress; its kind is the sub-state.
    Active(DragSession),
}

/// Tracks the single active drag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragMachine {
    state: DragState,
}

impl DragMachine {
    /// Creates an idle machine.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns the active session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Idle => None,
            DragState::Active(session) => Some(session),
        }
    }

    /// Returns true while a gesture is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, DragState::Active(_))
    }

    /// Starts a gesture on `target` at `week`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DragInProgress` if a gesture is already active.
    pub fn press(
        &mut self,
        kind: DragKind,
        target: AssignmentId,
        row: RowKey,
        week: usize,
    ) -> Result<(), CoreError> {
        if self.is_active() {
            return Err(CoreError::DragInProgress);
        }
        debug!(?kind, target = %target, week, "Drag started");
        self.state = DragState::Active(DragSession {
            kind,
            target,
            row,
            anchor_week: week,
            current_week: week,
        });
        Ok(())
    }

    /// Records the pointer entering `week` of `row`.
    ///
    /// Cells of other rows are ignored. Returns true if the preview changed.
    pub fn enter(&mut self, row: &RowKey, week: usize) -> bool {
        match &mut self.state {
            DragState::Active(session) if &session.row == row => {
                let changed: bool = session.current_week != week;
                session.current_week = week;
                changed
            }
            _ => false,
        }
    }

    /// Returns the highlighted week span of the active gesture.
    #[must_use]
    pub fn preview(&self) -> Option<(usize, usize)> {
        self.session().map(DragSession::span)
    }

    /// Ends the gesture and returns it for resolution.
    pub fn release(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Active(session) => {
                debug!(
                    kind = ?session.kind,
                    anchor = session.anchor_week,
                    current = session.current_week,
                    "Drag released"
                );
                Some(session)
            }
        }
    }

    /// Abandons the gesture without resolving it.
    pub fn cancel(&mut self) {
        if self.is_active() {
            debug!("Drag cancelled");
        }
        self.state = DragState::Idle;
    }
}

/// Turns a released session into a proposed change awaiting confirmation.
///
/// # Arguments
///
/// * `session` - The released gesture
/// * `row` - The row the gesture started in, holding the target record
/// * `grid` - The grid the week indexes refer to
/// * `fallback_trade` - Trade given to a placeholder without one
///
/// # Errors
///
/// Returns `CoreError::AssignmentNotFound` if the row no longer holds the
/// target, or an error if a week index is off the grid or date arithmetic
/// overflows.
pub fn resolve(
    session: &DragSession,
    row: &Row,
    grid: &WeekGrid,
    fallback_trade: &Trade,
) -> Result<PendingReconciliation, CoreError> {
    let target: &Assignment = row
        .segment(&session.target)
        .ok_or_else(|| CoreError::AssignmentNotFound(session.target.clone()))?;
    let (first, last) = session.span();
    let mut allocation: Allocation = target.allocation;
    let mut trade: Trade = target.trade.clone();

    let (new_start, new_end): (Date, Date) = match session.kind {
        DragKind::MoveStart => (
            resolve_move_start(session, target, row, grid)?,
            target.end_date(),
        ),
        DragKind::ExtendEnd => (target.start_date(), grid.week_end(last)?),
        DragKind::CarveNew => {
            if allocation.is_zero() {
                allocation = Allocation::FULL_TIME;
            }
            if trade.is_blank() {
                trade = fallback_trade.clone();
            }
            (grid.require_anchor(first)?, grid.week_end(last)?)
        }
    };

    Ok(PendingReconciliation::new(
        session.kind,
        target.clone(),
        new_start,
        new_end,
        allocation,
        trade,
    ))
}

fn resolve_move_start(
    session: &DragSession,
    target: &Assignment,
    row: &Row,
    grid: &WeekGrid,
) -> Result<Date, CoreError> {
    let current: usize = session.current_week;

    if current < session.anchor_week {
        // A sibling segment may already cover the week.
        if row.segment_for_week(grid, current).is_some() {
            return Ok(target.start_date());
        }
        return Ok(grid.require_anchor(current)?);
    }

    if current > session.anchor_week {
        // The week after the furthest week reached; it may lie past the grid.
        return Ok(add_days(grid.require_anchor(current)?, 7)?);
    }

    Ok(target.start_date())
}
