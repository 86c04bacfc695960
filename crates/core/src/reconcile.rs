// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Final confirmation of a drag-derived date range.
//!
//! Gestures snap to whole weeks. Before anything is written the proposed
//! range is shown to the user, who may correct either bound to the day.
//! Confirming consumes the proposal; cancelling drops it with no effect.

use crate::drag::DragKind;
use crate::store::{Batch, BatchOp};
use crew_schedule_domain::{Allocation, Assignment, DateRange, Trade};
use time::Date;
use tracing::debug;

/// A proposed range change awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReconciliation {
    kind: DragKind,
    target: Assignment,
    new_start: Date,
    new_end: Date,
    allocation: Allocation,
    trade: Trade,
}

impl PendingReconciliation {
    /// Creates a proposal for `target`.
    #[must_use]
    pub const fn new(
        kind: DragKind,
        target: Assignment,
        new_start: Date,
        new_end: Date,
        allocation: Allocation,
        trade: Trade,
    ) -> Self {
        Self {
            kind,
            target,
            new_start,
            new_end,
            allocation,
            trade,
        }
    }

    /// Returns the gesture that produced this proposal.
    #[must_use]
    pub const fn kind(&self) -> DragKind {
        self.kind
    }

    /// Returns the record as it was when the gesture ended.
    #[must_use]
    pub const fn target(&self) -> &Assignment {
        &self.target
    }

    /// Returns the record's current start date.
    #[must_use]
    pub const fn old_start(&self) -> Date {
        self.target.start_date()
    }

    /// Returns the record's current end date.
    #[must_use]
    pub const fn old_end(&self) -> Date {
        self.target.end_date()
    }

    /// Returns the proposed start date.
    #[must_use]
    pub const fn new_start(&self) -> Date {
        self.new_start
    }

    /// Returns the proposed end date.
    #[must_use]
    pub const fn new_end(&self) -> Date {
        self.new_end
    }

    /// Returns the allocation the record will carry.
    #[must_use]
    pub const fn allocation(&self) -> Allocation {
        self.allocation
    }

    /// Returns the trade the record will carry.
    #[must_use]
    pub const fn trade(&self) -> &Trade {
        &self.trade
    }

    /// Overrides the proposed start date.
    pub const fn set_start(&mut self, start: Date) {
        self.new_start = start;
    }

    /// Overrides the proposed end date.
    pub const fn set_end(&mut self, end: Date) {
        self.new_end = end;
    }

    /// Returns true if the proposed bounds form a valid range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.new_start <= self.new_end
    }

    /// Confirms the proposal and returns the batch to commit.
    ///
    /// Returns `None` when the start is after the end or nothing would change;
    /// both are treated as a no-op rather than an error.
    #[must_use]
    pub fn confirm(self) -> Option<Batch> {
        let Ok(range) = DateRange::new(self.new_start, self.new_end) else {
            debug!(
                start = %self.new_start,
                end = %self.new_end,
                "Ignoring reconciliation with start after end"
            );
            return None;
        };

        if range == self.target.range()
            && self.allocation == self.target.allocation
            && self.trade == self.target.trade
        {
            debug!(target = %self.target.id, "Ignoring reconciliation with no change");
            return None;
        }

        let mut replacement: Assignment = self.target.clone();
        replacement.set_range(range);
        replacement.allocation = self.allocation;
        replacement.trade = self.trade;

        Some(Batch::single(BatchOp::Update {
            expected: self.target,
            replacement,
        }))
    }

    /// Discards the proposal.
    pub fn cancel(self) {
        debug!(target = %self.target.id, "Reconciliation cancelled");
    }
}
