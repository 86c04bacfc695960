// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::check;
use crate::error::CoreError;
use crate::store::{Batch, Snapshot, StoreError};
use crew_schedule_domain::{Row, RowKey, consolidate};
use std::sync::Arc;
use tracing::debug;

/// A write that has been handed to the store but has not resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlightWrite {
    preview: Snapshot,
}

/// The consolidated rows the grid displays, and where they came from.
///
/// While a write is in flight the rows reflect the optimistic preview of that
/// write. Once it resolves, the store's snapshot is authoritative again; a
/// failed write falls back to the last known-good snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleView {
    committed: Arc<Snapshot>,
    in_flight: Option<InFlightWrite>,
    rows: Vec<Row>,
}

impl ScheduleView {
    /// Creates a view of a committed snapshot.
    #[must_use]
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        let rows: Vec<Row> = consolidate(snapshot.records());
        Self {
            committed: snapshot,
            in_flight: None,
            rows,
        }
    }

    /// Returns the last known-good snapshot.
    #[must_use]
    pub fn committed(&self) -> &Snapshot {
        &self.committed
    }

    /// Returns the snapshot currently on screen.
    #[must_use]
    pub fn displayed(&self) -> &Snapshot {
        self.in_flight
            .as_ref()
            .map_or(&*self.committed, |write| &write.preview)
    }

    /// Returns the consolidated rows on screen.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the row with `key`.
    #[must_use]
    pub fn row(&self, key: &RowKey) -> Option<&Row> {
        self.rows.iter().find(|row| &row.key() == key)
    }

    /// Returns true while a write awaits its result.
    #[must_use]
    pub const fn is_write_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Installs the optimistic preview of `batch`.
    ///
    /// # Errors
    ///
    /// Returns an error if another write is in flight, or if the batch would
    /// be rejected against the committed snapshot.
    pub fn stage(&mut self, batch: &Batch) -> Result<(), CoreError> {
        if self.in_flight.is_some() {
            return Err(CoreError::WriteInFlight);
        }
        let preview: Snapshot = check(&self.committed, batch)?;
        self.rows = consolidate(preview.records());
        self.in_flight = Some(InFlightWrite { preview });
        debug!(ops = batch.len(), "Staged optimistic preview");
        Ok(())
    }

    /// Resolves the in-flight write with the store's answer.
    ///
    /// On success the returned snapshot becomes the committed one. On failure
    /// the preview is discarded and the rows are rebuilt from the last
    /// known-good snapshot.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoWriteInFlight` if nothing was staged, or the
    /// store's error wrapped in `CoreError::Store`.
    pub fn settle(
        &mut self,
        result: Result<Arc<Snapshot>, StoreError>,
    ) -> Result<Arc<Snapshot>, CoreError> {
        if self.in_flight.take().is_none() {
            return Err(CoreError::NoWriteInFlight);
        }
        match result {
            Ok(snapshot) => {
                self.adopt(Arc::clone(&snapshot));
                Ok(snapshot)
            }
            Err(err) => {
                self.rows = consolidate(self.committed.records());
                Err(CoreError::Store(err))
            }
        }
    }

    /// Accepts a change notification from the store.
    ///
    /// Snapshots older than the committed one are ignored. While a write is in
    /// flight the preview stays on screen; the new snapshot only replaces the
    /// fallback.
    pub fn accept(&mut self, snapshot: Arc<Snapshot>) -> bool {
        if snapshot.version() < self.committed.version() {
            debug!(
                version = snapshot.version(),
                committed = self.committed.version(),
                "Ignoring stale snapshot"
            );
            return false;
        }
        if self.in_flight.is_some() {
            self.committed = snapshot;
            return true;
        }
        self.adopt(snapshot);
        true
    }

    fn adopt(&mut self, snapshot: Arc<Snapshot>) {
        self.rows = consolidate(snapshot.records());
        self.committed = snapshot;
    }
}
