// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use crew_schedule::{AssignmentStore, Batch, Snapshot, StoreError};
use crew_schedule_domain::{Assignment, AssignmentId, validate_no_overlaps};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Maximum number of snapshots buffered for subscribers.
/// Slow subscribers skip older snapshots; only the latest one matters.
pub const SNAPSHOT_BUFFER_SIZE: usize = 16;

/// Prefix of store-assigned assignment ids.
pub const ID_PREFIX: &str = "asg";

/// The reference assignment store.
///
/// Holds the whole collection as an immutable snapshot. Each batch is applied
/// to a copy that replaces the current snapshot only if every operation
/// succeeded. Successful writes are published to subscribers.
pub struct InMemoryStore {
    snapshot: Arc<Snapshot>,
    next_id: u64,
    tx: broadcast::Sender<Arc<Snapshot>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(SNAPSHOT_BUFFER_SIZE);
        Self {
            snapshot: Arc::new(Snapshot::default()),
            next_id: 0,
            tx,
        }
    }

    /// Creates a store seeded with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if two records share an id or two records of one row
    /// overlap.
    pub fn with_records(records: Vec<Assignment>) -> Result<Self, PersistenceError> {
        let mut seen: BTreeSet<&AssignmentId> = BTreeSet::new();
        if let Some(duplicate) = records.iter().find(|record| !seen.insert(&record.id)) {
            warn!(id = %duplicate.id, "Refusing to seed duplicate assignment id");
            return Err(PersistenceError::InvalidData(format!(
                "Duplicate assignment id '{}'",
                duplicate.id
            )));
        }
        validate_no_overlaps(&records)?;
        let mut store: Self = Self::new();
        info!(records = records.len(), "Seeding assignment store");
        store.snapshot = Arc::new(Snapshot::new(0, records));
        Ok(store)
    }

    /// Subscribes to snapshots published after each successful write.
    ///
    /// Snapshots published before subscription are not received.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Snapshot>> {
        self.tx.subscribe()
    }

    fn publish(&self) {
        match self.tx.send(Arc::clone(&self.snapshot)) {
            Ok(count) => {
                debug!(version = self.snapshot.version(), receivers = count, "Published snapshot");
            }
            Err(_) => {
                debug!(version = self.snapshot.version(), "No subscribers for snapshot");
            }
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentStore for InMemoryStore {
    fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    fn apply_batch(&mut self, batch: Batch) -> Result<Arc<Snapshot>, StoreError> {
        let current: &Snapshot = &self.snapshot;
        let counter: &mut u64 = &mut self.next_id;
        let next_id = || loop {
            *counter += 1;
            let n: u64 = *counter;
            let id: AssignmentId = AssignmentId::new(&format!("{ID_PREFIX}-{n:06}"));
            // Seeded records may already use ids from the same sequence.
            if current.get(&id).is_none() {
                break id;
            }
        };

        match current.apply(&batch, next_id) {
            Ok(updated) => {
                info!(
                    version = updated.version(),
                    ops = batch.len(),
                    records = updated.len(),
                    "Batch committed"
                );
                self.snapshot = Arc::new(updated);
                self.publish();
                Ok(Arc::clone(&self.snapshot))
            }
            Err(err) => {
                warn!(ops = batch.len(), error = %err, "Batch rejected");
                Err(err)
            }
        }
    }
}
