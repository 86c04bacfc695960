// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The assignment store collaborator.
//!
//! The engine never persists anything itself. It reads full-collection
//! snapshots and hands the store ordered batches that must commit as a unit.
//! Deletes and updates carry the record the caller last saw, so a store can
//! refuse to overwrite a record somebody else changed in the meantime.

use crew_schedule_domain::{
    Assignment, AssignmentDraft, AssignmentId, DomainError, RowKey, validate_no_overlaps,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;

/// Errors a store reports for a rejected batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The stored record differs from the one the caller based its change on.
    #[error("Assignment '{id}' was changed by someone else")]
    Conflict {
        /// The contested record.
        id: AssignmentId,
    },
    /// The record to update or delete does not exist.
    #[error("Assignment '{id}' not found")]
    NotFound {
        /// The missing record.
        id: AssignmentId,
    },
    /// An update tried to change a record's identifier.
    #[error("Update of '{expected}' carries a replacement for '{replacement}'")]
    IdMismatch {
        /// The record being replaced.
        expected: AssignmentId,
        /// The identifier on the replacement.
        replacement: AssignmentId,
    },
    /// An insert produced an identifier that is already taken.
    #[error("Assignment id '{0}' is already in use")]
    DuplicateId(AssignmentId),
    /// The batch would break a domain invariant.
    #[error("Invariant violation: {0}")]
    Invariant(#[from] DomainError),
    /// The store could not be reached or refused the write.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// One operation of an atomic batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    /// Store a new record; the store assigns its id.
    Insert(AssignmentDraft),
    /// Replace a record in place.
    Update {
        /// The record as the caller last saw it.
        expected: Assignment,
        /// The new contents, with the same id.
        replacement: Assignment,
    },
    /// Remove a record.
    Delete {
        /// The record as the caller last saw it.
        expected: Assignment,
    },
}

/// An ordered list of operations that commit together or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Batch {
    ops: Vec<BatchOp>,
}

impl Batch {
    /// Creates an empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Creates a batch holding one operation.
    #[must_use]
    pub fn single(op: BatchOp) -> Self {
        Self { ops: vec![op] }
    }

    /// Appends an operation.
    pub fn push(&mut self, op: BatchOp) {
        self.ops.push(op);
    }

    /// Returns the operations in order.
    #[must_use]
    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    /// Returns the number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if the batch has no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// A full, immutable view of the assignment collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    version: u64,
    assignments: BTreeMap<AssignmentId, Assignment>,
}

impl Snapshot {
    /// Creates a snapshot from a list of records.
    #[must_use]
    pub fn new<I>(version: u64, records: I) -> Self
    where
        I: IntoIterator<Item = Assignment>,
    {
        Self {
            version,
            assignments: records.into_iter().map(|a| (a.id.clone(), a)).collect(),
        }
    }

    /// Returns the version; it increases with every committed batch.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the record with `id`.
    #[must_use]
    pub fn get(&self, id: &AssignmentId) -> Option<&Assignment> {
        self.assignments.get(id)
    }

    /// Iterates all records in id order.
    pub fn records(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.values()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns true if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Applies a batch to a copy of this snapshot.
    ///
    /// Operations run in order against the copy; the first failure abandons
    /// the copy, leaving `self` untouched. After all operations succeed, every
    /// row key the batch touched is checked for overlapping records.
    ///
    /// # Arguments
    ///
    /// * `batch` - The operations to apply
    /// * `next_id` - Supplies an identifier for each inserted record
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A deleted or updated record is missing or differs from `expected`
    /// - An update changes a record's id
    /// - An inserted id collides with an existing record
    /// - The result has overlapping records for one row key
    pub fn apply<F>(&self, batch: &Batch, mut next_id: F) -> Result<Self, StoreError>
    where
        F: FnMut() -> AssignmentId,
    {
        let mut assignments: BTreeMap<AssignmentId, Assignment> = self.assignments.clone();
        let mut touched: BTreeSet<RowKey> = BTreeSet::new();

        for op in batch.ops() {
            match op {
                BatchOp::Insert(draft) => {
                    let id: AssignmentId = next_id();
                    if assignments.contains_key(&id) {
                        return Err(StoreError::DuplicateId(id));
                    }
                    let record: Assignment = draft.clone().with_id(id.clone());
                    touched.insert(RowKey::of(&record));
                    assignments.insert(id, record);
                }
                BatchOp::Update {
                    expected,
                    replacement,
                } => {
                    if replacement.id != expected.id {
                        return Err(StoreError::IdMismatch {
                            expected: expected.id.clone(),
                            replacement: replacement.id.clone(),
                        });
                    }
                    check_current(&assignments, expected)?;
                    touched.insert(RowKey::of(replacement));
                    assignments.insert(expected.id.clone(), replacement.clone());
                }
                BatchOp::Delete { expected } => {
                    check_current(&assignments, expected)?;
                    assignments.remove(&expected.id);
                }
            }
        }

        validate_no_overlaps(
            assignments
                .values()
                .filter(|record| touched.contains(&RowKey::of(record))),
        )?;

        Ok(Self {
            version: self.version.saturating_add(1),
            assignments,
        })
    }
}

fn check_current(
    assignments: &BTreeMap<AssignmentId, Assignment>,
    expected: &Assignment,
) -> Result<(), StoreError> {
    match assignments.get(&expected.id) {
        None => Err(StoreError::NotFound {
            id: expected.id.clone(),
        }),
        Some(current) if current != expected => Err(StoreError::Conflict {
            id: expected.id.clone(),
        }),
        Some(_) => Ok(()),
    }
}

/// A key-value collection of assignments with atomic batch writes.
pub trait AssignmentStore {
    /// Returns the current snapshot.
    fn snapshot(&self) -> Arc<Snapshot>;

    /// Commits a batch atomically and returns the resulting snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch is rejected; nothing is written then.
    fn apply_batch(&mut self, batch: Batch) -> Result<Arc<Snapshot>, StoreError>;

    /// Stores one new record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the insert.
    fn create(&mut self, draft: AssignmentDraft) -> Result<Arc<Snapshot>, StoreError> {
        self.apply_batch(Batch::single(BatchOp::Insert(draft)))
    }

    /// Replaces one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing, changed, or the result is invalid.
    fn update(
        &mut self,
        expected: Assignment,
        replacement: Assignment,
    ) -> Result<Arc<Snapshot>, StoreError> {
        self.apply_batch(Batch::single(BatchOp::Update {
            expected,
            replacement,
        }))
    }

    /// Removes one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing or changed.
    fn delete(&mut self, expected: Assignment) -> Result<Arc<Snapshot>, StoreError> {
        self.apply_batch(Batch::single(BatchOp::Delete { expected }))
    }
}
