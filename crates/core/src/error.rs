// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::StoreError;
use crew_schedule_domain::{AssignmentId, DomainError};
use thiserror::Error;

/// Errors that can occur while planning or committing a schedule change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// The store rejected the change, or the change would be rejected.
    #[error("Store rejected the change: {0}")]
    Store(#[from] StoreError),
    /// A pointer gesture started while another was still active.
    #[error("A drag is already in progress")]
    DragInProgress,
    /// The referenced assignment is not in the current snapshot.
    #[error("Assignment '{0}' not found")]
    AssignmentNotFound(AssignmentId),
    /// No row matches the requested key.
    #[error("No row for worker '{worker}', project '{project}', trade '{trade}'")]
    RowNotFound {
        /// The worker id.
        worker: String,
        /// The project id.
        project: String,
        /// The trade.
        trade: String,
    },
    /// Only placeholder records may be deleted directly.
    #[error("Assignment '{0}' is not an incomplete placeholder")]
    NotIncomplete(AssignmentId),
    /// A previous write has not resolved yet.
    #[error("A write is already in flight")]
    WriteInFlight,
    /// A write result arrived with no write in flight.
    #[error("No write is in flight")]
    NoWriteInFlight,
}
