// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment timeline scheduling engine.
//!
//! Reads assignment snapshots from a store, consolidates them into grid rows,
//! and turns pointer gestures and property edits into atomic store batches.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod command;
mod controller;
mod drag;
mod error;
mod merge;
mod notify;
mod reconcile;
mod split;
mod state;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use command::{Command, check, plan};
pub use controller::ScheduleController;
pub use drag::{DragKind, DragMachine, DragSession, DragState, resolve};
pub use error::CoreError;
pub use merge::plan_merge;
pub use notify::{Notifier, TracingNotifier};
pub use reconcile::PendingReconciliation;
pub use split::{SegmentUpdates, SplitPlan, plan_split};
pub use state::ScheduleView;
pub use store::{AssignmentStore, Batch, BatchOp, Snapshot, StoreError};
