// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage adapters for the crew schedule engine.
//!
//! The engine only talks to the `AssignmentStore` trait. This crate provides
//! the reference implementation of it: an in-memory collection with atomic
//! batch writes and change notifications. It also reads and writes the JSON
//! schedule file that seeds the store and carries reference data.
//!
//! ## Schedule file layout
//!
//! ```json
//! {
//!   "grid": { "week_count": 25, "week_start": "Monday", "fallback_trade": "Piping" },
//!   "workers": [{ "id": "w-1", "name": "Dana Reyes" }],
//!   "projects": [{ "id": "p-1", "name": "Refinery Expansion" }],
//!   "assignments": [{
//!     "id": "asg-000001", "worker_id": "w-1", "project_id": "p-1",
//!     "trade": "Piping", "allocation": 50,
//!     "start_date": "2024-01-01", "end_date": "2024-01-28"
//!   }]
//! }
//! ```
//!
//! Every section is optional; a missing `grid` falls back to the defaults.

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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod file;
mod memory;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use file::ScheduleFile;
pub use memory::{ID_PREFIX, InMemoryStore, SNAPSHOT_BUFFER_SIZE};
