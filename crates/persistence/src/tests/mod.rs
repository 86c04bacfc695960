// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod file_tests;

use crew_schedule_domain::{
    Allocation, Assignment, AssignmentId, DateRange, ProjectId, Trade, WorkerId,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

/// Counter for unique scratch file names, so tests never share a file.
static FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn create_test_assignment(id: &str, allocation: u16, start: Date, end: Date) -> Assignment {
    Assignment::new(
        AssignmentId::new(id),
        WorkerId::new("w-1"),
        ProjectId::new("p-1"),
        Trade::new("Piping"),
        Allocation::new(allocation),
        DateRange::new(start, end).expect("Valid test range"),
        false,
    )
}

pub fn scratch_path() -> PathBuf {
    let file_id: u64 = FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "crew_schedule_test_{}_{file_id}.json",
        std::process::id()
    ))
}
