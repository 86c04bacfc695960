// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AssignmentStore, Batch, Notifier, ScheduleController, Snapshot, StoreError};
use crew_schedule_domain::{
    Allocation, Assignment, AssignmentId, DateRange, GridConfig, ProjectId, ProjectInfo,
    ReferenceDirectory, Trade, WeekGrid, WorkerId,
};
use std::cell::RefCell;
use std::sync::Arc;
use time::Date;
use time::macros::date;

/// Monday 2024-01-01; week `i` starts on `2024-01-01 + 7 * i`.
pub const PIVOT: Date = date!(2024 - 01 - 01);

pub fn create_test_assignment(
    id: &str,
    trade: &str,
    allocation: u16,
    start: Date,
    end: Date,
) -> Assignment {
    Assignment::new(
        AssignmentId::new(id),
        WorkerId::new("w-1"),
        ProjectId::new("p-1"),
        Trade::new(trade),
        Allocation::new(allocation),
        DateRange::new(start, end).unwrap(),
        false,
    )
}

pub fn create_test_placeholder(id: &str, day: Date) -> Assignment {
    Assignment::new(
        AssignmentId::new(id),
        WorkerId::new("w-2"),
        ProjectId::default(),
        Trade::default(),
        Allocation::new(0),
        DateRange::new(day, day).unwrap(),
        false,
    )
}

pub fn create_test_grid() -> WeekGrid {
    WeekGrid::new(PIVOT, &GridConfig::default()).unwrap()
}

pub fn create_test_directory() -> ReferenceDirectory {
    let mut directory: ReferenceDirectory = ReferenceDirectory::new();
    directory.add_project(ProjectInfo {
        id: ProjectId::new("p-1"),
        name: String::from("Refinery Expansion"),
    });
    directory
}

/// A store that keeps one snapshot and can be told to refuse writes.
pub struct TestStore {
    snapshot: Arc<Snapshot>,
    next_id: u64,
    pub fail_writes: bool,
    pub writes: usize,
}

impl TestStore {
    pub fn with_records(records: Vec<Assignment>) -> Self {
        Self {
            snapshot: Arc::new(Snapshot::new(1, records)),
            next_id: 0,
            fail_writes: false,
            writes: 0,
        }
    }
}

impl AssignmentStore for TestStore {
    fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    fn apply_batch(&mut self, batch: Batch) -> Result<Arc<Snapshot>, StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable(String::from("offline")));
        }
        let next_id: &mut u64 = &mut self.next_id;
        let updated: Snapshot = self.snapshot.apply(&batch, || {
            *next_id += 1;
            AssignmentId::new(&format!("new-{next_id}"))
        })?;
        self.snapshot = Arc::new(updated);
        self.writes += 1;
        Ok(Arc::clone(&self.snapshot))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Success(String),
    Error(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: RefCell<Vec<Message>>,
}

impl RecordingNotifier {
    pub fn last(&self) -> Option<Message> {
        self.messages.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.messages
            .borrow_mut()
            .push(Message::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.messages
            .borrow_mut()
            .push(Message::Error(message.to_string()));
    }
}

pub type TestController = ScheduleController<TestStore, RecordingNotifier, ReferenceDirectory>;

pub fn create_test_controller(records: Vec<Assignment>) -> TestController {
    ScheduleController::new(
        TestStore::with_records(records),
        RecordingNotifier::default(),
        create_test_directory(),
        GridConfig::default(),
        PIVOT,
    )
    .unwrap()
}

/// Returns the records of the store sorted by start date.
pub fn stored_records(controller: &TestController) -> Vec<Assignment> {
    let mut records: Vec<Assignment> = controller
        .store()
        .snapshot()
        .records()
        .cloned()
        .collect();
    records.sort_by_key(Assignment::start_date);
    records
}
