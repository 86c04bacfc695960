// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_assignment, scratch_path};
use crate::{PersistenceError, ScheduleFile};
use crew_schedule::AssignmentStore;
use crew_schedule_domain::{
    Allocation, AssignmentId, GridConfig, ProjectId, ProjectInfo, ReferenceLookup, WorkerId,
    WorkerInfo,
};
use time::Weekday;
use time::macros::date;

const SAMPLE: &str = r#"{
    "grid": { "week_count": 12, "week_start": "Sunday", "fallback_trade": "Duct" },
    "workers": [{ "id": "w-1", "name": "Dana Reyes" }],
    "projects": [{ "id": "p-1", "name": "Refinery Expansion" }],
    "assignments": [{
        "id": "asg-000001",
        "worker_id": "w-1",
        "project_id": "p-1",
        "trade": "Piping",
        "allocation": 50,
        "start_date": "2024-01-01",
        "end_date": "2024-01-28"
    }]
}"#;

#[test]
fn test_parse_sample_schedule() {
    let file: ScheduleFile = ScheduleFile::from_json(SAMPLE).unwrap();

    assert_eq!(file.grid.week_count, 12);
    assert_eq!(file.grid.week_start, Weekday::Sunday);
    assert_eq!(file.assignments.len(), 1);
    let record = &file.assignments[0];
    assert_eq!(record.allocation, Allocation::new(50));
    assert_eq!(record.start_date(), date!(2024 - 01 - 01));
    assert_eq!(record.end_date(), date!(2024 - 01 - 28));
    assert!(!record.locked);
}

#[test]
fn test_missing_sections_use_defaults() {
    let file: ScheduleFile = ScheduleFile::from_json("{}").unwrap();
    assert_eq!(file.grid, GridConfig::default());
    assert!(file.assignments.is_empty());
    assert!(file.workers.is_empty());
}

#[test]
fn test_inverted_range_is_rejected() {
    let json: &str = r#"{ "assignments": [{
        "id": "a-1", "worker_id": "w-1", "project_id": "p-1", "trade": "Piping",
        "allocation": 50, "start_date": "2024-02-01", "end_date": "2024-01-01"
    }] }"#;

    let result = ScheduleFile::from_json(json);
    assert!(matches!(result, Err(PersistenceError::SerializationError(_))));
}

#[test]
fn test_directory_resolves_reference_data() {
    let file: ScheduleFile = ScheduleFile::from_json(SAMPLE).unwrap();
    let directory = file.directory();

    assert_eq!(
        directory.worker(&WorkerId::new("w-1")).map(|w| w.name.as_str()),
        Some("Dana Reyes")
    );
    assert!(directory.project(&ProjectId::new("p-1")).is_some());
    assert!(directory.project(&ProjectId::new("p-2")).is_none());
}

#[test]
fn test_store_is_seeded_from_file() {
    let file: ScheduleFile = ScheduleFile::from_json(SAMPLE).unwrap();
    let store = file.store().unwrap();

    assert!(
        store
            .snapshot()
            .get(&AssignmentId::new("asg-000001"))
            .is_some()
    );
}

#[test]
fn test_duplicate_ids_in_file_refuse_to_seed() {
    let json: &str = r#"{ "assignments": [
        { "id": "dup", "worker_id": "w-1", "project_id": "p-1", "trade": "Piping",
          "allocation": 50, "start_date": "2024-01-01", "end_date": "2024-01-14" },
        { "id": "dup", "worker_id": "w-1", "project_id": "p-1", "trade": "Duct",
          "allocation": 50, "start_date": "2024-01-01", "end_date": "2024-01-14" }
    ] }"#;

    let file: ScheduleFile = ScheduleFile::from_json(json).unwrap();
    assert_eq!(file.assignments.len(), 2);
    assert!(matches!(file.store(), Err(PersistenceError::InvalidData(_))));
}

#[test]
fn test_save_then_load_preserves_schedule() {
    let path = scratch_path();
    let mut file: ScheduleFile = ScheduleFile {
        workers: vec![WorkerInfo {
            id: WorkerId::new("w-1"),
            name: String::from("Dana Reyes"),
        }],
        projects: vec![ProjectInfo {
            id: ProjectId::new("p-1"),
            name: String::from("Refinery Expansion"),
        }],
        ..ScheduleFile::default()
    };
    let mut store = file.store().unwrap();
    let snapshot = store
        .create(
            create_test_assignment("x", 75, date!(2024 - 03 - 04), date!(2024 - 03 - 31))
                .to_draft(),
        )
        .unwrap();
    file.replace_assignments(&snapshot);

    file.save(&path).unwrap();
    let loaded: ScheduleFile = ScheduleFile::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, file);
    assert_eq!(loaded.assignments[0].id, AssignmentId::new("asg-000001"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let path = scratch_path();
    let result = ScheduleFile::load(&path);
    assert!(matches!(result, Err(PersistenceError::IoError(_))));
}
