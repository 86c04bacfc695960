// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_test_assignment;
use crate::{
    Allocation, Assignment, ProjectId, ProjectInfo, ReferenceDirectory, Row, Trade, is_incomplete,
};
use time::macros::date;

fn create_directory() -> ReferenceDirectory {
    let mut directory: ReferenceDirectory = ReferenceDirectory::new();
    directory.add_project(ProjectInfo {
        id: ProjectId::new("p-1"),
        name: String::from("Refinery Expansion"),
    });
    directory
}

fn create_placeholder() -> Assignment {
    let mut placeholder: Assignment =
        create_test_assignment("a-9", "", 0, date!(2024 - 01 - 01), date!(2024 - 01 - 01));
    placeholder.project_id = ProjectId::default();
    placeholder
}

#[test]
fn test_placeholder_is_incomplete() {
    let directory: ReferenceDirectory = create_directory();
    assert!(is_incomplete(&create_placeholder(), &directory));
    assert!(Row::Simple(create_placeholder()).is_incomplete(&directory));
}

#[test]
fn test_known_project_is_never_incomplete() {
    let directory: ReferenceDirectory = create_directory();
    let mut record: Assignment = create_placeholder();
    record.project_id = ProjectId::new("p-1");
    assert!(!is_incomplete(&record, &directory));
}

#[test]
fn test_nonzero_allocation_is_never_incomplete() {
    let directory: ReferenceDirectory = create_directory();
    let mut record: Assignment = create_placeholder();
    record.allocation = Allocation::new(10);
    assert!(!is_incomplete(&record, &directory));
}

#[test]
fn test_unknown_project_with_trade_but_blank_id_is_incomplete() {
    let directory: ReferenceDirectory = create_directory();
    let mut record: Assignment = create_placeholder();
    record.trade = Trade::new("Duct");
    assert!(is_incomplete(&record, &directory));
}

#[test]
fn test_unknown_project_id_with_trade_is_not_incomplete() {
    let directory: ReferenceDirectory = create_directory();
    let mut record: Assignment = create_placeholder();
    record.trade = Trade::new("Duct");
    record.project_id = ProjectId::new("p-deleted");
    assert!(!is_incomplete(&record, &directory));
}
