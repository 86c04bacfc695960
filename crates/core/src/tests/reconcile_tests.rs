// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_assignment, create_test_placeholder};
use crate::{Batch, BatchOp, DragKind, PendingReconciliation};
use crew_schedule_domain::{Allocation, Assignment, Trade};
use time::Date;
use time::macros::date;

fn proposal(target: &Assignment, start: Date, end: Date) -> PendingReconciliation {
    PendingReconciliation::new(
        DragKind::ExtendEnd,
        target.clone(),
        start,
        end,
        target.allocation,
        target.trade.clone(),
    )
}

#[test]
fn test_confirm_produces_single_update() {
    let target: Assignment =
        create_test_assignment("a-1", "Piping", 50, date!(2024 - 01 - 15), date!(2024 - 01 - 21));
    let pending: PendingReconciliation =
        proposal(&target, date!(2024 - 01 - 15), date!(2024 - 02 - 04));

    assert_eq!(pending.old_end(), date!(2024 - 01 - 21));
    let batch: Batch = pending.confirm().unwrap();

    assert_eq!(batch.len(), 1);
    let BatchOp::Update {
        expected,
        replacement,
    } = &batch.ops()[0]
    else {
        panic!("expected an update");
    };
    assert_eq!(expected, &target);
    assert_eq!(replacement.id, target.id);
    assert_eq!(replacement.start_date(), date!(2024 - 01 - 15));
    assert_eq!(replacement.end_date(), date!(2024 - 02 - 04));
}

#[test]
fn test_confirm_keeps_lock_flag() {
    let mut target: Assignment =
        create_test_assignment("a-1", "Piping", 50, date!(2024 - 01 - 15), date!(2024 - 01 - 21));
    target.locked = true;

    let batch: Batch = proposal(&target, date!(2024 - 01 - 08), date!(2024 - 01 - 21))
        .confirm()
        .unwrap();
    let BatchOp::Update { replacement, .. } = &batch.ops()[0] else {
        panic!("expected an update");
    };
    assert!(replacement.locked);
}

#[test]
fn test_day_level_correction_overrides_snapped_bounds() {
    let target: Assignment =
        create_test_assignment("a-1", "Piping", 50, date!(2024 - 01 - 15), date!(2024 - 01 - 21));
    let mut pending: PendingReconciliation =
        proposal(&target, date!(2024 - 01 - 15), date!(2024 - 02 - 04));

    pending.set_end(date!(2024 - 02 - 01));
    pending.set_start(date!(2024 - 01 - 16));

    let batch: Batch = pending.confirm().unwrap();
    let BatchOp::Update { replacement, .. } = &batch.ops()[0] else {
        panic!("expected an update");
    };
    assert_eq!(replacement.start_date(), date!(2024 - 01 - 16));
    assert_eq!(replacement.end_date(), date!(2024 - 02 - 01));
}

#[test]
fn test_start_after_end_is_noop() {
    let target: Assignment =
        create_test_assignment("a-1", "Piping", 50, date!(2024 - 01 - 15), date!(2024 - 01 - 21));
    let mut pending: PendingReconciliation =
        proposal(&target, date!(2024 - 01 - 15), date!(2024 - 01 - 21));

    pending.set_start(date!(2024 - 01 - 25));

    assert!(!pending.is_valid());
    assert!(pending.confirm().is_none());
}

#[test]
fn test_unchanged_range_is_noop() {
    let target: Assignment =
        create_test_assignment("a-1", "Piping", 50, date!(2024 - 01 - 15), date!(2024 - 01 - 21));
    let pending: PendingReconciliation =
        proposal(&target, date!(2024 - 01 - 15), date!(2024 - 01 - 21));

    assert!(pending.is_valid());
    assert!(pending.confirm().is_none());
}

#[test]
fn test_carve_confirm_writes_defaults_even_if_range_unchanged() {
    let placeholder: Assignment = create_test_placeholder("p-9", date!(2024 - 01 - 01));
    let pending: PendingReconciliation = PendingReconciliation::new(
        DragKind::CarveNew,
        placeholder.clone(),
        date!(2024 - 01 - 01),
        date!(2024 - 01 - 01),
        Allocation::FULL_TIME,
        Trade::new("Piping"),
    );

    let batch: Batch = pending.confirm().unwrap();
    let BatchOp::Update { replacement, .. } = &batch.ops()[0] else {
        panic!("expected an update");
    };
    assert_eq!(replacement.allocation, Allocation::FULL_TIME);
    assert_eq!(replacement.trade, Trade::new("Piping"));
    assert_eq!(replacement.id, placeholder.id);
}
