// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Allocation, Assignment, AssignmentId, DateRange, GridConfig, ProjectId, Trade, WeekGrid,
    WorkerId,
};
use time::Date;
use time::macros::date;

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

/// A 25-week Monday grid starting on Monday 2024-01-01.
pub fn create_test_grid() -> WeekGrid {
    WeekGrid::new(date!(2024 - 01 - 01), &GridConfig::default()).unwrap()
}
