// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crew_schedule_domain::{Assignment, ReferenceLookup, Row, WeekGrid};
use time::Date;

/// Width of one week column.
const CELL_WIDTH: usize = 6;

/// Width of the row label column.
const LABEL_WIDTH: usize = 44;

/// Renders the grid as text: a header of week anchors, then one line per row.
pub fn render_grid<L: ReferenceLookup>(rows: &[Row], grid: &WeekGrid, lookup: &L) -> Vec<String> {
    let mut lines: Vec<String> = Vec::with_capacity(rows.len() + 1);

    let mut header: String = format!("{:<LABEL_WIDTH$}", "worker / project / trade");
    for anchor in grid.anchors() {
        header.push_str(&format!("{:>CELL_WIDTH$}", short_date(*anchor)));
    }
    lines.push(header);

    for row in rows {
        let mut line: String = format!("{:<LABEL_WIDTH$}", row_label(row, lookup));
        for week in 0..grid.len() {
            let cell: String = row
                .segment_for_week(grid, week)
                .map_or_else(|| String::from("."), |segment| segment.allocation.to_string());
            line.push_str(&format!("{cell:>CELL_WIDTH$}"));
        }
        lines.push(line.trim_end().to_string());
    }
    lines
}

/// Returns `worker / project / trade` using display names where known.
pub fn row_label<L: ReferenceLookup>(row: &Row, lookup: &L) -> String {
    let summary: &Assignment = row.summary();
    let worker: &str = lookup
        .worker(&summary.worker_id)
        .map_or(summary.worker_id.value(), |w| w.name.as_str());
    let project: &str = lookup
        .project(&summary.project_id)
        .map_or(summary.project_id.value(), |p| p.name.as_str());

    if row.is_incomplete(lookup) {
        return format!("{worker} / (incomplete)");
    }
    format!("{worker} / {project} / {}", summary.trade)
}

fn short_date(date: Date) -> String {
    format!("{:02}-{:02}", u8::from(date.month()), date.day())
}
