// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_test_grid;
use crate::{DomainError, GridConfig, Trade, WeekGrid, week_overlaps};
use time::Weekday;
use time::macros::date;

#[test]
fn test_grid_starts_on_week_start_before_pivot() {
    // 2024-01-03 is a Wednesday.
    let grid: WeekGrid = WeekGrid::new(date!(2024 - 01 - 03), &GridConfig::default()).unwrap();

    assert_eq!(grid.len(), 25);
    assert_eq!(grid.anchor(0), Some(date!(2024 - 01 - 01)));
    assert_eq!(grid.anchor(1), Some(date!(2024 - 01 - 08)));
    assert_eq!(grid.anchor(24), Some(date!(2024 - 06 - 17)));
    assert_eq!(grid.anchor(25), None);
    assert!(
        grid.anchors()
            .iter()
            .all(|anchor| anchor.weekday() == Weekday::Monday)
    );
}

#[test]
fn test_grid_honors_configured_week_start() {
    let config: GridConfig = GridConfig {
        week_count: 4,
        week_start: Weekday::Sunday,
        fallback_trade: Trade::new("Duct"),
    };
    let grid: WeekGrid = WeekGrid::new(date!(2024 - 01 - 03), &config).unwrap();

    assert_eq!(grid.len(), 4);
    assert_eq!(grid.anchor(0), Some(date!(2023 - 12 - 31)));
    assert_eq!(grid.week_end(0).unwrap(), date!(2024 - 01 - 06));
}

#[test]
fn test_zero_week_grid_is_rejected() {
    let config: GridConfig = GridConfig {
        week_count: 0,
        ..GridConfig::default()
    };
    let result = WeekGrid::new(date!(2024 - 01 - 01), &config);
    assert!(matches!(result, Err(DomainError::InvalidWeekCount { count: 0 })));
}

#[test]
fn test_overlaps_is_inclusive_on_both_edges() {
    let grid: WeekGrid = create_test_grid();

    // Week 1 is 2024-01-08 ..= 2024-01-14.
    assert!(grid.overlaps(1, date!(2024 - 01 - 14), date!(2024 - 01 - 20)));
    assert!(grid.overlaps(1, date!(2024 - 01 - 01), date!(2024 - 01 - 08)));
    assert!(grid.overlaps(1, date!(2024 - 01 - 10), date!(2024 - 01 - 10)));
    assert!(!grid.overlaps(1, date!(2024 - 01 - 15), date!(2024 - 01 - 20)));
    assert!(!grid.overlaps(1, date!(2024 - 01 - 01), date!(2024 - 01 - 07)));
}

#[test]
fn test_overlaps_off_grid_is_false() {
    let grid: WeekGrid = create_test_grid();
    assert!(!grid.overlaps(99, date!(2000 - 01 - 01), date!(2100 - 01 - 01)));
}

#[test]
fn test_grid_and_free_function_agree() {
    let grid: WeekGrid = create_test_grid();
    let ranges = [
        (date!(2024 - 01 - 03), date!(2024 - 01 - 03)),
        (date!(2024 - 01 - 07), date!(2024 - 01 - 08)),
        (date!(2023 - 12 - 01), date!(2024 - 02 - 11)),
    ];
    for (start, end) in ranges {
        for (index, anchor) in grid.anchors().iter().enumerate() {
            assert_eq!(
                grid.overlaps(index, start, end),
                week_overlaps(*anchor, start, end)
            );
        }
    }
}

#[test]
fn test_overlapping_weeks_and_index_of() {
    let grid: WeekGrid = create_test_grid();

    assert_eq!(
        grid.overlapping_weeks(date!(2024 - 01 - 07), date!(2024 - 01 - 22)),
        vec![0, 1, 2, 3]
    );
    assert_eq!(grid.index_of(date!(2024 - 01 - 21)), Some(2));
    assert_eq!(grid.index_of(date!(2023 - 12 - 31)), None);
}

#[test]
fn test_week_range_out_of_range_is_error() {
    let grid: WeekGrid = create_test_grid();
    let result = grid.week_range(25);
    assert!(matches!(
        result,
        Err(DomainError::WeekIndexOutOfRange { index: 25, len: 25 })
    ));
}

#[test]
fn test_paging_recomputes_anchors() {
    let grid: WeekGrid = create_test_grid();

    let forward: WeekGrid = grid.page_forward(4).unwrap();
    assert_eq!(forward.anchor(0), Some(date!(2024 - 01 - 29)));
    assert_eq!(forward.len(), grid.len());

    let back: WeekGrid = forward.page_back(4).unwrap();
    assert_eq!(back, grid);
}

#[test]
fn test_grid_config_json_uses_weekday_names() {
    let config: GridConfig = serde_json::from_str(r#"{ "week_start": "sun" }"#).unwrap();
    assert_eq!(config.week_start, Weekday::Sunday);
    assert_eq!(config.week_count, 25);
    assert_eq!(config.fallback_trade, Trade::new("Piping"));

    let json: String = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""week_start":"Sunday""#));

    let bad = serde_json::from_str::<GridConfig>(r#"{ "week_start": "Funday" }"#);
    assert!(bad.is_err());
}
