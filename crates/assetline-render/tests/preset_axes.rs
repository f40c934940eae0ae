//! Axis geometry across every built-in zoom preset

use assetline_core::GanttTask;
use assetline_render::{compute_time_axis, default_presets, TimeAxis, DEFAULT_CELL_WIDTH};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn fleet() -> Vec<GanttTask> {
    vec![
        GanttTask::summary(1, "Main DC", date(2022, 7, 1), date(2027, 12, 31)).open(true),
        GanttTask::summary(2, "PowerEdge R740 (2)", date(2022, 7, 1), date(2027, 12, 31))
            .parent(1)
            .open(false),
        GanttTask::leaf(3, "PowerEdge R740 (SRV2)", date(2022, 7, 1), date(2026, 3, 15))
            .parent(2)
            .color("#0076CE"),
        GanttTask::leaf(4, "PowerEdge R740 (SRV1)", date(2023, 1, 1), date(2027, 12, 31))
            .parent(2)
            .color("#7EC8E3"),
    ]
}

fn assert_consistent(axis: &TimeAxis, cell_width: u32) {
    assert_eq!(axis.total_width, axis.bottom_row.len() as u32 * cell_width);

    let mut x = 0;
    for column in &axis.top_row {
        assert_eq!(column.x, x);
        assert!(column.width > 0);
        assert_eq!(column.width % cell_width, 0);
        x += column.width;
    }
    assert_eq!(x, axis.total_width);
}

#[test]
fn every_preset_partitions_the_bottom_row() {
    let tasks = fleet();
    for preset in default_presets() {
        let axis = compute_time_axis(&tasks, &preset.scales, DEFAULT_CELL_WIDTH);
        assert!(!axis.is_empty(), "preset {}", preset.label);
        assert_consistent(&axis, DEFAULT_CELL_WIDTH);
    }
}

#[test]
fn preset_ranges() {
    let tasks = fleet();
    let ranges: Vec<_> = default_presets()
        .iter()
        .map(|p| {
            let axis = compute_time_axis(&tasks, &p.scales, DEFAULT_CELL_WIDTH);
            (p.label.clone(), axis.start_date, axis.end_date, axis.bottom_row.len())
        })
        .collect();

    assert_eq!(
        ranges,
        vec![
            ("5-year".into(), Some(date(2020, 1, 1)), Some(date(2030, 1, 1)), 10),
            ("Year".into(), Some(date(2022, 1, 1)), Some(date(2028, 1, 1)), 12),
            ("Quarter".into(), Some(date(2022, 1, 1)), Some(date(2028, 1, 1)), 24),
            ("Month".into(), Some(date(2022, 7, 1)), Some(date(2028, 1, 1)), 288),
        ]
    );
}

#[test]
fn quarter_labels() {
    let tasks = fleet();
    let quarter = &default_presets()[2];
    let axis = compute_time_axis(&tasks, &quarter.scales, 40);

    let first: Vec<_> = axis.bottom_row.iter().take(5).map(|c| c.label.as_str()).collect();
    assert_eq!(first, vec!["Jan 2022", "Apr 2022", "Jul 2022", "Oct 2022", "Jan 2023"]);
    assert_eq!(axis.top_row[0].label, "2022");
    assert_eq!(axis.top_row[0].width, 160);
    assert_consistent(&axis, 40);
}

#[test]
fn leaf_bars_land_inside_the_axis() {
    let tasks = fleet();
    let axis = compute_time_axis(&tasks, &default_presets()[1].scales, DEFAULT_CELL_WIDTH);
    let width = f64::from(axis.total_width);
    for task in &tasks {
        let (x0, x1) = (axis.x_of(task.start), axis.x_of(task.end));
        assert!(x0 >= 0.0 && x0 < x1 && x1 <= width, "task {}", task.id);
    }
}
