//! Two-row time axis geometry.
//!
//! The top row holds coarse periods (for example years), the bottom row
//! fine periods (for example half-years). Every bottom column has the same
//! pixel width; top columns span whole runs of bottom columns.

use std::fmt;
use std::str::FromStr;

use assetline_core::calendar::{add_days, add_months, add_years};
use assetline_core::{date_extent, GanttTask};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Default width of a bottom-row column in pixels
pub const DEFAULT_CELL_WIDTH: u32 = 70;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ============================================================================
// Scales
// ============================================================================

/// Calendar unit of one axis row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Year,
    Month,
    Day,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Year => "year",
            TimeUnit::Month => "month",
            TimeUnit::Day => "day",
        }
    }

    /// Move `date` forward by `step` units
    pub fn step(self, date: NaiveDate, step: u32) -> Option<NaiveDate> {
        let step = i64::from(step);
        match self {
            TimeUnit::Year => add_years(date, step),
            TimeUnit::Month => add_months(date, step),
            TimeUnit::Day => add_days(date, step),
        }
    }

    /// Snap `date` back to the start of its `step`-sized period.
    ///
    /// Years align to a multiple of `step` on January 1, months to a
    /// multiple of `step` (counting January as 0) on the 1st. Days are
    /// left as is.
    pub fn align(self, date: NaiveDate, step: u32) -> NaiveDate {
        let step = step.max(1);
        match self {
            TimeUnit::Year => {
                let year = date.year() - date.year() % step as i32;
                NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(date)
            }
            TimeUnit::Month => {
                let month0 = date.month0() - date.month0() % step;
                NaiveDate::from_ymd_opt(date.year(), month0 + 1, 1).unwrap_or(date)
            }
            TimeUnit::Day => date,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "year" => Ok(TimeUnit::Year),
            "month" => Ok(TimeUnit::Month),
            "day" => Ok(TimeUnit::Day),
            other => Err(format!("Unknown time unit: {}", other)),
        }
    }
}

/// Column label pattern
///
/// | Pattern | Example |
/// |---------|---------|
/// | `%Y` | `2025` |
/// | `%M` | `Jan` |
/// | `%M %Y` | `Jan 2025` |
/// | `%j` | `7` (day of month) |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LabelFormat {
    Year,
    Month,
    MonthYear,
    DayOfMonth,
}

impl LabelFormat {
    /// Parse a pattern; anything unrecognised labels by year
    pub fn from_pattern(pattern: &str) -> Self {
        match pattern {
            "%M" => LabelFormat::Month,
            "%M %Y" => LabelFormat::MonthYear,
            "%j" => LabelFormat::DayOfMonth,
            _ => LabelFormat::Year,
        }
    }

    pub fn pattern(&self) -> &'static str {
        match self {
            LabelFormat::Year => "%Y",
            LabelFormat::Month => "%M",
            LabelFormat::MonthYear => "%M %Y",
            LabelFormat::DayOfMonth => "%j",
        }
    }

    pub fn format(&self, date: NaiveDate) -> String {
        let month = MONTH_ABBREVIATIONS[date.month0() as usize];
        match self {
            LabelFormat::Year => date.year().to_string(),
            LabelFormat::Month => month.to_string(),
            LabelFormat::MonthYear => format!("{} {}", month, date.year()),
            LabelFormat::DayOfMonth => date.day().to_string(),
        }
    }
}

impl From<String> for LabelFormat {
    fn from(pattern: String) -> Self {
        Self::from_pattern(&pattern)
    }
}

impl From<LabelFormat> for String {
    fn from(format: LabelFormat) -> Self {
        format.pattern().to_string()
    }
}

impl fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

/// Format `date` with a label pattern such as `"%M %Y"`
pub fn format_label(date: NaiveDate, pattern: &str) -> String {
    LabelFormat::from_pattern(pattern).format(date)
}

/// One axis row: a unit, a step size and a label format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeScale {
    pub unit: TimeUnit,
    pub step: u32,
    pub format: LabelFormat,
}

impl TimeScale {
    pub const fn new(unit: TimeUnit, step: u32, format: LabelFormat) -> Self {
        Self { unit, step, format }
    }

    fn align(&self, date: NaiveDate) -> NaiveDate {
        self.unit.align(date, self.step)
    }

    fn next(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.unit.step(date, self.step)
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// A labelled column on one axis row
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeColumn {
    pub label: String,
    pub x: u32,
    pub width: u32,
}

/// Complete axis geometry.
///
/// `start_date` and `end_date` are `None` only for the degenerate axis
/// (no tasks or fewer than two scales).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAxis {
    pub top_row: Vec<TimeColumn>,
    pub bottom_row: Vec<TimeColumn>,
    pub total_width: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TimeAxis {
    pub fn is_empty(&self) -> bool {
        self.bottom_row.is_empty()
    }

    /// Pixel offset of `date` on this axis
    pub fn x_of(&self, date: NaiveDate) -> f64 {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => date_to_x(date, start, end, f64::from(self.total_width)),
            _ => 0.0,
        }
    }
}

/// Linear interpolation of `date` between `start` and `end`.
///
/// Not clamped: dates outside the range map outside `0..=total_width`.
/// Returns 0 when `end` is not after `start`.
pub fn date_to_x(date: NaiveDate, start: NaiveDate, end: NaiveDate, total_width: f64) -> f64 {
    let total = (end - start).num_days();
    if total <= 0 {
        return 0.0;
    }
    let offset = (date - start).num_days();
    offset as f64 / total as f64 * total_width
}

/// Compute axis geometry for `tasks`.
///
/// `scales[0]` drives the top row, `scales[1]` the bottom row; extra scales
/// are ignored. The range runs from the coarse-aligned earliest start to one
/// coarse period past the coarse-aligned latest end.
///
/// Returns the degenerate axis when the total width does not fit in `u32`.
#[instrument(level = "debug", skip_all, fields(tasks = tasks.len(), cell_width = cell_width))]
pub fn compute_time_axis(tasks: &[GanttTask], scales: &[TimeScale], cell_width: u32) -> TimeAxis {
    let (Some((min, max)), [top, bottom, ..]) = (date_extent(tasks), scales) else {
        return TimeAxis::default();
    };

    let start = top.align(min);
    let Some(end) = top.next(top.align(max)) else {
        return TimeAxis::default();
    };

    let first_bottom = bottom.align(start);
    let bottom_starts: Vec<NaiveDate> = periods(bottom, first_bottom, end).collect();
    // Every column offset and width is bounded by the total width
    let Some(total_width) = u32::try_from(bottom_starts.len())
        .ok()
        .and_then(|count| count.checked_mul(cell_width))
    else {
        warn!(
            columns = bottom_starts.len(),
            cell_width, "axis width overflows; returning empty axis"
        );
        return TimeAxis::default();
    };
    let bottom_row: Vec<TimeColumn> = bottom_starts
        .iter()
        .enumerate()
        .map(|(i, cursor)| TimeColumn {
            label: bottom.format.format(*cursor),
            x: i as u32 * cell_width,
            width: cell_width,
        })
        .collect();

    let mut top_row = Vec::new();
    let mut bottom_idx = 0;
    let mut bottom_cursor = Some(first_bottom);
    for cursor in periods(top, top.align(start), end) {
        let Some(next_top) = top.next(cursor) else {
            break;
        };
        let group_start = bottom_idx;
        while let Some(b) = bottom_cursor.filter(|b| *b < next_top) {
            if bottom_idx >= bottom_row.len() {
                break;
            }
            bottom_cursor = bottom.next(b);
            bottom_idx += 1;
        }
        let count = bottom_idx - group_start;
        if count > 0 {
            top_row.push(TimeColumn {
                label: top.format.format(cursor),
                x: group_start as u32 * cell_width,
                width: count as u32 * cell_width,
            });
        }
    }

    debug!(
        top = top_row.len(),
        bottom = bottom_row.len(),
        total_width,
        "computed time axis"
    );
    TimeAxis {
        top_row,
        bottom_row,
        total_width,
        start_date: Some(start),
        end_date: Some(end),
    }
}

/// Period starts from `from` while before `end`
fn periods(scale: &TimeScale, from: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let scale = TimeScale {
        step: scale.step.max(1),
        ..*scale
    };
    std::iter::successors(Some(from), move |d| scale.next(*d)).take_while(move |d| *d < end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn task(start: NaiveDate, end: NaiveDate) -> GanttTask {
        GanttTask::leaf(1, "Test", start, end)
    }

    const YEAR_SCALES: [TimeScale; 2] = [
        TimeScale::new(TimeUnit::Year, 1, LabelFormat::Year),
        TimeScale::new(TimeUnit::Month, 6, LabelFormat::Month),
    ];

    const FIVE_YEAR_SCALES: [TimeScale; 2] = [
        TimeScale::new(TimeUnit::Year, 5, LabelFormat::Year),
        TimeScale::new(TimeUnit::Year, 1, LabelFormat::Year),
    ];

    fn labels(row: &[TimeColumn]) -> Vec<&str> {
        row.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn formats_labels() {
        assert_eq!(format_label(date(2025, 6, 15), "%Y"), "2025");
        assert_eq!(format_label(date(2025, 1, 15), "%M"), "Jan");
        assert_eq!(format_label(date(2025, 12, 15), "%M"), "Dec");
        assert_eq!(format_label(date(2025, 3, 15), "%M %Y"), "Mar 2025");
        assert_eq!(format_label(date(2025, 6, 7), "%j"), "7");
        assert_eq!(format_label(date(2025, 6, 7), "%d/%m"), "2025");
    }

    #[test]
    fn label_format_serializes_as_pattern() {
        let json = serde_json::to_string(&LabelFormat::MonthYear).unwrap();
        assert_eq!(json, "\"%M %Y\"");
        let parsed: LabelFormat = serde_json::from_str("\"%q\"").unwrap();
        assert_eq!(parsed, LabelFormat::Year);
    }

    #[test]
    fn aligns_to_period_start() {
        assert_eq!(TimeUnit::Year.align(date(2027, 8, 9), 5), date(2025, 1, 1));
        assert_eq!(TimeUnit::Year.align(date(2024, 3, 1), 1), date(2024, 1, 1));
        assert_eq!(TimeUnit::Month.align(date(2024, 5, 20), 3), date(2024, 4, 1));
        assert_eq!(TimeUnit::Month.align(date(2024, 12, 31), 6), date(2024, 7, 1));
        assert_eq!(TimeUnit::Day.align(date(2024, 5, 20), 7), date(2024, 5, 20));
    }

    #[test]
    fn date_to_x_interpolates() {
        let (start, end) = (date(2020, 1, 1), date(2025, 1, 1));
        assert_eq!(date_to_x(start, start, end, 1000.0), 0.0);
        assert_eq!(date_to_x(end, start, end, 1000.0), 1000.0);

        let mid = date_to_x(date(2022, 7, 2), start, end, 1000.0);
        assert!(mid > 400.0 && mid < 600.0);

        assert_eq!(date_to_x(start, start, start, 1000.0), 0.0);
        assert!(date_to_x(date(2019, 1, 1), start, end, 1000.0) < 0.0);
    }

    #[test]
    fn degenerate_inputs_give_empty_axis() {
        let empty = compute_time_axis(&[], &YEAR_SCALES, DEFAULT_CELL_WIDTH);
        assert_eq!(empty, TimeAxis::default());
        assert!(empty.is_empty());
        assert_eq!(empty.start_date, None);

        let tasks = [task(date(2024, 1, 1), date(2025, 1, 1))];
        let one_scale = compute_time_axis(&tasks, &YEAR_SCALES[..1], DEFAULT_CELL_WIDTH);
        assert_eq!(one_scale.total_width, 0);
        assert_eq!(one_scale.end_date, None);
    }

    #[test]
    fn year_scale_columns() {
        let tasks = [task(date(2024, 3, 1), date(2026, 9, 1))];
        let axis = compute_time_axis(&tasks, &YEAR_SCALES, DEFAULT_CELL_WIDTH);

        assert_eq!(axis.start_date, Some(date(2024, 1, 1)));
        assert_eq!(axis.end_date, Some(date(2027, 1, 1)));
        assert_eq!(
            labels(&axis.bottom_row),
            vec!["Jan", "Jul", "Jan", "Jul", "Jan", "Jul"]
        );
        assert_eq!(axis.total_width, 6 * 70);
        assert_eq!(labels(&axis.top_row), vec!["2024", "2025", "2026"]);
        for (i, col) in axis.top_row.iter().enumerate() {
            assert_eq!(col.width, 140);
            assert_eq!(col.x, i as u32 * 140);
        }
    }

    #[test]
    fn five_year_scale_columns() {
        let tasks = [task(date(2020, 1, 1), date(2028, 12, 1))];
        let axis = compute_time_axis(&tasks, &FIVE_YEAR_SCALES, DEFAULT_CELL_WIDTH);
        assert_eq!(axis.bottom_row.len(), 10);
        assert_eq!(labels(&axis.top_row), vec!["2020", "2025"]);
        assert_eq!(axis.top_row[1].x, 350);
    }

    #[test]
    fn total_width_tracks_cell_width() {
        let tasks = [task(date(2024, 1, 1), date(2025, 6, 1))];
        let axis = compute_time_axis(&tasks, &YEAR_SCALES, 80);
        assert_eq!(axis.total_width, axis.bottom_row.len() as u32 * 80);
        for (i, col) in axis.bottom_row.iter().enumerate() {
            assert_eq!(col.width, 80);
            assert_eq!(col.x, i as u32 * 80);
        }
    }

    #[test]
    fn extent_covers_all_tasks() {
        let tasks = [
            task(date(2024, 5, 1), date(2024, 6, 1)),
            task(date(2021, 2, 1), date(2022, 1, 1)),
            task(date(2023, 1, 1), date(2029, 3, 1)),
        ];
        let axis = compute_time_axis(&tasks, &YEAR_SCALES, DEFAULT_CELL_WIDTH);
        assert_eq!(axis.start_date, Some(date(2021, 1, 1)));
        assert_eq!(axis.end_date, Some(date(2030, 1, 1)));
        assert_eq!(axis.bottom_row.len(), 18);
    }

    #[test]
    fn weekly_columns_under_months() {
        let scales = [
            TimeScale::new(TimeUnit::Month, 1, LabelFormat::MonthYear),
            TimeScale::new(TimeUnit::Day, 7, LabelFormat::DayOfMonth),
        ];
        let tasks = [task(date(2025, 1, 10), date(2025, 1, 20))];
        let axis = compute_time_axis(&tasks, &scales, DEFAULT_CELL_WIDTH);

        assert_eq!(axis.start_date, Some(date(2025, 1, 1)));
        assert_eq!(axis.end_date, Some(date(2025, 2, 1)));
        assert_eq!(labels(&axis.bottom_row), vec!["1", "8", "15", "22", "29"]);
        assert_eq!(labels(&axis.top_row), vec!["Jan 2025"]);
        assert_eq!(axis.top_row[0].width, axis.total_width);
    }

    #[test]
    fn top_columns_partition_bottom_row() {
        let scales = [
            TimeScale::new(TimeUnit::Year, 1, LabelFormat::Year),
            TimeScale::new(TimeUnit::Month, 3, LabelFormat::MonthYear),
        ];
        let tasks = [task(date(2023, 11, 5), date(2026, 2, 14))];
        let axis = compute_time_axis(&tasks, &scales, 50);
        let covered: u32 = axis.top_row.iter().map(|c| c.width).sum();
        assert_eq!(covered, axis.total_width);
        assert_eq!(axis.bottom_row[0].label, "Jan 2023");
    }

    #[test]
    fn oversized_cell_width_gives_empty_axis() {
        let scales = [
            TimeScale::new(TimeUnit::Year, 1, LabelFormat::Year),
            TimeScale::new(TimeUnit::Month, 3, LabelFormat::MonthYear),
        ];
        let tasks = [task(date(2020, 1, 1), date(2030, 1, 1))];
        let axis = compute_time_axis(&tasks, &scales, 100_000_000);
        assert_eq!(axis, TimeAxis::default());

        // 44 columns still fit just below the limit
        let cell_width = u32::MAX / 44;
        let axis = compute_time_axis(&tasks, &scales, cell_width);
        assert_eq!(axis.bottom_row.len(), 44);
        assert_eq!(axis.total_width, 44 * cell_width);
        assert_eq!(axis.bottom_row[43].x, 43 * cell_width);
    }

    #[test]
    fn x_of_uses_axis_range() {
        let tasks = [task(date(2024, 3, 1), date(2026, 9, 1))];
        let axis = compute_time_axis(&tasks, &YEAR_SCALES, DEFAULT_CELL_WIDTH);
        assert_eq!(axis.x_of(date(2024, 1, 1)), 0.0);
        assert_eq!(axis.x_of(date(2027, 1, 1)), f64::from(axis.total_width));
        assert_eq!(TimeAxis::default().x_of(date(2024, 1, 1)), 0.0);
    }
}
