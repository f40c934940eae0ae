//! # assetline-render
//!
//! Geometry for drawing an assetline timeline.
//!
//! This crate provides:
//! - Two-row time axis computation from task date ranges
//! - Date to pixel interpolation
//! - Column label formatting
//! - Zoom presets with clamped navigation
//!
//! Drawing itself is left to the consumer (a browser Gantt widget, or
//! the CLI's text tree).
//!
//! ## Example
//!
//! ```rust
//! use assetline_core::GanttTask;
//! use assetline_render::{compute_time_axis, ZoomLevel, DEFAULT_CELL_WIDTH};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
//! let tasks = vec![GanttTask::leaf(1, "Unity XT (A1)", start, end)];
//!
//! let mut zoom = ZoomLevel::default();
//! zoom.select("Year").unwrap();
//!
//! let axis = compute_time_axis(&tasks, &zoom.current().scales, DEFAULT_CELL_WIDTH);
//! assert_eq!(axis.top_row.len(), 3);
//! assert_eq!(axis.bottom_row.len(), 6);
//! assert_eq!(axis.total_width, 420);
//! ```

pub mod axis;
pub mod zoom;

pub use axis::{
    compute_time_axis, date_to_x, format_label, LabelFormat, TimeAxis, TimeColumn, TimeScale,
    TimeUnit, DEFAULT_CELL_WIDTH,
};
pub use zoom::{default_presets, ZoomError, ZoomLevel, ZoomPreset, DEFAULT_ZOOM_INDEX};
