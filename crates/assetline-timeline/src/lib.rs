//! # assetline-timeline
//!
//! Builds the contract timeline from parsed assets.
//!
//! This crate provides:
//! - Location → product → asset grouping with end-date ordering
//! - Flattening into a parent-referencing Gantt task list
//! - View filtering by location and search text
//! - Chart documents pairing visible tasks with axis geometry
//! - The end-to-end [`load`] pipeline
//!
//! ## Example
//!
//! ```rust
//! use assetline_parser::RowSet;
//! use assetline_timeline::load;
//! use chrono::NaiveDate;
//!
//! let rows = RowSet::from_json(r#"{
//!     "headers": ["ASSET ID", "PRODUCT NAME", "PRODUCT TYPE", "LOCATION ID",
//!                 "SERVICES STATUS", "CONTRACT END DATE"],
//!     "rows": [
//!         {"ASSET ID": "A1", "PRODUCT NAME": "Unity XT", "PRODUCT TYPE": "HARDWARE",
//!          "LOCATION ID": "L1", "SERVICES STATUS": "Active",
//!          "CONTRACT END DATE": "July 23, 2026"}
//!     ]
//! }"#).unwrap();
//!
//! let today = NaiveDate::from_ymd_opt(2025, 7, 23).unwrap();
//! let timeline = load(&rows, today).unwrap();
//!
//! assert_eq!(timeline.summary.message(), "Loaded 1 assets across 1 locations");
//! assert_eq!(timeline.gantt.tasks.len(), 3);
//! ```

pub mod adapter;
pub mod document;
pub mod grouping;
pub mod view;

pub use adapter::to_gantt_data;
pub use document::TimelineDocument;
pub use grouping::group_assets;
pub use view::{filter_tasks, ViewFilter};

use assetline_core::{GanttData, LocationGroup};
use assetline_parser::{normalize_rows_with, AssetFilter, LocaleTables, ParseError, RowSet};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Counts describing one load
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    /// Data rows in the source, before filtering
    pub total_rows: usize,
    /// Rows admitted by the inclusion filter
    pub matched_assets: usize,
    /// Distinct locations among admitted rows
    pub location_count: usize,
}

impl LoadSummary {
    pub fn is_empty(&self) -> bool {
        self.matched_assets == 0
    }

    /// Status line shown after a load
    pub fn message(&self) -> String {
        if self.is_empty() {
            "No hardware assets with active contracts found".to_string()
        } else {
            format!(
                "Loaded {} assets across {} locations",
                self.matched_assets, self.location_count
            )
        }
    }
}

/// Result of loading an export
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub location_groups: Vec<LocationGroup>,
    pub gantt: GanttData,
    pub summary: LoadSummary,
}

impl Timeline {
    /// Build the timeline from already parsed location groups
    pub fn from_groups(location_groups: Vec<LocationGroup>, total_rows: usize) -> Self {
        let summary = LoadSummary {
            total_rows,
            matched_assets: location_groups.iter().map(LocationGroup::asset_count).sum(),
            location_count: location_groups.len(),
        };
        let gantt = to_gantt_data(&location_groups);
        Self {
            location_groups,
            gantt,
            summary,
        }
    }

    /// Gantt data narrowed by a view filter.
    ///
    /// Location selection re-flattens the kept groups, so ids are renumbered
    /// from 1; the search then runs over the resulting tasks.
    pub fn view(&self, filter: &ViewFilter) -> GanttData {
        let gantt = if filter.location_ids.is_empty() {
            self.gantt.clone()
        } else {
            to_gantt_data(&filter.apply_to_groups(&self.location_groups))
        };
        GanttData {
            tasks: filter.apply_to_tasks(&gantt.tasks),
            links: gantt.links,
        }
    }
}

/// Load a decoded export using the builtin locale tables
pub fn load(rows: &RowSet, today: NaiveDate) -> Result<Timeline, ParseError> {
    load_with(rows, today, LocaleTables::shared())
}

/// Resolve, normalize, filter, group and flatten a decoded export.
///
/// Fails only when no header is recognised. Zero admitted rows is not an
/// error; check [`LoadSummary::is_empty`].
#[instrument(level = "info", skip_all, fields(rows = rows.len(), %today))]
pub fn load_with(
    rows: &RowSet,
    today: NaiveDate,
    tables: &LocaleTables,
) -> Result<Timeline, ParseError> {
    let (_, raws) = normalize_rows_with(rows, tables)?;
    let assets = AssetFilter::with_tables(today, tables).filter(&raws);
    let timeline = Timeline::from_groups(group_assets(&assets), rows.len());

    info!(
        matched = timeline.summary.matched_assets,
        locations = timeline.summary.location_count,
        tasks = timeline.gantt.tasks.len(),
        "timeline loaded"
    );
    Ok(timeline)
}
