//! The chart document handed to a renderer: tasks, links and axis geometry.

use assetline_core::{GanttLink, GanttTask};
use assetline_render::{compute_time_axis, TimeAxis, TimeScale};
use serde::{Deserialize, Serialize};

use crate::{LoadSummary, Timeline, ViewFilter};

/// Serializable snapshot of one view of a timeline
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineDocument {
    pub summary: LoadSummary,
    pub tasks: Vec<GanttTask>,
    pub links: Vec<GanttLink>,
    pub axis: TimeAxis,
}

impl Timeline {
    /// Apply `filter`, then lay out an axis over the visible tasks
    pub fn document(
        &self,
        filter: &ViewFilter,
        scales: &[TimeScale],
        cell_width: u32,
    ) -> TimelineDocument {
        let view = self.view(filter);
        let axis = compute_time_axis(&view.tasks, scales, cell_width);
        TimelineDocument {
            summary: self.summary,
            tasks: view.tasks,
            links: view.links,
            axis,
        }
    }
}
