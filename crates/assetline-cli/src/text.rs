//! Plain-text rendering of a timeline document.

use std::collections::HashMap;
use std::fmt::Write;

use assetline_core::{ContractStatus, GanttTask, TaskId};
use assetline_timeline::TimelineDocument;

/// Indented location → product → asset tree followed by an axis summary
pub fn render(doc: &TimelineDocument, zoom_label: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", doc.summary.message());

    let depths = depths(&doc.tasks);
    let statuses: HashMap<&str, ContractStatus> =
        ContractStatus::ALL.into_iter().map(|s| (s.color(), s)).collect();

    for task in &doc.tasks {
        let indent = "  ".repeat(depths.get(&task.id).copied().unwrap_or(0));
        if task.is_summary() {
            let _ = writeln!(
                out,
                "{}{}  [{} .. {}]",
                indent, task.text, task.start, task.end
            );
        } else {
            let status = task
                .color
                .as_deref()
                .and_then(|color| statuses.get(color))
                .map_or("", |s| s.as_str());
            let _ = writeln!(
                out,
                "{}{}  {} .. {}  {}",
                indent, task.text, task.start, task.end, status
            );
        }
    }

    let axis = &doc.axis;
    if let (Some(start), Some(end)) = (axis.start_date, axis.end_date) {
        let _ = writeln!(
            out,
            "Axis ({}): {} .. {}, {} columns, {}px",
            zoom_label,
            start,
            end,
            axis.bottom_row.len(),
            axis.total_width
        );
    }
    out
}

/// Nesting depth of every task in one pass.
///
/// Flattened task lists place parents before their children; a parent that
/// is not (yet) known counts as one level.
fn depths(tasks: &[GanttTask]) -> HashMap<TaskId, usize> {
    let mut depths = HashMap::with_capacity(tasks.len());
    for task in tasks {
        let depth = task
            .parent
            .map_or(0, |parent| depths.get(&parent).map_or(1, |d| d + 1));
        depths.insert(task.id, depth);
    }
    depths
}
