//! View-level filtering: location selection and text search.

use std::collections::{HashMap, HashSet};

use assetline_core::{GanttTask, LocationGroup, TaskId};
use serde::{Deserialize, Serialize};

/// User-selected narrowing of the timeline
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFilter {
    /// Location ids to show; empty means every location
    #[serde(default)]
    pub location_ids: Vec<String>,
    /// Case-insensitive substring matched against asset rows
    #[serde(default)]
    pub search: String,
}

impl ViewFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location id to the selection
    pub fn location(mut self, id: impl Into<String>) -> Self {
        self.location_ids.push(id.into());
        self
    }

    /// Set the search text
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    /// Whether the filter leaves everything visible
    pub fn is_empty(&self) -> bool {
        self.location_ids.is_empty() && self.search.is_empty()
    }

    /// Keep only the selected locations, preserving order
    pub fn apply_to_groups(&self, groups: &[LocationGroup]) -> Vec<LocationGroup> {
        if self.location_ids.is_empty() {
            return groups.to_vec();
        }
        let wanted: HashSet<&str> = self.location_ids.iter().map(String::as_str).collect();
        groups
            .iter()
            .filter(|g| wanted.contains(g.location_id.as_str()))
            .cloned()
            .collect()
    }

    /// Search the flattened task list
    pub fn apply_to_tasks(&self, tasks: &[GanttTask]) -> Vec<GanttTask> {
        filter_tasks(tasks, &self.search)
    }
}

/// Search asset rows while keeping the location → product → asset shape.
///
/// A product summary is kept with only its matching leaves; a location
/// summary is kept when any of its products is. An empty search, or one
/// that matches nothing, returns the list unchanged.
pub fn filter_tasks(tasks: &[GanttTask], search: &str) -> Vec<GanttTask> {
    if search.is_empty() {
        return tasks.to_vec();
    }
    let needle = search.to_lowercase();

    let mut children: HashMap<TaskId, Vec<&GanttTask>> = HashMap::new();
    for task in tasks {
        if let Some(parent) = task.parent {
            children.entry(parent).or_default().push(task);
        }
    }
    let children_of = |id: TaskId| children.get(&id).map_or(&[][..], Vec::as_slice);

    let mut kept = Vec::new();
    for location in tasks.iter().filter(|t| t.is_summary() && t.is_root()) {
        let mut products = Vec::new();
        for product in children_of(location.id) {
            let matching: Vec<&GanttTask> = children_of(product.id)
                .iter()
                .copied()
                .filter(|leaf| leaf.text.to_lowercase().contains(&needle))
                .collect();
            if !matching.is_empty() {
                products.push(*product);
                products.extend(matching);
            }
        }
        if !products.is_empty() {
            kept.push(location);
            kept.extend(products);
        }
    }

    if kept.is_empty() {
        return tasks.to_vec();
    }
    kept.into_iter().cloned().collect()
}
