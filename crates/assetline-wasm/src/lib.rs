//! WebAssembly bindings for the assetline contract timeline
//!
//! JavaScript-callable functions for loading a decoded asset export and
//! computing time axis geometry, so a browser Gantt widget only has to draw.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use assetline_core::{ContractStatus, GanttTask};
use assetline_parser::RowSet;
use assetline_render::{compute_time_axis, ZoomLevel, DEFAULT_CELL_WIDTH};
use assetline_timeline::{load, Timeline, TimelineDocument, ViewFilter};
use chrono::NaiveDate;

/// Initialize panic hook for better error messages in console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// ============================================================================
// Free Functions
// ============================================================================

/// Load a row set JSON and return the timeline document as JSON
///
/// # Arguments
/// * `input_json` - `{"headers": [...], "rows": [{...}]}`
/// * `today_iso` - reference date, `YYYY-MM-DD`
#[wasm_bindgen]
pub fn load_timeline(input_json: &str, today_iso: &str) -> Result<String, JsValue> {
    load_timeline_internal(input_json, today_iso).map_err(|e| JsValue::from_str(&e))
}

/// Compute axis geometry for a task list JSON under a zoom preset
#[wasm_bindgen]
pub fn time_axis(tasks_json: &str, preset_label: &str, cell_width: u32) -> Result<String, JsValue> {
    time_axis_internal(tasks_json, preset_label, cell_width).map_err(|e| JsValue::from_str(&e))
}

/// Contract status legend as a JSON array of `{status, color}`
#[wasm_bindgen]
pub fn status_legend() -> String {
    let legend: Vec<LegendEntry> = ContractStatus::ALL
        .into_iter()
        .map(|status| LegendEntry {
            status: status.as_str(),
            color: status.color(),
        })
        .collect();
    serde_json::to_string(&legend).unwrap_or_else(|_| "[]".to_string())
}

#[derive(Serialize)]
struct LegendEntry {
    status: &'static str,
    color: &'static str,
}

fn parse_today(today_iso: &str) -> Result<NaiveDate, String> {
    today_iso
        .trim()
        .parse()
        .map_err(|e| format!("Invalid date '{}': {}", today_iso, e))
}

/// Loads with no admitted assets fail with the summary message
fn load_internal(input_json: &str, today_iso: &str) -> Result<Timeline, String> {
    let today = parse_today(today_iso)?;
    let rows = RowSet::from_json(input_json).map_err(|e| e.to_string())?;
    let timeline = load(&rows, today).map_err(|e| e.to_string())?;
    if timeline.summary.is_empty() {
        return Err(timeline.summary.message());
    }
    Ok(timeline)
}

fn load_timeline_internal(input_json: &str, today_iso: &str) -> Result<String, String> {
    let timeline = load_internal(input_json, today_iso)?;
    let zoom = ZoomLevel::default();
    let doc = timeline.document(
        &ViewFilter::default(),
        &zoom.current().scales,
        DEFAULT_CELL_WIDTH,
    );
    serde_json::to_string(&doc).map_err(|e| e.to_string())
}

fn time_axis_internal(tasks_json: &str, preset_label: &str, cell_width: u32) -> Result<String, String> {
    let tasks: Vec<GanttTask> =
        serde_json::from_str(tasks_json).map_err(|e| format!("Invalid tasks: {}", e))?;
    let mut zoom = ZoomLevel::default();
    zoom.select(preset_label).map_err(|e| e.to_string())?;
    let axis = compute_time_axis(&tasks, &zoom.current().scales, cell_width);
    serde_json::to_string(&axis).map_err(|e| e.to_string())
}

// ============================================================================
// Viewer Class
// ============================================================================

/// Result wrapper returned to JavaScript
#[derive(Serialize, Deserialize)]
struct ViewerResult {
    success: bool,
    error: Option<String>,
    message: Option<String>,
}

/// Stateful timeline viewer: one loaded export plus zoom and filters
#[wasm_bindgen]
pub struct Viewer {
    timeline: Option<Timeline>,
    zoom: ZoomLevel,
    filter: ViewFilter,
    cell_width: u32,
    last_error: Option<String>,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Viewer {
    /// Create a viewer at the default zoom with no filters
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            timeline: None,
            zoom: ZoomLevel::default(),
            filter: ViewFilter::default(),
            cell_width: DEFAULT_CELL_WIDTH,
            last_error: None,
        }
    }

    /// Load a row set JSON
    ///
    /// # Returns
    /// `{success, error, message}`; `message` is the load summary line.
    /// An export with no admitted assets is a failure and keeps the
    /// previously loaded timeline.
    pub fn load(&mut self, input_json: &str, today_iso: &str) -> JsValue {
        let result = match self.load_internal(input_json, today_iso) {
            Ok(message) => ViewerResult {
                success: true,
                error: None,
                message: Some(message),
            },
            Err(e) => {
                self.last_error = Some(e.clone());
                ViewerResult {
                    success: false,
                    error: Some(e),
                    message: None,
                }
            }
        };
        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }

    /// Current document (`{summary, tasks, links, axis}`), or null before a load
    pub fn document(&self) -> JsValue {
        self.document_internal()
            .and_then(|doc| serde_wasm_bindgen::to_value(&doc).ok())
            .unwrap_or(JsValue::NULL)
    }

    pub fn has_timeline(&self) -> bool {
        self.timeline.is_some()
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.clone()
    }

    /// Location ids present in the loaded export, in display order
    pub fn location_ids(&self) -> Vec<String> {
        self.timeline
            .iter()
            .flat_map(|t| t.location_groups.iter().map(|g| g.location_id.clone()))
            .collect()
    }

    pub fn set_search(&mut self, search: &str) {
        self.filter.search = search.to_string();
    }

    pub fn set_locations(&mut self, location_ids: Vec<String>) {
        self.filter.location_ids = location_ids;
    }

    pub fn set_cell_width(&mut self, cell_width: u32) {
        self.cell_width = cell_width;
    }

    pub fn zoom_in(&mut self) {
        self.zoom.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.zoom.zoom_out();
    }

    /// Jump to a preset index (clamped)
    pub fn set_zoom(&mut self, index: usize) {
        self.zoom.set(index);
    }

    pub fn zoom_label(&self) -> String {
        self.zoom.current().label.clone()
    }
}

impl Viewer {
    fn load_internal(&mut self, input_json: &str, today_iso: &str) -> Result<String, String> {
        let timeline = load_internal(input_json, today_iso)?;
        let message = timeline.summary.message();
        self.timeline = Some(timeline);
        self.filter = ViewFilter::default();
        self.last_error = None;
        Ok(message)
    }

    fn document_internal(&self) -> Option<TimelineDocument> {
        let timeline = self.timeline.as_ref()?;
        Some(timeline.document(&self.filter, &self.zoom.current().scales, self.cell_width))
    }
}
