//! # assetline-core
//!
//! Core domain model for the assetline contract timeline pipeline.
//!
//! This crate provides:
//! - Canonical spreadsheet fields and the `FieldMap` that binds them to source headers
//! - Record types: `RawAssetRecord`, `ParsedAssetRecord`
//! - Hierarchy types: `ProductGroup`, `LocationGroup`
//! - Renderer contract: `GanttTask`, `GanttLink`, `GanttData`
//! - Contract status classification (`status` module)
//! - Calendar arithmetic with day-of-month rollover (`calendar` module)
//!
//! ## Example
//!
//! ```rust
//! use assetline_core::{GanttData, GanttTask};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
//!
//! let mut data = GanttData::default();
//! data.tasks.push(GanttTask::summary(1, "Main DC, Geneva", start, end));
//! data.tasks.push(GanttTask::summary(2, "PowerEdge R740", start, end).parent(1));
//!
//! assert_eq!(data.date_extent(), Some((start, end)));
//! assert!(data.links.is_empty());
//! ```

pub mod calendar;
pub mod status;

pub use status::{contract_status_color, ContractStatus};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Canonical Fields
// ============================================================================

/// A normalized semantic column, independent of the header text of any locale
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
    AssetId,
    ProductName,
    ProductType,
    InstallBaseAge,
    LocationId,
    LocationName,
    ServicesStatus,
    ContractEndDate,
    EndOfStandardSupport,
    City,
    Country,
}

impl CanonicalField {
    /// Every canonical field, in table order
    pub const ALL: [CanonicalField; 11] = [
        CanonicalField::AssetId,
        CanonicalField::ProductName,
        CanonicalField::ProductType,
        CanonicalField::InstallBaseAge,
        CanonicalField::LocationId,
        CanonicalField::LocationName,
        CanonicalField::ServicesStatus,
        CanonicalField::ContractEndDate,
        CanonicalField::EndOfStandardSupport,
        CanonicalField::City,
        CanonicalField::Country,
    ];

    /// The camelCase key used in configuration and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::AssetId => "assetId",
            CanonicalField::ProductName => "productName",
            CanonicalField::ProductType => "productType",
            CanonicalField::InstallBaseAge => "installBaseAge",
            CanonicalField::LocationId => "locationId",
            CanonicalField::LocationName => "locationName",
            CanonicalField::ServicesStatus => "servicesStatus",
            CanonicalField::ContractEndDate => "contractEndDate",
            CanonicalField::EndOfStandardSupport => "endOfStandardSupport",
            CanonicalField::City => "city",
            CanonicalField::Country => "country",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a string names no canonical field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown canonical field: {0}")]
pub struct UnknownFieldError(pub String);

impl FromStr for CanonicalField {
    type Err = UnknownFieldError;

    /// Accepts the camelCase key or its snake_case spelling
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        CanonicalField::ALL
            .into_iter()
            .find(|field| field.as_str().to_lowercase() == folded)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

// ============================================================================
// Field Map
// ============================================================================

/// Maps each canonical field to the literal header text found in the source.
///
/// An empty string means the field was not present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMap {
    pub asset_id: String,
    pub product_name: String,
    pub product_type: String,
    pub install_base_age: String,
    pub location_id: String,
    pub location_name: String,
    pub services_status: String,
    pub contract_end_date: String,
    pub end_of_standard_support: String,
    pub city: String,
    pub country: String,
}

impl FieldMap {
    /// Header bound to `field` (empty when unresolved)
    pub fn get(&self, field: CanonicalField) -> &str {
        match field {
            CanonicalField::AssetId => &self.asset_id,
            CanonicalField::ProductName => &self.product_name,
            CanonicalField::ProductType => &self.product_type,
            CanonicalField::InstallBaseAge => &self.install_base_age,
            CanonicalField::LocationId => &self.location_id,
            CanonicalField::LocationName => &self.location_name,
            CanonicalField::ServicesStatus => &self.services_status,
            CanonicalField::ContractEndDate => &self.contract_end_date,
            CanonicalField::EndOfStandardSupport => &self.end_of_standard_support,
            CanonicalField::City => &self.city,
            CanonicalField::Country => &self.country,
        }
    }

    /// Bind `field` to a source header
    pub fn set(&mut self, field: CanonicalField, header: impl Into<String>) {
        let slot = match field {
            CanonicalField::AssetId => &mut self.asset_id,
            CanonicalField::ProductName => &mut self.product_name,
            CanonicalField::ProductType => &mut self.product_type,
            CanonicalField::InstallBaseAge => &mut self.install_base_age,
            CanonicalField::LocationId => &mut self.location_id,
            CanonicalField::LocationName => &mut self.location_name,
            CanonicalField::ServicesStatus => &mut self.services_status,
            CanonicalField::ContractEndDate => &mut self.contract_end_date,
            CanonicalField::EndOfStandardSupport => &mut self.end_of_standard_support,
            CanonicalField::City => &mut self.city,
            CanonicalField::Country => &mut self.country,
        };
        *slot = header.into();
    }

    /// Whether `field` was found among the source headers
    pub fn is_resolved(&self, field: CanonicalField) -> bool {
        !self.get(field).is_empty()
    }

    /// Number of canonical fields bound to a header
    pub fn resolved_count(&self) -> usize {
        CanonicalField::ALL
            .iter()
            .filter(|field| self.is_resolved(**field))
            .count()
    }
}

// ============================================================================
// Asset Records
// ============================================================================

/// The canonical fields of one source row as trimmed, uninterpreted strings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAssetRecord {
    pub asset_id: String,
    pub product_name: String,
    pub product_type: String,
    pub install_base_age: String,
    pub location_id: String,
    pub location_name: String,
    pub services_status: String,
    pub contract_end_date: String,
    pub end_of_standard_support: String,
    pub city: String,
    pub country: String,
}

impl RawAssetRecord {
    /// Value of a canonical field
    pub fn get(&self, field: CanonicalField) -> &str {
        match field {
            CanonicalField::AssetId => &self.asset_id,
            CanonicalField::ProductName => &self.product_name,
            CanonicalField::ProductType => &self.product_type,
            CanonicalField::InstallBaseAge => &self.install_base_age,
            CanonicalField::LocationId => &self.location_id,
            CanonicalField::LocationName => &self.location_name,
            CanonicalField::ServicesStatus => &self.services_status,
            CanonicalField::ContractEndDate => &self.contract_end_date,
            CanonicalField::EndOfStandardSupport => &self.end_of_standard_support,
            CanonicalField::City => &self.city,
            CanonicalField::Country => &self.country,
        }
    }

    /// Builder-style setter, mostly useful in tests and fixtures
    pub fn with(mut self, field: CanonicalField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            CanonicalField::AssetId => self.asset_id = value,
            CanonicalField::ProductName => self.product_name = value,
            CanonicalField::ProductType => self.product_type = value,
            CanonicalField::InstallBaseAge => self.install_base_age = value,
            CanonicalField::LocationId => self.location_id = value,
            CanonicalField::LocationName => self.location_name = value,
            CanonicalField::ServicesStatus => self.services_status = value,
            CanonicalField::ContractEndDate => self.contract_end_date = value,
            CanonicalField::EndOfStandardSupport => self.end_of_standard_support = value,
            CanonicalField::City => self.city = value,
            CanonicalField::Country => self.country = value,
        }
        self
    }
}

/// An admitted asset with its derived contract timeline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAssetRecord {
    pub asset_id: String,
    pub product_name: String,
    pub location_id: String,
    pub location_name: String,
    pub city: String,
    pub country: String,
    /// Estimated install date (contract end when the age is unknown)
    pub install_date: NaiveDate,
    /// Contract end, falling back to end of standard support
    pub contract_end: NaiveDate,
    /// Whole days from the reference date to `contract_end` (negative = lapsed)
    pub days_remaining: i64,
}

impl ParsedAssetRecord {
    /// Status bucket for this asset's remaining coverage
    pub fn status(&self) -> ContractStatus {
        ContractStatus::from_days_remaining(self.days_remaining)
    }
}

// ============================================================================
// Hierarchy
// ============================================================================

/// Assets sharing a product name within one location
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductGroup {
    pub product_name: String,
    /// Sorted ascending by contract end (stable)
    pub assets: Vec<ParsedAssetRecord>,
    /// Earliest install date across the group
    pub group_start: NaiveDate,
    /// Latest contract end across the group
    pub group_end: NaiveDate,
}

/// Top-level grouping by location id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationGroup {
    pub location_id: String,
    pub location_name: String,
    pub city: String,
    pub country: String,
    /// Sorted ascending by `group_end` (stable)
    pub product_groups: Vec<ProductGroup>,
    /// Earliest `group_start` across the location
    pub location_start: NaiveDate,
    /// Latest `group_end` across the location
    pub location_end: NaiveDate,
}

impl LocationGroup {
    /// Display label: the non-empty parts of name, city and country
    pub fn label(&self) -> String {
        [
            self.location_name.as_str(),
            self.city.as_str(),
            self.country.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Total assets across all product groups
    pub fn asset_count(&self) -> usize {
        self.product_groups.iter().map(|g| g.assets.len()).sum()
    }
}

// ============================================================================
// Gantt Contract
// ============================================================================

/// Sequential task identifier, starting at 1
pub type TaskId = u32;

/// Node kind in the flattened hierarchy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Aggregate node (location or product)
    Summary,
    /// Leaf asset
    Task,
}

/// A renderable timeline node
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttTask {
    pub id: TaskId,
    pub text: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    /// Parent task id; `None` for root nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TaskId>,
    /// Initial expansion hint for summary rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
    /// Bar color for leaf tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl GanttTask {
    /// Create a summary node
    pub fn summary(id: TaskId, text: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id,
            text: text.into(),
            start,
            end,
            kind: TaskKind::Summary,
            parent: None,
            open: None,
            color: None,
        }
    }

    /// Create a leaf node
    pub fn leaf(id: TaskId, text: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            kind: TaskKind::Task,
            ..Self::summary(id, text, start, end)
        }
    }

    /// Set the parent task
    pub fn parent(mut self, parent: TaskId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the expansion hint
    pub fn open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    /// Set the bar color
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Whether this node sits at the top level
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_summary(&self) -> bool {
        self.kind == TaskKind::Summary
    }
}

/// Dependency edge type between two tasks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// End to end
    E2e,
    /// End to start
    E2s,
    /// Start to end
    S2e,
    /// Start to start
    S2s,
}

/// Dependency edge (reserved; never populated by the adapter)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttLink {
    pub id: u32,
    pub source: TaskId,
    pub target: TaskId,
    #[serde(rename = "type")]
    pub kind: LinkKind,
}

/// Flat task list plus link list handed to the renderer
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttData {
    pub tasks: Vec<GanttTask>,
    pub links: Vec<GanttLink>,
}

impl GanttData {
    /// Minimum start and maximum end across all tasks
    pub fn date_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        date_extent(&self.tasks)
    }

    /// Look up a task by id
    pub fn get(&self, id: TaskId) -> Option<&GanttTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Direct children of a task, in list order
    pub fn children_of(&self, id: TaskId) -> impl Iterator<Item = &GanttTask> {
        self.tasks.iter().filter(move |t| t.parent == Some(id))
    }
}

/// Minimum start and maximum end across `tasks`
pub fn date_extent(tasks: &[GanttTask]) -> Option<(NaiveDate, NaiveDate)> {
    let first = tasks.first()?;
    let extent = tasks
        .iter()
        .fold((first.start, first.end), |(min, max), task| {
            (min.min(task.start), max.max(task.end))
        });
    Some(extent)
}

// ============================================================================
// Tests
// ============================================================================
