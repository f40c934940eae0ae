//! `assetline.toml` configuration.
//!
//! ```toml
//! cell_width = 80
//! zoom = "Year"
//! today = "2025-06-01"
//!
//! [locale]
//! active_values = ["Activo"]
//!
//! [locale.header_aliases]
//! assetId = ["NÚMERO DE ACTIVO"]
//!
//! [[zoom_presets]]
//! label = "Decade"
//! scales = [
//!     { unit = "year", step = 10, format = "%Y" },
//!     { unit = "year", step = 2, format = "%Y" },
//! ]
//! ```
//!
//! Every key is optional. Command-line flags take precedence.

use std::path::Path;

use anyhow::{Context, Result};
use assetline_parser::{LocaleExtension, LocaleTables};
use assetline_render::{ZoomLevel, ZoomPreset};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Bottom-row column width in pixels
    pub cell_width: Option<u32>,
    /// Initial zoom preset label
    pub zoom: Option<String>,
    /// Reference date for days remaining
    pub today: Option<NaiveDate>,
    /// Extra header aliases and values, appended to the builtin tables
    pub locale: LocaleExtension,
    /// Replacement preset list; empty keeps the builtin presets
    pub zoom_presets: Vec<ZoomPreset>,
}

impl Config {
    pub fn from_toml(input: &str) -> Result<Self> {
        toml::from_str(input).context("Invalid configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&input).with_context(|| format!("In {}", path.display()))
    }

    /// Builtin tables plus the configured additions
    pub fn locale_tables(&self) -> Result<LocaleTables> {
        let mut tables = LocaleTables::builtin();
        tables.extend(&self.locale)?;
        Ok(tables)
    }

    /// Zoom navigation over the configured presets, positioned at `zoom`
    pub fn zoom_level(&self, zoom: Option<&str>) -> Result<ZoomLevel> {
        let mut level = if self.zoom_presets.is_empty() {
            ZoomLevel::default()
        } else {
            ZoomLevel::with_presets(self.zoom_presets.clone())?
        };
        if let Some(label) = zoom.or(self.zoom.as_deref()) {
            level.select(label)?;
        }
        Ok(level)
    }
}
