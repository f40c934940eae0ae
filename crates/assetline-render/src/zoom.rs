//! Zoom presets and zoom-level navigation.
//!
//! Presets run from the widest view to the finest. Each pairs a coarse top
//! scale with a fine bottom scale.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::axis::{LabelFormat, TimeScale, TimeUnit};

/// Index of the preset used when nothing else is chosen ("Quarter")
pub const DEFAULT_ZOOM_INDEX: usize = 2;

/// Invalid zoom preset definition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ZoomError {
    #[error("Zoom preset '{label}' needs exactly two scales, found {found}")]
    ScaleCount { label: String, found: usize },

    #[error("Zoom preset '{label}' has a zero step")]
    ZeroStep { label: String },

    #[error("No zoom presets defined")]
    Empty,

    #[error("Unknown zoom preset: {0}")]
    UnknownPreset(String),
}

/// A named pair of axis scales
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomPreset {
    pub label: String,
    /// Coarse scale first, then fine
    pub scales: Vec<TimeScale>,
}

impl ZoomPreset {
    pub fn new(label: impl Into<String>, top: TimeScale, bottom: TimeScale) -> Self {
        Self {
            label: label.into(),
            scales: vec![top, bottom],
        }
    }

    pub fn validate(&self) -> Result<(), ZoomError> {
        if self.scales.len() != 2 {
            return Err(ZoomError::ScaleCount {
                label: self.label.clone(),
                found: self.scales.len(),
            });
        }
        if self.scales.iter().any(|s| s.step == 0) {
            return Err(ZoomError::ZeroStep {
                label: self.label.clone(),
            });
        }
        Ok(())
    }
}

/// Built-in presets, widest first
pub fn default_presets() -> Vec<ZoomPreset> {
    use LabelFormat::{DayOfMonth, Month, MonthYear, Year};
    vec![
        ZoomPreset::new(
            "5-year",
            TimeScale::new(TimeUnit::Year, 5, Year),
            TimeScale::new(TimeUnit::Year, 1, Year),
        ),
        ZoomPreset::new(
            "Year",
            TimeScale::new(TimeUnit::Year, 1, Year),
            TimeScale::new(TimeUnit::Month, 6, Month),
        ),
        ZoomPreset::new(
            "Quarter",
            TimeScale::new(TimeUnit::Year, 1, Year),
            TimeScale::new(TimeUnit::Month, 3, MonthYear),
        ),
        ZoomPreset::new(
            "Month",
            TimeScale::new(TimeUnit::Month, 1, MonthYear),
            TimeScale::new(TimeUnit::Day, 7, DayOfMonth),
        ),
    ]
}

/// Current position in a preset list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoomLevel {
    presets: Vec<ZoomPreset>,
    index: usize,
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self {
            presets: default_presets(),
            index: DEFAULT_ZOOM_INDEX,
        }
    }
}

impl ZoomLevel {
    /// Navigate a custom preset list, starting at the default index (clamped)
    pub fn with_presets(presets: Vec<ZoomPreset>) -> Result<Self, ZoomError> {
        if presets.is_empty() {
            return Err(ZoomError::Empty);
        }
        for preset in &presets {
            preset.validate()?;
        }
        let index = DEFAULT_ZOOM_INDEX.min(presets.len() - 1);
        Ok(Self { presets, index })
    }

    pub fn presets(&self) -> &[ZoomPreset] {
        &self.presets
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &ZoomPreset {
        &self.presets[self.index]
    }

    /// Jump to `index`, clamped to the preset range
    pub fn set(&mut self, index: usize) {
        self.index = index.min(self.presets.len() - 1);
    }

    /// One step finer, stopping at the last preset
    pub fn zoom_in(&mut self) {
        self.set(self.index.saturating_add(1));
    }

    /// One step wider, stopping at the first preset
    pub fn zoom_out(&mut self) {
        self.set(self.index.saturating_sub(1));
    }

    /// Find a preset by label, ignoring case
    pub fn position(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        self.presets
            .iter()
            .position(|p| p.label.eq_ignore_ascii_case(label))
    }

    /// Jump to the preset with `label`
    pub fn select(&mut self, label: &str) -> Result<(), ZoomError> {
        let index = self
            .position(label)
            .ok_or_else(|| ZoomError::UnknownPreset(label.to_string()))?;
        self.index = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_presets_widest_first() {
        let labels: Vec<_> = default_presets().into_iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["5-year", "Year", "Quarter", "Month"]);
        for preset in default_presets() {
            assert_eq!(preset.validate(), Ok(()));
        }
    }

    #[test]
    fn default_level_is_quarter() {
        let level = ZoomLevel::default();
        assert_eq!(level.index(), 2);
        assert_eq!(level.current().label, "Quarter");
        assert_eq!(level.current().scales[1].format, LabelFormat::MonthYear);
    }

    #[test]
    fn zoom_clamps_at_both_ends() {
        let mut level = ZoomLevel::default();
        level.zoom_in();
        level.zoom_in();
        level.zoom_in();
        assert_eq!(level.current().label, "Month");

        for _ in 0..10 {
            level.zoom_out();
        }
        assert_eq!(level.current().label, "5-year");

        level.set(99);
        assert_eq!(level.index(), 3);
    }

    #[test]
    fn select_by_label_ignores_case() {
        let mut level = ZoomLevel::default();
        level.select("year").unwrap();
        assert_eq!(level.index(), 1);
        level.select(" MONTH ").unwrap();
        assert_eq!(level.index(), 3);
        assert_eq!(
            level.select("decade"),
            Err(ZoomError::UnknownPreset("decade".into()))
        );
        assert_eq!(level.index(), 3);
    }

    #[test]
    fn custom_presets_are_validated() {
        let one_scale = ZoomPreset {
            label: "Flat".into(),
            scales: vec![TimeScale::new(TimeUnit::Year, 1, LabelFormat::Year)],
        };
        assert_eq!(
            ZoomLevel::with_presets(vec![one_scale]),
            Err(ZoomError::ScaleCount {
                label: "Flat".into(),
                found: 1
            })
        );

        let zero = ZoomPreset::new(
            "Zero",
            TimeScale::new(TimeUnit::Year, 0, LabelFormat::Year),
            TimeScale::new(TimeUnit::Month, 1, LabelFormat::Month),
        );
        assert_eq!(
            ZoomLevel::with_presets(vec![zero]),
            Err(ZoomError::ZeroStep {
                label: "Zero".into()
            })
        );
        assert_eq!(ZoomLevel::with_presets(Vec::new()), Err(ZoomError::Empty));
    }

    #[test]
    fn short_custom_list_clamps_default_index() {
        let presets = default_presets().into_iter().take(2).collect();
        let level = ZoomLevel::with_presets(presets).unwrap();
        assert_eq!(level.current().label, "Year");
    }

    #[test]
    fn presets_deserialize_from_patterns() {
        let json = r#"{"label": "Half", "scales": [
            {"unit": "year", "step": 1, "format": "%Y"},
            {"unit": "month", "step": 6, "format": "%M"}
        ]}"#;
        let preset: ZoomPreset = serde_json::from_str(json).unwrap();
        assert_eq!(preset, default_presets()[1].clone().relabel("Half"));
    }

    impl ZoomPreset {
        fn relabel(mut self, label: &str) -> Self {
            self.label = label.into();
            self
        }
    }
}
