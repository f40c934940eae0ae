//! Row normalization: projects a source row onto the canonical fields.

use std::collections::HashMap;

use assetline_core::{CanonicalField, FieldMap, RawAssetRecord};
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Decoded spreadsheet contents: ordered headers plus rows keyed by header
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSet {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<HashMap<String, String>>,
}

impl RowSet {
    /// Parse a JSON document of the form `{"headers": [...], "rows": [{...}]}`
    pub fn from_json(input: &str) -> Result<Self, ParseError> {
        serde_json::from_str(input).map_err(|e| ParseError::InvalidRowSet(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Project a row onto the canonical fields.
///
/// Values are trimmed; unresolved fields and missing cells become empty.
pub fn to_raw_asset(row: &HashMap<String, String>, field_map: &FieldMap) -> RawAssetRecord {
    CanonicalField::ALL
        .into_iter()
        .fold(RawAssetRecord::default(), |record, field| {
            let header = field_map.get(field);
            let value = if header.is_empty() {
                ""
            } else {
                row.get(header).map_or("", |v| v.trim())
            };
            record.with(field, value)
        })
}
