//! # assetline-parser
//!
//! Turns decoded spreadsheet rows into parsed asset records.
//!
//! This crate provides:
//! - Multilingual header resolution (EN, FR, IT, DE)
//! - Contract date and install base age parsers
//! - Row normalization onto canonical fields
//! - The hardware / active / end-date inclusion filter
//!
//! ## Example
//!
//! ```rust
//! use assetline_parser::{normalize_rows, filter_assets, RowSet};
//! use chrono::NaiveDate;
//!
//! let input = r#"{
//!     "headers": ["ASSET ID", "PRODUCT TYPE", "SERVICES STATUS", "CONTRACT END DATE"],
//!     "rows": [
//!         {"ASSET ID": "A1", "PRODUCT TYPE": "HARDWARE",
//!          "SERVICES STATUS": "Active", "CONTRACT END DATE": "July 23, 2026"}
//!     ]
//! }"#;
//!
//! let rows = RowSet::from_json(input).unwrap();
//! let (_, raws) = normalize_rows(&rows).unwrap();
//! let today = NaiveDate::from_ymd_opt(2025, 7, 23).unwrap();
//! let assets = filter_assets(&raws, today);
//!
//! assert_eq!(assets.len(), 1);
//! assert_eq!(assets[0].days_remaining, 365);
//! ```

pub mod dates;
pub mod filter;
pub mod headers;
pub mod locale;
pub mod records;

pub use dates::{parse_contract_date, parse_install_base_age, InstallAge};
pub use filter::{filter_assets, is_included, try_parse_asset, AssetFilter, Exclusion};
pub use headers::{resolve_headers, resolve_headers_with};
pub use locale::{LocaleExtension, LocaleTables};
pub use records::{to_raw_asset, RowSet};

use assetline_core::{FieldMap, RawAssetRecord};
use thiserror::Error;

/// Parsing error
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(
        "No recognised asset export headers found among {count} column(s). \
         Please check the file format."
    )]
    NoRecognisedHeaders { count: usize },

    #[error("Invalid row set: {0}")]
    InvalidRowSet(String),

    #[error("Invalid locale table: {0}")]
    InvalidLocaleTable(String),
}

/// Resolve headers and project every row (builtin tables)
pub fn normalize_rows(rows: &RowSet) -> Result<(FieldMap, Vec<RawAssetRecord>), ParseError> {
    normalize_rows_with(rows, LocaleTables::shared())
}

/// Resolve headers and project every row, preserving row order.
///
/// Fails only when no header matches any canonical field.
pub fn normalize_rows_with(
    rows: &RowSet,
    tables: &LocaleTables,
) -> Result<(FieldMap, Vec<RawAssetRecord>), ParseError> {
    let field_map = resolve_headers_with(rows.headers.as_slice(), tables)?;
    let raws = rows
        .rows
        .iter()
        .map(|row| to_raw_asset(row, &field_map))
        .collect();
    Ok((field_map, raws))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rejects_missing_headers() {
        let rows = RowSet::default();
        let err = normalize_rows(&rows).unwrap_err();
        assert!(matches!(err, ParseError::NoRecognisedHeaders { count: 0 }));
    }

    #[test]
    fn normalize_preserves_row_order() {
        let rows = RowSet::from_json(
            r#"{"headers": ["ID D'ACTIF"], "rows": [{"ID D'ACTIF": "B"}, {"ID D'ACTIF": "A"}]}"#,
        )
        .unwrap();
        let (map, raws) = normalize_rows(&rows).unwrap();
        assert_eq!(map.asset_id, "ID D'ACTIF");
        let ids: Vec<_> = raws.iter().map(|r| r.asset_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn error_messages_are_readable() {
        let err = ParseError::NoRecognisedHeaders { count: 3 };
        assert_eq!(
            err.to_string(),
            "No recognised asset export headers found among 3 column(s). \
             Please check the file format."
        );
    }
}
