//! Header resolution: maps localized column headers to canonical fields.

use assetline_core::{CanonicalField, FieldMap};
use tracing::debug;

use crate::locale::LocaleTables;
use crate::ParseError;

/// Resolve source headers against the builtin EN/FR/IT/DE tables.
///
/// See [`resolve_headers_with`].
pub fn resolve_headers<S: AsRef<str>>(headers: &[S]) -> Result<FieldMap, ParseError> {
    resolve_headers_with(headers, LocaleTables::shared())
}

/// Resolve source headers to canonical fields.
///
/// Matching is exact after trimming and upper-casing both sides; the first
/// matching header in source order wins. The returned map holds the header
/// text as it appears in the source, and an empty string for fields with no
/// match. Fails when no field matches at all.
pub fn resolve_headers_with<S: AsRef<str>>(
    headers: &[S],
    tables: &LocaleTables,
) -> Result<FieldMap, ParseError> {
    let normalised: Vec<String> = headers
        .iter()
        .map(|h| h.as_ref().trim().to_uppercase())
        .collect();

    let mut field_map = FieldMap::default();

    for field in CanonicalField::ALL {
        let aliases: Vec<String> = tables
            .aliases(field)
            .iter()
            .map(|a| a.trim().to_uppercase())
            .collect();

        let found = headers
            .iter()
            .zip(&normalised)
            .find(|(_, h)| aliases.iter().any(|a| a == *h));

        if let Some((header, _)) = found {
            field_map.set(field, header.as_ref());
        }
    }

    let resolved = field_map.resolved_count();
    if resolved == 0 {
        return Err(ParseError::NoRecognisedHeaders {
            count: headers.len(),
        });
    }

    debug!(
        resolved,
        total = CanonicalField::ALL.len(),
        "resolved export headers"
    );
    Ok(field_map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::HEADER_ALIASES;

    #[test]
    fn resolves_english_headers() {
        let headers = [
            "ASSET ID",
            "PRODUCT NAME",
            "PRODUCT TYPE",
            "INSTALL BASE AGE",
            "LOCATION ID",
            "LOCATION NAME",
            "SERVICES STATUS",
            "CONTRACT END DATE",
            "END OF STANDARD SUPPORT",
            "CITY",
            "COUNTRY",
        ];
        let map = resolve_headers(&headers).unwrap();
        assert_eq!(map.asset_id, "ASSET ID");
        assert_eq!(map.product_name, "PRODUCT NAME");
        assert_eq!(map.contract_end_date, "CONTRACT END DATE");
        assert_eq!(map.city, "CITY");
        assert_eq!(map.resolved_count(), 11);
    }

    #[test]
    fn resolves_french_headers_with_typographic_apostrophe() {
        let headers = ["ID D\u{2019}ACTIF", "NOM DU PRODUIT"];
        let map = resolve_headers(&headers).unwrap();
        assert_eq!(map.asset_id, "ID D\u{2019}ACTIF");
        assert_eq!(map.product_name, "NOM DU PRODUIT");
    }

    #[test]
    fn keeps_literal_source_text() {
        let headers = ["  Asset Id ", "città"];
        let map = resolve_headers(&headers).unwrap();
        assert_eq!(map.asset_id, "  Asset Id ");
        assert_eq!(map.city, "città");
    }

    #[test]
    fn every_alias_resolves_its_field() {
        for (field, aliases) in HEADER_ALIASES {
            for alias in *aliases {
                let variants = [
                    alias.to_string(),
                    alias.to_lowercase(),
                    format!("  {}\t", alias),
                ];
                for header in variants {
                    let map = resolve_headers(&[header.as_str()]).unwrap();
                    assert_eq!(map.get(*field), header, "alias {:?} for {}", alias, field);
                }
            }
        }
    }

    #[test]
    fn first_matching_header_wins() {
        let headers = ["CITY", "VILLE"];
        let map = resolve_headers(&headers).unwrap();
        assert_eq!(map.city, "CITY");
    }

    #[test]
    fn missing_fields_are_empty() {
        let map = resolve_headers(&["ASSET ID"]).unwrap();
        assert_eq!(map.city, "");
        assert_eq!(map.country, "");
        assert_eq!(map.resolved_count(), 1);
    }

    #[test]
    fn no_partial_matching() {
        let result = resolve_headers(&["ASSET", "ASSET ID NUMBER", "PRODUCT"]);
        assert!(result.is_err());
    }

    #[test]
    fn fails_when_nothing_matches() {
        let err = resolve_headers(&["UNKNOWN_COL", "ANOTHER_COL"]).unwrap_err();
        assert!(matches!(err, ParseError::NoRecognisedHeaders { count: 2 }));
    }

    #[test]
    fn fails_on_empty_header_list() {
        let headers: [&str; 0] = [];
        assert!(resolve_headers(&headers).is_err());
    }
}
