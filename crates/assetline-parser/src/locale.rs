//! Multilingual lookup tables for asset exports.
//!
//! Supports EN, FR, IT and DE exports. Adding a language is a data change:
//! append aliases and values to the tables below, or supply them at runtime
//! through [`LocaleTables::extend`].

use std::sync::LazyLock;

use assetline_core::CanonicalField;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::ParseError;

/// Header aliases for each canonical field
pub const HEADER_ALIASES: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::AssetId,
        &["ASSET ID", "ID D'ACTIF", "ID D\u{2019}ACTIF", "ID ASSET", "ASSET-ID"],
    ),
    (
        CanonicalField::ProductName,
        &["PRODUCT NAME", "NOM DU PRODUIT", "NOME DEL PRODOTTO", "PRODUKTNAME"],
    ),
    (
        CanonicalField::ProductType,
        &["PRODUCT TYPE", "TYPE DE PRODUIT", "TIPO DI PRODOTTO", "PRODUKTTYP"],
    ),
    (
        CanonicalField::InstallBaseAge,
        &[
            "INSTALL BASE AGE",
            "ÂGE DE LA BASE D'INSTALLATION",
            "ÂGE DE LA BASE D\u{2019}INSTALLATION",
            "ETÀ BASE INSTALLATA",
            "ALTER DER INSTALLATIONSBASIS",
        ],
    ),
    (
        CanonicalField::LocationId,
        &[
            "LOCATION ID",
            "ID D'EMPLACEMENT",
            "ID D\u{2019}EMPLACEMENT",
            "ID POSIZIONE",
            "STANDORT-ID",
        ],
    ),
    (
        CanonicalField::LocationName,
        &[
            "LOCATION NAME",
            "NOM DE L'EMPLACEMENT",
            "NOM DE L\u{2019}EMPLACEMENT",
            "NOME POSIZIONE",
            "STANDORTNAME",
        ],
    ),
    (
        CanonicalField::ServicesStatus,
        &[
            "SERVICES STATUS",
            "STATUT DES SERVICES",
            "STATO DEI SERVIZI",
            "SERVICESTATUS",
        ],
    ),
    (
        CanonicalField::ContractEndDate,
        &[
            "CONTRACT END DATE",
            "DATE DE FIN DU CONTRAT",
            "DATA DI FINE CONTRATTO",
            "VERTRAGSENDE",
        ],
    ),
    (
        CanonicalField::EndOfStandardSupport,
        &[
            "END OF STANDARD SUPPORT",
            "FIN DU SUPPORT STANDARD",
            "FINE DEL SUPPORTO STANDARD",
            "ENDE DES STANDARDSUPPORTS",
        ],
    ),
    (CanonicalField::City, &["CITY", "VILLE", "CITTÀ", "STADT"]),
    (CanonicalField::Country, &["COUNTRY", "PAYS", "PAESE", "LAND"]),
];

/// Product type values that denote hardware
pub const HARDWARE_VALUES: &[&str] = &["HARDWARE", "MATÉRIEL", "MATERIALE"];

/// Services status values that denote an active contract
pub const ACTIVE_VALUES: &[&str] = &["Active", "Actif", "Attivo", "Aktiv"];

static BUILTIN: LazyLock<LocaleTables> = LazyLock::new(LocaleTables::builtin);

/// Runtime copy of the lookup tables, extendable from configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleTables {
    header_aliases: BTreeMap<CanonicalField, Vec<String>>,
    hardware_values: Vec<String>,
    active_values: Vec<String>,
}

/// Additional entries for [`LocaleTables`], keyed by canonical field name
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LocaleExtension {
    pub header_aliases: BTreeMap<String, Vec<String>>,
    pub hardware_values: Vec<String>,
    pub active_values: Vec<String>,
}

impl Default for LocaleTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LocaleTables {
    /// The EN/FR/IT/DE tables
    pub fn builtin() -> Self {
        Self {
            header_aliases: HEADER_ALIASES
                .iter()
                .map(|(field, aliases)| (*field, owned(aliases)))
                .collect(),
            hardware_values: owned(HARDWARE_VALUES),
            active_values: owned(ACTIVE_VALUES),
        }
    }

    /// Shared instance of the builtin tables
    pub fn shared() -> &'static LocaleTables {
        &BUILTIN
    }

    /// Append entries; existing entries are never removed
    pub fn extend(&mut self, extension: &LocaleExtension) -> Result<(), ParseError> {
        for (name, aliases) in &extension.header_aliases {
            let field = name
                .parse::<CanonicalField>()
                .map_err(|e| ParseError::InvalidLocaleTable(e.to_string()))?;
            let entry = self.header_aliases.entry(field).or_default();
            push_unique(entry, aliases);
        }
        push_unique(&mut self.hardware_values, &extension.hardware_values);
        push_unique(&mut self.active_values, &extension.active_values);
        Ok(())
    }

    /// Aliases for a canonical field
    pub fn aliases(&self, field: CanonicalField) -> &[String] {
        self.header_aliases
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn hardware_values(&self) -> &[String] {
        &self.hardware_values
    }

    pub fn active_values(&self) -> &[String] {
        &self.active_values
    }

    /// Whether a product type denotes hardware (case-insensitive)
    pub fn is_hardware(&self, product_type: &str) -> bool {
        let upper = product_type.to_uppercase();
        self.hardware_values
            .iter()
            .any(|v| v.to_uppercase() == upper)
    }

    /// Whether a services status denotes an active contract (case-insensitive)
    pub fn is_active(&self, services_status: &str) -> bool {
        let lower = services_status.to_lowercase();
        self.active_values.iter().any(|v| v.to_lowercase() == lower)
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn push_unique(target: &mut Vec<String>, values: &[String]) {
    for value in values {
        let value = value.trim();
        if !value.is_empty() && !target.iter().any(|v| v == value) {
            target.push(value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_has_aliases_in_four_locales() {
        let tables = LocaleTables::builtin();
        for field in CanonicalField::ALL {
            assert!(
                tables.aliases(field).len() >= 4,
                "{} should have at least four aliases",
                field
            );
        }
    }

    #[test]
    fn hardware_values_include_multilingual_variants() {
        assert!(HARDWARE_VALUES.contains(&"HARDWARE"));
        assert!(HARDWARE_VALUES.contains(&"MATÉRIEL"));

        let tables = LocaleTables::shared();
        assert!(tables.is_hardware("hardware"));
        assert!(tables.is_hardware("matériel"));
        assert!(tables.is_hardware("Materiale"));
        assert!(!tables.is_hardware("SOFTWARE"));
    }

    #[test]
    fn active_values_include_multilingual_variants() {
        for value in ["Active", "Actif", "Attivo", "Aktiv"] {
            assert!(ACTIVE_VALUES.contains(&value));
        }

        let tables = LocaleTables::shared();
        assert!(tables.is_active("ACTIVE"));
        assert!(tables.is_active("aktiv"));
        assert!(!tables.is_active("Ended"));
        assert!(!tables.is_active(""));
    }

    #[test]
    fn extension_appends_without_removing() {
        let mut tables = LocaleTables::builtin();
        let mut extension = LocaleExtension::default();
        extension
            .header_aliases
            .insert("assetId".into(), vec!["NÚMERO DE ACTIVO".into(), "ASSET ID".into()]);
        extension.hardware_values.push("HARDWARE ES".into());
        extension.active_values.push("Activo".into());

        tables.extend(&extension).unwrap();

        let aliases = tables.aliases(CanonicalField::AssetId);
        assert_eq!(aliases.len(), 6);
        assert_eq!(aliases.last().map(String::as_str), Some("NÚMERO DE ACTIVO"));
        assert!(tables.is_hardware("hardware es"));
        assert!(tables.is_hardware("HARDWARE"));
        assert!(tables.is_active("activo"));
    }

    #[test]
    fn extension_rejects_unknown_field() {
        let mut tables = LocaleTables::builtin();
        let mut extension = LocaleExtension::default();
        extension
            .header_aliases
            .insert("serialNumber".into(), vec!["SERIAL".into()]);

        let err = tables.extend(&extension).unwrap_err();
        assert!(matches!(err, ParseError::InvalidLocaleTable(_)));
    }
}
