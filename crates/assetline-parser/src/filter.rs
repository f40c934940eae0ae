//! Inclusion filtering and asset parsing.
//!
//! A row is admitted only when all three hold:
//!  - the product type is hardware (any supported language)
//!  - the services status is active (any supported language)
//!  - a contract end date, or failing that an end of standard support date, parses
//!
//! Admission and parsing are a single step: [`AssetFilter::parse`] either
//! yields a [`ParsedAssetRecord`] or the reason the row was excluded.

use assetline_core::{ParsedAssetRecord, RawAssetRecord};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::dates::{parse_contract_date, parse_install_base_age};
use crate::locale::LocaleTables;

/// Why a row was left out of the timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Exclusion {
    #[error("product type is not hardware")]
    NotHardware,

    #[error("services status is not active")]
    Inactive,

    #[error("no parseable contract end or end of standard support date")]
    NoEndDate,
}

/// Contract end, falling back to end of standard support
pub fn resolve_contract_end(raw: &RawAssetRecord) -> Option<NaiveDate> {
    parse_contract_date(&raw.contract_end_date)
        .or_else(|| parse_contract_date(&raw.end_of_standard_support))
}

/// Admits and parses raw records against a reference date
#[derive(Clone, Copy, Debug)]
pub struct AssetFilter<'a> {
    tables: &'a LocaleTables,
    today: NaiveDate,
}

impl AssetFilter<'static> {
    /// Filter using the builtin locale tables
    pub fn new(today: NaiveDate) -> Self {
        Self {
            tables: LocaleTables::shared(),
            today,
        }
    }
}

impl<'a> AssetFilter<'a> {
    /// Filter using custom locale tables
    pub fn with_tables(today: NaiveDate, tables: &'a LocaleTables) -> Self {
        Self { tables, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Run the three admission checks, returning the contract end on success
    pub fn check(&self, raw: &RawAssetRecord) -> Result<NaiveDate, Exclusion> {
        if !self.tables.is_hardware(&raw.product_type) {
            return Err(Exclusion::NotHardware);
        }
        if !self.tables.is_active(&raw.services_status) {
            return Err(Exclusion::Inactive);
        }
        resolve_contract_end(raw).ok_or(Exclusion::NoEndDate)
    }

    pub fn is_included(&self, raw: &RawAssetRecord) -> bool {
        self.check(raw).is_ok()
    }

    /// Admit and parse a record in one step.
    ///
    /// The install date comes from the install base age, falling back to the
    /// contract end itself; days remaining are whole days from `today`.
    pub fn parse(&self, raw: &RawAssetRecord) -> Result<ParsedAssetRecord, Exclusion> {
        let contract_end = self.check(raw)?;
        let install_date =
            parse_install_base_age(&raw.install_base_age, self.today).unwrap_or(contract_end);
        let days_remaining = (contract_end - self.today).num_days();

        Ok(ParsedAssetRecord {
            asset_id: raw.asset_id.clone(),
            product_name: raw.product_name.clone(),
            location_id: raw.location_id.clone(),
            location_name: raw.location_name.clone(),
            city: raw.city.clone(),
            country: raw.country.clone(),
            install_date,
            contract_end,
            days_remaining,
        })
    }

    /// Parse every admitted record, preserving input order
    pub fn filter(&self, raws: &[RawAssetRecord]) -> Vec<ParsedAssetRecord> {
        let parsed: Vec<ParsedAssetRecord> = raws
            .iter()
            .filter_map(|raw| self.parse(raw).ok())
            .collect();

        info!(
            rows = raws.len(),
            matched = parsed.len(),
            "filtered asset rows"
        );
        parsed
    }
}

/// Whether a record passes the inclusion filter (builtin tables)
pub fn is_included(raw: &RawAssetRecord) -> bool {
    AssetFilter::new(NaiveDate::MIN).is_included(raw)
}

/// Admit and parse a record against `today` (builtin tables)
pub fn try_parse_asset(raw: &RawAssetRecord, today: NaiveDate) -> Option<ParsedAssetRecord> {
    AssetFilter::new(today).parse(raw).ok()
}

/// Filter and parse a batch of records (builtin tables)
pub fn filter_assets(raws: &[RawAssetRecord], today: NaiveDate) -> Vec<ParsedAssetRecord> {
    AssetFilter::new(today).filter(raws)
}
