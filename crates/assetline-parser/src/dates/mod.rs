//! Date parsers for asset export formats.
//!
//! Two informal grammars appear in exports:
//!  1. Contract dates: "July 23, 2026" / "February 04, 2026"
//!  2. Install base age: "4yr, 3mo, 1d", relative to a reference date
//!
//! Contract dates only recognise English month names, whatever the
//! language of the surrounding export.

use std::sync::LazyLock;

use assetline_core::calendar;
use chrono::NaiveDate;
use pest::Parser;
use pest_derive::Parser;
use regex::Regex;

#[derive(Parser)]
#[grammar = "dates/grammar.pest"]
struct ContractDateParser;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static YEARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*yr").expect("years pattern is valid"));
static MONTHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*mo").expect("months pattern is valid"));
static DAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*d").expect("days pattern is valid"));

// =============================================================================
// Contract Dates
// =============================================================================

/// Zero-based month index for an English month name (case-insensitive)
fn month_index(name: &str) -> Option<i64> {
    let lower = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|m| *m == lower)
        .and_then(|i| i64::try_from(i).ok())
}

/// Parse a date like "July 23, 2026" or "February 04, 2026".
///
/// Returns `None` for blank text, "Unavailable" (any case) and any other
/// shape, including ISO dates. A day past the end of the month rolls into
/// the next month.
pub fn parse_contract_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.to_lowercase() == "unavailable" {
        return None;
    }

    let date = ContractDateParser::parse(Rule::contract_date, trimmed)
        .ok()?
        .next()?;

    let mut month0 = None;
    let mut day = None;
    let mut year = None;
    for pair in date.into_inner() {
        match pair.as_rule() {
            Rule::month_name => month0 = month_index(pair.as_str()),
            Rule::day => day = pair.as_str().parse::<i64>().ok(),
            Rule::year => year = pair.as_str().parse::<i32>().ok(),
            _ => {}
        }
    }

    calendar::from_ymd_rolling(year?, month0?, day?)
}

// =============================================================================
// Install Base Age
// =============================================================================

/// An age expressed as independent year, month and day counts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstallAge {
    pub years: i64,
    pub months: i64,
    pub days: i64,
}

impl InstallAge {
    /// Extract the counts from text like "4yr, 3mo, 1d".
    ///
    /// Each unit is optional and located independently, so order does not
    /// matter. Returns `None` when every count is absent or zero.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let age = Self {
            years: unit_count(&YEARS, trimmed)?,
            months: unit_count(&MONTHS, trimmed)?,
            days: unit_count(&DAYS, trimmed)?,
        };

        if age.is_zero() {
            None
        } else {
            Some(age)
        }
    }

    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// The date this age points back to from `reference`.
    ///
    /// Years, then months, then days are subtracted in sequence, each step
    /// applying calendar rollover.
    pub fn before(&self, reference: NaiveDate) -> Option<NaiveDate> {
        let date = calendar::add_years(reference, -self.years)?;
        let date = calendar::add_months(date, -self.months)?;
        calendar::add_days(date, -self.days)
    }
}

/// First count for a unit; zero when the unit is missing, `None` on overflow
fn unit_count(pattern: &Regex, text: &str) -> Option<i64> {
    match pattern.captures(text) {
        Some(caps) => caps[1].parse().ok(),
        None => Some(0),
    }
}

/// Estimate an install date from an age string such as "4yr, 3mo, 1d".
///
/// Returns `None` for blank text or when every count is absent or zero.
pub fn parse_install_base_age(text: &str, reference: NaiveDate) -> Option<NaiveDate> {
    InstallAge::parse(text)?.before(reference)
}

// =============================================================================
// Tests
// =============================================================================
