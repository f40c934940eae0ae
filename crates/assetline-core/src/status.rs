//! Contract Status Classification
//!
//! Buckets an asset's remaining coverage into four states and maps each to
//! the bar color used on the timeline.
//!
//! | Days remaining | Status |
//! |----------------|--------|
//! | `< 0` | Expired |
//! | `0..365` | Critical |
//! | `365..730` | Warning |
//! | `>= 730` | Ok |
//!
//! # Example
//!
//! ```rust
//! use assetline_core::status::ContractStatus;
//!
//! assert_eq!(ContractStatus::from_days_remaining(364), ContractStatus::Critical);
//! assert_eq!(ContractStatus::from_days_remaining(365), ContractStatus::Warning);
//! assert_eq!(ContractStatus::Ok.color(), "#7EC8E3");
//! ```

use serde::{Deserialize, Serialize};

/// Days of coverage below which a contract is critical
pub const CRITICAL_THRESHOLD_DAYS: i64 = 365;

/// Days of coverage below which a contract needs attention
pub const WARNING_THRESHOLD_DAYS: i64 = 730;

/// Coverage state of a service contract
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    /// Two years or more remaining
    Ok,
    /// One to two years remaining
    Warning,
    /// Less than a year remaining
    Critical,
    /// Contract end is in the past
    Expired,
}

impl ContractStatus {
    /// Every status, in legend order
    pub const ALL: [ContractStatus; 4] = [
        ContractStatus::Ok,
        ContractStatus::Warning,
        ContractStatus::Critical,
        ContractStatus::Expired,
    ];

    /// Classify a days-remaining value
    pub fn from_days_remaining(days_remaining: i64) -> Self {
        match days_remaining {
            d if d < 0 => ContractStatus::Expired,
            d if d < CRITICAL_THRESHOLD_DAYS => ContractStatus::Critical,
            d if d < WARNING_THRESHOLD_DAYS => ContractStatus::Warning,
            _ => ContractStatus::Ok,
        }
    }

    /// Hex bar color for this status
    pub fn color(&self) -> &'static str {
        match self {
            ContractStatus::Ok => "#7EC8E3",
            ContractStatus::Warning => "#0076CE",
            ContractStatus::Critical => "#003B6F",
            ContractStatus::Expired => "#9ca3af",
        }
    }

    /// Get the machine-readable name for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Ok => "ok",
            ContractStatus::Warning => "warning",
            ContractStatus::Critical => "critical",
            ContractStatus::Expired => "expired",
        }
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bar color derived purely from days remaining
pub fn contract_status_color(days_remaining: i64) -> &'static str {
    ContractStatus::from_days_remaining(days_remaining).color()
}

// ============================================================================
// Tests
// ============================================================================
