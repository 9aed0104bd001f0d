//! Core domain model for patent term calculation.
//!
//! This crate defines the fundamental types used throughout the system:
//! - `PatentType`: Utility, Design, Plant
//! - `PatentInput`: The validated dates and flags for one calculation
//! - `MaintenanceFeeWindow`: A USPTO maintenance fee payment window
//! - `TermResult`: The computed expiration, basis and countdown

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of patent, which selects the statutory term rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatentType {
    /// Utility patent (35 U.S.C. 101)
    Utility,
    /// Ornamental design patent
    Design,
    /// Asexually reproduced plant patent
    Plant,
}

impl Default for PatentType {
    fn default() -> Self {
        Self::Utility
    }
}

impl PatentType {
    /// Whether maintenance fees apply to this kind of patent.
    ///
    /// Design patents are never subject to maintenance fees.
    pub fn requires_maintenance_fees(&self) -> bool {
        !matches!(self, Self::Design)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utility => "utility",
            Self::Design => "design",
            Self::Plant => "plant",
        }
    }
}

impl fmt::Display for PatentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown patent type: {0} (expected utility, design or plant)")]
pub struct ParsePatentTypeError(pub String);

impl FromStr for PatentType {
    type Err = ParsePatentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "utility" => Ok(Self::Utility),
            "design" => Ok(Self::Design),
            "plant" => Ok(Self::Plant),
            _ => Err(ParsePatentTypeError(s.to_string())),
        }
    }
}

/// Input for a single term calculation.
///
/// Filing and grant dates are optional here so that their absence is
/// reported by the calculator rather than defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatentInput {
    /// Kind of patent
    #[serde(default)]
    pub patent_type: PatentType,

    /// Actual filing date of this application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filing_date: Option<NaiveDate>,

    /// Grant (issue) date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grant_date: Option<NaiveDate>,

    /// Whether domestic benefit is claimed to an earlier application
    #[serde(default)]
    pub has_domestic_benefit: bool,

    /// Earliest effective filing date in the priority chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest_effective_filing_date: Option<NaiveDate>,

    /// Whether a terminal disclaimer was filed
    #[serde(default)]
    pub has_terminal_disclaimer: bool,

    /// Expiration date of the reference patent named in the terminal disclaimer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_disclaimer_date: Option<NaiveDate>,
}

impl PatentInput {
    pub fn new(patent_type: PatentType, filing_date: NaiveDate, grant_date: NaiveDate) -> Self {
        Self {
            patent_type,
            filing_date: Some(filing_date),
            grant_date: Some(grant_date),
            ..Default::default()
        }
    }

    pub fn with_domestic_benefit(mut self, eefd: NaiveDate) -> Self {
        self.has_domestic_benefit = true;
        self.earliest_effective_filing_date = Some(eefd);
        self
    }

    pub fn with_terminal_disclaimer(mut self, td_date: NaiveDate) -> Self {
        self.has_terminal_disclaimer = true;
        self.terminal_disclaimer_date = Some(td_date);
        self
    }

    /// The earliest effective filing date, if domestic benefit is claimed and a date given.
    pub fn claimed_benefit_date(&self) -> Option<NaiveDate> {
        if self.has_domestic_benefit {
            self.earliest_effective_filing_date
        } else {
            None
        }
    }

    /// The date the 20-year term clock runs from.
    pub fn effective_filing_date(&self) -> Option<NaiveDate> {
        self.claimed_benefit_date().or(self.filing_date)
    }

    /// The terminal disclaimer limit, if one was filed and a date given.
    pub fn terminal_disclaimer_limit(&self) -> Option<NaiveDate> {
        if self.has_terminal_disclaimer {
            self.terminal_disclaimer_date
        } else {
            None
        }
    }
}

/// A maintenance fee payment window, anchored to the grant date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceFeeWindow {
    /// Display label, e.g. "First Fee (3.5 years)"
    pub label: String,

    /// Start of the payment window
    pub window_start: NaiveDate,

    /// Last day of the surcharge grace period
    pub deadline: NaiveDate,
}

/// Result of a term calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermResult {
    pub expiration_date: NaiveDate,

    /// Human-readable rule that produced the expiration date
    pub term_basis: String,

    /// Statutory term length in years
    pub term_years: u32,

    /// Date the term was measured from (grant or effective filing date)
    pub term_start: NaiveDate,

    /// True when a terminal disclaimer shortened the term
    #[serde(default)]
    pub limited_by_terminal_disclaimer: bool,

    /// Fee windows; `None` for design patents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_fees: Option<Vec<MaintenanceFeeWindow>>,

    /// Whole days from today to expiration (negative once expired)
    pub days_until_expiration: i64,

    /// Days until expiration in years, rounded to one decimal
    pub years_until_expiration: f64,

    pub is_expired: bool,
}

impl TermResult {
    /// Fee windows worth showing: none once the patent has expired.
    pub fn visible_maintenance_fees(&self) -> &[MaintenanceFeeWindow] {
        match &self.maintenance_fees {
            Some(fees) if !self.is_expired => fees,
            _ => &[],
        }
    }
}
