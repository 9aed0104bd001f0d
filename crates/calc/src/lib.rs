//! Patent term calculation.
//!
//! Pure date arithmetic over a `PatentInput`:
//! - Statutory term selection (20-year, pre-GATT 17-year, design 14/15-year)
//! - Terminal disclaimer clamping
//! - Maintenance fee windows
//! - Countdown relative to an injected "today"

use chrono::{Datelike, NaiveDate};
use patentterm_model::{MaintenanceFeeWindow, PatentInput, PatentType, TermResult};
use thiserror::Error;
use tracing::debug;

/// Errors from term calculation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    #[error("Missing required input: {field}")]
    MissingInput { field: &'static str },

    #[error("Date out of range: {date} plus {years} years")]
    DateOutOfRange { date: NaiveDate, years: u32 },
}

/// One maintenance fee, as whole-year offsets from the grant date.
#[derive(Debug, Clone)]
pub struct FeeRule {
    pub label: &'static str,
    /// Years after grant when the payment window opens
    pub opens_after_years: u32,
    /// Years after grant when the grace period ends
    pub deadline_after_years: u32,
}

/// Statutory constants used by the calculator.
#[derive(Debug, Clone)]
pub struct TermRules {
    /// Applications filed on or after this date get a 20-year term (GATT / URAA)
    pub gatt_effective: NaiveDate,
    /// Design applications filed on or after this date get a 15-year term
    pub design_extension_effective: NaiveDate,
    pub utility_term_years: u32,
    pub pre_gatt_term_years: u32,
    pub design_term_years: u32,
    pub legacy_design_term_years: u32,
    pub maintenance_fees: Vec<FeeRule>,
}

impl Default for TermRules {
    fn default() -> Self {
        Self {
            gatt_effective: ymd(1995, 6, 8),
            design_extension_effective: ymd(2015, 5, 13),
            utility_term_years: 20,
            pre_gatt_term_years: 17,
            design_term_years: 15,
            legacy_design_term_years: 14,
            maintenance_fees: vec![
                FeeRule {
                    label: "First Fee (3.5 years)",
                    opens_after_years: 3,
                    deadline_after_years: 4,
                },
                FeeRule {
                    label: "Second Fee (7.5 years)",
                    opens_after_years: 7,
                    deadline_after_years: 8,
                },
                FeeRule {
                    label: "Third Fee (11.5 years)",
                    opens_after_years: 11,
                    deadline_after_years: 12,
                },
            ],
        }
    }
}

// Only called with the statutory constants above.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("invalid statutory date constant")
}

/// Add whole years to a date by incrementing the year component.
///
/// Month and day are kept. February 29 rolls over to March 1 when the
/// target year is not a leap year.
pub fn add_years(date: NaiveDate, years: u32) -> Result<NaiveDate, TermError> {
    let out_of_range = TermError::DateOutOfRange { date, years };
    let year = i32::try_from(years)
        .ok()
        .and_then(|y| date.year().checked_add(y))
        .ok_or_else(|| out_of_range.clone())?;

    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .ok_or(out_of_range)
}

/// Signed number of whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Calculate the patent term using the default statutory rules.
pub fn calculate(input: &PatentInput, today: NaiveDate) -> Result<TermResult, TermError> {
    calculate_with_rules(input, today, &TermRules::default())
}

/// Calculate the patent term with explicit rules.
pub fn calculate_with_rules(
    input: &PatentInput,
    today: NaiveDate,
    rules: &TermRules,
) -> Result<TermResult, TermError> {
    let filing_date = input
        .filing_date
        .ok_or(TermError::MissingInput { field: "filing date" })?;
    let grant_date = input
        .grant_date
        .ok_or(TermError::MissingInput { field: "grant date" })?;

    let (term_start, term_years, mut term_basis) = match input.patent_type {
        PatentType::Design => {
            let years = if filing_date >= rules.design_extension_effective {
                rules.design_term_years
            } else {
                rules.legacy_design_term_years
            };
            (
                grant_date,
                years,
                format!("{} years from grant date (design patent)", years),
            )
        }
        PatentType::Utility | PatentType::Plant if filing_date >= rules.gatt_effective => {
            let years = rules.utility_term_years;
            let start = input.effective_filing_date().unwrap_or(filing_date);
            let basis = if input.claimed_benefit_date().is_some() {
                format!("{} years from Earliest Effective Filing Date", years)
            } else {
                format!("{} years from filing date", years)
            };
            (start, years, basis)
        }
        PatentType::Utility | PatentType::Plant => {
            let years = rules.pre_gatt_term_years;
            (
                grant_date,
                years,
                format!("{} years from grant date (pre-GATT)", years),
            )
        }
    };

    let mut expiration_date = add_years(term_start, term_years)?;
    debug!(%expiration_date, basis = %term_basis, "statutory term computed");

    let mut limited_by_terminal_disclaimer = false;
    if let Some(td_date) = input.terminal_disclaimer_limit() {
        if td_date < expiration_date {
            debug!(from = %expiration_date, to = %td_date, "terminal disclaimer limits term");
            expiration_date = td_date;
            term_basis.push_str(" (limited by terminal disclaimer)");
            limited_by_terminal_disclaimer = true;
        }
    }

    let maintenance_fees = if input.patent_type.requires_maintenance_fees() {
        Some(maintenance_fee_windows(grant_date, rules)?)
    } else {
        None
    };

    let days_until_expiration = days_between(today, expiration_date);

    Ok(TermResult {
        expiration_date,
        term_basis,
        term_years,
        term_start,
        limited_by_terminal_disclaimer,
        maintenance_fees,
        days_until_expiration,
        years_until_expiration: days_to_years(days_until_expiration),
        is_expired: expiration_date < today,
    })
}

/// Build the maintenance fee windows for a grant date.
pub fn maintenance_fee_windows(
    grant_date: NaiveDate,
    rules: &TermRules,
) -> Result<Vec<MaintenanceFeeWindow>, TermError> {
    rules
        .maintenance_fees
        .iter()
        .map(|fee| {
            Ok(MaintenanceFeeWindow {
                label: fee.label.to_string(),
                window_start: add_years(grant_date, fee.opens_after_years)?,
                deadline: add_years(grant_date, fee.deadline_after_years)?,
            })
        })
        .collect()
}

/// Convert a day count to years (365.25-day years), rounded to one decimal.
fn days_to_years(days: i64) -> f64 {
    (days as f64 / 365.25 * 10.0).round() / 10.0
}
