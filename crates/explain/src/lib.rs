//! Presentation of term results.
//!
//! Converts a `TermResult` into human-readable text suitable for display
//! in the CLI or a web page. Nothing here performs term arithmetic; dates
//! are only formatted.

use chrono::NaiveDate;
use patentterm_model::{MaintenanceFeeWindow, PatentType, TermResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A display-ready summary of a term calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermReport {
    /// "Patent Has Expired" or "Patent Expiration Date"
    pub headline: String,

    /// Expiration date in long form
    pub expiration: String,

    pub term_basis: String,

    /// Remaining time, absent once expired
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_remaining: Option<String>,

    /// Fee schedule lines, empty when expired or for design patents
    pub fee_schedule: Vec<FeeLine>,
}

/// One maintenance fee, formatted for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeLine {
    pub label: String,
    pub window_opens: String,
    pub deadline: String,
}

/// A row of the quick reference table.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSummary {
    pub patent_type: PatentType,
    pub rule: &'static str,
    pub maintenance_fees: bool,
}

/// Format a date as e.g. "January 5, 2040".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format the remaining time as "<years> years (<days> days)".
pub fn format_time_remaining(result: &TermResult) -> String {
    format!(
        "{:.1} years ({} days)",
        result.years_until_expiration, result.days_until_expiration
    )
}

fn fee_line(fee: &MaintenanceFeeWindow) -> FeeLine {
    FeeLine {
        label: fee.label.clone(),
        window_opens: format_long_date(fee.window_start),
        deadline: format_long_date(fee.deadline),
    }
}

/// Build the display report for a result.
pub fn build_report(result: &TermResult) -> TermReport {
    let headline = if result.is_expired {
        "Patent Has Expired"
    } else {
        "Patent Expiration Date"
    };

    TermReport {
        headline: headline.to_string(),
        expiration: format_long_date(result.expiration_date),
        term_basis: result.term_basis.clone(),
        time_remaining: (!result.is_expired).then(|| format_time_remaining(result)),
        fee_schedule: result.visible_maintenance_fees().iter().map(fee_line).collect(),
    }
}

impl fmt::Display for TermReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.headline, self.expiration)?;
        writeln!(f, "Term Basis: {}", self.term_basis)?;
        if let Some(remaining) = &self.time_remaining {
            writeln!(f, "Time Remaining: {}", remaining)?;
        }

        if self.fee_schedule.is_empty() {
            return Ok(());
        }

        writeln!(f, "\nMaintenance Fee Schedule")?;
        writeln!(
            f,
            "Fees may be paid without surcharge during the 6-month window before each deadline."
        )?;
        for fee in &self.fee_schedule {
            writeln!(f, "\n  {}", fee.label)?;
            writeln!(f, "    Payment window opens {}", fee.window_opens)?;
            writeln!(f, "    Grace period deadline {}", fee.deadline)?;
        }
        writeln!(
            f,
            "\nMissing a maintenance fee deadline will cause the patent to expire prematurely."
        )
    }
}

/// Render a report as plain text.
pub fn render_text(report: &TermReport) -> String {
    report.to_string()
}

/// One-line summary of a result.
pub fn summarize_term(result: &TermResult) -> String {
    let when = format_long_date(result.expiration_date);
    if result.is_expired {
        format!("EXPIRED on {} ({})", when, result.term_basis)
    } else {
        format!(
            "IN FORCE until {} ({}, {} remaining)",
            when,
            result.term_basis,
            format_time_remaining(result)
        )
    }
}

/// Term rules at a glance.
pub fn quick_reference() -> Vec<RuleSummary> {
    vec![
        RuleSummary {
            patent_type: PatentType::Utility,
            rule: "20 years from the earliest effective filing date if filed on or after \
                   June 8, 1995; otherwise 17 years from grant (pre-GATT)",
            maintenance_fees: true,
        },
        RuleSummary {
            patent_type: PatentType::Design,
            rule: "15 years from grant if filed on or after May 13, 2015; \
                   otherwise 14 years from grant",
            maintenance_fees: false,
        },
        RuleSummary {
            patent_type: PatentType::Plant,
            rule: "20 years from the earliest effective filing date if filed on or after \
                   June 8, 1995; otherwise 17 years from grant (pre-GATT)",
            maintenance_fees: true,
        },
    ]
}

/// Render the quick reference as plain text.
pub fn render_guide() -> String {
    let rows: String = quick_reference()
        .iter()
        .map(|row| {
            let fees = if row.maintenance_fees {
                "maintenance fees due at 3.5, 7.5 and 11.5 years"
            } else {
                "no maintenance fees"
            };
            format!("\n{}: {}\n  ({})\n", row.patent_type, row.rule, fees)
        })
        .collect();

    format!(
        "Patent Term Quick Reference\n{}\n\
         A terminal disclaimer can only shorten the term, never extend it.\n\
         Estimates exclude patent term adjustment (PTA) and extension (PTE).\n",
        rows
    )
}
