//! Form input validation.
//!
//! Converts raw form fields (as collected by a web form or CLI flags)
//! into a `PatentInput`:
//! - ISO `YYYY-MM-DD` date parsing
//! - Empty fields treated as "not provided"
//! - Patent type validation

use chrono::NaiveDate;
use patentterm_model::{ParsePatentTypeError, PatentInput, PatentType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date format produced by HTML date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Invalid {field}: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error(transparent)]
    UnknownPatentType(#[from] ParsePatentTypeError),
}

/// Raw, unvalidated form state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatentForm {
    #[serde(default)]
    pub patent_type: String,

    #[serde(default)]
    pub filing_date: String,

    #[serde(default)]
    pub grant_date: String,

    #[serde(default)]
    pub has_domestic_benefit: bool,

    /// Earliest effective filing date
    #[serde(default)]
    pub eefd: String,

    #[serde(default)]
    pub has_terminal_disclaimer: bool,

    /// Expiration date of the reference patent
    #[serde(default)]
    pub td_expiration_date: String,
}

impl PatentForm {
    /// Validate the form and build a `PatentInput`.
    ///
    /// Missing filing or grant dates are passed through as `None`; the
    /// calculator reports them. Dates behind an unchecked flag are dropped
    /// without being parsed.
    pub fn into_input(self) -> Result<PatentInput, FormError> {
        let patent_type = if self.patent_type.trim().is_empty() {
            PatentType::default()
        } else {
            self.patent_type.parse()?
        };

        let earliest_effective_filing_date = if self.has_domestic_benefit {
            parse_optional_date("earliest effective filing date", &self.eefd)?
        } else {
            None
        };

        let terminal_disclaimer_date = if self.has_terminal_disclaimer {
            parse_optional_date("terminal disclaimer date", &self.td_expiration_date)?
        } else {
            None
        };

        Ok(PatentInput {
            patent_type,
            filing_date: parse_optional_date("filing date", &self.filing_date)?,
            grant_date: parse_optional_date("grant date", &self.grant_date)?,
            has_domestic_benefit: self.has_domestic_benefit,
            earliest_effective_filing_date,
            has_terminal_disclaimer: self.has_terminal_disclaimer,
            terminal_disclaimer_date,
        })
    }
}

/// Parse a `YYYY-MM-DD` date field.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| FormError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Parse a date field where an empty value means "not provided".
pub fn parse_optional_date(field: &'static str, value: &str) -> Result<Option<NaiveDate>, FormError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(field, value).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn utility_form() -> PatentForm {
        PatentForm {
            patent_type: "utility".to_string(),
            filing_date: "2010-06-01".to_string(),
            grant_date: "2012-06-01".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_basic_form() {
        let input = utility_form().into_input().unwrap();
        assert_eq!(
            input,
            PatentInput::new(PatentType::Utility, date(2010, 6, 1), date(2012, 6, 1))
        );
    }

    #[test]
    fn test_empty_dates_are_not_provided() {
        let form = PatentForm {
            grant_date: "  ".to_string(),
            ..utility_form()
        };
        let input = form.into_input().unwrap();
        assert_eq!(input.grant_date, None);
        assert_eq!(input.filing_date, Some(date(2010, 6, 1)));
    }

    #[test]
    fn test_blank_type_defaults_to_utility() {
        let form = PatentForm {
            patent_type: String::new(),
            ..utility_form()
        };
        assert_eq!(form.into_input().unwrap().patent_type, PatentType::Utility);
    }

    #[test]
    fn test_invalid_date() {
        let form = PatentForm {
            filing_date: "06/01/2010".to_string(),
            ..utility_form()
        };
        assert_eq!(
            form.into_input(),
            Err(FormError::InvalidDate {
                field: "filing date",
                value: "06/01/2010".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_patent_type() {
        let form = PatentForm {
            patent_type: "reissue".to_string(),
            ..utility_form()
        };
        assert!(matches!(form.into_input(), Err(FormError::UnknownPatentType(_))));
    }

    #[test]
    fn test_unchecked_flags_drop_dates() {
        let form = PatentForm {
            eefd: "not a date".to_string(),
            td_expiration_date: "2020-01-01".to_string(),
            ..utility_form()
        };
        let input = form.into_input().unwrap();
        assert_eq!(input.earliest_effective_filing_date, None);
        assert_eq!(input.terminal_disclaimer_date, None);
    }

    #[test]
    fn test_checked_flags_keep_dates() {
        let form = PatentForm {
            has_domestic_benefit: true,
            eefd: "2009-02-28".to_string(),
            has_terminal_disclaimer: true,
            td_expiration_date: "2027-02-14".to_string(),
            ..utility_form()
        };
        let input = form.into_input().unwrap();
        assert_eq!(input.earliest_effective_filing_date, Some(date(2009, 2, 28)));
        assert_eq!(input.terminal_disclaimer_date, Some(date(2027, 2, 14)));
    }

    #[test]
    fn test_form_from_json() {
        let form: PatentForm = serde_json::from_str(
            r#"{"patent_type": "design", "filing_date": "2016-03-01", "grant_date": "2018-03-01"}"#,
        )
        .unwrap();
        let input = form.into_input().unwrap();
        assert_eq!(input.patent_type, PatentType::Design);
        assert!(!input.has_domestic_benefit);
    }
}
