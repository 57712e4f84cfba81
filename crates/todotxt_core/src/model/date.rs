//! `YYYY-MM-DD` date tokens.
//!
//! Parse failures are local: the record turns them into an absent field.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

static DATE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date token regex"));

/// Date token that cannot become a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTokenError {
    /// Not shaped as `YYYY-MM-DD`.
    Malformed(String),
    /// Shaped correctly but names no calendar day, e.g. `2014-02-30`.
    OutOfRange(String),
}

impl Display for DateTokenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(token) => write!(f, "date token `{token}` is not YYYY-MM-DD"),
            Self::OutOfRange(token) => write!(f, "date token `{token}` is not a calendar day"),
        }
    }
}

impl Error for DateTokenError {}

/// Parses one `YYYY-MM-DD` token.
pub fn parse_date_token(token: &str) -> Result<NaiveDate, DateTokenError> {
    if !DATE_TOKEN_RE.is_match(token) {
        return Err(DateTokenError::Malformed(token.to_string()));
    }
    NaiveDate::parse_from_str(token, DATE_FORMAT)
        .map_err(|_| DateTokenError::OutOfRange(token.to_string()))
}

/// Formats a date as written in task lines.
pub fn format_date_token(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whether `date` fits the four-digit year of the text format.
pub fn is_writable(date: NaiveDate) -> bool {
    (0..=9999).contains(&date.year())
}
