//! Date handling for the API.
//!
//! Dates in the dataset are stored as `YYYY-MM-DD` text, so lexical order is
//! chronological order and every filter can compare strings directly.

use chrono::{Duration, NaiveDate};

use crate::error::{Result, SurfsUpError};

/// The only accepted textual date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the accepted textual date form.
const DATE_LEN: usize = 10;

/// Length of the trailing window used by the precipitation and tobs routes.
pub const WINDOW_DAYS: i64 = 365;

/// The most recent observation date of the reference Hawaii dataset.
pub fn default_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 8, 23).expect("2017-08-23 is a valid date")
}

/// Parse a `YYYY-MM-DD` date strictly.
///
/// chrono alone accepts unpadded fields and leading signs, so the shape is
/// checked byte by byte before the calendar check.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let invalid = || SurfsUpError::InvalidDate {
        input: input.to_string(),
    };

    let bytes = input.as_bytes();
    if bytes.len() != DATE_LEN {
        return Err(invalid());
    }

    let well_formed = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())
}

/// Render a date the way the dataset stores it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// First day of the trailing one-year window ending at `reference`.
pub fn one_year_before(reference: NaiveDate) -> NaiveDate {
    reference - Duration::days(WINDOW_DAYS)
}
