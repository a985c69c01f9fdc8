use chrono::{Datelike, NaiveDate};

use crate::error::RateError;

/// Format of the `inputDate` query parameter.
pub const INPUT_FORMAT: &str = "%d/%m/%Y";
/// Format SIE expects in the request path.
pub const SIE_FORMAT: &str = "%Y-%m-%d";

/// Month-to-date range, both ends formatted for SIE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

pub fn resolve_range(input: &str) -> Result<DateRange, RateError> {
    resolve_range_from(input, INPUT_FORMAT)
}

pub fn resolve_range_from(input: &str, input_format: &str) -> Result<DateRange, RateError> {
    let invalid = || RateError::InvalidDateFormat {
        input: input.to_string(),
        expected: input_format.to_string(),
    };

    let trimmed = input.trim();
    if !has_four_digit_year(trimmed, input_format) {
        return Err(invalid());
    }

    let date = NaiveDate::parse_from_str(trimmed, input_format).map_err(|_| invalid())?;
    let first = date.with_day(1).ok_or_else(invalid)?;

    Ok(DateRange {
        start: first.format(SIE_FORMAT).to_string(),
        end: date.format(SIE_FORMAT).to_string(),
    })
}

// chrono's `%Y` takes any digit count and a sign; a year at either end of the
// format must be exactly four digits next to its separator.
fn has_four_digit_year(input: &str, format: &str) -> bool {
    if let Some(prefix) = format.strip_suffix("%Y") {
        let rest = input.trim_end_matches(|c: char| c.is_ascii_digit());
        let digits = input.len() - rest.len();
        return digits == 4 && prefix.chars().last().map_or(rest.is_empty(), |sep| rest.ends_with(sep));
    }

    if let Some(suffix) = format.strip_prefix("%Y") {
        let rest = input.trim_start_matches(|c: char| c.is_ascii_digit());
        let digits = input.len() - rest.len();
        return digits == 4 && suffix.chars().next().map_or(rest.is_empty(), |sep| rest.starts_with(sep));
    }

    true
}
