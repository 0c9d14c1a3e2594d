//! Formatting of axis labels, values and timestamps for the dashboard.
//!
//! Dates arrive as ISO-like strings (`YYYY-MM` or `YYYY-MM-DD`) and are turned
//! into short Spanish labels. The formatters are total: malformed input is
//! returned unchanged instead of failing.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use num_format::Locale;
use num_format::ToFormattedString;

const MONTHS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

const DATE_SEPARATOR: char = '-';

const MAX_FRACTION_DIGITS: usize = 3;
const DECIMAL_SEPARATOR: char = ',';

/// Buenos Aires has no daylight saving time, a fixed offset is enough.
const BUENOS_AIRES_OFFSET_SECS: i32 = 3 * 3600;

/// The error type for month labels whose month part cannot be mapped
/// to an abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// The month part does not start with a number.
    InvalidMonth(String),

    /// The month number is outside of `1..=12`.
    MonthOutOfRange(i64),
}

impl Display for LabelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label_error = "label error:";

        match self {
            LabelError::InvalidMonth(month) => {
                write!(f, "{label_error} the month \"{month}\" is not a number")
            }
            LabelError::MonthOutOfRange(month) => {
                write!(f, "{label_error} the month {month} is out of range")
            }
        }
    }
}

impl Error for LabelError {}

/// Formats a monthly label, e.g. `"2024-03"` becomes `"Mar 24"`.
///
/// Inputs without a `-` separator, and inputs whose month cannot be mapped
/// to an abbreviation, are returned unchanged.
pub fn month_label(date: &str) -> String {
    try_month_label(date).unwrap_or_else(|_| date.to_owned())
}

/// Formats a monthly label, reporting months that cannot be mapped.
pub fn try_month_label(date: &str) -> Result<String, LabelError> {
    let parts: Vec<&str> = date.split(DATE_SEPARATOR).collect();

    if parts.len() < 2 {
        return Ok(date.to_owned());
    }

    let month = parse_leading_int(parts[1])
        .ok_or_else(|| LabelError::InvalidMonth(parts[1].to_owned()))?;

    let abbreviation = usize::try_from(month)
        .ok()
        .and_then(|month| month.checked_sub(1))
        .and_then(|idx| MONTHS.get(idx))
        .ok_or(LabelError::MonthOutOfRange(month))?;

    let year: String = parts[0].chars().skip(2).collect();

    Ok(format!("{abbreviation} {year}"))
}

/// Formats a daily label, e.g. `"2024-03-07"` becomes `"07/03"`.
///
/// Only inputs with exactly three `-` separated parts are formatted,
/// anything else is returned unchanged.
pub fn day_label(date: &str) -> String {
    let parts: Vec<&str> = date.split(DATE_SEPARATOR).collect();

    match parts.as_slice() {
        [_, month, day] => format!("{day}/{month}"),
        _ => date.to_owned(),
    }
}

/// Parses the leading integer of `value` the way a lenient number parser
/// would: leading whitespace and a sign are accepted, trailing garbage is
/// ignored.
fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    if end == 0 {
        return None;
    }

    let number: i64 = digits[..end].parse().ok()?;
    Some(if negative { -number } else { number })
}

/// Formats a number with `.` as the thousands separator and `,` as the
/// decimal separator, keeping at most three fraction digits.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }

    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}∞");
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let grouped = match integer.parse::<u64>() {
        Ok(integer) => integer.to_formatted_string(&Locale::es),
        Err(_) => integer.to_owned(),
    };

    let is_zero = grouped == "0" && fraction.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}{DECIMAL_SEPARATOR}{fraction}")
    }
}

/// Formats an API timestamp for display.
///
/// UTC timestamps (`...Z`) are shown in Buenos Aires time as
/// `dd/mm/YYYY HH:MM hs`, naive timestamps are shown as they are and plain
/// dates as `dd/mm/YYYY`. Values in any other shape are returned unchanged.
pub fn format_timestamp(value: &str) -> String {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return value.to_owned();
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.fZ") {
        let Some(offset) = FixedOffset::west_opt(BUENOS_AIRES_OFFSET_SECS) else {
            return value.to_owned();
        };

        let local: DateTime<FixedOffset> = naive.and_utc().with_timezone(&offset);
        return local.format("%d/%m/%Y %H:%M hs").to_string();
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%d/%m/%Y %H:%M hs").to_string();
    }

    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => value.to_owned(),
    }
}
