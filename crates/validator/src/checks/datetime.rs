//! Calendar date checks: the permissive `date` rule and the strict
//! `date_format` round trip.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::{self, Write as _};

/// Layouts accepted by the permissive `date` rule, tried in order after
/// RFC 3339. Date-time layouts come first so datetime inputs are not
/// misread as bare dates.
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// True when the input parses as a recognizable calendar date.
#[must_use]
pub(crate) fn is_date(input: &str) -> bool {
    DateTime::parse_from_rfc3339(input).is_ok()
        || DATETIME_LAYOUTS
            .iter()
            .any(|layout| NaiveDateTime::parse_from_str(input, layout).is_ok())
        || DATE_LAYOUTS
            .iter()
            .any(|layout| NaiveDate::parse_from_str(input, layout).is_ok())
}

/// True when the strftime format string itself is well-formed.
///
/// Checked at declaration time so evaluation never meets a bad format.
#[must_use]
pub(crate) fn is_well_formed_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Strict round-trip check: the input must parse under `format` AND
/// re-serializing under `format` must reproduce it byte-for-byte.
///
/// The round trip rejects inputs that merely *parse* — `"15/01/2024"`
/// against `%Y-%m-%d` fails, and so does `"2024-1-5"` (re-serializes as
/// `"2024-01-05"`).
#[must_use]
pub(crate) fn matches_format(input: &str, format: &str) -> bool {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(input, format) {
        return render(datetime.format(format)).is_some_and(|out| out == input);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, format) {
        return render(date.format(format)).is_some_and(|out| out == input);
    }
    if let Ok(time) = NaiveTime::parse_from_str(input, format) {
        return render(time.format(format)).is_some_and(|out| out == input);
    }
    false
}

/// Renders a `DelayedFormat` without the panic `to_string` would raise when
/// the format asks for fields the parsed value does not carry (e.g. `%H`
/// re-applied to a bare date).
fn render(formatted: impl fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{formatted}").ok()?;
    Some(out)
}
