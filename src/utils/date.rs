// src/utils/date.rs

//! Date parsing against user-supplied `strftime` patterns.

use chrono::format::{self, Item, Parsed, StrftimeItems};
use chrono::{DateTime, NaiveTime, ParseResult, Utc};

/// Whether `pattern` is a usable chrono format string.
pub fn is_valid_format(pattern: &str) -> bool {
    !pattern.trim().is_empty() && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Parse `text` with `pattern`.
///
/// Patterns without an offset are read as UTC, and date-only patterns as
/// midnight UTC.
pub fn parse_with_format(text: &str, pattern: &str) -> ParseResult<DateTime<Utc>> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, text, StrftimeItems::new(pattern))?;

    if let Ok(dt) = parsed.to_datetime() {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = parsed.to_naive_datetime_with_offset(0) {
        return Ok(naive.and_utc());
    }
    let date = parsed.to_naive_date()?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}
