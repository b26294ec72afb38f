//! Display formatting for bill dates and statuses

use crate::core::bill::BillStatus;
use crate::core::error::FormatError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Capitalized French month abbreviations, truncated to three characters
const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Parse a raw bill date into a calendar date
///
/// Accepts `YYYY-MM-DD`, naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps and
/// RFC 3339 timestamps. Only the date part is kept.
pub fn parse_bill_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|datetime| datetime.date())
}

/// Render a raw date as `"{day} {Mon}. {yy}"`, e.g. `"2022-01-01"` → `"1 Jan. 22"`
pub fn format_date(raw: &str) -> Result<String, FormatError> {
    let date = parse_bill_date(raw).ok_or_else(|| FormatError::InvalidDate {
        raw: raw.to_string(),
    })?;

    Ok(format!(
        "{} {}. {:02}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year().rem_euclid(100)
    ))
}

/// Map a status code to its label; unknown codes pass through unchanged
pub fn format_status(code: &str) -> String {
    match BillStatus::parse(code) {
        Some(status) => status.label().to_string(),
        None => code.to_string(),
    }
}
