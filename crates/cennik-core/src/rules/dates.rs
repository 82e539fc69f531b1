//! Promotion validity date-range extraction.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    // "2 października 2025 r. godz. 9:00 do dnia 3 listopada 2025 r."
    static ref RANGE_MONTH_NAME: Regex = Regex::new(
        r"(?si)(\d{1,2})\s+(\w+)\s+(\d{4}).*?do\s+dnia\s+(\d{1,2})\s+(\w+)\s+(\d{4})"
    ).unwrap();

    // "2.10 - 3.11.2025" or "2.10.2025 do 3.11.2025"
    static ref RANGE_NUMERIC: Regex = Regex::new(
        r"(\d{1,2})\.(\d{1,2})(?:\.(\d{4}))?\s*(?:-|–|—|do)\s*(\d{1,2})\.(\d{1,2})\.(\d{4})"
    ).unwrap();
}

/// An inclusive validity window, `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Locate a promotion validity range in the text.
///
/// The locale month-name form is tried first, then the purely numeric
/// `d.m ... d.m.yyyy` form. Only a pair with `from <= to` is accepted.
pub fn extract_date_range(text: &str) -> Option<DateRange> {
    if let Some(range) = match_month_name_range(text) {
        debug!(from = %range.from, to = %range.to, "date range via month names");
        return Some(range);
    }

    if let Some(range) = match_numeric_range(text) {
        debug!(from = %range.from, to = %range.to, "date range via numeric form");
        return Some(range);
    }

    None
}

fn match_month_name_range(text: &str) -> Option<DateRange> {
    let caps = RANGE_MONTH_NAME.captures(text)?;

    let from_day: u32 = caps[1].parse().ok()?;
    let from_month = polish_month_to_number(&caps[2]);
    let from_year: i32 = caps[3].parse().ok()?;
    let to_day: u32 = caps[4].parse().ok()?;
    let to_month = polish_month_to_number(&caps[5]);
    let to_year: i32 = caps[6].parse().ok()?;

    build_range(
        NaiveDate::from_ymd_opt(from_year, from_month, from_day)?,
        NaiveDate::from_ymd_opt(to_year, to_month, to_day)?,
    )
}

fn match_numeric_range(text: &str) -> Option<DateRange> {
    let caps = RANGE_NUMERIC.captures(text)?;

    let from_day: u32 = caps[1].parse().ok()?;
    let from_month: u32 = caps[2].parse().ok()?;
    let to_day: u32 = caps[4].parse().ok()?;
    let to_month: u32 = caps[5].parse().ok()?;
    let to_year: i32 = caps[6].parse().ok()?;

    // The start year is often elided when both ends share it
    let from_year: i32 = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => to_year,
    };

    build_range(
        NaiveDate::from_ymd_opt(from_year, from_month, from_day)?,
        NaiveDate::from_ymd_opt(to_year, to_month, to_day)?,
    )
}

fn build_range(from: NaiveDate, to: NaiveDate) -> Option<DateRange> {
    if from <= to {
        Some(DateRange { from, to })
    } else {
        None
    }
}

fn polish_month_to_number(month: &str) -> u32 {
    match month.to_lowercase().as_str() {
        "stycznia" => 1,
        "lutego" => 2,
        "marca" => 3,
        "kwietnia" => 4,
        "maja" => 5,
        "czerwca" => 6,
        "lipca" => 7,
        "sierpnia" => 8,
        "września" => 9,
        "października" => 10,
        "listopada" => 11,
        "grudnia" => 12,
        _ => 0,
    }
}
