//! Spreadsheet date/time cell parsing.
//!
//! Sheets hand us a mix of serial numbers and display strings. A
//! serial greater than 1 is a day count from the conventional 1900
//! epoch; a serial in `[0, 1]` is a fraction of a day. Strings are
//! tried against the formats observed in real files, in a fixed order.
//! Everything here is pure; a parse that fails means the caller skips
//! the cell, never that an import aborts.

use chrono::{DateTime, Duration, NaiveDate};

use crate::errors::{DockError, DockResult};
use crate::models::cell::CellValue;

/// Fallback when an appointment-time cell is blank.
pub const DEFAULT_APPOINTMENT_TIME: &str = "09:00";

/// String formats accepted for calendar dates, tried in order.
const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y-%m-%d", "%m-%d-%Y"];

/// Converts a spreadsheet date serial to a calendar date.
///
/// Day counts start at the 1900 epoch; the two-day correction covers
/// the epoch itself and the phantom 1900 leap day. Serials of 1 or
/// less are not dates.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if serial <= 1.0 || !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1900, 1, 1)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64 - 2))
}

/// Parses a date display string, trying `MM/DD/YYYY`, `YYYY-MM-DD`,
/// and `MM-DD-YYYY` before falling back to generic timestamp forms.
pub fn parse_date_str(raw: &str) -> DockResult<NaiveDate> {
    let s = raw.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }

    // Generic fallbacks seen in exported sheets
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%B %d, %Y") {
        return Ok(date);
    }

    Err(DockError::ParseFailure(s.to_string()))
}

/// Parses any date-bearing cell.
pub fn parse_cell_date(cell: &CellValue) -> DockResult<NaiveDate> {
    match cell {
        CellValue::Blank => Err(DockError::ParseFailure("blank cell".to_string())),
        CellValue::Number(n) => {
            serial_to_date(*n).ok_or_else(|| DockError::ParseFailure(n.to_string()))
        }
        CellValue::Text(s) => parse_date_str(s),
    }
}

/// Canonical `MM/DD/YYYY` form used for comparison and matching.
pub fn format_date_us(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// `YYYY-MM-DD` form stored on schedule entries.
pub fn format_date_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Converts a time-of-day serial in `[0, 1]` to a 12-hour clock
/// string. Minutes are rounded, so `0.5` is exactly `"12:00 PM"` and
/// `0` is `"12:00 AM"`.
pub fn serial_to_clock_time(serial: f64) -> Option<String> {
    if !(0.0..=1.0).contains(&serial) {
        return None;
    }

    let total_minutes = (serial * 1440.0).round() as u32;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    let (display_hours, suffix) = match hours {
        0 => (12, "AM"),
        12 => (12, "PM"),
        h if h > 12 => (h - 12, "PM"),
        h => (h, "AM"),
    };

    Some(format!("{display_hours}:{minutes:02} {suffix}"))
}

/// Renders an appointment-time cell for display. Serials in `[0, 1]`
/// become 12-hour clock strings, other numbers and strings pass
/// through, blanks get the default.
pub fn cell_to_appointment_time(cell: &CellValue) -> String {
    match cell {
        CellValue::Number(n) => {
            serial_to_clock_time(*n).unwrap_or_else(|| n.to_string())
        }
        CellValue::Text(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => DEFAULT_APPOINTMENT_TIME.to_string(),
    }
}

/// Checks a 24-hour `HH:MM` check-in time.
pub fn is_clock_time(raw: &str) -> bool {
    let Some((hours, minutes)) = raw.trim().split_once(':') else {
        return false;
    };
    let valid_part = |part: &str, max: u32| {
        !part.is_empty()
            && part.len() <= 2
            && part.chars().all(|c| c.is_ascii_digit())
            && part.parse::<u32>().is_ok_and(|v| v < max)
    };
    valid_part(hours, 24) && valid_part(minutes, 60)
}
