//! Spreadsheet-matrix ingestion.
//!
//! The workbook reader is an external collaborator; this module only
//! ever sees a 2-D matrix of untyped cells, a chosen date column, and
//! a target date. Cells that fail to parse are skipped, never fatal.

use chrono::NaiveDate;

use crate::errors::{DockError, DockResult};
use crate::models::cell::CellValue;
use crate::models::entry::{NewScheduleEntry, ServiceKind};
use crate::models::location::Location;
use crate::timeparse;

/// Column M, where the export sheets keep the appointment date.
pub const DATE_COLUMN_DEFAULT: usize = 12;
/// Column N: appointment time.
const APPOINTMENT_COLUMN: usize = 13;
/// Column C: client reference (HBL).
const CLIENT_COLUMN: usize = 2;
/// Column D: container number.
const REFERENCE_COLUMN: usize = 3;
/// Column O: free-text note.
const NOTE_COLUMN: usize = 14;
/// Fallback scan stops after this many columns.
const DETECT_COLUMN_LIMIT: usize = 20;

static BLANK_CELL: CellValue = CellValue::Blank;

fn cell_at(row: &[CellValue], index: usize) -> &CellValue {
    row.get(index).unwrap_or(&BLANK_CELL)
}

/// Unique parseable dates in a column, ascending.
pub fn column_dates(matrix: &[Vec<CellValue>], column: usize) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = matrix
        .iter()
        .filter_map(|row| timeparse::parse_cell_date(cell_at(row, column)).ok())
        .collect();
    dates.sort();
    dates.dedup();
    dates
}

/// Picks the date column: column M when it holds any dates, otherwise
/// the first of the leading columns that does.
pub fn detect_date_column(matrix: &[Vec<CellValue>]) -> Option<usize> {
    if !column_dates(matrix, DATE_COLUMN_DEFAULT).is_empty() {
        return Some(DATE_COLUMN_DEFAULT);
    }

    let width = matrix.iter().map(Vec::len).max().unwrap_or(0);
    (0..width.min(DETECT_COLUMN_LIMIT))
        .filter(|&column| column != DATE_COLUMN_DEFAULT)
        .find(|&column| !column_dates(matrix, column).is_empty())
}

/// A matched sheet row; `row` is the 1-based row number, used for
/// fallback identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRow<'a> {
    pub row: usize,
    pub cells: &'a [CellValue],
}

fn cell_matches_date(cell: &CellValue, raw_target: &str, target_us: &str) -> bool {
    match cell {
        CellValue::Blank => false,
        CellValue::Text(s) => {
            s == raw_target || s.trim() == raw_target.trim() || {
                timeparse::parse_date_str(s)
                    .map(|date| timeparse::format_date_us(date) == target_us)
                    .unwrap_or(false)
            }
        }
        CellValue::Number(n) => {
            n.to_string() == raw_target.trim()
                || timeparse::serial_to_date(*n)
                    .map(|date| timeparse::format_date_us(date) == target_us)
                    .unwrap_or(false)
        }
    }
}

/// Rows whose date column matches the target: exact string match, or
/// an equal calendar date once both sides render to `MM/DD/YYYY`.
pub fn rows_matching_date<'a>(
    matrix: &'a [Vec<CellValue>],
    column: usize,
    raw_target: &str,
    target_us: &str,
) -> Vec<MatchedRow<'a>> {
    matrix
        .iter()
        .enumerate()
        .filter(|(_, row)| cell_matches_date(cell_at(row, column), raw_target, target_us))
        .map(|(index, row)| MatchedRow {
            row: index + 1,
            cells: row.as_slice(),
        })
        .collect()
}

/// Converts matched rows into bulk-create items using the export
/// sheet's column layout. Docks start empty and every entry lands in
/// the stage catch-all.
pub fn rows_to_entries(rows: &[MatchedRow<'_>], date_iso: &str) -> Vec<NewScheduleEntry> {
    rows.iter()
        .enumerate()
        .map(|(index, matched)| NewScheduleEntry {
            date: date_iso.to_string(),
            appointment_time: timeparse::cell_to_appointment_time(cell_at(
                matched.cells,
                APPOINTMENT_COLUMN,
            )),
            client: cell_at(matched.cells, CLIENT_COLUMN)
                .text()
                .unwrap_or_else(|| format!("HBL{}", matched.row)),
            reference: cell_at(matched.cells, REFERENCE_COLUMN)
                .text()
                .unwrap_or_else(|| format!("CNTR{}", matched.row)),
            note: cell_at(matched.cells, NOTE_COLUMN).text().unwrap_or_default(),
            kind: if index % 2 == 0 {
                ServiceKind::Cell
            } else {
                ServiceKind::Pack
            },
            location: Location::Stage,
        })
        .collect()
}

/// Full extraction: resolve the date column, match the target date,
/// and convert the matching rows. Returns the column used alongside
/// the entries.
pub fn extract_entries(
    matrix: &[Vec<CellValue>],
    date_column: Option<usize>,
    target_date: &str,
) -> DockResult<(usize, Vec<NewScheduleEntry>)> {
    let column = date_column.or_else(|| detect_date_column(matrix)).ok_or_else(|| {
        DockError::Validation("No date column found in the uploaded sheet".to_string())
    })?;

    let target = timeparse::parse_date_str(target_date)?;
    let target_us = timeparse::format_date_us(target);
    let date_iso = timeparse::format_date_iso(target);

    let rows = rows_matching_date(matrix, column, target_date, &target_us);
    Ok((column, rows_to_entries(&rows, &date_iso)))
}
