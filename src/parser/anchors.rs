use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScheduleError;
use crate::grid::{CellValue, Grid};

/// Weekday labels as the source sheets write them, listing order =
/// calendar order. Sunday never appears in the day listing.
pub const WEEKDAYS: [&str; 6] = [
    "понедельник",
    "вторник",
    "среда",
    "четверг",
    "пятница",
    "суббота",
];

/// Week-block headers look like "03.11-08.11"; period headers like
/// "8.30-9.50" share the shape, which is what makes the column scan work.
static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+-\d+\.\d+").unwrap());

/// Structural anchors of one grid: where the day listing starts, how many
/// slot rows each weekday spans, and which columns open week blocks.
/// Computed once per grid and reused for every block in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchors {
    pub starting_row: usize,
    pub classes_amount: HashMap<&'static str, usize>,
    pub classes_columns: Vec<usize>,
}

impl Anchors {
    /// The row holding the week date-range headers, directly above the
    /// day listing.
    pub fn date_row(&self) -> usize {
        self.starting_row - 1
    }
}

/// Locate the day listing inside a grid.
pub fn detect(grid: &Grid) -> Result<Anchors, ScheduleError> {
    let anchor_err = |reason| ScheduleError::AnchorNotFound {
        file: grid.source().to_string(),
        reason,
    };

    let starting_row = find_starting_row(grid).ok_or_else(|| anchor_err("no weekday anchor row"))?;
    if starting_row == 0 {
        // The week headers live in the row above the listing.
        return Err(anchor_err("weekday anchor row has no header row above"));
    }

    let classes_columns = find_classes_columns(grid, starting_row);
    if classes_columns.is_empty() {
        return Err(anchor_err("no week-block columns in header row"));
    }

    Ok(Anchors {
        starting_row,
        classes_amount: calculate_classes_amount(grid, starting_row),
        classes_columns,
    })
}

/// Match a cell against the weekday table. Containment, not equality:
/// sheets decorate labels ("понедельник 03.11" etc).
pub fn as_weekday(text: &str) -> Option<&'static str> {
    let lower = text.trim().to_lowercase();
    WEEKDAYS.iter().find(|w| lower.contains(*w)).copied()
}

/// First row whose column-0 cell names the first weekday. The listing
/// always opens with Monday.
fn find_starting_row(grid: &Grid) -> Option<usize> {
    (0..grid.height()).find(|&row| match grid.cell(row, 0) {
        CellValue::Text(t) => t.trim().to_lowercase().contains(WEEKDAYS[0]),
        _ => false,
    })
}

/// Row span of each weekday group in column 0. The weekday cell opens its
/// group with count 1; blank spacer cells fold into the running count;
/// any other populated cell contributes nothing.
fn calculate_classes_amount(grid: &Grid, starting_row: usize) -> HashMap<&'static str, usize> {
    let mut amounts = HashMap::new();
    let mut current_day: Option<&'static str> = None;
    let mut count = 0usize;

    for row in starting_row..grid.height() {
        let cell = grid.cell(row, 0);

        if cell.is_blank() && current_day.is_some() {
            count += 1;
        }

        if let CellValue::Text(t) = cell {
            if let Some(weekday) = as_weekday(t) {
                if let Some(day) = current_day {
                    if count > 0 {
                        amounts.insert(day, count);
                    }
                }
                current_day = Some(weekday);
                count = 1; // the label row carries the first slot
            }
        }
    }

    if let Some(day) = current_day {
        amounts.insert(day, count);
    }
    amounts
}

/// Columns whose header-row cell matches the range pattern, ascending.
fn find_classes_columns(grid: &Grid, starting_row: usize) -> Vec<usize> {
    let header_row = starting_row - 1;
    (0..grid.width())
        .filter(|&col| RANGE_RE.is_match(&grid.cell(header_row, col).as_text()))
        .collect()
}

// ── Tests ──
