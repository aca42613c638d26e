use chrono::{Duration, NaiveDate};

use crate::error::ScheduleError;
use crate::grid::Grid;
use crate::schedule::{Class, Day};

use super::anchors::{Anchors, WEEKDAYS};

/// Slice a grid into `Day` records, one per (week block × weekday), dated
/// from the block start date plus a running offset. Sunday is absent from
/// the listing but still advances the calendar by one day after each block,
/// which is how the second block lands exactly a week after the first.
pub fn extract_days(
    grid: &Grid,
    anchors: &Anchors,
    year: i32,
) -> Result<Vec<Day>, ScheduleError> {
    let start_date = block_start_date(grid, anchors, year)?;
    let mut days = Vec::new();
    let mut days_processed: i64 = 0;

    for &week_col in &anchors.classes_columns {
        let mut row = anchors.starting_row;

        for name in WEEKDAYS {
            let count = anchors.classes_amount.get(name).copied().unwrap_or(0);
            let classes: Vec<Class> = (row..row + count)
                .map(|r| {
                    Class::new(
                        grid.cell(r, week_col).as_text(),
                        grid.cell(r, week_col + 1).as_text(),
                    )
                })
                .collect();

            days.push(Day {
                date: start_date + Duration::days(days_processed),
                classes,
                name: name.to_string(),
            });

            days_processed += 1;
            row += count;
        }

        days_processed += 1; // Sunday
    }

    Ok(days)
}

/// Week-block start date from the header cell above the first block
/// column: the text before the dash, spaces stripped, as day.month of
/// `year`. A malformed cell aborts the grid — every later offset hangs
/// off this date.
fn block_start_date(
    grid: &Grid,
    anchors: &Anchors,
    year: i32,
) -> Result<NaiveDate, ScheduleError> {
    let cell = grid
        .cell(anchors.date_row(), anchors.classes_columns[0])
        .as_text();
    let compact = cell.replace(' ', "");
    let day_month = compact.split('-').next().unwrap_or("");

    parse_day_month(day_month, year).ok_or_else(|| ScheduleError::DateParse {
        file: grid.source().to_string(),
        cell,
    })
}

fn parse_day_month(s: &str, year: i32) -> Option<NaiveDate> {
    let (day, month) = s.split_once('.')?;
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

// ── Tests ──
