pub mod anchors;
pub mod extract;
pub mod merge;

use chrono::Datelike;
use tracing::info;

use crate::error::ScheduleError;
use crate::grid::Grid;
use crate::schedule::Schedule;

/// One compose request: built with the loaded grids, run once, discarded.
/// Anchors are detected once per grid and reused for each of its week
/// blocks; nothing survives between requests.
pub struct ScheduleBuilder {
    grids: Vec<Grid>,
    year: i32,
}

impl ScheduleBuilder {
    pub fn new(grids: Vec<Grid>) -> Self {
        Self {
            grids,
            year: chrono::Local::now().year(),
        }
    }

    /// Override the year block start dates are resolved against.
    pub fn year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Detect → extract per grid, then merge across all sources. Any grid
    /// failing aborts the whole compose: a partial schedule silently
    /// missing a file's days is worse than a visible failure.
    pub fn compose(self) -> Result<Schedule, ScheduleError> {
        let mut all_days = Vec::new();

        for grid in &self.grids {
            let grid_anchors = anchors::detect(grid)?;
            let days = extract::extract_days(grid, &grid_anchors, self.year)?;
            info!(
                source = grid.source(),
                blocks = grid_anchors.classes_columns.len(),
                days = days.len(),
                "extracted"
            );
            all_days.extend(days);
        }

        let schedule = merge::merge_days(all_days);
        info!(days = schedule.len(), "schedule composed");
        Ok(schedule)
    }
}

// ── Tests ──


#[cfg(test)]
mod tests {
    use super::fixtures::{b, t, two_week_grid};
    use super::*;
    use chrono::NaiveDate;

    fn nov(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    #[test]
    fn composes_twelve_unique_days_from_two_blocks() {
        let schedule = ScheduleBuilder::new(vec![two_week_grid()])
            .year(2025)
            .compose()
            .unwrap();

        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule.all()[0].date, nov(3));
        assert_eq!(schedule.all()[11].date, nov(15));
        // Nov 9 is the Sunday between the blocks.
        assert!(schedule.for_date(nov(9)).is_none());
    }

    #[test]
    fn compose_is_idempotent() {
        let grids = vec![two_week_grid(), two_week_grid()];
        let once = ScheduleBuilder::new(grids.clone())
            .year(2025)
            .compose()
            .unwrap();
        let twice = ScheduleBuilder::new(grids).year(2025).compose().unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn overlapping_sources_merge_instead_of_overwriting() {
        // Same date range in both grids: identical non-empty slots
        // concatenate, so the overlap is visible rather than lost.
        let schedule = ScheduleBuilder::new(vec![two_week_grid(), two_week_grid()])
            .year(2025)
            .compose()
            .unwrap();

        assert_eq!(schedule.len(), 12);
        let monday = schedule.for_date(nov(3)).unwrap();
        assert_eq!(monday.slots[0], "101 - матан | 101 - матан");
    }

    #[test]
    fn malformed_grid_aborts_compose() {
        let bad = Grid::new(
            "revision",
            vec![
                vec![b(), b(), t("99.99-88.88")],
                vec![t("понедельник"), b(), t("матан"), t("101")],
            ],
        );
        let result = ScheduleBuilder::new(vec![two_week_grid(), bad])
            .year(2025)
            .compose();

        assert!(matches!(result, Err(ScheduleError::DateParse { .. })));
    }

    #[test]
    fn empty_input_composes_empty_schedule() {
        let schedule = ScheduleBuilder::new(Vec::new())
            .year(2025)
            .compose()
            .unwrap();
        assert!(schedule.is_empty());
    }
}
