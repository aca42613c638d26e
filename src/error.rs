use thiserror::Error;

/// Failures surfaced by the schedule pipeline. Every variant that concerns
/// a single source sheet carries its file label, since a compose request
/// spans several files and the caller needs to know which one broke.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The day listing could not be located inside a sheet.
    #[error("{file}: {reason}")]
    AnchorNotFound { file: String, reason: &'static str },

    /// The week-block start date cell did not parse as day.month.
    #[error("{file}: cannot parse block start date from {cell:?}")]
    DateParse { file: String, cell: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The xlsx container itself could not be opened or has no sheets.
    #[error("{file}: {message}")]
    Workbook { file: String, message: String },
}
