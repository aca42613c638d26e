use std::fs;
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use tracing::info;

use crate::error::ScheduleError;
use crate::grid::{CellValue, Grid};

/// Read every .xlsx file in `dir` into a grid, in file-name order so that
/// merge conflicts concatenate the same way on every run. Any unreadable
/// file aborts the load: composing from a partial input set is worse than
/// failing visibly.
pub fn load_all(dir: &Path) -> Result<Vec<Grid>, ScheduleError> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
        })
        .collect();
    paths.sort();

    let mut grids = Vec::with_capacity(paths.len());
    for path in &paths {
        grids.push(load_one(path)?);
    }

    info!(count = grids.len(), dir = %dir.display(), "loaded schedule sources");
    Ok(grids)
}

/// First worksheet of one workbook. The sheets are header-less; every
/// cell maps straight into the grid.
fn load_one(path: &Path) -> Result<Grid, ScheduleError> {
    let source = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sheet")
        .to_string();
    let workbook_err = |message: String| ScheduleError::Workbook {
        file: source.clone(),
        message,
    };

    let mut workbook: Xlsx<std::io::BufReader<std::fs::File>> =
        open_workbook(path).map_err(|e: calamine::XlsxError| workbook_err(e.to_string()))?;
    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| workbook_err("workbook has no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| workbook_err(e.to_string()))?;

    Ok(Grid::new(source, expand_range(&range)))
}

/// Densify a calamine range into a table addressed from A1, so grid
/// coordinates line up with what the sheet displays. Calamine ranges
/// start at the first used cell, not at the sheet origin.
fn expand_range(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((row0, col0)) = range.start() else {
        return Vec::new();
    };
    let (row1, col1) = range.end().unwrap_or((row0, col0));

    let mut rows = vec![vec![CellValue::Blank; col1 as usize + 1]; row1 as usize + 1];
    for (r, row) in range.rows().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            rows[row0 as usize + r][col0 as usize + c] = convert(cell);
        }
    }
    rows
}

fn convert(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Blank,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

// ── Tests ──
