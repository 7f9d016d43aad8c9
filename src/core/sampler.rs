//! Representative formula per column: the topmost formula below the header.

use super::progress::{is_checkpoint, Progress, COLUMN_CHECKPOINT};
use super::registry::Column;
use crate::config::AnalyzerConfig;
use crate::types::{Sheet, Workbook};
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Formula marker every sampled formula starts with
pub const FORMULA_MARKER: char = '=';

/// Sample one formula per column, in registry order
///
/// The scan window is `data_start_row..=max(last_row, data_start_row)`, so an
/// apparently empty sheet is still probed at its first data row. Columns
/// without a formula yield `None`.
pub fn sample_formulas(
    workbook: &Workbook,
    columns: &[Column],
    config: &AnalyzerConfig,
    progress: &dyn Progress,
) -> Vec<Option<String>> {
    let sheets: HashMap<&str, &Sheet> = workbook
        .sheets
        .iter()
        .map(|sheet| (sheet.name.as_str(), sheet))
        .collect();

    columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            if is_checkpoint(idx, COLUMN_CHECKPOINT) {
                progress.notify(&format!(
                    "Extracting formulas... ({}/{})",
                    idx + 1,
                    columns.len()
                ));
            }
            sheets
                .get(column.sheet_name.as_str())
                .and_then(|sheet| first_formula(sheet, column.position, config.data_start_row))
        })
        .collect()
}

/// Rows scanned for a formula; never empty, even below the last used row
fn scan_rows(sheet: &Sheet, start_row: u32) -> RangeInclusive<u32> {
    start_row..=sheet.last_row().max(start_row)
}

/// First formula in `position`, scanning down from `start_row`
fn first_formula(sheet: &Sheet, position: u32, start_row: u32) -> Option<String> {
    scan_rows(sheet, start_row)
        .filter_map(|row| sheet.formula(row, position))
        .find(|formula| formula.starts_with(FORMULA_MARKER))
        .map(str::to_string)
}
