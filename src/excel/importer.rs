//! Excel importer implementation - Excel (.xlsx) → workbook snapshot

use crate::error::{SheetDepsError, SheetDepsResult};
use crate::types::{Cell, Sheet, Workbook};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::Path;
use tracing::debug;

/// Reads every sheet's values and formula text from an .xlsx file
pub struct WorkbookImporter {
    path: std::path::PathBuf,
}

impl WorkbookImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the whole workbook, keeping sheet order
    pub fn import(&self) -> SheetDepsResult<Workbook> {
        let mut excel: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e| SheetDepsError::Import(format!("Failed to open Excel file: {}", e)))?;

        let mut workbook = Workbook::new();
        let sheet_names = excel.sheet_names().to_vec();

        for sheet_name in sheet_names {
            let values = excel.worksheet_range(&sheet_name).map_err(|e| {
                SheetDepsError::Import(format!("Failed to read sheet '{}': {}", sheet_name, e))
            })?;
            // Chart sheets and the like have no formula part
            let formulas = excel.worksheet_formula(&sheet_name).ok();

            let sheet = Self::build_sheet(&sheet_name, &values, formulas.as_ref());
            debug!(
                sheet = %sheet_name,
                cells = sheet.cell_count(),
                "imported sheet"
            );
            workbook.add_sheet(sheet);
        }

        Ok(workbook)
    }

    /// Merge the value and formula ranges into one sheet.
    /// calamine ranges start at the first used cell; coordinates are made absolute.
    fn build_sheet(name: &str, values: &Range<Data>, formulas: Option<&Range<String>>) -> Sheet {
        let mut sheet = Sheet::new(name);

        if let Some((row0, col0)) = values.start() {
            for (r, c, data) in values.cells() {
                let text = display_text(data);
                if !text.is_empty() {
                    sheet.set_cell(
                        row0 + r as u32 + 1,
                        col0 + c as u32 + 1,
                        Cell::value(text),
                    );
                }
            }
        }

        if let Some(formulas) = formulas {
            if let Some((row0, col0)) = formulas.start() {
                for (r, c, formula) in formulas.cells() {
                    if formula.is_empty() {
                        continue;
                    }
                    let row = row0 + r as u32 + 1;
                    let column = col0 + c as u32 + 1;
                    // Keep the cached value next to the formula
                    let mut cell = Cell::formula(formula.as_str());
                    cell.value = sheet.value(row, column).to_string();
                    sheet.set_cell(row, column, cell);
                }
            }
        }

        sheet
    }
}

/// Text representation of a cell value, as a header would be read
pub(crate) fn display_text(data: &Data) -> String {
    match data {
        Data::Empty | Data::Error(_) => String::new(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        other => other.to_string(),
    }
}
