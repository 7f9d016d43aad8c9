//! Excel exporter implementation - dependency matrix → .xlsx

use crate::core::DependencyMatrix;
use crate::error::{SheetDepsError, SheetDepsResult};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};
use std::path::Path;

/// Width of the label column, in character units (~260 px)
const LABEL_COLUMN_WIDTH: f64 = 36.0;

/// Only the first few matrix columns are sized to their labels
const MAX_AUTOSIZED_COLUMNS: usize = 30;

/// Largest matrix that fits the 16,384-column sheet limit, label column included
const MAX_MATRIX_COLUMNS: usize = 16_383;

/// Writes a dependency matrix to a single worksheet
pub struct MatrixExporter<'a> {
    matrix: &'a DependencyMatrix,
    sheet_name: String,
}

impl<'a> MatrixExporter<'a> {
    /// Create a new exporter writing to the sheet `sheet_name`
    pub fn new(matrix: &'a DependencyMatrix, sheet_name: impl Into<String>) -> Self {
        Self {
            matrix,
            sheet_name: sheet_name.into(),
        }
    }

    /// Export the matrix to `output_path`, replacing any existing file
    pub fn export(&self, output_path: &Path) -> SheetDepsResult<()> {
        if self.matrix.len() > MAX_MATRIX_COLUMNS {
            return Err(SheetDepsError::Export(format!(
                "Matrix has {} columns; a worksheet holds at most {}",
                self.matrix.len(),
                MAX_MATRIX_COLUMNS
            )));
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&self.sheet_name)
            .map_err(|e| SheetDepsError::Export(format!("Failed to set worksheet name: {}", e)))?;

        self.write_grid(worksheet)?;
        self.layout(worksheet)?;

        workbook
            .save(output_path)
            .map_err(|e| SheetDepsError::Export(format!("Failed to save Excel file: {}", e)))?;

        Ok(())
    }

    /// Write labels and edge markers; empty cells are left unwritten
    fn write_grid(&self, worksheet: &mut Worksheet) -> SheetDepsResult<()> {
        let label_format = Format::new().set_bold();
        let edge_format = Format::new().set_align(FormatAlign::Center);

        for (row, cells) in self.matrix.to_grid().iter().enumerate() {
            for (col, text) in cells.iter().enumerate() {
                if text.is_empty() {
                    continue;
                }
                let format = if row == 0 || col == 0 {
                    &label_format
                } else {
                    &edge_format
                };
                worksheet
                    .write_string_with_format(row as u32, col as u16, text, format)
                    .map_err(|e| SheetDepsError::Export(format!("Failed to write cell: {}", e)))?;
            }
        }

        Ok(())
    }

    /// Freeze the label row and column, size the label columns
    fn layout(&self, worksheet: &mut Worksheet) -> SheetDepsResult<()> {
        worksheet
            .set_freeze_panes(1, 1)
            .map_err(|e| SheetDepsError::Export(format!("Failed to freeze panes: {}", e)))?;
        worksheet
            .set_column_width(0, LABEL_COLUMN_WIDTH)
            .map_err(|e| SheetDepsError::Export(format!("Failed to set column width: {}", e)))?;

        for (j, label) in self
            .matrix
            .labels()
            .iter()
            .take(MAX_AUTOSIZED_COLUMNS)
            .enumerate()
        {
            worksheet
                .set_column_width((j + 1) as u16, label_width(label))
                .map_err(|e| {
                    SheetDepsError::Export(format!("Failed to set column width: {}", e))
                })?;
        }

        Ok(())
    }
}

/// Column width that fits a label, capped so one long header cannot dominate
fn label_width(label: &str) -> f64 {
    (label.chars().count() as f64 + 2.0).clamp(4.0, 60.0)
}
