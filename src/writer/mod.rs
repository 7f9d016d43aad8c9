//! Matrix output: .xlsx sheet, CSV grid, or JSON document
//!
//! Output always replaces the target file as a whole. Nothing is written
//! until the analysis has finished.

use crate::core::DependencyMatrix;
use crate::error::{SheetDepsError, SheetDepsResult};
use crate::excel::MatrixExporter;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Xlsx,
    Csv,
    Json,
}

impl OutputFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> SheetDepsResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(SheetDepsError::Export(format!(
                "Cannot infer output format from '{}': use .xlsx, .csv or .json, or pass --format",
                path.display()
            ))),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// JSON layout of a rendered matrix
#[derive(Debug, Serialize)]
struct MatrixDocument<'a> {
    labels: &'a [String],
    edges: Vec<[usize; 2]>,
    matrix: &'a [Vec<bool>],
}

/// Write `matrix` to `path`. `sheet_name` only matters for .xlsx output.
pub fn write_matrix(
    matrix: &DependencyMatrix,
    path: &Path,
    format: OutputFormat,
    sheet_name: &str,
) -> SheetDepsResult<()> {
    match format {
        OutputFormat::Xlsx => MatrixExporter::new(matrix, sheet_name).export(path),
        OutputFormat::Csv => fs::write(path, render_csv(matrix)?).map_err(Into::into),
        OutputFormat::Json => fs::write(path, render_json(matrix)?).map_err(Into::into),
    }
}

/// The labeled grid as CSV
pub fn render_csv(matrix: &DependencyMatrix) -> SheetDepsResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in matrix.to_grid() {
        writer
            .write_record(&row)
            .map_err(|e| SheetDepsError::Export(format!("Failed to write CSV row: {}", e)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| SheetDepsError::Export(format!("Failed to flush CSV: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| SheetDepsError::Export(format!("CSV output is not UTF-8: {}", e)))
}

/// Labels, edge list and boolean rows as pretty JSON
pub fn render_json(matrix: &DependencyMatrix) -> SheetDepsResult<String> {
    let document = MatrixDocument {
        labels: matrix.labels(),
        edges: matrix.edges().into_iter().map(|(i, j)| [i, j]).collect(),
        matrix: matrix.rows(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
