//! Workbook loading: .xlsx/.xlsm through calamine, .yaml/.yml fixtures through serde_yaml

use crate::error::{SheetDepsError, SheetDepsResult};
use crate::excel::WorkbookImporter;
use crate::types::{Workbook, WorkbookFile};
use std::path::Path;

/// Load a workbook snapshot, picking the reader from the file extension
pub fn load_workbook(path: &Path) -> SheetDepsResult<Workbook> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xlsm" => WorkbookImporter::new(path).import(),
        "yaml" | "yml" => {
            let content = std::fs::read_to_string(path)?;
            parse_workbook_yaml(&content)
        }
        _ => Err(SheetDepsError::Parse(format!(
            "Unsupported workbook '{}': expected .xlsx, .xlsm, .yaml or .yml",
            path.display()
        ))),
    }
}

/// Parse a YAML workbook fixture
pub fn parse_workbook_yaml(content: &str) -> SheetDepsResult<Workbook> {
    let file: WorkbookFile = serde_yaml::from_str(content)?;
    Ok(Workbook::from(file))
}
