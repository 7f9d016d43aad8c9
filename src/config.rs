//! Analyzer configuration
//!
//! Defaults match a workbook whose headers live in row 1 and whose data starts
//! in row 2. Every field can be set from a YAML file:
//!
//! ```yaml
//! output_sheet: Matriz
//! skip_prefixes: ["_", "v", "V", "tmp"]
//! ```

use crate::error::{SheetDepsError, SheetDepsResult};
use serde::Deserialize;
use std::path::Path;

/// Sheet name the dependency matrix is written to
pub const DEFAULT_OUTPUT_SHEET: &str = "Matrix";

/// Sheets whose name starts with any of these are left out of the analysis
pub const DEFAULT_SKIP_PREFIXES: [&str; 3] = ["_", "v", "V"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// 1-based row holding the column headers
    pub header_row: u32,
    /// 1-based row where formula sampling starts
    pub data_start_row: u32,
    /// Output sheet name; a sheet with exactly this name is never analyzed
    pub output_sheet: String,
    /// Literal, case-sensitive sheet name prefixes to skip
    pub skip_prefixes: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            header_row: 1,
            data_start_row: 2,
            output_sheet: DEFAULT_OUTPUT_SHEET.to_string(),
            skip_prefixes: DEFAULT_SKIP_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a YAML file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> SheetDepsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SheetDepsError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the analyzer relies on
    pub fn validate(&self) -> SheetDepsResult<()> {
        if self.header_row == 0 {
            return Err(SheetDepsError::Config(
                "header_row is 1-based and must be at least 1".to_string(),
            ));
        }
        if self.data_start_row == 0 {
            return Err(SheetDepsError::Config(
                "data_start_row is 1-based and must be at least 1".to_string(),
            ));
        }
        if self.output_sheet.is_empty() {
            return Err(SheetDepsError::Config(
                "output_sheet must not be empty".to_string(),
            ));
        }
        // An empty prefix would match every sheet
        if self.skip_prefixes.iter().any(String::is_empty) {
            return Err(SheetDepsError::Config(
                "skip_prefixes must not contain an empty prefix".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a sheet takes part in the registry and as a resolution target
    pub fn includes_sheet(&self, name: &str) -> bool {
        if name == self.output_sheet {
            return false;
        }
        !self
            .skip_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }
}
