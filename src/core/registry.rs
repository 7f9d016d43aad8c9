//! Column registry: every non-empty header on an included sheet becomes a
//! column with a stable global index (sheet order, then column order).

use super::letters::position_to_letters;
use super::progress::{is_checkpoint, Progress, SHEET_CHECKPOINT};
use crate::config::AnalyzerConfig;
use crate::error::{SheetDepsError, SheetDepsResult};
use crate::types::Workbook;
use std::collections::HashMap;

/// A registered column, the unit of the dependency graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub sheet_name: String,
    /// Trimmed, non-empty header text
    pub header: String,
    /// 1-based position within the sheet
    pub position: u32,
    pub letter: String,
    /// `Sheet!Header`, display label only (may repeat)
    pub id: String,
}

impl Column {
    pub fn new(sheet_name: &str, header: &str, position: u32) -> Self {
        Self {
            sheet_name: sheet_name.to_string(),
            header: header.to_string(),
            position,
            letter: position_to_letters(position),
            id: format!("{}!{}", sheet_name, header),
        }
    }
}

/// Ordered columns plus the `(sheet, letter)` → index lookup
#[derive(Debug, Clone, Default)]
pub struct ColumnRegistry {
    columns: Vec<Column>,
    by_sheet_letter: HashMap<(String, String), usize>,
}

impl ColumnRegistry {
    /// Scan the header row of every included sheet
    ///
    /// Fails with [`SheetDepsError::NoHeaders`] when nothing gets registered.
    pub fn build(
        workbook: &Workbook,
        config: &AnalyzerConfig,
        progress: &dyn Progress,
    ) -> SheetDepsResult<Self> {
        let included: Vec<_> = workbook
            .sheets
            .iter()
            .filter(|sheet| config.includes_sheet(&sheet.name))
            .collect();

        progress.notify(&format!(
            "Included sheets: {} / {}",
            included.len(),
            workbook.sheets.len()
        ));

        let mut registry = Self::default();

        for (si, sheet) in included.iter().enumerate() {
            if is_checkpoint(si, SHEET_CHECKPOINT) {
                progress.notify(&format!(
                    "Inventorying columns... ({}/{})",
                    si + 1,
                    included.len()
                ));
            }

            for position in 1..=sheet.last_column() {
                let header = sheet.value(config.header_row, position).trim();
                if header.is_empty() {
                    continue;
                }
                registry.push(Column::new(&sheet.name, header, position));
            }
        }

        if registry.is_empty() {
            return Err(SheetDepsError::NoHeaders);
        }

        Ok(registry)
    }

    fn push(&mut self, column: Column) {
        let index = self.columns.len();
        self.by_sheet_letter
            .insert((column.sheet_name.clone(), column.letter.clone()), index);
        self.columns.push(column);
    }

    /// Global index of the column at `letter` on `sheet_name`
    pub fn lookup(&self, sheet_name: &str, letter: &str) -> Option<usize> {
        self.by_sheet_letter
            .get(&(sheet_name.to_string(), letter.to_string()))
            .copied()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Labels in registry order (`Sheet!Header`)
    pub fn labels(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.id.clone()).collect()
    }

    /// Indices of every column whose id equals `id`
    pub fn find_by_id(&self, id: &str) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.id == id)
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::progress::SilentProgress;
    use crate::types::Sheet;
    use pretty_assertions::assert_eq;

    fn build(workbook: &Workbook) -> SheetDepsResult<ColumnRegistry> {
        ColumnRegistry::build(workbook, &AnalyzerConfig::default(), &SilentProgress)
    }

    #[test]
    fn test_registry_order_and_letters() {
        let workbook = Workbook::new()
            .with_sheet(Sheet::from_rows("Sales", [vec!["ID", "Total"]]))
            .with_sheet(Sheet::from_rows("Tax", [vec!["Rate"]]));

        let registry = build(&workbook).unwrap();
        assert_eq!(
            registry.labels(),
            vec!["Sales!ID", "Sales!Total", "Tax!Rate"]
        );
        assert_eq!(registry.get(1).unwrap().letter, "B");
        assert_eq!(registry.get(2).unwrap().position, 1);
        assert_eq!(registry.lookup("Sales", "B"), Some(1));
        assert_eq!(registry.lookup("Tax", "A"), Some(2));
        assert_eq!(registry.lookup("Tax", "B"), None);
    }

    #[test]
    fn test_headers_are_trimmed_and_gaps_skipped() {
        let workbook = Workbook::new().with_sheet(Sheet::from_rows(
            "Costs",
            [vec!["  Item ", "", "   ", "Amount"], vec!["x", "y", "z", "1"]],
        ));

        let registry = build(&workbook).unwrap();
        assert_eq!(registry.labels(), vec!["Costs!Item", "Costs!Amount"]);
        assert_eq!(registry.lookup("Costs", "D"), Some(1));
        assert_eq!(registry.lookup("Costs", "B"), None);
        assert_eq!(registry.lookup("Costs", "C"), None);
    }

    #[test]
    fn test_excluded_sheets_are_not_registered() {
        let workbook = Workbook::new()
            .with_sheet(Sheet::from_rows("_helper", [vec!["H"]]))
            .with_sheet(Sheet::from_rows("vOld", [vec!["Old"]]))
            .with_sheet(Sheet::from_rows("Matrix", [vec!["", "Sales!ID"]]))
            .with_sheet(Sheet::from_rows("Sales", [vec!["ID"]]));

        let registry = build(&workbook).unwrap();
        assert_eq!(registry.labels(), vec!["Sales!ID"]);
        assert_eq!(registry.lookup("_helper", "A"), None);
        assert_eq!(registry.lookup("vOld", "A"), None);
    }

    #[test]
    fn test_duplicate_headers_are_kept_apart() {
        let workbook =
            Workbook::new().with_sheet(Sheet::from_rows("S", [vec!["Qty", "Qty"]]));

        let registry = build(&workbook).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.labels(), vec!["S!Qty", "S!Qty"]);
        assert_eq!(registry.find_by_id("S!Qty"), vec![0, 1]);
        assert_eq!(registry.lookup("S", "A"), Some(0));
        assert_eq!(registry.lookup("S", "B"), Some(1));
    }

    #[test]
    fn test_no_headers_is_fatal() {
        let workbook = Workbook::new()
            .with_sheet(Sheet::from_rows("Data", [vec![""], vec!["=1+1"]]))
            .with_sheet(Sheet::from_rows("_aux", [vec!["Header"]]));

        assert!(matches!(build(&workbook), Err(SheetDepsError::NoHeaders)));
    }

    #[test]
    fn test_empty_workbook_is_fatal() {
        assert!(matches!(
            build(&Workbook::new()),
            Err(SheetDepsError::NoHeaders)
        ));
    }

    #[test]
    fn test_custom_header_row() {
        let workbook = Workbook::new().with_sheet(Sheet::from_rows(
            "Report",
            [vec!["Title"], vec!["Region", "Value"]],
        ));
        let config = AnalyzerConfig {
            header_row: 2,
            data_start_row: 3,
            ..Default::default()
        };

        let registry = ColumnRegistry::build(&workbook, &config, &SilentProgress).unwrap();
        assert_eq!(registry.labels(), vec!["Report!Region", "Report!Value"]);
    }
}
