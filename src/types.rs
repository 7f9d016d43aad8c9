use serde::Deserialize;
use std::collections::HashMap;

//==============================================================================
// Workbook snapshot
//==============================================================================

/// A single cell as seen by the analyzer: its display text and, when the cell
/// is computed, the formula text (always stored with the leading `=`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub value: String,
    pub formula: Option<String>,
}

impl Cell {
    /// Plain value cell
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            formula: None,
        }
    }

    /// Formula cell. A missing `=` marker is restored.
    pub fn formula(formula: impl Into<String>) -> Self {
        let formula = formula.into();
        let formula = if formula.starts_with('=') {
            formula
        } else {
            format!("={}", formula)
        };
        Self {
            value: String::new(),
            formula: Some(formula),
        }
    }

    /// Build a cell from fixture text: `=...` is a formula, anything else a value
    pub fn from_text(text: &str) -> Self {
        if text.starts_with('=') {
            Self::formula(text)
        } else {
            Self::value(text)
        }
    }

    fn is_blank(&self) -> bool {
        self.value.is_empty() && self.formula.as_deref().map_or(true, str::is_empty)
    }
}

/// One worksheet. Cells are addressed with 1-based (row, column) coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    cells: HashMap<(u32, u32), Cell>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: HashMap::new(),
        }
    }

    /// Build a sheet from rows of fixture text, starting at A1
    pub fn from_rows<R, S>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sheet = Self::new(name);
        for (r, row) in rows.into_iter().enumerate() {
            for (c, text) in row.into_iter().enumerate() {
                let text = text.as_ref();
                if !text.is_empty() {
                    sheet.set_cell(r as u32 + 1, c as u32 + 1, Cell::from_text(text));
                }
            }
        }
        sheet
    }

    /// Set a cell; blank cells are not stored
    pub fn set_cell(&mut self, row: u32, column: u32, cell: Cell) {
        if cell.is_blank() {
            self.cells.remove(&(row, column));
        } else {
            self.cells.insert((row, column), cell);
        }
    }

    /// Last row holding a value or formula (0 for an empty sheet)
    pub fn last_row(&self) -> u32 {
        self.cells.keys().map(|&(r, _)| r).max().unwrap_or(0)
    }

    /// Last column holding a value or formula (0 for an empty sheet)
    pub fn last_column(&self) -> u32 {
        self.cells.keys().map(|&(_, c)| c).max().unwrap_or(0)
    }

    /// Display text of a cell, empty when the cell is absent
    pub fn value(&self, row: u32, column: u32) -> &str {
        self.cells
            .get(&(row, column))
            .map(|cell| cell.value.as_str())
            .unwrap_or("")
    }

    /// Formula text of a cell, if it holds one
    pub fn formula(&self, row: u32, column: u32) -> Option<&str> {
        self.cells
            .get(&(row, column))
            .and_then(|cell| cell.formula.as_deref())
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

/// Ordered collection of sheets, read once before any analysis starts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.add_sheet(sheet);
        self
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }
}

//==============================================================================
// YAML workbook fixtures
//==============================================================================

/// On-disk YAML layout:
///
/// ```yaml
/// sheets:
///   - name: Sales
///     rows:
///       - [ID, Total]
///       - [1, "=A2*2"]
/// ```
#[derive(Debug, Deserialize)]
pub struct WorkbookFile {
    #[serde(default)]
    pub sheets: Vec<SheetFile>,
}

#[derive(Debug, Deserialize)]
pub struct SheetFile {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<serde_yaml::Value>>,
}

impl From<WorkbookFile> for Workbook {
    fn from(file: WorkbookFile) -> Self {
        let mut workbook = Workbook::new();
        for sheet_file in file.sheets {
            let mut sheet = Sheet::new(sheet_file.name);
            for (r, row) in sheet_file.rows.iter().enumerate() {
                for (c, value) in row.iter().enumerate() {
                    let text = yaml_cell_text(value);
                    sheet.set_cell(r as u32 + 1, c as u32 + 1, Cell::from_text(&text));
                }
            }
            workbook.add_sheet(sheet);
        }
        workbook
    }
}

fn yaml_cell_text(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(true) => "TRUE".to_string(),
        serde_yaml::Value::Bool(false) => "FALSE".to_string(),
        _ => String::new(),
    }
}
