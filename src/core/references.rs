//! Lexical reference grammar
//!
//! Three patterns run independently over the raw formula text and their hits
//! are pooled:
//!
//! 1. whole-column ranges: `A:A`, `Sheet!$B:$B`
//! 2. bounded cell ranges: `A2:A1000`, `'My Sheet'!B2:B`
//! 3. single cells: `C7`, `Costs!$D$4`
//!
//! Each pattern accepts an optional sheet qualifier, either a bare identifier
//! or a single-quoted name. Only the qualifier and the leftmost column letters
//! are kept; rows are discarded. Matching does not tokenize the formula, so
//! text inside string literals is matched like any other text.

use crate::error::{SheetDepsError, SheetDepsResult};
use regex::{Captures, Regex};
use std::collections::BTreeSet;

const SHEET_QUALIFIER: &str = r"(?:(?:'([^']+)'|([A-Za-z0-9_]+))!)?";
const COLUMN_RANGE: &str = r"\$?([A-Z]{1,3})\s*:\s*\$?([A-Z]{1,3})";
const CELL_RANGE: &str = r"\$?([A-Z]{1,3})\$?[0-9]+\s*:\s*\$?([A-Z]{1,3})\$?[0-9]*";
const SINGLE_CELL: &str = r"\$?([A-Z]{1,3})\$?[0-9]+";

/// A column mentioned by a formula, with its sheet qualifier when present
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reference {
    pub sheet_name: Option<String>,
    pub letter: String,
}

impl Reference {
    pub fn new(sheet_name: Option<&str>, letter: &str) -> Self {
        Self {
            sheet_name: sheet_name.map(str::to_string),
            letter: letter.to_string(),
        }
    }

    /// Sheet this reference points at, given the sheet the formula lives on
    pub fn target_sheet<'a>(&'a self, home_sheet: &'a str) -> &'a str {
        self.sheet_name.as_deref().unwrap_or(home_sheet)
    }
}

/// The compiled reference patterns
#[derive(Debug, Clone)]
pub struct ReferenceGrammar {
    column_range: Regex,
    cell_range: Regex,
    single_cell: Regex,
}

impl ReferenceGrammar {
    pub fn new() -> SheetDepsResult<Self> {
        Ok(Self {
            column_range: compile(COLUMN_RANGE)?,
            cell_range: compile(CELL_RANGE)?,
            single_cell: compile(SINGLE_CELL)?,
        })
    }

    /// Every distinct reference in `formula`
    pub fn collect(&self, formula: &str) -> BTreeSet<Reference> {
        let mut refs = BTreeSet::new();
        for pattern in [&self.column_range, &self.cell_range, &self.single_cell] {
            refs.extend(pattern.captures_iter(formula).filter_map(to_reference));
        }
        refs
    }
}

fn compile(body: &str) -> SheetDepsResult<Regex> {
    Regex::new(&format!("{}{}", SHEET_QUALIFIER, body))
        .map_err(|e| SheetDepsError::Parse(format!("Regex error: {}", e)))
}

fn to_reference(caps: Captures<'_>) -> Option<Reference> {
    let sheet = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str());
    let letter = caps.get(3)?.as_str();
    Some(Reference::new(sheet, letter))
}
