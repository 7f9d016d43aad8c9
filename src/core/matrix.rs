//! Dependency matrix: `depends_on(i, j)` is true when column i's representative
//! formula reads column j.

use super::progress::{is_checkpoint, Progress, COLUMN_CHECKPOINT};
use super::references::ReferenceGrammar;
use super::registry::ColumnRegistry;

/// Marker written into rendered cells that hold an edge
pub const EDGE_MARKER: &str = "X";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyMatrix {
    labels: Vec<String>,
    cells: Vec<Vec<bool>>,
}

impl DependencyMatrix {
    /// An edge-free matrix over `labels`
    pub fn new(labels: Vec<String>) -> Self {
        let n = labels.len();
        Self {
            labels,
            cells: vec![vec![false; n]; n],
        }
    }

    /// Resolve every sampled formula against the registry
    ///
    /// Unqualified references default to the formula's own sheet. References
    /// that miss the registry are dropped. The diagonal is cleared after each
    /// row, so a column never depends on itself.
    pub fn resolve(
        registry: &ColumnRegistry,
        formulas: &[Option<String>],
        grammar: &ReferenceGrammar,
        progress: &dyn Progress,
    ) -> Self {
        let mut matrix = Self::new(registry.labels());
        let n = registry.len();

        for (i, column) in registry.columns().iter().enumerate() {
            if is_checkpoint(i, COLUMN_CHECKPOINT) {
                progress.notify(&format!("Analyzing dependencies... ({}/{})", i + 1, n));
            }

            let Some(formula) = formulas.get(i).and_then(|f| f.as_deref()) else {
                continue;
            };

            for reference in grammar.collect(formula) {
                let target = reference.target_sheet(&column.sheet_name);
                if let Some(j) = registry.lookup(target, &reference.letter) {
                    matrix.cells[i][j] = true;
                }
            }

            matrix.cells[i][i] = false;
        }

        matrix
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Whether column `i` reads column `j`; out-of-range indices are false
    pub fn depends_on(&self, i: usize, j: usize) -> bool {
        self.cells
            .get(i)
            .and_then(|row| row.get(j))
            .copied()
            .unwrap_or(false)
    }

    /// Row-major boolean view
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.cells
    }

    /// Columns that column `i` reads
    pub fn dependencies_of(&self, i: usize) -> Vec<usize> {
        self.cells
            .get(i)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(_, edge)| **edge)
                    .map(|(j, _)| j)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Columns that read column `j`
    pub fn dependents_of(&self, j: usize) -> Vec<usize> {
        (0..self.len()).filter(|&i| self.depends_on(i, j)).collect()
    }

    /// All edges as `(i, j)` pairs in row-major order
    pub fn edges(&self) -> Vec<(usize, usize)> {
        (0..self.len())
            .flat_map(|i| self.dependencies_of(i).into_iter().map(move |j| (i, j)))
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&edge| edge).count())
            .sum()
    }

    /// (N+1)×(N+1) grid: labels across row 0 and down column 0, an empty
    /// corner, [`EDGE_MARKER`] where an edge exists and empty text elsewhere
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        let n = self.len();
        let mut grid = vec![vec![String::new(); n + 1]; n + 1];

        for (k, label) in self.labels.iter().enumerate() {
            grid[0][k + 1] = label.clone();
            grid[k + 1][0] = label.clone();
        }

        for (i, row) in self.cells.iter().enumerate() {
            for (j, &edge) in row.iter().enumerate() {
                if edge {
                    grid[i + 1][j + 1] = EDGE_MARKER.to_string();
                }
            }
        }

        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use crate::core::progress::SilentProgress;
    use crate::types::{Sheet, Workbook};
    use pretty_assertions::assert_eq;

    fn resolve(workbook: &Workbook, formulas: Vec<Option<&str>>) -> DependencyMatrix {
        let registry =
            ColumnRegistry::build(workbook, &AnalyzerConfig::default(), &SilentProgress)
                .unwrap();
        let formulas: Vec<Option<String>> = formulas
            .into_iter()
            .map(|f| f.map(str::to_string))
            .collect();
        let grammar = ReferenceGrammar::new().unwrap();
        DependencyMatrix::resolve(&registry, &formulas, &grammar, &SilentProgress)
    }

    fn two_sheets() -> Workbook {
        Workbook::new()
            .with_sheet(Sheet::from_rows("Costs", [vec!["Item", "Amount", "Total"]]))
            .with_sheet(Sheet::from_rows("Raw Data", [vec!["Key", "Value", "Price"]]))
    }

    #[test]
    fn test_same_sheet_default() {
        let matrix = resolve(
            &two_sheets(),
            vec![None, None, Some("=B2"), None, None, None],
        );
        assert!(matrix.depends_on(2, 1));
        // Raw Data also has a column B
        assert!(!matrix.depends_on(2, 4));
        assert_eq!(matrix.edge_count(), 1);
    }

    #[test]
    fn test_cross_sheet_quoted() {
        let matrix = resolve(
            &two_sheets(),
            vec![None, Some("='Raw Data'!C:C"), None, None, None, None],
        );
        assert_eq!(matrix.dependencies_of(1), vec![5]);
        assert_eq!(matrix.dependents_of(5), vec![1]);
    }

    #[test]
    fn test_unresolved_references_are_dropped() {
        let matrix = resolve(
            &two_sheets(),
            vec![
                Some("=Z2+Missing!A1+'_helper'!B:B"),
                None,
                None,
                None,
                None,
                None,
            ],
        );
        assert_eq!(matrix.edge_count(), 0);
    }

    #[test]
    fn test_self_reference_suppressed() {
        let matrix = resolve(
            &two_sheets(),
            vec![None, None, Some("=C1+B2+Costs!C:C"), None, None, None],
        );
        assert!(!matrix.depends_on(2, 2));
        assert_eq!(matrix.dependencies_of(2), vec![1]);
        for i in 0..matrix.len() {
            assert!(!matrix.depends_on(i, i));
        }
    }

    #[test]
    fn test_missing_formula_only_loses_outgoing_edges() {
        let matrix = resolve(
            &two_sheets(),
            vec![None, Some("=A2"), Some("=A2*B2"), None, None, None],
        );
        assert_eq!(matrix.dependencies_of(0), Vec::<usize>::new());
        assert_eq!(matrix.dependents_of(0), vec![1, 2]);
        assert_eq!(matrix.edges(), vec![(1, 0), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_grid_layout() {
        let mut matrix = DependencyMatrix::new(vec!["S!A".into(), "S!B".into()]);
        matrix.cells[1][0] = true;

        assert_eq!(
            matrix.to_grid(),
            vec![
                vec!["", "S!A", "S!B"],
                vec!["S!A", "", ""],
                vec!["S!B", "X", ""],
            ]
        );
    }

    #[test]
    fn test_out_of_range_queries() {
        let matrix = DependencyMatrix::new(vec!["S!A".into()]);
        assert!(!matrix.depends_on(3, 0));
        assert!(matrix.dependencies_of(7).is_empty());
        assert!(!matrix.is_empty());
        assert!(DependencyMatrix::new(Vec::new()).is_empty());
    }
}
