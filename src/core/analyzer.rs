//! Registry → sampling → resolution, strictly in that order.

use super::matrix::DependencyMatrix;
use super::progress::Progress;
use super::references::ReferenceGrammar;
use super::registry::{Column, ColumnRegistry};
use super::sampler::sample_formulas;
use crate::config::AnalyzerConfig;
use crate::error::SheetDepsResult;
use crate::types::Workbook;
use std::time::{Duration, Instant};

/// Everything read from one workbook snapshot
#[derive(Debug, Clone)]
pub struct Analysis {
    pub registry: ColumnRegistry,
    /// Representative formula per column, parallel to the registry
    pub formulas: Vec<Option<String>>,
    pub matrix: DependencyMatrix,
    pub elapsed: Duration,
}

impl Analysis {
    pub fn columns(&self) -> &[Column] {
        self.registry.columns()
    }

    /// Number of columns that carry a representative formula
    pub fn formula_count(&self) -> usize {
        self.formulas.iter().filter(|f| f.is_some()).count()
    }
}

pub struct DependencyAnalyzer {
    config: AnalyzerConfig,
    grammar: ReferenceGrammar,
}

impl DependencyAnalyzer {
    pub fn new(config: AnalyzerConfig) -> SheetDepsResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            grammar: ReferenceGrammar::new()?,
        })
    }

    /// Build the dependency matrix for `workbook`
    ///
    /// An empty registry aborts before any formula is sampled.
    pub fn analyze(
        &self,
        workbook: &Workbook,
        progress: &dyn Progress,
    ) -> SheetDepsResult<Analysis> {
        let started = Instant::now();
        progress.notify("Starting: inventory of sheets/columns...");

        let registry = ColumnRegistry::build(workbook, &self.config, progress)?;
        progress.notify(&format!(
            "Columns detected: {}. Extracting formulas...",
            registry.len()
        ));

        let formulas = sample_formulas(workbook, registry.columns(), &self.config, progress);

        progress.notify("Analyzing dependencies...");
        let matrix = DependencyMatrix::resolve(&registry, &formulas, &self.grammar, progress);

        Ok(Analysis {
            registry,
            formulas,
            matrix,
            elapsed: started.elapsed(),
        })
    }
}
