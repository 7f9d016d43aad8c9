//! SheetDeps - column dependency matrix for multi-sheet workbooks
//!
//! Discovers which named columns (`Sheet!Header`) are computed from which other
//! named columns by scanning one representative formula per column, and renders
//! the result as a square boolean matrix.
//!
//! # Pipeline
//!
//! 1. Registry: every non-empty header on an included sheet gets a global index
//! 2. Sampling: the topmost formula below each header is kept
//! 3. Resolution: references in that formula are matched by sheet + column letter
//!
//! All reads happen before the single write of the matrix.
//!
//! # Example
//!
//! ```no_run
//! use sheetdeps::config::AnalyzerConfig;
//! use sheetdeps::core::{DependencyAnalyzer, TracingProgress};
//! use sheetdeps::parser::load_workbook;
//! use sheetdeps::writer::{write_matrix, OutputFormat};
//! use std::path::Path;
//!
//! let workbook = load_workbook(Path::new("costs.xlsx"))?;
//! let analyzer = DependencyAnalyzer::new(AnalyzerConfig::default())?;
//! let analysis = analyzer.analyze(&workbook, &TracingProgress)?;
//!
//! println!("Columns: {}", analysis.matrix.len());
//! write_matrix(&analysis.matrix, Path::new("matrix.xlsx"), OutputFormat::Xlsx, "Matrix")?;
//! # Ok::<(), sheetdeps::error::SheetDepsError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod parser;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use config::AnalyzerConfig;
pub use error::{SheetDepsError, SheetDepsResult};
pub use types::{Cell, Sheet, Workbook};
