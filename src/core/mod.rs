//! Dependency discovery: column registry, formula sampling, reference
//! grammar and matrix resolution

pub mod analyzer;
pub mod letters;
pub mod matrix;
pub mod progress;
pub mod references;
pub mod registry;
pub mod sampler;

pub use analyzer::{Analysis, DependencyAnalyzer};
pub use letters::{letters_to_position, position_to_letters};
pub use matrix::{DependencyMatrix, EDGE_MARKER};
pub use progress::{Progress, SilentProgress, TracingProgress};
pub use references::{Reference, ReferenceGrammar};
pub use registry::{Column, ColumnRegistry};
pub use sampler::sample_formulas;
