//! Excel import/export
//!
//! - Import: .xlsx → workbook snapshot (values + formula text)
//! - Export: dependency matrix → .xlsx with frozen label row/column

mod exporter;
mod importer;

pub use exporter::MatrixExporter;
pub use importer::WorkbookImporter;
