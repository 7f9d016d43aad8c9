//! CLI command handlers

pub mod commands;

pub use commands::{columns, deps, matrix, ConfigArgs};
