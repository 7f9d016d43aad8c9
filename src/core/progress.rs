//! Coarse progress notifications for long scans

use tracing::info;

/// Receives human-readable checkpoint messages. Advisory only.
pub trait Progress {
    fn notify(&self, message: &str);
}

/// Sends checkpoints to `tracing` at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl Progress for TracingProgress {
    fn notify(&self, message: &str) {
        info!(target: "sheetdeps::progress", "{}", message);
    }
}

/// Drops every checkpoint
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn notify(&self, _message: &str) {}
}

/// Sheets between inventory checkpoints
pub const SHEET_CHECKPOINT: usize = 5;

/// Columns between sampling and resolution checkpoints
pub const COLUMN_CHECKPOINT: usize = 50;

/// True when the 0-based `index` closes a batch of `every` items
pub(crate) fn is_checkpoint(index: usize, every: usize) -> bool {
    (index + 1) % every == 0
}
