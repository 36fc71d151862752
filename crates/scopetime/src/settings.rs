//! Host-facing timing configuration

use serde::{Deserialize, Serialize};

use crate::file_sink::FileSinks;
use crate::output;

/// Timing output configuration, shaped for embedding in a host
/// application's settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingSettings {
    /// Emit the indented tree format.
    pub tree: bool,
    /// Emit the flat table format.
    pub table: bool,
    /// When set, route reports into `<basename>.log` / `<basename>.csv`.
    pub file_basename: Option<String>,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            tree: true,
            table: true,
            file_basename: None,
        }
    }
}

impl TimingSettings {
    /// Applies this configuration to the process-wide router.
    ///
    /// When `file_basename` is set the returned guard keeps the file
    /// sinks installed; the caller holds it for the instrumented span.
    pub fn apply(&self) -> Option<FileSinks> {
        output::set_tree_enabled(self.tree);
        output::set_table_enabled(self.table);
        self.file_basename.as_deref().map(FileSinks::install)
    }
}
