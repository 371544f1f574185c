use std::path::{Path, PathBuf};

use crate::chart::ChartSpec;
use crate::data::loader::load_file;
use crate::data::model::TraceTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// File the current table was read from.
    pub source: PathBuf,

    /// Loaded table.
    pub table: TraceTable,

    /// Chart built from `table`.
    pub chart: ChartSpec,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(source: PathBuf, table: TraceTable) -> Self {
        let chart = ChartSpec::from_table(&table);
        Self {
            source,
            table,
            chart,
            status_message: None,
        }
    }

    /// Replace the table and rebuild the chart from scratch.
    pub fn set_table(&mut self, source: PathBuf, table: TraceTable) {
        self.chart = ChartSpec::from_table(&table);
        self.table = table;
        self.source = source;
        self.status_message = None;
    }

    /// Load `path` and show it. On failure the current chart stays and the
    /// error goes to the status line.
    pub fn open(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => self.set_table(path.to_path_buf(), table),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-read the current source.
    pub fn reload(&mut self) {
        let path = self.source.clone();
        self.open(&path);
    }

    /// File name for titles and the status bar.
    pub fn source_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}
