//! File-backed sink installation

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::output::{self, Sink};

/// Suffix appended to the basename for the tree stream.
const TREE_SUFFIX: &str = ".log";
/// Suffix appended to the basename for the table stream.
const TABLE_SUFFIX: &str = ".csv";

/// Failure to open a report file during installation.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open tree log '{path}'")]
    Tree {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open table log '{path}'")]
    Table {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Routes reports into `<basename>.log` (tree) and `<basename>.csv`
/// (table) for as long as it lives.
///
/// Both files are opened in append mode. Dropping the guard closes them
/// and resets both sinks to the default diagnostic stream — a nested
/// installation resets to the default on exit rather than restoring an
/// outer installation's files.
#[derive(Debug)]
pub struct FileSinks(());

impl FileSinks {
    /// Installs file sinks derived from `basename`.
    ///
    /// A file that fails to open leaves its sink on the default
    /// diagnostic stream; the other sink is unaffected.
    pub fn install(basename: impl AsRef<Path>) -> Self {
        let basename = basename.as_ref();
        let tree_path = sink_path(basename, TREE_SUFFIX);
        let table_path = sink_path(basename, TABLE_SUFFIX);

        let tree = open_append(&tree_path)
            .map_err(|err| {
                warn!(path = %tree_path.display(), %err, "tree sink unavailable, using stderr");
            })
            .ok();
        let table = open_append(&table_path)
            .map_err(|err| {
                warn!(path = %table_path.display(), %err, "table sink unavailable, using stderr");
            })
            .ok();

        Self::install_files(tree, table)
    }

    /// Strict variant of [`install`](Self::install): fails instead of
    /// falling back when either file cannot be opened. Nothing is
    /// installed on error.
    pub fn try_install(basename: impl AsRef<Path>) -> Result<Self, SinkError> {
        let basename = basename.as_ref();
        let tree_path = sink_path(basename, TREE_SUFFIX);
        let table_path = sink_path(basename, TABLE_SUFFIX);

        let tree = open_append(&tree_path).map_err(|source| SinkError::Tree {
            path: tree_path,
            source,
        })?;
        let table = open_append(&table_path).map_err(|source| SinkError::Table {
            path: table_path,
            source,
        })?;

        Ok(Self::install_files(Some(tree), Some(table)))
    }

    fn install_files(tree: Option<File>, table: Option<File>) -> Self {
        output::set_tree_sink(tree.map(|file| Box::new(file) as Sink));
        output::set_table_sink(table.map(|file| Box::new(file) as Sink));
        FileSinks(())
    }
}

impl Drop for FileSinks {
    fn drop(&mut self) {
        // Dropping the replaced sinks closes the files.
        output::set_tree_sink(None);
        output::set_table_sink(None);
    }
}

// The suffix is appended to the whole basename, not swapped in as an
// extension: "run1.old" becomes "run1.old.log".
fn sink_path(basename: &Path, suffix: &str) -> PathBuf {
    let mut path = basename.as_os_str().to_os_string();
    path.push(suffix);
    PathBuf::from(path)
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
