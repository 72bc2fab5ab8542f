//! Graph loading error.
//!
//! Returned by `ScreenGraph::from_json` and `ScreenGraph::from_path` when the
//! file cannot be read or does not describe a screen graph.

use std::path::PathBuf;

use thiserror::Error;

/// Error when loading a screen graph from JSON text or a file.
#[derive(Debug, Error)]
pub enum GraphLoadError {
    /// The graph file could not be read.
    #[error("failed to read screen graph {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text is not valid JSON or does not match the graph schema.
    #[error("invalid screen graph JSON: {0}")]
    Json(#[from] serde_json::Error),
}
