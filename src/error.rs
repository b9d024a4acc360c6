//! Error types for the sheaf source bundling tool.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a compile run.
///
/// Per-file read failures are deliberately absent: the compiler downgrades
/// them to inline `(ERROR: ...)` annotations in the output document and the
/// run continues.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Failed to create output file {path:?}: {source}")]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {path:?}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for CompileError {
    fn from(err: config::ConfigError) -> Self {
        CompileError::Config(err.to_string())
    }
}
