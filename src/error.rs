use std::path::PathBuf;

use thiserror::Error;

/// Errors raised before or while reading an input file, and by configuration
/// checks that callers may want to match on.
#[derive(Debug, Error)]
pub enum SedimentError {
    /// The input path does not exist.
    #[error("input file does not exist: {0}")]
    InputNotFound(PathBuf),

    /// The input path exists but is a directory (or other non-file).
    #[error("input path is not a file: {0}")]
    InputNotAFile(PathBuf),

    /// The input file exists but cannot be opened for reading.
    #[error("input file is not readable: {path}: {source}")]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited text (bad quoting, invalid UTF-8, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A collection name that cannot be used as a table name.
    #[error("invalid collection name '{0}': expected [A-Za-z_][A-Za-z0-9_]*")]
    InvalidCollectionName(String),
}
