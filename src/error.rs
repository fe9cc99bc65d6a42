//! Error types for the slipgrid crate

use thiserror::Error;

use crate::grid::Cell;

/// Main error type for the slipgrid crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cell {cell} has no valid actions")]
    DegenerateCell { cell: Cell },

    #[error("value table has no entry for cell {cell} (ensure it before querying)")]
    UninitializedLookup { cell: Cell },

    #[error("invalid placement of {role} at {cell}: {reason}")]
    InvalidPlacement {
        role: String,
        cell: Cell,
        reason: String,
    },

    #[error("invalid grid dimensions {rows}x{cols} (both must be at least 1)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid cell '{input}' (expected 'ROW,COL')")]
    ParseCell { input: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
