//! Error types for ingestion

use thiserror::Error;

/// Errors that can occur while reading input tables
///
/// Bad *cells* are never errors; they surface as missing values and are
/// counted by the selector. Only unreadable files and tables missing a
/// required column stop ingestion.
#[derive(Error, Debug)]
pub enum IngestError {
    /// File could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Table structure could not be parsed
    #[error("CSV parse error: {0}")]
    Csv(String),

    /// A required column is absent from the header
    #[error("Missing required column '{column}' in {table} table")]
    MissingColumn {
        /// Which table was being read
        table: &'static str,
        /// The column that was expected
        column: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<csv::Error> for IngestError {
    fn from(e: csv::Error) -> Self {
        IngestError::Csv(e.to_string())
    }
}
