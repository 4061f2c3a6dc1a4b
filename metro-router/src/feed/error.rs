//! Feed ingestion errors.

use std::path::PathBuf;

use super::tables::Table;

/// Errors that abort ingestion.
///
/// Rows that are too short to carry the required columns are not errors;
/// they are skipped and counted in the
/// [`IngestReport`](super::IngestReport).
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// A table could not be read from disk
    #[error("failed to read {table} table from {}: {source}", .path.display())]
    Unreadable {
        table: Table,
        path: PathBuf,
        source: std::io::Error,
    },

    /// A table is not well-formed CSV
    #[error("{table} table is not valid CSV: {source}")]
    Malformed { table: Table, source: csv::Error },

    /// A required numeric field did not parse
    #[error("{table} line {line}, column {column}: invalid number {value:?}")]
    InvalidNumber {
        table: Table,
        line: usize,
        column: usize,
        value: String,
    },
}

impl IngestError {
    /// The table the error refers to.
    pub fn table(&self) -> Table {
        match self {
            IngestError::Unreadable { table, .. }
            | IngestError::Malformed { table, .. }
            | IngestError::InvalidNumber { table, .. } => *table,
        }
    }
}
