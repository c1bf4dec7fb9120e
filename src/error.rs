//! Error types shared by the loader, composer and report writer.

use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, SortbenchError>;

/// Failures surfaced by the benchmark harness and the plotting pipeline.
///
/// Every variant is fatal to the current run; there is no retry or
/// partial-output mode.
#[derive(Debug)]
pub enum SortbenchError {
    /// A required input file does not exist.
    FileNotFound { path: PathBuf },

    /// I/O failure outside of CSV decoding.
    Io(io::Error),

    /// The CSV reader rejected the file structure.
    Csv { path: PathBuf, source: csv::Error },

    /// A data cell failed numeric conversion. Row numbers count data rows
    /// starting at 1; the header row is not counted.
    Parse {
        path: PathBuf,
        row: usize,
        column: usize,
        value: String,
        expected: &'static str,
    },

    /// A series used as a normalization denominator has no positive,
    /// finite maximum.
    DegenerateSeries { label: String },
}

impl fmt::Display for SortbenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortbenchError::FileNotFound { path } => {
                write!(f, "input file not found: {}", path.display())
            }
            SortbenchError::Io(e) => write!(f, "I/O error: {e}"),
            SortbenchError::Csv { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            SortbenchError::Parse {
                path,
                row,
                column,
                value,
                expected,
            } => {
                write!(
                    f,
                    "{}: row {row}, column {column}: cannot parse {value:?} as {expected}",
                    path.display()
                )
            }
            SortbenchError::DegenerateSeries { label } => {
                write!(f, "series {label:?} has no positive maximum to normalize by")
            }
        }
    }
}

impl std::error::Error for SortbenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SortbenchError::Io(e) => Some(e),
            SortbenchError::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for SortbenchError {
    fn from(err: io::Error) -> Self {
        SortbenchError::Io(err)
    }
}
