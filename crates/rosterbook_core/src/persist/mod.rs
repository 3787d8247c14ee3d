//! Persistence codecs for the student store.
//!
//! # Responsibility
//! - Serialize the store to its JSON database file and back.
//! - Bulk-export and bulk-import rosters as CSV text.
//!
//! # Invariants
//! - A failed load or import never discards records already in memory; the
//!   store is only touched after the incoming data has been fully read and
//!   validated.
//! - Successful load/import replaces the store wholesale and fires one
//!   change notification for the whole batch.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod csv;
pub mod json;

pub type PersistResult<T> = Result<T, PersistError>;

/// Failure while reading or writing a roster file.
#[derive(Debug)]
pub enum PersistError {
    /// The file could not be opened, read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file content is not a JSON array of records.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A required CSV header column is absent.
    MissingHeader {
        path: PathBuf,
        column: &'static str,
    },
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot access roster file `{}`: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "invalid roster JSON in `{}`: {source}", path.display())
            }
            Self::MissingHeader { path, column } => write!(
                f,
                "CSV file `{}` is missing required header `{column}`",
                path.display()
            ),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::MissingHeader { .. } => None,
        }
    }
}
