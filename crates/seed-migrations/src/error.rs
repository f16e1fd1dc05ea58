//! Error types for migration loading.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Found directory inside migration {}", .0.display())]
    UnexpectedDirectory(PathBuf),

    #[error(
        "Found file in migration that is not up.sql, down.sql or transitory.sql: {}",
        .0.display()
    )]
    UnexpectedFile(PathBuf),

    /// Directory name starts with a digit but not with a five-digit index.
    #[error("Migration directory '{0}' must be named NNNNN_<name>")]
    BadIndex(String),

    #[error("Migration '{0}' has no up.sql")]
    MissingUp(String),

    #[error("Duplicate migration index {index}: '{first}' and '{second}'")]
    DuplicateIndex {
        index: u32,
        first: String,
        second: String,
    },
}

impl MigrationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MigrationError::Io {
            path: path.into(),
            source,
        }
    }
}
