//! Error types for the PostgreSQL seeder.

use seed_generator::GeneratorError;
use seed_migrations::MigrationError;
use std::fmt;
use thiserror::Error;

/// Step of a bulk insert that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPhase {
    /// Opening the COPY or streaming a row through it.
    StatementExecution,
    /// Flushing and closing the COPY stream.
    StatementClosure,
    TransactionCommit,
}

impl InsertPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertPhase::StatementExecution => "statement execution",
            InsertPhase::StatementClosure => "statement closure",
            InsertPhase::TransactionCommit => "transaction commit",
        }
    }
}

impl fmt::Display for InsertPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while seeding PostgreSQL.
#[derive(Error, Debug)]
pub enum PostgreSQLSeederError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A bulk insert failed; the table's transaction was not committed.
    #[error("{phase} failure during {model} insert: {message}")]
    Insert {
        model: &'static str,
        phase: InsertPhase,
        message: String,
    },

    /// Migration directory could not be loaded.
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),

    /// A migration script failed to execute.
    #[error("Migration {migration} ({script}) failed: {message}")]
    MigrationScript {
        migration: String,
        script: &'static str,
        message: String,
    },

    /// Generator error.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),
}

impl PostgreSQLSeederError {
    pub fn insert(model: &'static str, phase: InsertPhase, err: impl fmt::Display) -> Self {
        PostgreSQLSeederError::Insert {
            model,
            phase,
            message: err.to_string(),
        }
    }
}
