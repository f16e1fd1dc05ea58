//! Error types for data generation.

use seed_core::{EntityId, EnumError};
use thiserror::Error;

/// Errors that can occur while generating a seed dataset.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// A half-open range `[min, max)` with nothing in it.
    #[error("Empty range: [{min}, {max})")]
    EmptyRange { min: i64, max: i64 },

    /// A weighted pick was requested from a table with no entries.
    #[error("No weighted entries to choose from: {0}")]
    EmptyWeights(&'static str),

    /// A uniform pick was requested from an empty list.
    #[error("No candidates to choose from: {0}")]
    EmptyChoice(&'static str),

    /// Articles require at least one admin or super account.
    #[error("Cannot author {articles} article(s): no admin or super accounts exist")]
    MissingAdminAuthor { articles: usize },

    /// An id or post-number counter ran out of `i32` space.
    #[error("Ran out of ids for {0}")]
    IdExhausted(&'static str),

    /// A referenced entity does not exist in the dataset.
    #[error("Unknown {entity} id: {id}")]
    UnknownReference { entity: &'static str, id: EntityId },

    /// A phase was started before the phase it depends on finished.
    #[error("Phase '{requested}' cannot run before '{required}' has completed")]
    PhaseOrder {
        requested: &'static str,
        required: &'static str,
    },

    /// A phase was started a second time.
    #[error("Phase '{0}' has already run")]
    PhaseRepeated(&'static str),

    /// Configuration values are inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error reading a configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Enumeration conversion error
    #[error(transparent)]
    Enum(#[from] EnumError),
}
