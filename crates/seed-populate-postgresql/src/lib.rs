//! PostgreSQL backend for the board seeder.
//!
//! Connects with `tokio-postgres`, applies migrations, streams a generated
//! dataset into the database with binary `COPY` (one transaction per table)
//! and finally re-syncs identity sequences so later inserts do not collide
//! with the explicitly assigned ids.

pub mod args;
pub mod error;
pub mod insert;
pub mod migrate;
pub mod populator;
pub mod store;

#[cfg(test)]
mod testing;

pub use args::{PostgreSQLConnectionArgs, PostgreSQLSeedArgs, SslMode};
pub use error::{InsertPhase, PostgreSQLSeederError};
pub use insert::{ColumnType, CopyRow, SqlValue, TableSpec, INSERT_ORDER};
pub use populator::{PopulateMetrics, PostgreSQLSeeder, SeedReport, TableMetrics};
pub use store::{SeedStore, Store};
