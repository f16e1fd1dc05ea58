//! In-memory store for unit tests.

use crate::error::{InsertPhase, PostgreSQLSeederError};
use crate::insert::{SqlValue, TableSpec};
use crate::store::SeedStore;
use async_trait::async_trait;

/// Records every statement and copy instead of talking to a database.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub executed: Vec<String>,
    pub copies: Vec<(&'static str, Vec<Vec<SqlValue>>)>,
    /// Fail any statement containing this text
    pub fail_execute: Option<String>,
    /// Fail the copy into this table at the given phase
    pub fail_copy: Option<(&'static str, InsertPhase)>,
}

impl RecordingStore {
    pub fn copied_tables(&self) -> Vec<&'static str> {
        self.copies.iter().map(|(table, _)| *table).collect()
    }
}

#[async_trait]
impl SeedStore for RecordingStore {
    async fn execute(&mut self, sql: &str) -> Result<(), PostgreSQLSeederError> {
        if let Some(pattern) = &self.fail_execute {
            if sql.contains(pattern.as_str()) {
                return Err(PostgreSQLSeederError::Connection(format!(
                    "forced failure on '{pattern}'"
                )));
            }
        }
        self.executed.push(sql.to_string());
        Ok(())
    }

    async fn copy_rows(
        &mut self,
        table: &TableSpec,
        rows: Vec<Vec<SqlValue>>,
    ) -> Result<u64, PostgreSQLSeederError> {
        if let Some((failing, phase)) = self.fail_copy {
            if failing == table.table {
                return Err(PostgreSQLSeederError::insert(table.model, phase, "forced failure"));
            }
        }
        let count = rows.len() as u64;
        self.copies.push((table.table, rows));
        Ok(count)
    }
}
