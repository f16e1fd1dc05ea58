//! Database capability used by the seeder, and its PostgreSQL implementation.

use crate::args::{PostgreSQLConnectionArgs, SslMode};
use crate::error::{InsertPhase, PostgreSQLSeederError};
use crate::insert::{sql_value_to_boxed, SqlValue, TableSpec};
use async_trait::async_trait;
use std::pin::pin;
use tokio_postgres::binary_copy::BinaryCopyInWriter;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, info};

/// What the seeder needs from a database.
#[async_trait]
pub trait SeedStore: Send {
    /// Execute one or more SQL statements.
    async fn execute(&mut self, sql: &str) -> Result<(), PostgreSQLSeederError>;

    /// Insert every row into `table` inside one transaction.
    ///
    /// Either all rows are committed or none are; failures are reported as
    /// [`PostgreSQLSeederError::Insert`] tagged with the failing phase.
    async fn copy_rows(
        &mut self,
        table: &TableSpec,
        rows: Vec<Vec<SqlValue>>,
    ) -> Result<u64, PostgreSQLSeederError>;
}

/// A single PostgreSQL connection.
pub struct Store {
    client: Client,
}

impl Store {
    /// Connect and ping the server.
    pub async fn connect(args: &PostgreSQLConnectionArgs) -> Result<Self, PostgreSQLSeederError> {
        if args.sslmode == SslMode::Require {
            return Err(PostgreSQLSeederError::Connection(
                "sslmode=require is not supported: this build has no TLS support".to_string(),
            ));
        }

        info!("Connecting to PostgreSQL: {}", args.masked());
        Self::connect_str(&args.connection_string()).await
    }

    /// Connect using a raw connection string (key=value or URL form).
    pub async fn connect_str(connection_string: &str) -> Result<Self, PostgreSQLSeederError> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls)
            .await
            .map_err(|e| PostgreSQLSeederError::Connection(e.to_string()))?;

        // Spawn the connection task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        // Test connection
        client
            .simple_query("SELECT 1")
            .await
            .map_err(|e| PostgreSQLSeederError::Connection(format!("could not ping database: {e}")))?;

        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Row count of `table`.
    pub async fn row_count(&self, table: &str) -> Result<u64, PostgreSQLSeederError> {
        let sql = format!("SELECT COUNT(*) FROM \"{table}\"");
        let row = self.client.query_one(&sql, &[]).await?;
        let count: i64 = row.get(0);
        Ok(count as u64)
    }
}

#[async_trait]
impl SeedStore for Store {
    async fn execute(&mut self, sql: &str) -> Result<(), PostgreSQLSeederError> {
        debug!("SQL: {}", sql);
        self.client.batch_execute(sql).await?;
        Ok(())
    }

    async fn copy_rows(
        &mut self,
        table: &TableSpec,
        rows: Vec<Vec<SqlValue>>,
    ) -> Result<u64, PostgreSQLSeederError> {
        let model = table.model;
        let exec_err = |e: tokio_postgres::Error| {
            PostgreSQLSeederError::insert(model, InsertPhase::StatementExecution, e)
        };

        let tx = self.client.transaction().await.map_err(exec_err)?;
        let sink = tx.copy_in(&table.copy_statement()).await.map_err(exec_err)?;
        let types = table.pg_types();
        let mut writer = pin!(BinaryCopyInWriter::new(sink, &types));

        for row in rows {
            let params: Vec<Box<dyn ToSql + Sync + Send>> =
                row.into_iter().map(sql_value_to_boxed).collect();
            let param_refs: Vec<&(dyn ToSql + Sync)> = params
                .iter()
                .map(|p| p.as_ref() as &(dyn ToSql + Sync))
                .collect();

            writer.as_mut().write(&param_refs).await.map_err(exec_err)?;
        }

        let inserted = writer
            .finish()
            .await
            .map_err(|e| PostgreSQLSeederError::insert(model, InsertPhase::StatementClosure, e))?;

        tx.commit()
            .await
            .map_err(|e| PostgreSQLSeederError::insert(model, InsertPhase::TransactionCommit, e))?;

        Ok(inserted)
    }
}
