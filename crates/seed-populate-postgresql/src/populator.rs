//! PostgreSQL seeder: generation, bulk insert and sequence re-sync.

use crate::error::PostgreSQLSeederError;
use crate::insert::{encode_rows, CopyRow, INSERT_ORDER};
use crate::migrate;
use crate::store::{SeedStore, Store};
use seed_core::SeedDataset;
use seed_generator::{SeedSummary, Seeder, SeederConfig};
use seed_migrations::{Migration, MigrationSet};
use seed_populate::MigrationArgs;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Rows and time spent on one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableMetrics {
    pub table: &'static str,
    pub rows: u64,
    pub duration: Duration,
}

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of rows inserted.
    pub rows_inserted: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating data.
    pub generation_duration: Duration,
    /// Time spent inserting data.
    pub insert_duration: Duration,
    /// Per-table breakdown, in insertion order.
    pub tables: Vec<TableMetrics>,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    fn record(&mut self, table: &'static str, rows: u64, duration: Duration) {
        self.rows_inserted += rows;
        self.insert_duration += duration;
        self.tables.push(TableMetrics {
            table,
            rows,
            duration,
        });
    }
}

impl fmt::Display for PopulateMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in &self.tables {
            writeln!(f, "  {:<18} {:>8} rows in {:?}", t.table, t.rows, t.duration)?;
        }
        write!(
            f,
            "  {} rows in {:?} ({:.2} rows/sec; generation {:?}, insert {:?})",
            self.rows_inserted,
            self.total_duration,
            self.rows_per_second(),
            self.generation_duration,
            self.insert_duration
        )
    }
}

/// Outcome of a full seed run.
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub summary: SeedSummary,
    pub metrics: PopulateMetrics,
}

/// Seeds a database through a [`SeedStore`].
pub struct PostgreSQLSeeder<S = Store> {
    store: S,
}

impl<S: SeedStore> PostgreSQLSeeder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Apply migrations, optionally rolling everything back first.
    pub async fn migrate(
        &mut self,
        migrations: &MigrationSet,
        rollback: bool,
    ) -> Result<usize, PostgreSQLSeederError> {
        migrate::migrate(&mut self.store, migrations, rollback).await
    }

    /// Run the deferred migration scripts.
    pub async fn finalize(&mut self, migrations: &MigrationSet) -> Result<usize, PostgreSQLSeederError> {
        migrate::finalize(&mut self.store, migrations).await
    }

    /// Full `seed` flow: up scripts (unless skipped), dataset insert, then the
    /// deferred scripts.
    ///
    /// The deferred scripts always run last, also with `skip_migrations`, so a
    /// schema prepared by [`Self::migrate`] gets its foreign keys only after
    /// the rows are in.
    pub async fn run(
        &mut self,
        config: SeederConfig,
        migrations: &MigrationSet,
        args: &MigrationArgs,
    ) -> Result<SeedReport, PostgreSQLSeederError> {
        if args.skip_migrations {
            info!("Skipping up migrations");
        } else {
            self.migrate(migrations, args.rollback).await?;
        }

        let report = self.seed(config).await?;
        self.finalize(migrations).await?;

        Ok(report)
    }

    /// Generate a dataset from `config` and insert it.
    pub async fn seed(&mut self, config: SeederConfig) -> Result<SeedReport, PostgreSQLSeederError> {
        let start = Instant::now();

        let mut seeder = Seeder::new(config)?;
        let summary = seeder.run()?;
        let generation_duration = start.elapsed();
        let dataset = seeder.into_dataset();

        let mut metrics = self.insert_dataset(&dataset).await?;
        self.sync_sequences().await?;

        metrics.generation_duration = generation_duration;
        metrics.total_duration = start.elapsed();

        info!(
            "Seeding complete: {} rows in {:?} ({:.2} rows/sec)",
            metrics.rows_inserted,
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(SeedReport { summary, metrics })
    }

    /// Bulk insert every collection in foreign-key order.
    ///
    /// Each table is its own transaction; the first failure stops the run and
    /// later tables are left untouched.
    pub async fn insert_dataset(
        &mut self,
        dataset: &SeedDataset,
    ) -> Result<PopulateMetrics, PostgreSQLSeederError> {
        let start = Instant::now();
        let mut metrics = PopulateMetrics::default();

        self.insert_table(&dataset.accounts, &mut metrics).await?;
        self.insert_table(&dataset.boards, &mut metrics).await?;
        self.insert_table(&dataset.article_contents, &mut metrics).await?;
        self.insert_table(&dataset.articles, &mut metrics).await?;
        self.insert_table(&dataset.threads, &mut metrics).await?;
        self.insert_table(&dataset.post_contents, &mut metrics).await?;
        self.insert_table(&dataset.posts, &mut metrics).await?;
        self.insert_table(&dataset.identities, &mut metrics).await?;
        self.insert_table(&dataset.identity_posts, &mut metrics).await?;

        metrics.total_duration = start.elapsed();
        Ok(metrics)
    }

    async fn insert_table<T: CopyRow + Sync>(
        &mut self,
        rows: &[T],
        metrics: &mut PopulateMetrics,
    ) -> Result<(), PostgreSQLSeederError> {
        let table = T::TABLE;
        let start = Instant::now();

        info!("Inserting {} rows into {}", rows.len(), table.table);
        let inserted = self.store.copy_rows(&table, encode_rows(rows)).await?;
        metrics.record(table.table, inserted, start.elapsed());

        Ok(())
    }

    /// Move every identity sequence past the ids inserted explicitly.
    pub async fn sync_sequences(&mut self) -> Result<(), PostgreSQLSeederError> {
        for table in INSERT_ORDER {
            if let Some(sql) = table.sync_sequence_statement() {
                debug!("Syncing identity sequence of {}", table.table);
                self.store.execute(&sql).await?;
            }
        }
        Ok(())
    }
}
