//! Command-line interface for board-seeder
//!
//! # Usage Examples
//!
//! ## Seed a database
//! ```bash
//! # Drop everything, re-run migrations, seed with the default config
//! board-seeder seed \
//!   --pg-host localhost --pg-user postgres --pg-dbname board \
//!   --migrations-dir ./migrations --rollback
//!
//! # Smaller dataset with a fixed seed into a fresh schema
//! board-seeder seed --accounts 10 --threads-per-board 2..5 --seed 7 --rollback
//! ```
//!
//! ## Prepare the schema first, seed later
//! ```bash
//! # Tables only; foreign keys are added by the following seed
//! board-seeder migrate --pg-dbname board --rollback
//! board-seeder seed --pg-dbname board --skip-migrations
//! ```
//!
//! ## Generate without a database
//! ```bash
//! board-seeder generate --config seed-config.yaml --output dataset.json
//! ```

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use seed_generator::{Seeder, SeederConfig};
use seed_migrations::MigrationSet;
use seed_populate::{CommonSeedArgs, MigrationArgs};
use seed_populate_postgresql::{
    PostgreSQLConnectionArgs, PostgreSQLSeedArgs, PostgreSQLSeeder, Store,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "board-seeder")]
#[command(about = "Generate a deterministic bulletin-board dataset and load it into PostgreSQL")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run migrations, generate a dataset, bulk insert it and add foreign keys
    Seed {
        #[command(flatten)]
        args: PostgreSQLSeedArgs,
    },

    /// Run up migrations only; `seed --skip-migrations` adds the foreign keys
    Migrate {
        #[command(flatten)]
        connection: PostgreSQLConnectionArgs,

        #[command(flatten)]
        migrations: MigrationArgs,
    },

    /// Generate a dataset and print its summary (no database)
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    common: CommonSeedArgs,

    /// Write the generated dataset as JSON to this file
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Seed { args } => run_seed(args).await,
        Commands::Migrate {
            connection,
            migrations,
        } => run_migrate(connection, migrations).await,
        Commands::Generate { args } => run_generate(args),
    }
}

fn load_migrations(dir: &Path) -> anyhow::Result<MigrationSet> {
    MigrationSet::from_dir(dir).with_context(|| format!("Failed to load migrations from {dir:?}"))
}

fn load_config(common: &CommonSeedArgs) -> anyhow::Result<SeederConfig> {
    common
        .load_config()
        .context("Failed to load seeder configuration")
}

async fn run_seed(args: PostgreSQLSeedArgs) -> anyhow::Result<()> {
    let config = load_config(&args.common)?;

    if args.common.dry_run {
        tracing::info!(
            "[DRY-RUN] Would seed PostgreSQL (seed={})",
            config.seed
        );
        tracing::info!("[DRY-RUN] Connection: {}", args.connection.masked());
        let summary = Seeder::new(config)?.run()?;
        println!("{summary}");
        return Ok(());
    }

    // Needed even with --skip-migrations for the deferred scripts
    let migrations = load_migrations(&args.migrations.migrations_dir)?;

    let store = Store::connect(&args.connection)
        .await
        .context("Failed to connect to PostgreSQL")?;
    let mut seeder = PostgreSQLSeeder::new(store);

    let report = seeder
        .run(config, &migrations, &args.migrations)
        .await
        .context("Failed to seed PostgreSQL")?;

    println!("{}", report.summary);
    println!();
    println!("Metrics");
    println!("=======");
    println!("{}", report.metrics);

    Ok(())
}

async fn run_migrate(
    connection: PostgreSQLConnectionArgs,
    args: MigrationArgs,
) -> anyhow::Result<()> {
    let migrations = load_migrations(&args.migrations_dir)?;

    let store = Store::connect(&connection)
        .await
        .context("Failed to connect to PostgreSQL")?;
    let mut seeder = PostgreSQLSeeder::new(store);

    let applied = seeder
        .migrate(&migrations, args.rollback)
        .await
        .context("Failed to run migrations")?;

    tracing::info!(
        "Applied {applied} migrations; deferred scripts run after `seed --skip-migrations`"
    );
    Ok(())
}

fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = load_config(&args.common)?;

    let mut seeder = Seeder::new(config)?;
    let summary = seeder.run()?;

    if let Some(path) = &args.output {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create output file {path:?}"))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), seeder.dataset())
            .with_context(|| format!("Failed to write dataset to {path:?}"))?;
        tracing::info!("Wrote dataset to {path:?}");
    }

    println!("{summary}");
    Ok(())
}
