//! Common CLI argument definitions shared by all seeding backends.

use clap::Args;
use seed_generator::{GeneratorError, SeederConfig};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Count bounds given on the command line as `N` or `MIN..MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl FromStr for CountRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |v: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid count '{v}': {e}"))
        };

        let (min, max) = match s.split_once("..") {
            Some((min, max)) => (parse(min)?, parse(max)?),
            None => {
                let n = parse(s)?;
                (n, n)
            }
        };

        if min > max {
            return Err(format!("range '{s}' has min greater than max"));
        }
        Ok(Self { min, max })
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// Generation arguments shared by all seeding commands.
#[derive(Args, Clone, Debug, Default)]
pub struct CommonSeedArgs {
    /// Path to a seeder config YAML file (defaults are used when omitted)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Random accounts to create besides the fixed ones (N or MIN..MAX)
    #[arg(long)]
    pub accounts: Option<CountRange>,

    /// Articles to create (N or MIN..MAX)
    #[arg(long)]
    pub articles: Option<CountRange>,

    /// Threads to create on every board (N or MIN..MAX)
    #[arg(long)]
    pub threads_per_board: Option<CountRange>,

    /// Replies per thread slot and round (N or MIN..MAX)
    #[arg(long)]
    pub posts_per_thread: Option<CountRange>,

    /// Dry-run mode: generate and report without touching the database
    #[arg(long)]
    pub dry_run: bool,
}

impl CommonSeedArgs {
    /// Load the config file (or defaults) and apply command-line overrides.
    pub fn load_config(&self) -> Result<SeederConfig, GeneratorError> {
        let mut config = match &self.config {
            Some(path) => SeederConfig::from_file(path)?,
            None => SeederConfig::default(),
        };

        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(r) = self.accounts {
            config = config.with_account_count(r.min, r.max);
        }
        if let Some(r) = self.articles {
            config = config.with_article_count(r.min, r.max);
        }
        if let Some(r) = self.threads_per_board {
            config = config.with_thread_per_board(r.min, r.max);
        }
        if let Some(r) = self.posts_per_thread {
            config = config.with_post_per_thread(r.min, r.max);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Migration arguments shared by commands that touch the schema.
#[derive(Args, Clone, Debug)]
pub struct MigrationArgs {
    /// Directory containing NNNNN_<name>/ migration folders
    #[arg(long, env = "SEED_MIGRATIONS_DIR", default_value = "./migrations")]
    pub migrations_dir: PathBuf,

    /// Run every down.sql (newest first) before applying migrations
    #[arg(long)]
    pub rollback: bool,

    /// Skip the up scripts for a schema prepared by `migrate`; deferred scripts still run
    #[arg(long)]
    pub skip_migrations: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        common: CommonSeedArgs,

        #[command(flatten)]
        migrations: MigrationArgs,
    }

    #[test]
    fn test_count_range_parsing() {
        assert_eq!("5".parse::<CountRange>().unwrap(), CountRange { min: 5, max: 5 });
        assert_eq!(
            "3..100".parse::<CountRange>().unwrap(),
            CountRange { min: 3, max: 100 }
        );
        assert!("10..2".parse::<CountRange>().is_err());
        assert!("many".parse::<CountRange>().is_err());
        assert_eq!(CountRange { min: 1, max: 4 }.to_string(), "1..4");
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::try_parse_from(["test"]).unwrap();

        assert!(cli.common.config.is_none());
        assert!(!cli.common.dry_run);
        assert!(!cli.migrations.rollback);
        assert!(!cli.migrations.skip_migrations);

        let config = cli.common.load_config().unwrap();
        assert_eq!(config, SeederConfig::default());
    }

    #[test]
    fn test_overrides_applied() {
        let cli = TestCli::try_parse_from([
            "test",
            "--seed",
            "9",
            "--accounts",
            "10",
            "--posts-per-thread",
            "0..2",
            "--rollback",
            "--migrations-dir",
            "/tmp/m",
        ])
        .unwrap();

        let config = cli.common.load_config().unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!((config.min_account_count, config.max_account_count), (10, 10));
        assert_eq!((config.min_post_per_thread, config.max_post_per_thread), (0, 2));
        assert!(cli.migrations.rollback);
        assert_eq!(cli.migrations.migrations_dir, PathBuf::from("/tmp/m"));
    }

    #[test]
    fn test_invalid_range_rejected_by_clap() {
        let result = TestCli::try_parse_from(["test", "--articles", "9..1"]);
        assert!(result.is_err());
    }
}
