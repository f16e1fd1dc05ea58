//! Seeder configuration.
//!
//! Every bound is a named field with a default; a YAML file may override any
//! subset of them:
//!
//! ```yaml
//! seed: 7
//! min_account_count: 10
//! max_account_count: 10
//! boards:
//!   - title: general
//!     short: gen
//!     description: general discussion
//! ```

use crate::error::GeneratorError;
use seed_core::AccountRole;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default RNG seed (same seed = same data).
pub const DEFAULT_SEED: u64 = 42;

/// A fixed account created at the start of every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedAccount {
    pub username: String,
    pub email: String,
    pub role: AccountRole,
}

impl SeedAccount {
    fn new(username: &str, email: &str, role: AccountRole) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            role,
        }
    }
}

/// A fixed board created at the start of every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedBoard {
    pub title: String,
    pub short: String,
    pub description: String,
}

impl SeedBoard {
    fn new(title: &str, short: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            short: short.to_string(),
            description: description.to_string(),
        }
    }
}

/// Accounts every run starts with.
pub fn default_accounts() -> Vec<SeedAccount> {
    vec![
        SeedAccount::new("supafiya", "devduncan89@gmail.com", AccountRole::Super),
        SeedAccount::new("nyronic", "nyronic@gmail.com", AccountRole::Admin),
        SeedAccount::new("cherio", "chz0z@yahoo.com", AccountRole::Admin),
    ]
}

/// Boards every run starts with.
pub fn default_boards() -> Vec<SeedBoard> {
    vec![
        SeedBoard::new("general", "gen", "general discussion on general topics, generally."),
        SeedBoard::new("mathematics", "math", "do some cool algebra stuff"),
        SeedBoard::new("science", "sci", "talk about science and stuff"),
        SeedBoard::new("technology", "tech", "talk about technology and stuff"),
        SeedBoard::new("politics", "pol", "talk about politics and stuff"),
        SeedBoard::new("history", "hist", "talk about history and stuff"),
        SeedBoard::new("cinema", "mov", "talk about movies n stuff"),
        SeedBoard::new("music", "mus", "talk about music n stuff"),
        SeedBoard::new("literature", "lit", "talk about books n stuff"),
        SeedBoard::new("art", "art", "talk about art n stuff"),
        SeedBoard::new("random", "rng", "youll never know what youll get"),
    ]
}

/// Bounds and fixed tables for a seed run.
///
/// Count bounds are half-open `[min, max)`; `min == max` means exactly `min`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeederConfig {
    /// Random seed for deterministic generation
    pub seed: u64,

    pub min_account_count: usize,
    pub max_account_count: usize,

    pub min_article_count: usize,
    pub max_article_count: usize,

    pub min_thread_per_board: usize,
    pub max_thread_per_board: usize,

    pub min_post_per_thread: usize,
    pub max_post_per_thread: usize,

    /// Fixed accounts created before the random ones
    pub accounts: Vec<SeedAccount>,

    /// Fixed boards; boards are never randomized
    pub boards: Vec<SeedBoard>,
}

impl Default for SeederConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            min_account_count: 100,
            max_account_count: 200,
            min_article_count: 20,
            max_article_count: 100,
            min_thread_per_board: 50,
            max_thread_per_board: 200,
            min_post_per_thread: 3,
            max_post_per_thread: 100,
            accounts: default_accounts(),
            boards: default_boards(),
        }
    }
}

impl SeederConfig {
    /// Parse a configuration from YAML. Missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, GeneratorError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GeneratorError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_account_count(mut self, min: usize, max: usize) -> Self {
        self.min_account_count = min;
        self.max_account_count = max;
        self
    }

    pub fn with_article_count(mut self, min: usize, max: usize) -> Self {
        self.min_article_count = min;
        self.max_article_count = max;
        self
    }

    pub fn with_thread_per_board(mut self, min: usize, max: usize) -> Self {
        self.min_thread_per_board = min;
        self.max_thread_per_board = max;
        self
    }

    pub fn with_post_per_thread(mut self, min: usize, max: usize) -> Self {
        self.min_post_per_thread = min;
        self.max_post_per_thread = max;
        self
    }

    pub fn with_accounts(mut self, accounts: Vec<SeedAccount>) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn with_boards(mut self, boards: Vec<SeedBoard>) -> Self {
        self.boards = boards;
        self
    }

    /// Check that every bound is ordered and board codes are unique.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        let bounds = [
            ("account count", self.min_account_count, self.max_account_count),
            ("article count", self.min_article_count, self.max_article_count),
            ("threads per board", self.min_thread_per_board, self.max_thread_per_board),
            ("posts per thread", self.min_post_per_thread, self.max_post_per_thread),
        ];
        for (name, min, max) in bounds {
            if min > max {
                return Err(GeneratorError::Config(format!(
                    "{name}: min ({min}) is greater than max ({max})"
                )));
            }
        }

        if self.max_article_count > 0 && !self.has_fixed_admin() {
            return Err(GeneratorError::Config(
                "articles requested but no seed account has an admin role".to_string(),
            ));
        }

        for (i, board) in self.boards.iter().enumerate() {
            if self.boards[..i].iter().any(|b| b.short == board.short) {
                return Err(GeneratorError::Config(format!(
                    "duplicate board short code '{}'",
                    board.short
                )));
            }
        }

        Ok(())
    }

    /// Whether the fixed account table alone guarantees an article author.
    pub fn has_fixed_admin(&self) -> bool {
        self.accounts.iter().any(|a| a.role.is_admin())
    }
}
