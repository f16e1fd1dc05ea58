//! Synthetic forum data generator.
//!
//! This crate provides the [`Seeder`], which produces a deterministic,
//! foreign-key consistent [`seed_core::SeedDataset`] from a [`SeederConfig`].
//! Every random draw goes through one seeded `StdRng`, so the same seed yields
//! the same accounts, threads and posts run after run.
//!
//! # Architecture
//!
//! ```text
//! SeederConfig (YAML or defaults)
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │       Seeder         │
//! │                      │
//! │  - rng (StdRng)      │      lorem    ── words, sentences, paragraphs
//! │  - id sequences      │ ───▶ ident    ── slugs, usernames, emails
//! │  - identity index    │      resolve  ── weighted enum variants
//! │  - board/thread      │      random   ── weighted and uniform picks
//! │    weight tables     │
//! └──────────┬───────────┘
//!            │  accounts → boards → articles → threads → posts
//!            ▼
//!       SeedDataset
//! ```
//!
//! # Example
//!
//! ```rust
//! use seed_generator::{Seeder, SeederConfig};
//!
//! let config = SeederConfig::default()
//!     .with_account_count(10, 10)
//!     .with_thread_per_board(2, 2)
//!     .with_post_per_thread(0, 0);
//!
//! let mut seeder = Seeder::new(config).unwrap();
//! let summary = seeder.run().unwrap();
//!
//! assert_eq!(summary.accounts, 13);
//! assert_eq!(summary.posts, summary.threads);
//! ```

pub mod config;
pub mod error;
pub mod ident;
pub mod identity;
pub mod lorem;
pub mod random;
pub mod resolve;
pub mod seeder;
pub mod summary;

// Re-exports for convenience
pub use config::{default_accounts, default_boards, SeedAccount, SeedBoard, SeederConfig};
pub use error::GeneratorError;
pub use lorem::{Lorem, LoremConfig};
pub use random::WeightedList;
pub use resolve::{RandomVariant, WeightedVariant};
pub use seeder::{Phase, Seeder};
pub use summary::SeedSummary;
