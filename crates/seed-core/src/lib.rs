//! Core types for the board seeder.
//!
//! This crate provides the foundational types shared by the generator and
//! every storage backend:
//!
//! - [`enums`] - closed domain enumerations with a central ordinal table
//! - [`models`] - entities produced by a seed run
//! - [`SeedDataset`] - the complete, dependency-ordered output of a run
//!
//! # Architecture
//!
//! ```text
//! seed-core (this crate)
//!    │
//!    ├─── seed-generator            (builds a SeedDataset from a seeded RNG)
//!    │
//!    └─── seed-populate-postgresql  (bulk-copies a SeedDataset into PostgreSQL)
//! ```

pub mod enums;
pub mod models;

// Re-exports for convenience
pub use enums::{
    AccountRole, AccountStatus, ArticleStatus, EnumError, IdentityStatus, IdentityStyle, SeedEnum,
    ThreadRole, ThreadStatus,
};
pub use models::{
    Account, Article, ArticleContent, Board, EntityId, Identity, IdentityPost, Post, PostContent,
    SeedDataset, Sequence, Thread,
};
