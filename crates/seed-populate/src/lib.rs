//! Common types and utilities for seeding backends.
//!
//! This crate provides the argument types shared by every `seed-populate-*`
//! crate, so each backend exposes the same generation and migration flags.

pub mod args;

pub use args::{CommonSeedArgs, CountRange, MigrationArgs};
