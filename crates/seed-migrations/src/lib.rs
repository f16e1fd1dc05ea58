//! SQL migration loading.
//!
//! A migrations directory holds one subdirectory per migration, named with a
//! five-digit index and a free-form name:
//!
//! ```text
//! migrations/
//!   00001_lookup_tables/
//!     up.sql
//!     down.sql
//!   00002_accounts/
//!     up.sql
//!     down.sql
//!     transitory.sql     (optional, deferred until after seeding)
//! ```
//!
//! Loading only reads files; executing the scripts is up to the storage
//! backend.

pub mod error;
pub mod migration;

pub use error::MigrationError;
pub use migration::{parse_dir_name, Migration, MigrationSet};
