//! Migration units and the ordered set loaded from a directory.

use crate::error::MigrationError;
use std::fs;
use std::path::Path;
use tracing::debug;

const INDEX_WIDTH: usize = 5;

pub const UP_FILE: &str = "up.sql";
pub const DOWN_FILE: &str = "down.sql";
pub const TRANSITORY_FILE: &str = "transitory.sql";

/// One migration directory: `NNNNN_<name>/{up,down,transitory}.sql`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub index: u32,
    pub name: String,
    pub up: String,
    pub down: Option<String>,
    /// Deferred script, run only after every `up` script and the seed itself
    /// (typically constraint DDL).
    pub transitory: Option<String>,
}

impl Migration {
    pub fn new(index: u32, name: impl Into<String>, up: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            up: up.into(),
            down: None,
            transitory: None,
        }
    }

    pub fn with_down(mut self, down: impl Into<String>) -> Self {
        self.down = Some(down.into());
        self
    }

    pub fn with_transitory(mut self, transitory: impl Into<String>) -> Self {
        self.transitory = Some(transitory.into());
        self
    }

    /// Directory name this migration is loaded from.
    pub fn dir_name(&self) -> String {
        format!("{:0width$}_{}", self.index, self.name, width = INDEX_WIDTH)
    }

    /// Load a single migration directory.
    pub fn from_dir(path: &Path, index: u32, name: &str) -> Result<Self, MigrationError> {
        let entries = fs::read_dir(path).map_err(|e| MigrationError::io(path, e))?;

        let mut up = None;
        let mut down = None;
        let mut transitory = None;

        for entry in entries {
            let entry = entry.map_err(|e| MigrationError::io(path, e))?;
            let entry_path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| MigrationError::io(&entry_path, e))?;

            if file_type.is_dir() {
                return Err(MigrationError::UnexpectedDirectory(entry_path));
            }

            let slot = match entry.file_name().to_str() {
                Some(UP_FILE) => &mut up,
                Some(DOWN_FILE) => &mut down,
                Some(TRANSITORY_FILE) => &mut transitory,
                _ => return Err(MigrationError::UnexpectedFile(entry_path)),
            };
            let sql =
                fs::read_to_string(&entry_path).map_err(|e| MigrationError::io(&entry_path, e))?;
            *slot = Some(sql);
        }

        let up = up.ok_or_else(|| MigrationError::MissingUp(name.to_string()))?;

        Ok(Self {
            index,
            name: name.to_string(),
            up,
            down,
            transitory: transitory.filter(|sql| !sql.trim().is_empty()),
        })
    }
}

/// Split `NNNNN_<name>` into its index and name.
///
/// Returns `Ok(None)` for names that are not migrations at all (no leading
/// digit) and an error for names that look like a mistyped migration.
pub fn parse_dir_name(dir_name: &str) -> Result<Option<(u32, &str)>, MigrationError> {
    if !dir_name.starts_with(|c: char| c.is_ascii_digit()) {
        return Ok(None);
    }

    let bad = || MigrationError::BadIndex(dir_name.to_string());
    let (digits, rest) = dir_name.split_at_checked(INDEX_WIDTH).ok_or_else(bad)?;
    let name = rest.strip_prefix('_').ok_or_else(bad)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    let index = digits.parse().map_err(|_| bad())?;

    Ok(Some((index, name)))
}

/// Migrations ordered by ascending index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationSet {
    migrations: Vec<Migration>,
}

impl MigrationSet {
    /// Load every `NNNNN_<name>` subdirectory of `path`.
    ///
    /// Plain files and directories without a leading digit are skipped.
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self, MigrationError> {
        let path = path.as_ref();
        let entries = fs::read_dir(path).map_err(|e| MigrationError::io(path, e))?;

        let mut migrations = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| MigrationError::io(path, e))?;
            let entry_path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| MigrationError::io(&entry_path, e))?;

            let file_name = entry.file_name();
            let Some(dir_name) = file_name.to_str() else {
                debug!("Skipping non UTF-8 entry {}", entry_path.display());
                continue;
            };
            if !file_type.is_dir() {
                debug!("Skipping file {}", entry_path.display());
                continue;
            }

            match parse_dir_name(dir_name)? {
                Some((index, name)) => {
                    migrations.push(Migration::from_dir(&entry_path, index, name)?);
                }
                None => debug!("Skipping directory {}", entry_path.display()),
            }
        }

        let set = Self::from_migrations(migrations)?;
        debug!("Loaded {} migrations from {}", set.len(), path.display());
        Ok(set)
    }

    /// Build a set from already-loaded migrations, rejecting duplicate indexes.
    pub fn from_migrations(mut migrations: Vec<Migration>) -> Result<Self, MigrationError> {
        migrations.sort_by_key(|m| m.index);

        for pair in migrations.windows(2) {
            if pair[0].index == pair[1].index {
                return Err(MigrationError::DuplicateIndex {
                    index: pair[0].index,
                    first: pair[0].dir_name(),
                    second: pair[1].dir_name(),
                });
            }
        }

        Ok(Self { migrations })
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Migrations in the order their `up` scripts run.
    pub fn iter(&self) -> impl Iterator<Item = &Migration> {
        self.migrations.iter()
    }

    /// Migrations with a `down` script, newest first.
    pub fn rollback_order(&self) -> impl Iterator<Item = &Migration> {
        self.migrations.iter().rev().filter(|m| m.down.is_some())
    }

    /// Migrations with a deferred script, oldest first.
    pub fn deferred(&self) -> impl Iterator<Item = &Migration> {
        self.migrations.iter().filter(|m| m.transitory.is_some())
    }
}
