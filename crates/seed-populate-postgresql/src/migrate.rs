//! Running migration scripts against a store.
//!
//! `up` scripts run in ascending index order. Transitory scripts are held back
//! and run by [`finalize`] once seeding is done, so constraints are only
//! checked against the finished dataset.

use crate::error::PostgreSQLSeederError;
use crate::store::SeedStore;
use seed_migrations::{Migration, MigrationSet};
use tracing::info;

async fn run_script<S: SeedStore + ?Sized>(
    store: &mut S,
    migration: &Migration,
    script: &'static str,
    sql: &str,
) -> Result<(), PostgreSQLSeederError> {
    store
        .execute(sql)
        .await
        .map_err(|e| PostgreSQLSeederError::MigrationScript {
            migration: migration.dir_name(),
            script,
            message: e.to_string(),
        })
}

/// Run every `down.sql`, newest migration first.
pub async fn rollback<S: SeedStore + ?Sized>(
    store: &mut S,
    migrations: &MigrationSet,
) -> Result<usize, PostgreSQLSeederError> {
    info!("Rolling back migrations...");
    let mut count = 0;
    for migration in migrations.rollback_order() {
        if let Some(down) = &migration.down {
            run_script(store, migration, "down.sql", down).await?;
            count += 1;
        }
    }
    Ok(count)
}

/// Run every `up.sql` in order, optionally rolling back first.
///
/// Returns the number of `up` scripts executed.
pub async fn migrate<S: SeedStore + ?Sized>(
    store: &mut S,
    migrations: &MigrationSet,
    rollback_first: bool,
) -> Result<usize, PostgreSQLSeederError> {
    if rollback_first {
        rollback(store, migrations).await?;
    }

    info!("Running {} migrations...", migrations.len());
    for migration in migrations.iter() {
        run_script(store, migration, "up.sql", &migration.up).await?;
    }

    let deferred = migrations.deferred().count();
    info!("Migrations finished ({} deferred)", deferred);
    Ok(migrations.len())
}

/// Run the deferred transitory scripts, oldest migration first.
pub async fn finalize<S: SeedStore + ?Sized>(
    store: &mut S,
    migrations: &MigrationSet,
) -> Result<usize, PostgreSQLSeederError> {
    let mut count = 0;
    for migration in migrations.deferred() {
        if let Some(sql) = &migration.transitory {
            run_script(store, migration, "transitory.sql", sql).await?;
            count += 1;
        }
    }
    if count > 0 {
        info!("Ran {} deferred migrations", count);
    }
    Ok(count)
}
