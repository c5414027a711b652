//! Schema migration registry for the parcel store.
//!
//! # Invariants
//! - `version` values are strictly increasing.
//! - All pending migrations commit in one transaction, together with the
//!   matching `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Returns the newest schema version this build understands.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the database from its `user_version` up to `latest_version()`.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = schema_version(conn)?;
    let pending = pending_after(from)?;
    let Some(last) = pending.last() else {
        return Ok(());
    };

    let tx = conn.transaction()?;
    pending.iter().try_for_each(|migration| run(&tx, migration))?;
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from} to_version={} applied={}",
        last.version,
        pending.len()
    );
    Ok(())
}

fn schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
}

/// Migrations newer than `version`; a database ahead of this build is an error.
fn pending_after(version: u32) -> DbResult<&'static [Migration]> {
    let latest = latest_version();
    if version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: version,
            latest_supported: latest,
        });
    }
    let start = MIGRATIONS.partition_point(|migration| migration.version <= version);
    Ok(&MIGRATIONS[start..])
}

fn run(tx: &Transaction<'_>, migration: &Migration) -> rusqlite::Result<()> {
    tx.execute_batch(migration.sql)?;
    tx.pragma_update(None, "user_version", migration.version)
}

#[cfg(test)]
mod tests {
    use super::{latest_version, pending_after, MIGRATIONS};
    use crate::db::DbError;

    #[test]
    fn versions_are_strictly_increasing_from_one() {
        assert_eq!(MIGRATIONS.first().map(|m| m.version), Some(1));
        assert!(MIGRATIONS.windows(2).all(|pair| pair[0].version < pair[1].version));
    }

    #[test]
    fn pending_after_selects_only_newer_migrations() {
        assert_eq!(pending_after(0).unwrap().len(), MIGRATIONS.len());
        assert!(pending_after(latest_version()).unwrap().is_empty());
    }

    #[test]
    fn pending_after_rejects_future_versions() {
        assert!(matches!(
            pending_after(latest_version() + 1),
            Err(DbError::UnsupportedSchemaVersion { .. })
        ));
    }
}
