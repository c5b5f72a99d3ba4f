use crate::error::{Result, StoreError};
use rusqlite::Connection;

/// One forward-only schema step. Versions start at 1 and have no gaps.
struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "init",
    sql: include_str!("../migrations/001_init.sql"),
}];

/// Applies every pending migration in one transaction. The schema version
/// lives in SQLite's `user_version` header field.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    let current = read_version(&tx)?;
    let latest = latest_version();
    if current > latest {
        return Err(StoreError::Migration(format!(
            "database is at schema {current}, this build only knows up to {latest}"
        )));
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tracing::debug!(
            migration = migration.name,
            version = migration.version,
            "applying migration"
        );
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
    }

    tx.commit()?;
    Ok(())
}

pub fn schema_version(conn: &Connection) -> Result<i64> {
    read_version(conn)
}

pub fn latest_version() -> i64 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

fn read_version(conn: &Connection) -> Result<i64> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::{latest_version, run_migrations, schema_version, MIGRATIONS};
    use crate::error::StoreError;
    use rusqlite::Connection;

    #[test]
    fn versions_are_contiguous_from_one() {
        for (index, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version, index as i64 + 1, "{}", migration.name);
        }
    }

    #[test]
    fn fresh_database_reaches_latest() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 0);
        run_migrations(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), latest_version());
    }

    #[test]
    fn newer_database_is_refused() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", latest_version() + 1)
            .unwrap();
        let err = run_migrations(&conn).unwrap_err();
        assert!(matches!(err, StoreError::Migration(_)));
    }
}
