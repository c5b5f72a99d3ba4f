use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;

const BUSY_TIMEOUT_MS: i64 = 2_000;

/// Opens (creating if needed) the lead database at `path`. The file is
/// owner-only because it holds contact details.
pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }
    configure(&conn, true)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn, false)?;
    Ok(conn)
}

fn configure(conn: &Connection, on_disk: bool) -> Result<()> {
    // Interactions cascade and assignments null out through foreign keys.
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.pragma_update(None, "busy_timeout", BUSY_TIMEOUT_MS)?;
    if on_disk {
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
    }
    Ok(())
}
