use crate::error::Result;
use leadflow_core::LeadId;
use rusqlite::{params, Connection};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TABLE: AtomicU64 = AtomicU64::new(1);

/// Lead ids staged in a temp table so a batch lookup can join against
/// them instead of binding one parameter per id. The table is dropped
/// with the guard.
pub(crate) struct TempLeadIdTable<'a> {
    conn: &'a Connection,
    name: String,
}

impl<'a> TempLeadIdTable<'a> {
    pub(crate) fn create(conn: &'a Connection, lead_ids: &[LeadId]) -> Result<Self> {
        let name = format!("temp.lead_ids_{}", NEXT_TABLE.fetch_add(1, Ordering::Relaxed));
        conn.execute_batch(&format!(
            "CREATE TEMP TABLE IF NOT EXISTS {name} (id INTEGER PRIMARY KEY);
             DELETE FROM {name};"
        ))?;
        // Constructed before filling so a failed insert still drops the table.
        let table = Self { conn, name };
        let mut insert = conn.prepare(&format!(
            "INSERT OR IGNORE INTO {} (id) VALUES (?1)",
            table.name
        ))?;
        for id in lead_ids {
            insert.execute(params![id.get()])?;
        }
        drop(insert);
        Ok(table)
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for TempLeadIdTable<'_> {
    fn drop(&mut self) {
        let _ = self
            .conn
            .execute_batch(&format!("DROP TABLE IF EXISTS {}", self.name));
    }
}

#[cfg(test)]
mod tests {
    use super::TempLeadIdTable;
    use leadflow_core::LeadId;
    use rusqlite::Connection;

    #[test]
    fn stages_distinct_ids_and_drops_on_scope_exit() {
        let conn = Connection::open_in_memory().unwrap();
        let name = {
            let table =
                TempLeadIdTable::create(&conn, &[LeadId(3), LeadId(1), LeadId(3)]).unwrap();
            let count: i64 = conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table.name()), [], |row| {
                    row.get(0)
                })
                .unwrap();
            assert_eq!(count, 2);
            table.name().to_string()
        };
        let remaining: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_temp_master WHERE name = ?1",
                [name.trim_start_matches("temp.")],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
