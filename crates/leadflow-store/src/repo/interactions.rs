use crate::error::{Result, StoreError};
use crate::repo::team::ensure_member_exists;
use crate::temp_table::TempLeadIdTable;
use leadflow_core::{Interaction, InteractionId, InteractionKind, InteractionNew, LeadId, TeamMemberId};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::str::FromStr;

const INTERACTION_COLUMNS: &str = "interactions.id, interactions.lead_id, interactions.author_id, interactions.kind, interactions.subject, interactions.content, interactions.created_at";

pub struct InteractionsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> InteractionsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Appends an interaction. The lead and the author, if any, must exist.
    pub fn add(&self, now_utc: i64, lead_id: LeadId, input: InteractionNew) -> Result<Interaction> {
        let input = input.normalized()?;

        let lead_exists: Option<i64> = self
            .conn
            .query_row("SELECT id FROM leads WHERE id = ?1;", [lead_id.get()], |row| {
                row.get(0)
            })
            .optional()?;
        if lead_exists.is_none() {
            return Err(StoreError::NotFound {
                entity: "lead",
                id: lead_id.get(),
            });
        }
        if let Some(author) = input.author_id {
            ensure_member_exists(self.conn, author)?;
        }

        self.conn.execute(
            "INSERT INTO interactions (lead_id, author_id, kind, subject, content, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                lead_id.get(),
                input.author_id.map(|id| id.get()),
                input.kind.as_str(),
                input.subject,
                input.content,
                now_utc,
            ],
        )?;

        Ok(Interaction {
            id: InteractionId(self.conn.last_insert_rowid()),
            lead_id,
            author_id: input.author_id,
            kind: input.kind,
            subject: input.subject,
            content: input.content,
            created_at: now_utc,
        })
    }

    /// Newest first.
    pub fn list_for_lead(&self, lead_id: LeadId) -> Result<Vec<Interaction>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INTERACTION_COLUMNS}
             FROM interactions
             WHERE lead_id = ?1
             ORDER BY created_at DESC, id DESC;"
        ))?;
        let mut rows = stmt.query([lead_id.get()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(interaction_from_row(row)?);
        }
        Ok(items)
    }

    pub fn list_for_leads(&self, lead_ids: &[LeadId]) -> Result<HashMap<LeadId, Vec<Interaction>>> {
        let mut map: HashMap<LeadId, Vec<Interaction>> = HashMap::new();
        if lead_ids.is_empty() {
            return Ok(map);
        }

        let temp_table = TempLeadIdTable::create(self.conn, lead_ids)?;
        let temp_table_name = temp_table.name();

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INTERACTION_COLUMNS}
             FROM interactions
             INNER JOIN {temp_table_name} tmp ON tmp.id = interactions.lead_id
             ORDER BY interactions.lead_id ASC,
                      interactions.created_at DESC,
                      interactions.id DESC;"
        ))?;

        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let interaction = interaction_from_row(row)?;
            map.entry(interaction.lead_id)
                .or_default()
                .push(interaction);
        }

        Ok(map)
    }
}

fn interaction_from_row(row: &rusqlite::Row<'_>) -> Result<Interaction> {
    let kind_raw: String = row.get(3)?;
    let kind = InteractionKind::from_str(&kind_raw)
        .map_err(|_| StoreError::InvalidStoredValue(format!("interaction kind {kind_raw}")))?;
    let author: Option<i64> = row.get(2)?;
    Ok(Interaction {
        id: InteractionId(row.get(0)?),
        lead_id: LeadId(row.get(1)?),
        author_id: author.map(TeamMemberId),
        kind,
        subject: row.get(4)?,
        content: row.get(5)?,
        created_at: row.get(6)?,
    })
}
