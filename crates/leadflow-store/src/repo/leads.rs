use crate::error::{Result, StoreError};
use crate::query::{LeadQuery, LEAD_COLUMNS};
use crate::repo::interactions::InteractionsRepo;
use crate::repo::team::ensure_member_exists;
use crate::scoring::score_lead;
use leadflow_core::{Lead, LeadId, LeadNew, LeadStatus, LeadUpdate, Score, TeamMemberId};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

pub struct LeadsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> LeadsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts a lead, scoring it by rule when no score was supplied.
    pub fn create(&self, now_utc: i64, input: LeadNew) -> Result<Lead> {
        let tx = self.conn.unchecked_transaction()?;
        let lead = create_inner(&tx, now_utc, input)?;
        tx.commit()?;
        Ok(lead)
    }

    /// With interactions attached, newest first.
    pub fn get(&self, id: LeadId) -> Result<Option<Lead>> {
        let Some(mut lead) = get_inner(self.conn, id)? else {
            return Ok(None);
        };
        lead.interactions = InteractionsRepo::new(self.conn).list_for_lead(id)?;
        Ok(Some(lead))
    }

    pub fn list(&self, query: &LeadQuery) -> Result<Vec<Lead>> {
        let compiled = query.to_sql();
        let mut stmt = self.conn.prepare(&compiled.sql)?;
        let mut rows = stmt.query(params_from_iter(compiled.params))?;
        let mut leads = Vec::new();
        while let Some(row) = rows.next()? {
            leads.push(lead_from_row(row)?);
        }

        let ids: Vec<LeadId> = leads.iter().map(|lead| lead.id).collect();
        let mut interactions = InteractionsRepo::new(self.conn).list_for_leads(&ids)?;
        for lead in &mut leads {
            if let Some(items) = interactions.remove(&lead.id) {
                lead.interactions = items;
            }
        }
        Ok(leads)
    }

    pub fn list_all(&self) -> Result<Vec<Lead>> {
        self.list(&LeadQuery::default())
    }

    pub fn update(&self, now_utc: i64, id: LeadId, update: LeadUpdate) -> Result<Lead> {
        let tx = self.conn.unchecked_transaction()?;
        update_inner(&tx, now_utc, id, update)?;
        tx.commit()?;
        self.get(id)?.ok_or(StoreError::NotFound {
            entity: "lead",
            id: id.get(),
        })
    }

    /// Interactions go with the lead.
    pub fn delete(&self, id: LeadId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM leads WHERE id = ?1;", [id.get()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound {
                entity: "lead",
                id: id.get(),
            });
        }
        Ok(())
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM leads;", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn create_inner(conn: &Connection, now_utc: i64, input: LeadNew) -> Result<Lead> {
    ensure_email_free(conn, &input.email, None)?;
    if let Some(member) = input.assigned_to {
        ensure_member_exists(conn, member)?;
    }

    let score = match input.score {
        Some(score) => score,
        None => score_lead(&input),
    };

    conn.execute(
        "INSERT INTO leads (first_name, last_name, email, phone, company, title, status, score, source, notes, assigned_to, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12);",
        params![
            input.first_name,
            input.last_name,
            input.email,
            input.phone,
            input.company,
            input.title,
            input.status.as_str(),
            i64::from(score),
            input.source,
            input.notes,
            input.assigned_to.map(|id| id.get()),
            now_utc,
        ],
    )?;

    Ok(Lead {
        id: LeadId(conn.last_insert_rowid()),
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        phone: input.phone,
        company: input.company,
        title: input.title,
        status: input.status,
        score,
        source: input.source,
        notes: input.notes,
        assigned_to: input.assigned_to,
        created_at: now_utc,
        updated_at: now_utc,
        interactions: Vec::new(),
    })
}

fn update_inner(conn: &Connection, now_utc: i64, id: LeadId, update: LeadUpdate) -> Result<()> {
    let mut lead = get_inner(conn, id)?.ok_or(StoreError::NotFound {
        entity: "lead",
        id: id.get(),
    })?;

    if let Some(email) = update.email.as_deref() {
        ensure_email_free(conn, email, Some(id))?;
    }
    if let Some(Some(member)) = update.assigned_to {
        ensure_member_exists(conn, member)?;
    }

    update.apply_to(&mut lead, now_utc);

    conn.execute(
        "UPDATE leads SET first_name = ?2, last_name = ?3, email = ?4, phone = ?5, company = ?6, title = ?7, status = ?8, score = ?9, source = ?10, notes = ?11, assigned_to = ?12, updated_at = ?13
         WHERE id = ?1;",
        params![
            lead.id.get(),
            lead.first_name,
            lead.last_name,
            lead.email,
            lead.phone,
            lead.company,
            lead.title,
            lead.status.as_str(),
            i64::from(lead.score),
            lead.source,
            lead.notes,
            lead.assigned_to.map(|member| member.get()),
            lead.updated_at,
        ],
    )?;
    Ok(())
}

fn ensure_email_free(conn: &Connection, email: &str, except: Option<LeadId>) -> Result<()> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM leads WHERE lower(email) = lower(?1);",
            [email],
            |row| row.get(0),
        )
        .optional()?;
    match existing {
        Some(found) if Some(LeadId(found)) != except => {
            Err(StoreError::DuplicateEmail(email.to_lowercase()))
        }
        _ => Ok(()),
    }
}

fn get_inner(conn: &Connection, id: LeadId) -> Result<Option<Lead>> {
    let mut stmt = conn.prepare(&format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?1;"))?;
    let mut rows = stmt.query([id.get()])?;
    match rows.next()? {
        Some(row) => Ok(Some(lead_from_row(row)?)),
        None => Ok(None),
    }
}

fn lead_from_row(row: &rusqlite::Row<'_>) -> Result<Lead> {
    let score_raw: i64 = row.get(8)?;
    let score = Score::new(score_raw)?;
    let status: String = row.get(7)?;
    let assigned: Option<i64> = row.get(11)?;
    Ok(Lead {
        id: LeadId(row.get(0)?),
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        company: row.get(5)?,
        title: row.get(6)?,
        status: LeadStatus::from_stored(status),
        score,
        source: row.get(9)?,
        notes: row.get(10)?,
        assigned_to: assigned.map(TeamMemberId),
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
        interactions: Vec::new(),
    })
}
