use crate::error::{Result, StoreError};
use leadflow_core::rules::{FieldError, ValidationError};
use leadflow_core::{is_valid_email, normalize_email, CoreError, TeamMember, TeamMemberId, TeamRole};
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct TeamMemberNew {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: TeamRole,
}

pub struct TeamRepo<'a> {
    conn: &'a Connection,
}

impl<'a> TeamRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn add(&self, input: TeamMemberNew) -> Result<TeamMember> {
        let first_name = input.first_name.trim().to_string();
        let last_name = input.last_name.trim().to_string();
        let mut errors = Vec::new();
        if first_name.is_empty() {
            errors.push(FieldError::new("first_name", "first name is required"));
        }
        if last_name.is_empty() {
            errors.push(FieldError::new("last_name", "last name is required"));
        }
        if !is_valid_email(&input.email) {
            errors.push(FieldError::new("email", "invalid email"));
        }
        let email = match normalize_email(&input.email) {
            Some(email) if errors.is_empty() => email,
            _ => {
                return Err(CoreError::Validation(ValidationError {
                    field_errors: errors,
                })
                .into())
            }
        };

        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM team_members WHERE email = ?1;",
                [&email],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(StoreError::DuplicateEmail(email));
        }

        self.conn.execute(
            "INSERT INTO team_members (first_name, last_name, email, role, is_active)
             VALUES (?1, ?2, ?3, ?4, 1);",
            params![first_name, last_name, email, input.role.as_str()],
        )?;
        Ok(TeamMember {
            id: TeamMemberId(self.conn.last_insert_rowid()),
            first_name,
            last_name,
            email,
            role: input.role,
            is_active: true,
        })
    }

    pub fn get(&self, id: TeamMemberId) -> Result<Option<TeamMember>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, first_name, last_name, email, role, is_active
             FROM team_members WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id.get()])?;
        match rows.next()? {
            Some(row) => Ok(Some(member_from_row(row)?)),
            None => Ok(None),
        }
    }

    pub fn list(&self) -> Result<Vec<TeamMember>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, first_name, last_name, email, role, is_active
             FROM team_members ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut members = Vec::new();
        while let Some(row) = rows.next()? {
            members.push(member_from_row(row)?);
        }
        Ok(members)
    }

    /// Deactivated members keep their existing assignments.
    pub fn set_active(&self, id: TeamMemberId, active: bool) -> Result<TeamMember> {
        let updated = self.conn.execute(
            "UPDATE team_members SET is_active = ?2 WHERE id = ?1;",
            params![id.get(), active],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound {
                entity: "team member",
                id: id.get(),
            });
        }
        self.get(id)?.ok_or(StoreError::NotFound {
            entity: "team member",
            id: id.get(),
        })
    }
}

pub(crate) fn ensure_member_exists(conn: &Connection, id: TeamMemberId) -> Result<()> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT id FROM team_members WHERE id = ?1;",
            [id.get()],
            |row| row.get(0),
        )
        .optional()?;
    match found {
        Some(_) => Ok(()),
        None => Err(StoreError::NotFound {
            entity: "team member",
            id: id.get(),
        }),
    }
}

fn member_from_row(row: &rusqlite::Row<'_>) -> Result<TeamMember> {
    let role_raw: String = row.get(4)?;
    let role = TeamRole::from_str(&role_raw)
        .map_err(|_| StoreError::InvalidStoredValue(format!("team role {role_raw}")))?;
    Ok(TeamMember {
        id: TeamMemberId(row.get(0)?),
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        role,
        is_active: row.get(5)?,
    })
}
