use leadflow_core::filter::LeadFilter;
use leadflow_core::{LeadStatus, TeamMemberId};
use rusqlite::types::Value;

pub(crate) const LEAD_COLUMNS: &str = "id, first_name, last_name, email, phone, company, title, status, score, source, notes, assigned_to, created_at, updated_at";

/// SQL form of the exact-match selectors of a [`LeadFilter`]. Every
/// predicate is ANDed and rows come back in id order. Free text stays out:
/// SQLite `LIKE` only folds ASCII case, so the text match runs in memory
/// where it folds the full Unicode range.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LeadQuery {
    pub status: Option<LeadStatus>,
    pub assigned_to: Option<TeamMemberId>,
    pub source: Option<String>,
    pub score_range: Option<(u8, u8)>,
}

pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl LeadQuery {
    pub fn from_filter(filter: &LeadFilter) -> Self {
        Self {
            status: filter.status.clone(),
            assigned_to: filter.assigned_to,
            source: filter.source().map(str::to_string),
            score_range: filter.score_range(),
        }
    }

    pub fn to_sql(&self) -> SqlQuery {
        let mut clauses: Vec<&str> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(status) = &self.status {
            clauses.push("status = ?");
            params.push(Value::from(status.as_str().to_string()));
        }

        if let Some(member) = self.assigned_to {
            clauses.push("assigned_to = ?");
            params.push(Value::from(member.get()));
        }

        if let Some(source) = &self.source {
            clauses.push("source = ?");
            params.push(Value::from(source.clone()));
        }

        if let Some((low, high)) = self.score_range {
            clauses.push("score BETWEEN ? AND ?");
            params.push(Value::from(i64::from(low)));
            params.push(Value::from(i64::from(high)));
        }

        let mut sql = format!("SELECT {LEAD_COLUMNS} FROM leads");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id ASC;");

        SqlQuery { sql, params }
    }
}
