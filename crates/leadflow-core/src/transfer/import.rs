use crate::domain::{LeadNew, TeamMember, TeamMemberId};
use crate::error::CoreError;
use crate::gateway::{GatewayError, LeadGateway};
use crate::rules::{LeadCandidate, StatusSet};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),
    #[error("invalid header row: {0}")]
    Header(#[source] csv::Error),
}

/// A row that did not make it into the lead collection. `row` counts data
/// rows from 1; the header is not a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRowError {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub success: usize,
    pub failed: usize,
    pub failures: Vec<ImportRowError>,
}

impl ImportReport {
    fn fail(&mut self, row: usize, reason: impl Into<String>) {
        self.failed += 1;
        self.failures.push(ImportRowError {
            row,
            reason: reason.into(),
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    FirstName,
    LastName,
    Email,
    Phone,
    Company,
    Title,
    Source,
    Notes,
    Score,
    Status,
    AssignedTo,
}

fn column_for(header: &str) -> Option<Column> {
    let key: String = header
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .map(|ch| ch.to_ascii_lowercase())
        .collect();
    let column = match key.as_str() {
        "firstname" | "first" | "givenname" => Column::FirstName,
        "lastname" | "last" | "surname" | "familyname" => Column::LastName,
        "email" | "emailaddress" => Column::Email,
        "phone" | "phonenumber" | "mobile" => Column::Phone,
        "company" | "companyname" | "organization" | "organisation" => Column::Company,
        "title" | "jobtitle" | "position" => Column::Title,
        "source" | "leadsource" => Column::Source,
        "notes" | "note" => Column::Notes,
        "score" | "leadscore" => Column::Score,
        "status" | "leadstatus" => Column::Status,
        "assignedto" | "assignee" | "owner" => Column::AssignedTo,
        _ => return None,
    };
    Some(column)
}

/// One parsed data row: either a candidate or the reason the row could not
/// be read at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub row: usize,
    pub candidate: Result<LeadCandidate, String>,
}

/// Splits a delimited payload into candidates. Unknown columns are ignored,
/// so an export can be fed straight back in.
pub fn parse_candidates(payload: &[u8]) -> Result<Vec<ParsedRow>, ImportError> {
    if payload.iter().all(|byte| byte.is_ascii_whitespace()) {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(payload);

    let columns: Vec<Option<Column>> = reader
        .headers()
        .map_err(ImportError::Header)?
        .iter()
        .map(column_for)
        .collect();
    if !columns.contains(&Some(Column::Email)) {
        return Err(ImportError::MissingColumn("email"));
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let candidate = match record {
            Ok(record) => {
                let mut candidate = LeadCandidate::default();
                for (column, value) in columns.iter().zip(record.iter()) {
                    if let Some(column) = column {
                        set_field(&mut candidate, *column, value);
                    }
                }
                Ok(candidate)
            }
            Err(err) => Err(format!("unreadable row: {err}")),
        };
        rows.push(ParsedRow { row, candidate });
    }
    Ok(rows)
}

fn set_field(candidate: &mut LeadCandidate, column: Column, value: &str) {
    let slot = match column {
        Column::FirstName => &mut candidate.first_name,
        Column::LastName => &mut candidate.last_name,
        Column::Email => &mut candidate.email,
        Column::Phone => &mut candidate.phone,
        Column::Company => &mut candidate.company,
        Column::Title => &mut candidate.title,
        Column::Source => &mut candidate.source,
        Column::Notes => &mut candidate.notes,
        Column::Score => &mut candidate.score,
        Column::Status => &mut candidate.status,
        Column::AssignedTo => &mut candidate.assigned_to,
    };
    // First non-empty column wins when a header is repeated.
    if slot.as_deref().map_or(true, str::is_empty) {
        *slot = Some(value.to_string());
    }
}

/// Validates every row on its own, submits the valid ones in one batch and
/// folds per-lead collaborator failures into the same report. A bad row
/// never stops the batch.
pub fn import_leads(
    gateway: &dyn LeadGateway,
    statuses: &StatusSet,
    payload: &[u8],
    now_utc: i64,
) -> Result<ImportReport, ImportError> {
    let rows = parse_candidates(payload)?;
    let mut report = ImportReport::default();
    let mut staged: Vec<(usize, LeadNew)> = Vec::new();

    for parsed in rows {
        let candidate = match parsed.candidate {
            Ok(candidate) => candidate,
            Err(reason) => {
                tracing::debug!(row = parsed.row, %reason, "import row rejected");
                report.fail(parsed.row, reason);
                continue;
            }
        };
        match candidate.to_lead_new(statuses) {
            Ok(lead) => staged.push((parsed.row, lead)),
            Err(err) => {
                let reason = err.reason();
                tracing::debug!(row = parsed.row, %reason, "import row rejected");
                report.fail(parsed.row, reason);
            }
        }
    }

    // Same assignee rule as single creation: known and active members only.
    if staged.iter().any(|(_, lead)| lead.assigned_to.is_some()) {
        let roster = gateway.list_team_members();
        staged.retain(|(row, lead)| {
            let Some(member_id) = lead.assigned_to else {
                return true;
            };
            match assignee_problem(&roster, member_id) {
                Some(reason) => {
                    tracing::debug!(row = *row, %reason, "import row rejected");
                    report.fail(*row, reason);
                    false
                }
                None => true,
            }
        });
    }

    if !staged.is_empty() {
        let expected = staged.len();
        let (staged_rows, staged): (Vec<usize>, Vec<LeadNew>) = staged.into_iter().unzip();
        let results = gateway.create_leads(staged, now_utc);
        if results.len() != expected {
            tracing::warn!(
                expected,
                returned = results.len(),
                "collaborator returned a mismatched batch result"
            );
        }
        let mut results = results.into_iter();
        for row in staged_rows {
            match results.next() {
                Some(Ok(_)) => report.success += 1,
                Some(Err(err)) => {
                    let reason = err.to_string();
                    tracing::debug!(row, %reason, "import row rejected by collaborator");
                    report.fail(row, reason);
                }
                None => report.fail(row, "no result from collaborator"),
            }
        }
    }

    report.failures.sort_by_key(|failure| failure.row);
    tracing::info!(
        success = report.success,
        failed = report.failed,
        "lead import finished"
    );
    Ok(report)
}

fn assignee_problem(
    roster: &Result<Vec<TeamMember>, GatewayError>,
    member_id: TeamMemberId,
) -> Option<String> {
    let members = match roster {
        Ok(members) => members,
        Err(err) => return Some(format!("cannot check assignee: {err}")),
    };
    match members.iter().find(|member| member.id == member_id) {
        None => Some(
            CoreError::NotFound {
                entity: "team member",
                id: member_id.get(),
            }
            .to_string(),
        ),
        Some(member) if !member.is_active => {
            Some(CoreError::InactiveAssignee(member_id).to_string())
        }
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_candidates, ImportError};
    use pretty_assertions::assert_eq;

    #[test]
    fn headers_match_loosely() {
        let payload = b"First Name,lastName,E-mail,Job Title,assigned_to,ignored\nAda,Lovelace,ada@example.com,CTO,3,x\n";
        let rows = parse_candidates(payload).unwrap();
        assert_eq!(rows.len(), 1);
        let candidate = rows[0].candidate.clone().unwrap();
        assert_eq!(candidate.first_name.as_deref(), Some("Ada"));
        assert_eq!(candidate.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(candidate.email.as_deref(), Some("ada@example.com"));
        assert_eq!(candidate.title.as_deref(), Some("CTO"));
        assert_eq!(candidate.assigned_to.as_deref(), Some("3"));
    }

    #[test]
    fn short_rows_leave_fields_empty() {
        let payload = b"first_name,last_name,email,company\nAda,Lovelace,ada@example.com\n";
        let rows = parse_candidates(payload).unwrap();
        let candidate = rows[0].candidate.clone().unwrap();
        assert_eq!(candidate.company, None);
        assert_eq!(rows[0].row, 1);
    }

    #[test]
    fn missing_email_column_fails_whole_import() {
        let err = parse_candidates(b"first_name,last_name\nAda,Lovelace\n").unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn("email")));
    }

    #[test]
    fn empty_payload_has_no_rows() {
        assert!(parse_candidates(b"").unwrap().is_empty());
        assert!(parse_candidates(b" \n ").unwrap().is_empty());
    }
}
