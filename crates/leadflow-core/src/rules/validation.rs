use crate::domain::{is_valid_email, is_valid_phone, normalize_email, LeadNew, LeadUpdate, TeamMemberId};
use crate::rules::score::Score;
use crate::rules::status::{LeadStatus, StatusSet};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_SOURCE: &str = "unknown";

/// Raw lead fields as they arrive from a form, a command line or an
/// import row. Nothing here is trusted until it passes [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadCandidate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub score: Option<String>,
    pub status: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub field_errors: Vec<FieldError>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.field_errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                field_errors: self.field_errors,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field_errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(error: FieldError) -> Self {
        Self {
            field_errors: vec![error],
        }
    }

    /// All field reasons in field order, joined with `"; "`.
    pub fn reason(&self) -> String {
        self.field_errors
            .iter()
            .map(|error| error.reason.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

impl std::error::Error for ValidationError {}

/// Shared by single creation and bulk import so both paths reject exactly
/// the same input.
pub fn validate(candidate: &LeadCandidate, statuses: &StatusSet) -> Validation {
    match candidate.to_lead_new(statuses) {
        Ok(_) => Validation::default(),
        Err(err) => Validation {
            field_errors: err.field_errors,
        },
    }
}

impl LeadCandidate {
    pub fn to_lead_new(&self, statuses: &StatusSet) -> Result<LeadNew, ValidationError> {
        let mut errors = Vec::new();

        let first_name = required(&self.first_name, "first_name", "first name is required", &mut errors);
        let last_name = required(&self.last_name, "last_name", "last name is required", &mut errors);
        let email = match present(&self.email) {
            None => {
                errors.push(FieldError::new("email", "email is required"));
                None
            }
            Some(value) => checked_email(value, &mut errors),
        };
        let phone = present(&self.phone).and_then(|value| checked_phone(value, &mut errors));
        let score = present(&self.score).and_then(|value| checked_score(value, &mut errors));
        let status = present(&self.status).and_then(|value| checked_status(value, statuses, &mut errors));
        let assigned_to =
            present(&self.assigned_to).and_then(|value| checked_member(value, &mut errors));

        match (first_name, last_name, email) {
            (Some(first_name), Some(last_name), Some(email)) if errors.is_empty() => Ok(LeadNew {
                first_name,
                last_name,
                email,
                phone,
                company: present(&self.company).map(str::to_string),
                title: present(&self.title).map(str::to_string),
                status: status.unwrap_or_else(|| statuses.initial().clone()),
                score,
                source: present(&self.source).unwrap_or(DEFAULT_SOURCE).to_string(),
                notes: present(&self.notes).map(str::to_string),
                assigned_to,
            }),
            _ => Err(ValidationError {
                field_errors: errors,
            }),
        }
    }

    /// Builds a partial update from the fields that are present. A blank
    /// value clears an optional field; required fields cannot be cleared.
    pub fn to_lead_update(&self, statuses: &StatusSet) -> Result<LeadUpdate, ValidationError> {
        let mut errors = Vec::new();
        let mut update = LeadUpdate::default();

        if self.first_name.is_some() {
            update.first_name =
                required(&self.first_name, "first_name", "first name is required", &mut errors);
        }
        if self.last_name.is_some() {
            update.last_name =
                required(&self.last_name, "last_name", "last name is required", &mut errors);
        }
        if self.email.is_some() {
            update.email = match present(&self.email) {
                None => {
                    errors.push(FieldError::new("email", "email is required"));
                    None
                }
                Some(value) => checked_email(value, &mut errors),
            };
        }
        if self.phone.is_some() {
            update.phone = Some(present(&self.phone).and_then(|value| checked_phone(value, &mut errors)));
        }
        if self.company.is_some() {
            update.company = Some(present(&self.company).map(str::to_string));
        }
        if self.title.is_some() {
            update.title = Some(present(&self.title).map(str::to_string));
        }
        if self.notes.is_some() {
            update.notes = Some(present(&self.notes).map(str::to_string));
        }
        if self.source.is_some() {
            update.source = Some(present(&self.source).unwrap_or(DEFAULT_SOURCE).to_string());
        }
        if let Some(value) = present(&self.score) {
            update.score = checked_score(value, &mut errors);
        }
        if let Some(value) = present(&self.status) {
            update.status = checked_status(value, statuses, &mut errors);
        }
        if self.assigned_to.is_some() {
            update.assigned_to =
                Some(present(&self.assigned_to).and_then(|value| checked_member(value, &mut errors)));
        }

        if errors.is_empty() {
            Ok(update)
        } else {
            Err(ValidationError {
                field_errors: errors,
            })
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn required(
    value: &Option<String>,
    field: &'static str,
    reason: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match present(value) {
        Some(value) => Some(value.to_string()),
        None => {
            errors.push(FieldError::new(field, reason));
            None
        }
    }
}

fn checked_email(value: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    if !is_valid_email(value) {
        errors.push(FieldError::new("email", "invalid email"));
        return None;
    }
    normalize_email(value)
}

fn checked_phone(value: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    if !is_valid_phone(value) {
        errors.push(FieldError::new("phone", "invalid phone"));
        return None;
    }
    Some(value.to_string())
}

fn checked_score(value: &str, errors: &mut Vec<FieldError>) -> Option<Score> {
    let Ok(parsed) = value.parse::<i64>() else {
        errors.push(FieldError::new("score", "score must be a number"));
        return None;
    };
    match Score::new(parsed) {
        Ok(score) => Some(score),
        Err(_) => {
            errors.push(FieldError::new("score", "score must be between 0 and 100"));
            None
        }
    }
}

fn checked_status(
    value: &str,
    statuses: &StatusSet,
    errors: &mut Vec<FieldError>,
) -> Option<LeadStatus> {
    match statuses.parse(value) {
        Ok(status) => Some(status),
        Err(_) => {
            errors.push(FieldError::new("status", "invalid status"));
            None
        }
    }
}

fn checked_member(value: &str, errors: &mut Vec<FieldError>) -> Option<TeamMemberId> {
    match value.parse::<TeamMemberId>() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(FieldError::new("assigned_to", "invalid team member id"));
            None
        }
    }
}
