use crate::domain::TeamMemberId;
use crate::rules::validation::ValidationError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid status: {0}")]
    InvalidStatus(String),
    #[error("invalid score: {0} (expected 0-100)")]
    InvalidScore(i64),
    #[error("invalid status set: {0}")]
    InvalidStatusSet(String),
    #[error("invalid interaction type: {0}")]
    InvalidInteractionKind(String),
    #[error("invalid team role: {0}")]
    InvalidTeamRole(String),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("team member {0} is inactive and cannot take new leads")]
    InactiveAssignee(TeamMemberId),
}
