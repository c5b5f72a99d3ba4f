use crate::domain::ids::{LeadId, TeamMemberId};
use crate::domain::interaction::Interaction;
use crate::domain::team::TeamMember;
use crate::error::CoreError;
use crate::rules::score::{Score, ScoreBucket, ScoreTier};
use crate::rules::status::{LeadStatus, StatusChange, StatusSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub status: LeadStatus,
    pub score: Score,
    pub source: String,
    pub notes: Option<String>,
    pub assigned_to: Option<TeamMemberId>,
    pub created_at: i64,
    pub updated_at: i64,
    /// Newest first. Display copy only; the collaborator holds the record.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

impl Lead {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    pub fn bucket(&self) -> ScoreBucket {
        self.score.bucket()
    }

    pub fn tier(&self) -> ScoreTier {
        self.score.tier()
    }

    pub fn last_contacted_at(&self) -> Option<i64> {
        self.interactions
            .iter()
            .map(|interaction| interaction.created_at)
            .max()
    }

    /// Records a transition to any value of `statuses`. The lead is left
    /// untouched when `raw` is not part of the enumeration.
    pub fn set_status(
        &mut self,
        statuses: &StatusSet,
        raw: &str,
        now_utc: i64,
    ) -> Result<StatusChange, CoreError> {
        let next = statuses.parse(raw)?;
        let from = std::mem::replace(&mut self.status, next.clone());
        self.touch(now_utc);
        Ok(StatusChange {
            from,
            to: next,
            at: self.updated_at,
        })
    }

    pub fn set_score(&mut self, value: i64, now_utc: i64) -> Result<Score, CoreError> {
        let score = Score::new(value)?;
        self.score = score;
        self.touch(now_utc);
        Ok(score)
    }

    pub fn assign(&mut self, member: &TeamMember, now_utc: i64) -> Result<(), CoreError> {
        if !member.is_active {
            return Err(CoreError::InactiveAssignee(member.id));
        }
        self.assigned_to = Some(member.id);
        self.touch(now_utc);
        Ok(())
    }

    pub fn unassign(&mut self, now_utc: i64) {
        self.assigned_to = None;
        self.touch(now_utc);
    }

    fn touch(&mut self, now_utc: i64) {
        self.updated_at = self.updated_at.max(now_utc);
    }
}

/// A validated creation request. `score` is `None` when the collaborator
/// should score the lead itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadNew {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub status: LeadStatus,
    pub score: Option<Score>,
    pub source: String,
    pub notes: Option<String>,
    pub assigned_to: Option<TeamMemberId>,
}

/// Partial update. The outer `Option` marks presence; an inner `None`
/// clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub company: Option<Option<String>>,
    pub title: Option<Option<String>>,
    pub status: Option<LeadStatus>,
    pub score: Option<Score>,
    pub source: Option<String>,
    pub notes: Option<Option<String>>,
    pub assigned_to: Option<Option<TeamMemberId>>,
}

impl LeadUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.company.is_none()
            && self.title.is_none()
            && self.status.is_none()
            && self.score.is_none()
            && self.source.is_none()
            && self.notes.is_none()
            && self.assigned_to.is_none()
    }

    /// Applies the update to an in-memory snapshot.
    pub fn apply_to(self, lead: &mut Lead, now_utc: i64) {
        if let Some(value) = self.first_name {
            lead.first_name = value;
        }
        if let Some(value) = self.last_name {
            lead.last_name = value;
        }
        if let Some(value) = self.email {
            lead.email = value;
        }
        if let Some(value) = self.phone {
            lead.phone = value;
        }
        if let Some(value) = self.company {
            lead.company = value;
        }
        if let Some(value) = self.title {
            lead.title = value;
        }
        if let Some(value) = self.status {
            lead.status = value;
        }
        if let Some(value) = self.score {
            lead.score = value;
        }
        if let Some(value) = self.source {
            lead.source = value;
        }
        if let Some(value) = self.notes {
            lead.notes = value;
        }
        if let Some(value) = self.assigned_to {
            lead.assigned_to = value;
        }
        lead.touch(now_utc);
    }
}
