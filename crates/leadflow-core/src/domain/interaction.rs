use crate::domain::ids::{InteractionId, LeadId, TeamMemberId};
use crate::error::CoreError;
use crate::rules::validation::{FieldError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionKind {
    Email,
    Call,
    Meeting,
    Note,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 4] = [
        InteractionKind::Email,
        InteractionKind::Call,
        InteractionKind::Meeting,
        InteractionKind::Note,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Email => "EMAIL",
            InteractionKind::Call => "CALL",
            InteractionKind::Meeting => "MEETING",
            InteractionKind::Note => "NOTE",
        }
    }

    /// Past-tense description used by the activity feed.
    pub fn action_label(&self) -> &'static str {
        match self {
            InteractionKind::Email => "Email sent",
            InteractionKind::Call => "Call logged",
            InteractionKind::Meeting => "Meeting held",
            InteractionKind::Note => "Note added",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        InteractionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| CoreError::InvalidInteractionKind(s.trim().to_string()))
    }
}

/// Immutable once created; there is no update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: InteractionId,
    pub lead_id: LeadId,
    pub author_id: Option<TeamMemberId>,
    pub kind: InteractionKind,
    pub subject: Option<String>,
    pub content: String,
    pub created_at: i64,
}

impl Interaction {
    pub fn action_description(&self) -> String {
        match self.subject.as_deref() {
            Some(subject) => format!("{}: {}", self.kind.action_label(), subject),
            None => self.kind.action_label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionNew {
    pub author_id: Option<TeamMemberId>,
    pub kind: InteractionKind,
    pub subject: Option<String>,
    pub content: String,
}

impl InteractionNew {
    /// Trims text fields and rejects blank content.
    pub fn normalized(self) -> Result<Self, CoreError> {
        let content = self.content.trim().to_string();
        if content.is_empty() {
            return Err(
                ValidationError::single(FieldError::new("content", "content is required")).into(),
            );
        }
        let subject = self
            .subject
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Ok(Self {
            author_id: self.author_id,
            kind: self.kind,
            subject,
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Interaction, InteractionKind, InteractionNew};
    use crate::domain::{InteractionId, LeadId};
    use crate::error::CoreError;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("call".parse::<InteractionKind>().unwrap(), InteractionKind::Call);
        assert_eq!(" Meeting ".parse::<InteractionKind>().unwrap(), InteractionKind::Meeting);
        assert_eq!(
            "fax".parse::<InteractionKind>().unwrap_err(),
            CoreError::InvalidInteractionKind("fax".to_string())
        );
    }

    #[test]
    fn blank_content_is_rejected() {
        let err = InteractionNew {
            author_id: None,
            kind: InteractionKind::Note,
            subject: Some("  ".to_string()),
            content: "   ".to_string(),
        }
        .normalized()
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn blank_subject_is_dropped() {
        let input = InteractionNew {
            author_id: None,
            kind: InteractionKind::Call,
            subject: Some("  ".to_string()),
            content: " Intro call ".to_string(),
        }
        .normalized()
        .unwrap();
        assert_eq!(input.subject, None);
        assert_eq!(input.content, "Intro call");
    }

    #[test]
    fn action_description_includes_subject() {
        let interaction = Interaction {
            id: InteractionId(1),
            lead_id: LeadId(1),
            author_id: None,
            kind: InteractionKind::Email,
            subject: Some("Pricing".to_string()),
            content: "Sent the deck".to_string(),
            created_at: 0,
        };
        assert_eq!(interaction.action_description(), "Email sent: Pricing");
    }
}
