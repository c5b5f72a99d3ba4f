use crate::domain::{Interaction, InteractionId, Lead, LeadId, TeamMember, TeamMemberId};
use crate::rules::ScoreBucket;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadListItemDto {
    pub id: LeadId,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub status: String,
    pub score: u8,
    pub bucket: ScoreBucket,
    pub source: String,
    pub assigned_to: Option<TeamMemberId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionDto {
    pub id: InteractionId,
    pub kind: String,
    pub subject: Option<String>,
    pub content: String,
    pub author: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadDetailDto {
    pub id: LeadId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub status: String,
    pub score: u8,
    pub bucket: ScoreBucket,
    pub tier: String,
    pub color: String,
    pub source: String,
    pub notes: Option<String>,
    pub assigned_to: Option<TeamMemberId>,
    pub assignee: Option<String>,
    pub last_contacted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub interactions: Vec<InteractionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamMemberDto {
    pub id: TeamMemberId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
}

impl From<&Lead> for LeadListItemDto {
    fn from(lead: &Lead) -> Self {
        Self {
            id: lead.id,
            name: lead.full_name(),
            email: lead.email.clone(),
            company: lead.company.clone(),
            status: lead.status.to_string(),
            score: lead.score.value(),
            bucket: lead.bucket(),
            source: lead.source.clone(),
            assigned_to: lead.assigned_to,
        }
    }
}

impl From<&TeamMember> for TeamMemberDto {
    fn from(member: &TeamMember) -> Self {
        Self {
            id: member.id,
            name: member.display_name(),
            email: member.email.clone(),
            role: member.role.to_string(),
            is_active: member.is_active,
        }
    }
}

fn member_name(members: &[TeamMember], id: TeamMemberId) -> Option<String> {
    members
        .iter()
        .find(|member| member.id == id)
        .map(TeamMember::display_name)
}

impl InteractionDto {
    pub fn from_interaction(interaction: &Interaction, members: &[TeamMember]) -> Self {
        Self {
            id: interaction.id,
            kind: interaction.kind.to_string(),
            subject: interaction.subject.clone(),
            content: interaction.content.clone(),
            author: interaction
                .author_id
                .and_then(|id| member_name(members, id)),
            created_at: interaction.created_at,
        }
    }
}

impl LeadDetailDto {
    pub fn from_lead(lead: &Lead, members: &[TeamMember]) -> Self {
        let tier = lead.tier();
        Self {
            id: lead.id,
            first_name: lead.first_name.clone(),
            last_name: lead.last_name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            company: lead.company.clone(),
            title: lead.title.clone(),
            status: lead.status.to_string(),
            score: lead.score.value(),
            bucket: lead.bucket(),
            tier: tier.label().to_string(),
            color: tier.color().to_string(),
            source: lead.source.clone(),
            notes: lead.notes.clone(),
            assigned_to: lead.assigned_to,
            assignee: lead.assigned_to.and_then(|id| member_name(members, id)),
            last_contacted_at: lead.last_contacted_at(),
            created_at: lead.created_at,
            updated_at: lead.updated_at,
            interactions: lead
                .interactions
                .iter()
                .map(|interaction| InteractionDto::from_interaction(interaction, members))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LeadDetailDto, LeadListItemDto};
    use crate::domain::{Lead, LeadId};
    use crate::rules::{bucket, color_class, Score, StatusSet};

    fn lead_with_score(value: i64) -> Lead {
        Lead {
            id: LeadId(1),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            company: None,
            title: None,
            status: StatusSet::standard().parse("NEW").unwrap(),
            score: Score::new(value).unwrap(),
            source: "website".to_string(),
            notes: None,
            assigned_to: None,
            created_at: 0,
            updated_at: 0,
            interactions: Vec::new(),
        }
    }

    #[test]
    fn projections_classify_from_the_score() {
        for value in 0..=100 {
            let lead = lead_with_score(value);
            let item = LeadListItemDto::from(&lead);
            let detail = LeadDetailDto::from_lead(&lead, &[]);
            let tier = color_class(value).unwrap();

            assert_eq!(item.bucket, bucket(value).unwrap());
            assert_eq!(detail.bucket, item.bucket);
            assert_eq!(detail.tier, tier.label());
            assert_eq!(detail.color, tier.color());
        }
    }
}
