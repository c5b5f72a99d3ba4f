use crate::domain::{Interaction, InteractionNew, Lead, LeadId, LeadNew, LeadUpdate, TeamMember};
use crate::filter::LeadFilter;
use std::error::Error as StdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Backend(Box<dyn StdError + Send + Sync>),
}

impl GatewayError {
    pub fn backend(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound { .. })
    }
}

/// Persistence collaborator. Leads are handed back with their
/// interactions, newest first. Mutating calls take `now_utc` so the
/// collaborator never reads the clock itself.
pub trait LeadGateway {
    fn list_leads(&self, filter: &LeadFilter) -> Result<Vec<Lead>, GatewayError>;

    fn get_lead(&self, id: LeadId) -> Result<Lead, GatewayError>;

    fn create_lead(&self, lead: LeadNew, now_utc: i64) -> Result<Lead, GatewayError>;

    /// One result per input, in input order. Implementations may batch but
    /// must not let one failure hide the others.
    fn create_leads(
        &self,
        leads: Vec<LeadNew>,
        now_utc: i64,
    ) -> Vec<Result<Lead, GatewayError>> {
        leads
            .into_iter()
            .map(|lead| self.create_lead(lead, now_utc))
            .collect()
    }

    fn update_lead(
        &self,
        id: LeadId,
        update: LeadUpdate,
        now_utc: i64,
    ) -> Result<Lead, GatewayError>;

    fn delete_lead(&self, id: LeadId) -> Result<(), GatewayError>;

    fn add_interaction(
        &self,
        lead_id: LeadId,
        interaction: InteractionNew,
        now_utc: i64,
    ) -> Result<Interaction, GatewayError>;

    fn list_team_members(&self) -> Result<Vec<TeamMember>, GatewayError>;
}
