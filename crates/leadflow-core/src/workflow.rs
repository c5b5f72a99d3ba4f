//! Lead operations over an injected [`LeadGateway`]. Every input is checked
//! by the core first, so a rejected request never reaches the collaborator.

use crate::dashboard::{compute_dashboard, stale_leads, DashboardOptions, DashboardStats, RevenueSource};
use crate::domain::{
    Interaction, InteractionNew, Lead, LeadId, LeadUpdate, TeamMember, TeamMemberId,
};
use crate::dto::LeadDetailDto;
use crate::error::CoreError;
use crate::filter::{filter_leads, LeadFilter};
use crate::gateway::{GatewayError, LeadGateway};
use crate::rules::{LeadCandidate, Score, StatusChange, StatusSet, ValidationError};
use crate::transfer::{self, ImportError, ImportReport};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("export failed: {0}")]
    Export(#[from] csv::Error),
}

impl From<ValidationError> for OpError {
    fn from(err: ValidationError) -> Self {
        OpError::Core(err.into())
    }
}

impl OpError {
    pub fn is_not_found(&self) -> bool {
        match self {
            OpError::Core(CoreError::NotFound { .. }) => true,
            OpError::Gateway(err) => err.is_not_found(),
            _ => false,
        }
    }
}

pub fn create_lead(
    gateway: &dyn LeadGateway,
    statuses: &StatusSet,
    candidate: &LeadCandidate,
    now_utc: i64,
) -> Result<Lead, OpError> {
    let lead = candidate.to_lead_new(statuses)?;
    if let Some(member_id) = lead.assigned_to {
        active_member(gateway, member_id)?;
    }
    let created = gateway.create_lead(lead, now_utc)?;
    tracing::debug!(lead = %created.id, "lead created");
    Ok(created)
}

/// Applies the fields present in `candidate`. An empty edit is a read.
pub fn edit_lead(
    gateway: &dyn LeadGateway,
    statuses: &StatusSet,
    id: LeadId,
    candidate: &LeadCandidate,
    now_utc: i64,
) -> Result<Lead, OpError> {
    let update = candidate.to_lead_update(statuses)?;
    if update.is_empty() {
        return Ok(gateway.get_lead(id)?);
    }
    if let Some(Some(member_id)) = update.assigned_to {
        let current = gateway.get_lead(id)?;
        if current.assigned_to != Some(member_id) {
            active_member(gateway, member_id)?;
        }
    }
    Ok(gateway.update_lead(id, update, now_utc)?)
}

pub fn change_status(
    gateway: &dyn LeadGateway,
    statuses: &StatusSet,
    id: LeadId,
    raw_status: &str,
    now_utc: i64,
) -> Result<(Lead, StatusChange), OpError> {
    let target = statuses.parse(raw_status)?;
    let mut lead = gateway.get_lead(id)?;
    let change = lead.set_status(statuses, target.as_str(), now_utc)?;
    let update = LeadUpdate {
        status: Some(change.to.clone()),
        ..Default::default()
    };
    let updated = gateway.update_lead(id, update, now_utc)?;
    tracing::debug!(lead = %id, from = %change.from, to = %change.to, "status changed");
    Ok((updated, change))
}

pub fn assign_lead(
    gateway: &dyn LeadGateway,
    id: LeadId,
    member_id: TeamMemberId,
    now_utc: i64,
) -> Result<Lead, OpError> {
    let member = find_member(gateway, member_id)?;
    let mut lead = gateway.get_lead(id)?;
    lead.assign(&member, now_utc)?;
    let update = LeadUpdate {
        assigned_to: Some(Some(member.id)),
        ..Default::default()
    };
    Ok(gateway.update_lead(id, update, now_utc)?)
}

pub fn unassign_lead(gateway: &dyn LeadGateway, id: LeadId, now_utc: i64) -> Result<Lead, OpError> {
    let update = LeadUpdate {
        assigned_to: Some(None),
        ..Default::default()
    };
    Ok(gateway.update_lead(id, update, now_utc)?)
}

pub fn set_score(
    gateway: &dyn LeadGateway,
    id: LeadId,
    value: i64,
    now_utc: i64,
) -> Result<Lead, OpError> {
    let score = Score::new(value)?;
    let update = LeadUpdate {
        score: Some(score),
        ..Default::default()
    };
    Ok(gateway.update_lead(id, update, now_utc)?)
}

pub fn log_interaction(
    gateway: &dyn LeadGateway,
    lead_id: LeadId,
    input: InteractionNew,
    now_utc: i64,
) -> Result<Interaction, OpError> {
    let input = input.normalized()?;
    if let Some(author_id) = input.author_id {
        find_member(gateway, author_id)?;
    }
    Ok(gateway.add_interaction(lead_id, input, now_utc)?)
}

/// The lead with its interactions, author and assignee names resolved.
pub fn lead_detail(gateway: &dyn LeadGateway, id: LeadId) -> Result<LeadDetailDto, OpError> {
    let lead = gateway.get_lead(id)?;
    let members = gateway.list_team_members()?;
    Ok(LeadDetailDto::from_lead(&lead, &members))
}

pub fn delete_lead(gateway: &dyn LeadGateway, id: LeadId) -> Result<(), OpError> {
    gateway.delete_lead(id)?;
    tracing::info!(lead = id.get(), "lead deleted");
    Ok(())
}

/// The collaborator may narrow by the exact-match selectors; the in-memory
/// pipeline then applies every predicate, free text included.
pub fn list_leads(gateway: &dyn LeadGateway, filter: &LeadFilter) -> Result<Vec<Lead>, OpError> {
    let leads = gateway.list_leads(filter)?;
    Ok(filter_leads(&leads, filter))
}

pub fn import_leads(
    gateway: &dyn LeadGateway,
    statuses: &StatusSet,
    payload: &[u8],
    now_utc: i64,
) -> Result<ImportReport, OpError> {
    Ok(transfer::import_leads(gateway, statuses, payload, now_utc)?)
}

pub fn export_view(gateway: &dyn LeadGateway, filter: &LeadFilter) -> Result<Vec<u8>, OpError> {
    let leads = list_leads(gateway, filter)?;
    Ok(transfer::export_leads(&leads)?)
}

pub fn dashboard(
    gateway: &dyn LeadGateway,
    statuses: &StatusSet,
    options: DashboardOptions,
    revenue: Option<&dyn RevenueSource>,
) -> Result<DashboardStats, OpError> {
    let leads = gateway.list_leads(&LeadFilter::default())?;
    let members = gateway.list_team_members()?;
    Ok(compute_dashboard(&leads, &members, statuses, options, revenue))
}

pub fn stale(
    gateway: &dyn LeadGateway,
    statuses: &StatusSet,
    now_utc: i64,
    days: u32,
) -> Result<Vec<Lead>, OpError> {
    let leads = gateway.list_leads(&LeadFilter::default())?;
    Ok(stale_leads(&leads, statuses, now_utc, days)
        .into_iter()
        .cloned()
        .collect())
}

fn find_member(gateway: &dyn LeadGateway, id: TeamMemberId) -> Result<TeamMember, OpError> {
    gateway
        .list_team_members()?
        .into_iter()
        .find(|member| member.id == id)
        .ok_or(OpError::Core(CoreError::NotFound {
            entity: "team member",
            id: id.get(),
        }))
}

fn active_member(gateway: &dyn LeadGateway, id: TeamMemberId) -> Result<TeamMember, OpError> {
    let member = find_member(gateway, id)?;
    if !member.is_active {
        return Err(CoreError::InactiveAssignee(id).into());
    }
    Ok(member)
}
