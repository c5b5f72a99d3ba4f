use crate::query::LeadQuery;
use crate::Store;
use leadflow_core::filter::LeadFilter;
use leadflow_core::{
    GatewayError, Interaction, InteractionNew, Lead, LeadGateway, LeadId, LeadNew, LeadUpdate,
    TeamMember,
};

impl LeadGateway for Store {
    fn list_leads(&self, filter: &LeadFilter) -> Result<Vec<Lead>, GatewayError> {
        Ok(self.leads().list(&LeadQuery::from_filter(filter))?)
    }

    fn get_lead(&self, id: LeadId) -> Result<Lead, GatewayError> {
        self.leads().get(id)?.ok_or(GatewayError::NotFound {
            entity: "lead",
            id: id.get(),
        })
    }

    fn create_lead(&self, lead: LeadNew, now_utc: i64) -> Result<Lead, GatewayError> {
        Ok(self.leads().create(now_utc, lead)?)
    }

    fn update_lead(
        &self,
        id: LeadId,
        update: LeadUpdate,
        now_utc: i64,
    ) -> Result<Lead, GatewayError> {
        Ok(self.leads().update(now_utc, id, update)?)
    }

    fn delete_lead(&self, id: LeadId) -> Result<(), GatewayError> {
        Ok(self.leads().delete(id)?)
    }

    fn add_interaction(
        &self,
        lead_id: LeadId,
        interaction: InteractionNew,
        now_utc: i64,
    ) -> Result<Interaction, GatewayError> {
        Ok(self.interactions().add(now_utc, lead_id, interaction)?)
    }

    fn list_team_members(&self) -> Result<Vec<TeamMember>, GatewayError> {
        self.team().list().map_err(GatewayError::from)
    }
}
