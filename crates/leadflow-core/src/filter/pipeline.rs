use crate::domain::Lead;
use crate::filter::ast::LeadFilter;

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        if let Some(text) = self.text() {
            let needle = text.to_lowercase();
            let hit = lead.full_name().to_lowercase().contains(&needle)
                || lead.email.to_lowercase().contains(&needle)
                || lead
                    .company
                    .as_deref()
                    .is_some_and(|company| company.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(status) = &self.status {
            if &lead.status != status {
                return false;
            }
        }

        if let Some(member) = self.assigned_to {
            if lead.assigned_to != Some(member) {
                return false;
            }
        }

        if let Some(source) = self.source() {
            if lead.source != source {
                return false;
            }
        }

        if let Some((low, high)) = self.score_range() {
            let value = lead.score.value();
            if value < low || value > high {
                return false;
            }
        }

        true
    }
}

/// Stable, stateless filter: the output keeps the input's relative order
/// and depends only on its arguments.
pub fn filter_leads(leads: &[Lead], filter: &LeadFilter) -> Vec<Lead> {
    leads
        .iter()
        .filter(|lead| filter.matches(lead))
        .cloned()
        .collect()
}
