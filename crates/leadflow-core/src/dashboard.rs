use crate::domain::{Lead, LeadId, TeamMember, TeamMemberId};
use crate::rules::StatusSet;
use crate::time::{month_key, SECONDS_PER_DAY};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_ACTIVITY_LIMIT: usize = 10;
pub const SYSTEM_ACTOR: &str = "System";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOrder {
    /// Order in which each value first appears in the input.
    #[default]
    FirstSeen,
    /// Largest group first; ties keep first-seen order.
    CountDesc,
    Alphabetical,
}

impl GroupOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupOrder::FirstSeen => "first_seen",
            GroupOrder::CountDesc => "count_desc",
            GroupOrder::Alphabetical => "alphabetical",
        }
    }
}

impl fmt::Display for GroupOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "first_seen" => Ok(GroupOrder::FirstSeen),
            "count_desc" | "count" => Ok(GroupOrder::CountDesc),
            "alphabetical" | "alpha" => Ok(GroupOrder::Alphabetical),
            other => Err(format!("unknown group order: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub activity_limit: usize,
    pub group_order: GroupOrder,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
            group_order: GroupOrder::FirstSeen,
        }
    }
}

/// Revenue figures are owned elsewhere; the dashboard only attaches them.
pub trait RevenueSource {
    fn revenue_for_month(&self, month: &str) -> Option<f64>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyConversion {
    pub month: String,
    pub conversions: usize,
    pub revenue: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub lead_id: LeadId,
    pub lead_name: String,
    pub action: String,
    pub actor: String,
    pub at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_leads: usize,
    pub converted_leads: usize,
    pub conversion_rate: f64,
    pub avg_lead_score: f64,
    pub leads_by_status: Vec<GroupCount>,
    pub leads_by_source: Vec<GroupCount>,
    pub monthly_conversions: Vec<MonthlyConversion>,
    pub recent_activity: Vec<ActivityEntry>,
}

pub fn converted_leads(leads: &[Lead], statuses: &StatusSet) -> usize {
    leads
        .iter()
        .filter(|lead| statuses.is_converted(&lead.status))
        .count()
}

/// In `[0, 1]`; zero for an empty collection.
pub fn conversion_rate(leads: &[Lead], statuses: &StatusSet) -> f64 {
    if leads.is_empty() {
        return 0.0;
    }
    converted_leads(leads, statuses) as f64 / leads.len() as f64
}

pub fn avg_lead_score(leads: &[Lead]) -> f64 {
    if leads.is_empty() {
        return 0.0;
    }
    let total: u64 = leads
        .iter()
        .map(|lead| u64::from(lead.score.value()))
        .sum();
    total as f64 / leads.len() as f64
}

pub fn leads_by_status(leads: &[Lead], order: GroupOrder) -> Vec<GroupCount> {
    group_counts(leads.iter().map(|lead| lead.status.as_str()), order)
}

pub fn leads_by_source(leads: &[Lead], order: GroupOrder) -> Vec<GroupCount> {
    group_counts(leads.iter().map(|lead| lead.source.as_str()), order)
}

fn group_counts<'a>(values: impl Iterator<Item = &'a str>, order: GroupOrder) -> Vec<GroupCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<GroupCount> = Vec::new();
    for value in values {
        match positions.get(value) {
            Some(&index) => groups[index].count += 1,
            None => {
                positions.insert(value, groups.len());
                groups.push(GroupCount {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    match order {
        GroupOrder::FirstSeen => {}
        // Stable sort keeps first-seen order among equal counts.
        GroupOrder::CountDesc => groups.sort_by(|a, b| b.count.cmp(&a.count)),
        GroupOrder::Alphabetical => groups.sort_by(|a, b| a.value.cmp(&b.value)),
    }
    groups
}

/// Converted leads bucketed by the UTC month of `updated_at`, oldest month
/// first.
pub fn monthly_conversions(
    leads: &[Lead],
    statuses: &StatusSet,
    revenue: Option<&dyn RevenueSource>,
) -> Vec<MonthlyConversion> {
    let mut months: BTreeMap<String, usize> = BTreeMap::new();
    for lead in leads.iter().filter(|lead| statuses.is_converted(&lead.status)) {
        match month_key(lead.updated_at) {
            Some(month) => *months.entry(month).or_default() += 1,
            None => tracing::warn!(lead = %lead.id, "updated_at out of range; skipped"),
        }
    }

    months
        .into_iter()
        .map(|(month, conversions)| {
            let revenue = revenue.and_then(|source| source.revenue_for_month(&month));
            MonthlyConversion {
                month,
                conversions,
                revenue,
            }
        })
        .collect()
}

/// The `limit` newest interactions across all leads.
pub fn recent_activity(leads: &[Lead], members: &[TeamMember], limit: usize) -> Vec<ActivityEntry> {
    let names: HashMap<TeamMemberId, String> = members
        .iter()
        .map(|member| (member.id, member.display_name()))
        .collect();

    let mut feed: Vec<_> = leads
        .iter()
        .flat_map(|lead| lead.interactions.iter().map(move |item| (lead, item)))
        .collect();
    feed.sort_by(|(_, a), (_, b)| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });

    feed.into_iter()
        .take(limit)
        .map(|(lead, interaction)| ActivityEntry {
            lead_id: lead.id,
            lead_name: lead.full_name(),
            action: interaction.action_description(),
            actor: interaction
                .author_id
                .and_then(|id| names.get(&id).cloned())
                .unwrap_or_else(|| SYSTEM_ACTOR.to_string()),
            at: interaction.created_at,
        })
        .collect()
}

/// Open leads not touched for `days`, oldest first.
///
/// Closed leads (converted or lost) never count, however old their last
/// contact. A lead with no interactions is not skipped: it ages from
/// `created_at`, so an untouched import shows up once the window passes.
pub fn stale_leads<'a>(
    leads: &'a [Lead],
    statuses: &StatusSet,
    now_utc: i64,
    days: u32,
) -> Vec<&'a Lead> {
    let cutoff = now_utc - i64::from(days) * SECONDS_PER_DAY;
    let mut stale: Vec<(i64, &Lead)> = leads
        .iter()
        .filter(|lead| statuses.is_open(&lead.status))
        .map(|lead| (lead.last_contacted_at().unwrap_or(lead.created_at), lead))
        .filter(|(touched, _)| *touched < cutoff)
        .collect();
    stale.sort_by(|(a_at, a), (b_at, b)| a_at.cmp(b_at).then_with(|| a.id.cmp(&b.id)));
    stale.into_iter().map(|(_, lead)| lead).collect()
}

pub fn compute_dashboard(
    leads: &[Lead],
    members: &[TeamMember],
    statuses: &StatusSet,
    options: DashboardOptions,
    revenue: Option<&dyn RevenueSource>,
) -> DashboardStats {
    DashboardStats {
        total_leads: leads.len(),
        converted_leads: converted_leads(leads, statuses),
        conversion_rate: conversion_rate(leads, statuses),
        avg_lead_score: avg_lead_score(leads),
        leads_by_status: leads_by_status(leads, options.group_order),
        leads_by_source: leads_by_source(leads, options.group_order),
        monthly_conversions: monthly_conversions(leads, statuses, revenue),
        recent_activity: recent_activity(leads, members, options.activity_limit),
    }
}
