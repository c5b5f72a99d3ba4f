use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{format_score, format_timestamp_date, format_timestamp_datetime, now_utc};
use anyhow::{Context as _, Result};
use clap::Args;
use leadflow_core::workflow;
use leadflow_core::dashboard::GroupCount;
use leadflow_core::{DashboardOptions, DashboardStats, GroupOrder, LeadListItemDto, RevenueSource};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Number of recent activity entries
    #[arg(long)]
    pub limit: Option<usize>,
    /// first_seen, count_desc or alphabetical
    #[arg(long)]
    pub order: Option<String>,
    /// JSON object mapping `YYYY-MM` to a revenue figure
    #[arg(long, value_name = "FILE")]
    pub revenue: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct StaleArgs {
    /// Defaults to `dashboard.stale_after_days` from the config file
    #[arg(long)]
    pub days: Option<u32>,
}

/// Month-keyed revenue loaded from a JSON file.
#[derive(Debug, Default)]
struct RevenueTable(BTreeMap<String, f64>);

impl RevenueSource for RevenueTable {
    fn revenue_for_month(&self, month: &str) -> Option<f64> {
        self.0.get(month).copied()
    }
}

impl RevenueTable {
    fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read revenue file {}", path.display()))?;
        let table: BTreeMap<String, f64> = serde_json::from_str(&raw)
            .map_err(|err| invalid_input(format!("revenue file {}: {}", path.display(), err)))?;
        Ok(Self(table))
    }
}

pub fn show_dashboard(ctx: &Context<'_>, args: DashboardArgs) -> Result<()> {
    let group_order = match args.order.as_deref() {
        Some(raw) => raw.parse::<GroupOrder>().map_err(invalid_input)?,
        None => ctx.config.dashboard.group_order,
    };
    let options = DashboardOptions {
        activity_limit: args
            .limit
            .unwrap_or(ctx.config.dashboard.recent_activity_limit),
        group_order,
    };
    let revenue = args.revenue.as_ref().map(|path| RevenueTable::load(path)).transpose()?;
    let stats = workflow::dashboard(
        ctx.store,
        &ctx.config.statuses,
        options,
        revenue.as_ref().map(|table| table as &dyn RevenueSource),
    )?;

    if ctx.json {
        return print_json(&stats);
    }
    print_stats(&stats);
    Ok(())
}

pub fn list_stale(ctx: &Context<'_>, args: StaleArgs) -> Result<()> {
    let days = args.days.unwrap_or(ctx.config.dashboard.stale_after_days);
    let leads = workflow::stale(ctx.store, &ctx.config.statuses, now_utc(), days)?;
    let items: Vec<LeadListItemDto> = leads.iter().map(LeadListItemDto::from).collect();

    if ctx.json {
        return print_json(&items);
    }
    if items.is_empty() {
        println!("no stale leads (older than {} days)", days);
        return Ok(());
    }
    for (item, lead) in items.iter().zip(&leads) {
        let last = lead.last_contacted_at().unwrap_or(lead.created_at);
        println!(
            "{}  {}  [{}]  {}  last contact {}",
            item.id,
            item.name,
            item.status,
            format_score(item.score, item.bucket.as_str()),
            format_timestamp_date(last)
        );
    }
    Ok(())
}

fn print_stats(stats: &DashboardStats) {
    println!("total leads: {}", stats.total_leads);
    println!("converted: {}", stats.converted_leads);
    println!("conversion rate: {:.1}%", stats.conversion_rate * 100.0);
    println!("average score: {:.1}", stats.avg_lead_score);

    print_groups("by status", &stats.leads_by_status);
    print_groups("by source", &stats.leads_by_source);

    if !stats.monthly_conversions.is_empty() {
        println!("monthly conversions:");
        for month in &stats.monthly_conversions {
            match month.revenue {
                Some(revenue) => println!(
                    "  {}  {}  revenue {:.2}",
                    month.month, month.conversions, revenue
                ),
                None => println!("  {}  {}", month.month, month.conversions),
            }
        }
    }

    if stats.recent_activity.is_empty() {
        println!("recent activity: none");
    } else {
        println!("recent activity:");
        for entry in &stats.recent_activity {
            println!(
                "  {}  {}  {} ({})",
                format_timestamp_datetime(entry.at),
                entry.lead_name,
                entry.action,
                entry.actor
            );
        }
    }
}

fn print_groups(label: &str, groups: &[GroupCount]) {
    if groups.is_empty() {
        return;
    }
    println!("{}:", label);
    for group in groups {
        println!("  {:<16} {}", group.value, group.count);
    }
}
