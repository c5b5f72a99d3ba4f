use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{
    format_score, format_timestamp_date, format_timestamp_datetime, now_utc, parse_lead_id,
    parse_member_id,
};
use anyhow::Result;
use clap::Args;
use leadflow_core::workflow;
use leadflow_core::{parse_filter, LeadCandidate, LeadFilter, LeadListItemDto};

#[derive(Debug, Args)]
pub struct AddLeadArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    /// Leave out to have the lead scored from its fields
    #[arg(long)]
    pub score: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, value_name = "MEMBER_ID")]
    pub assign: Option<String>,
}

/// Empty values clear optional fields.
#[derive(Debug, Args)]
pub struct EditLeadArgs {
    pub id: String,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// e.g. `acme status:QUALIFIED score:hot assigned:3`
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Args)]
pub struct AssignArgs {
    pub id: String,
    pub member_id: String,
}

#[derive(Debug, Args)]
pub struct UnassignArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ScoreArgs {
    pub id: String,
    #[arg(allow_hyphen_values = true)]
    pub score: String,
}

pub fn add_lead(ctx: &Context<'_>, args: AddLeadArgs) -> Result<()> {
    let candidate = LeadCandidate {
        first_name: Some(args.first_name),
        last_name: Some(args.last_name),
        email: Some(args.email),
        phone: args.phone,
        company: args.company,
        title: args.title,
        source: args
            .source
            .or_else(|| Some(ctx.config.default_source.clone())),
        notes: args.notes,
        score: args.score,
        status: args.status,
        assigned_to: args.assign,
    };
    let lead = workflow::create_lead(ctx.store, &ctx.config.statuses, &candidate, now_utc())?;

    if ctx.json {
        print_json(&LeadListItemDto::from(&lead))?;
    } else {
        println!(
            "created {} {} (score {})",
            lead.id,
            lead.full_name(),
            lead.score
        );
    }
    Ok(())
}

pub fn edit_lead(ctx: &Context<'_>, args: EditLeadArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    let candidate = LeadCandidate {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        phone: args.phone,
        company: args.company,
        title: args.title,
        source: args.source,
        notes: args.notes,
        ..Default::default()
    };
    if candidate == LeadCandidate::default() {
        return Err(invalid_input("no updates provided"));
    }

    let lead = workflow::edit_lead(ctx.store, &ctx.config.statuses, id, &candidate, now_utc())?;
    if ctx.json {
        print_json(&LeadListItemDto::from(&lead))?;
    } else {
        println!("updated {} {}", lead.id, lead.full_name());
    }
    Ok(())
}

pub fn show_lead(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    let detail = workflow::lead_detail(ctx.store, id)?;

    if ctx.json {
        print_json(&detail)?;
        return Ok(());
    }

    println!("id: {}", detail.id);
    println!("name: {} {}", detail.first_name, detail.last_name);
    println!("email: {}", detail.email);
    if let Some(phone) = detail.phone.as_deref() {
        println!("phone: {}", phone);
    }
    if let Some(company) = detail.company.as_deref() {
        println!("company: {}", company);
    }
    if let Some(title) = detail.title.as_deref() {
        println!("title: {}", title);
    }
    println!("status: {}", detail.status);
    println!("score: {} ({})", detail.score, detail.tier);
    println!("source: {}", detail.source);
    match (detail.assigned_to, detail.assignee.as_deref()) {
        (Some(_), Some(name)) => println!("assigned: {}", name),
        (Some(member_id), None) => println!("assigned: #{}", member_id),
        (None, _) => println!("assigned: -"),
    }
    if let Some(notes) = detail.notes.as_deref() {
        println!("notes: {}", notes);
    }
    if let Some(last) = detail.last_contacted_at {
        println!("last_contacted_at: {}", format_timestamp_datetime(last));
    }
    println!("created_at: {}", format_timestamp_datetime(detail.created_at));
    println!("updated_at: {}", format_timestamp_datetime(detail.updated_at));

    if detail.interactions.is_empty() {
        println!("interactions: none");
    } else {
        println!("interactions:");
        for interaction in &detail.interactions {
            let author = interaction.author.as_deref().unwrap_or("-");
            let subject = interaction
                .subject
                .as_deref()
                .map(|subject| format!("{}: ", subject))
                .unwrap_or_default();
            println!(
                "  {} [{}] {} {}{}",
                format_timestamp_datetime(interaction.created_at),
                interaction.kind,
                author,
                subject,
                interaction.content
            );
        }
    }
    Ok(())
}

pub fn list_leads(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let filter = parse_list_filter(ctx, args.filter.as_deref())?;
    let leads = workflow::list_leads(ctx.store, &filter)?;
    let items: Vec<LeadListItemDto> = leads.iter().map(LeadListItemDto::from).collect();

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("no leads");
        return Ok(());
    }

    for (item, lead) in items.iter().zip(&leads) {
        let company = item.company.as_deref().unwrap_or("-");
        let assignee = item
            .assigned_to
            .map(|id| format!("@{}", id))
            .unwrap_or_default();
        println!(
            "{}  {}  <{}>  {}  [{}]  {}  {}  {}",
            item.id,
            item.name,
            item.email,
            company,
            item.status,
            format_score(item.score, item.bucket.as_str()),
            format_timestamp_date(lead.created_at),
            assignee
        );
    }
    Ok(())
}

pub fn delete_lead(ctx: &Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    workflow::delete_lead(ctx.store, id)?;
    if ctx.json {
        print_json(&serde_json::json!({ "id": id }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

pub fn change_status(ctx: &Context<'_>, args: StatusArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    let (lead, change) =
        workflow::change_status(ctx.store, &ctx.config.statuses, id, &args.status, now_utc())?;
    if ctx.json {
        print_json(&change)?;
    } else if change.from == change.to {
        println!("{} already {}", lead.id, change.to);
    } else {
        println!("{} {} -> {}", lead.id, change.from, change.to);
    }
    Ok(())
}

pub fn assign_lead(ctx: &Context<'_>, args: AssignArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    let member_id = parse_member_id(&args.member_id)?;
    let lead = workflow::assign_lead(ctx.store, id, member_id, now_utc())?;
    if ctx.json {
        print_json(&LeadListItemDto::from(&lead))?;
    } else {
        println!("assigned {} to {}", lead.id, member_id);
    }
    Ok(())
}

pub fn unassign_lead(ctx: &Context<'_>, args: UnassignArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    let lead = workflow::unassign_lead(ctx.store, id, now_utc())?;
    if ctx.json {
        print_json(&LeadListItemDto::from(&lead))?;
    } else {
        println!("unassigned {}", lead.id);
    }
    Ok(())
}

pub fn set_score(ctx: &Context<'_>, args: ScoreArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    let value: i64 = args
        .score
        .trim()
        .parse()
        .map_err(|_| invalid_input(format!("score must be an integer: {}", args.score)))?;
    let lead = workflow::set_score(ctx.store, id, value, now_utc())?;
    if ctx.json {
        print_json(&LeadListItemDto::from(&lead))?;
    } else {
        println!(
            "{} scored {} ({})",
            lead.id,
            lead.score,
            lead.tier().label()
        );
    }
    Ok(())
}

pub(crate) fn parse_list_filter(ctx: &Context<'_>, raw: Option<&str>) -> Result<LeadFilter> {
    Ok(parse_filter(raw.unwrap_or_default(), &ctx.config.statuses)?)
}
