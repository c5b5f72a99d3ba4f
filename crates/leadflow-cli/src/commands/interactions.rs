use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{now_utc, parse_lead_id, parse_member_id};
use anyhow::Result;
use clap::Args;
use leadflow_core::workflow;
use leadflow_core::{InteractionDto, InteractionKind, InteractionNew, LeadGateway};
use std::io::{self, Read};

#[derive(Debug, Args)]
pub struct LogArgs {
    pub id: String,
    /// email, call, meeting or note
    #[arg(long, default_value = "note")]
    pub kind: String,
    #[arg(long)]
    pub subject: Option<String>,
    /// Read from stdin when omitted
    #[arg(long)]
    pub content: Option<String>,
    /// Defaults to `actor_id` from the config file
    #[arg(long, value_name = "MEMBER_ID")]
    pub author: Option<String>,
}

pub fn log_interaction(ctx: &Context<'_>, args: LogArgs) -> Result<()> {
    let lead_id = parse_lead_id(&args.id)?;
    let kind: InteractionKind = args.kind.parse()?;
    let author_id = match args.author.as_deref() {
        Some(raw) => Some(parse_member_id(raw)?),
        None => ctx.config.actor_id,
    };
    let content = match args.content {
        Some(value) => value,
        None => read_content_from_stdin()?,
    };

    let interaction = workflow::log_interaction(
        ctx.store,
        lead_id,
        InteractionNew {
            author_id,
            kind,
            subject: args.subject,
            content,
        },
        now_utc(),
    )?;

    if ctx.json {
        let members = ctx.store.list_team_members()?;
        print_json(&InteractionDto::from_interaction(&interaction, &members))?;
    } else {
        println!(
            "logged {} {} on lead {}",
            interaction.kind, interaction.id, lead_id
        );
    }
    Ok(())
}

fn read_content_from_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    if buffer.trim().is_empty() {
        return Err(invalid_input(
            "interaction content is empty (provide --content or stdin)",
        ));
    }
    Ok(buffer.trim_end().to_string())
}
