use crate::commands::{print_json, Context};
use crate::util::parse_member_id;
use anyhow::Result;
use clap::{Args, Subcommand};
use leadflow_core::{TeamMemberDto, TeamRole};
use leadflow_store::repo::TeamMemberNew;

#[derive(Debug, Subcommand)]
pub enum TeamCommand {
    Add(TeamAddArgs),
    Ls(TeamListArgs),
    /// Stop routing new leads to a member; existing assignments stay
    Deactivate(TeamMemberArgs),
    Activate(TeamMemberArgs),
}

#[derive(Debug, Args)]
pub struct TeamAddArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    /// admin, manager or sales_rep
    #[arg(long, default_value = "sales_rep")]
    pub role: String,
}

#[derive(Debug, Args)]
pub struct TeamListArgs {
    /// Include deactivated members
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Args)]
pub struct TeamMemberArgs {
    pub id: String,
}

pub fn add_member(ctx: &Context<'_>, args: TeamAddArgs) -> Result<()> {
    let role: TeamRole = args.role.parse()?;
    let member = ctx.store.team().add(TeamMemberNew {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        role,
    })?;

    if ctx.json {
        print_json(&TeamMemberDto::from(&member))?;
    } else {
        println!("added {} {} ({})", member.id, member.display_name(), member.role);
    }
    Ok(())
}

pub fn list_members(ctx: &Context<'_>, args: TeamListArgs) -> Result<()> {
    let items: Vec<TeamMemberDto> = ctx
        .store
        .team()
        .list()?
        .iter()
        .filter(|member| args.all || member.is_active)
        .map(TeamMemberDto::from)
        .collect();

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("no team members");
        return Ok(());
    }
    for item in items {
        let inactive = if item.is_active { "" } else { "  (inactive)" };
        println!(
            "{}  {}  <{}>  {}{}",
            item.id, item.name, item.email, item.role, inactive
        );
    }
    Ok(())
}

pub fn set_active(ctx: &Context<'_>, args: TeamMemberArgs, active: bool) -> Result<()> {
    let id = parse_member_id(&args.id)?;
    let member = ctx.store.team().set_active(id, active)?;
    if ctx.json {
        print_json(&TeamMemberDto::from(&member))?;
    } else if active {
        println!("activated {}", member.id);
    } else {
        println!("deactivated {}", member.id);
    }
    Ok(())
}
