mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, dashboard, interactions, leads, team, transfer, Context};
use crate::error::{exit_code_for, report_error};
use leadflow_config as config;
use leadflow_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "leadflow", version, about = "leadflow CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    Add(leads::AddLeadArgs),
    Edit(leads::EditLeadArgs),
    Show(leads::ShowArgs),
    List(leads::ListArgs),
    Delete(leads::DeleteArgs),
    Status(leads::StatusArgs),
    Assign(leads::AssignArgs),
    Unassign(leads::UnassignArgs),
    Score(leads::ScoreArgs),
    /// Record an email, call, meeting or note against a lead
    Log(interactions::LogArgs),
    #[command(subcommand)]
    Team(team::TeamCommand),
    Import(transfer::ImportArgs),
    Export(transfer::ExportArgs),
    Dashboard(dashboard::DashboardArgs),
    /// Open leads with no contact in the given number of days
    Stale(dashboard::StaleArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    if let Command::Completions(args) = command {
        return completions::emit(args);
    }

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) if path.exists() => debug!(path = %path.display(), "config resolved"),
            Ok(path) => debug!(path = %path.display(), "config missing, using defaults"),
            Err(err) => debug!(error = %err, "config unavailable"),
        }
    }
    let db_path = paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), "database path resolved");

    let store =
        Store::open(&db_path).with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate().with_context(|| "run migrations")?;

    let ctx = Context {
        store: &store,
        json,
        config: &app_config,
    };

    match command {
        Command::Add(args) => leads::add_lead(&ctx, args),
        Command::Edit(args) => leads::edit_lead(&ctx, args),
        Command::Show(args) => leads::show_lead(&ctx, args),
        Command::List(args) => leads::list_leads(&ctx, args),
        Command::Delete(args) => leads::delete_lead(&ctx, args),
        Command::Status(args) => leads::change_status(&ctx, args),
        Command::Assign(args) => leads::assign_lead(&ctx, args),
        Command::Unassign(args) => leads::unassign_lead(&ctx, args),
        Command::Score(args) => leads::set_score(&ctx, args),
        Command::Log(args) => interactions::log_interaction(&ctx, args),
        Command::Team(cmd) => match cmd {
            team::TeamCommand::Add(args) => team::add_member(&ctx, args),
            team::TeamCommand::Ls(args) => team::list_members(&ctx, args),
            team::TeamCommand::Deactivate(args) => team::set_active(&ctx, args, false),
            team::TeamCommand::Activate(args) => team::set_active(&ctx, args, true),
        },
        Command::Import(args) => transfer::import(&ctx, args),
        Command::Export(args) => transfer::export(&ctx, args),
        Command::Dashboard(args) => dashboard::show_dashboard(&ctx, args),
        Command::Stale(args) => dashboard::list_stale(&ctx, args),
        Command::Completions(_) => {
            unreachable!("completions command handled before store initialization")
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
