use crate::commands::leads::parse_list_filter;
use crate::commands::{print_json, Context};
use crate::util::{now_utc, read_input};
use anyhow::{Context as _, Result};
use clap::Args;
use leadflow_core::workflow;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// CSV file with a header row; `-` reads stdin
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(long)]
    pub filter: Option<String>,
    /// Write to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn import(ctx: &Context<'_>, args: ImportArgs) -> Result<()> {
    let payload = read_input(&args.file)?;
    let report = workflow::import_leads(ctx.store, &ctx.config.statuses, &payload, now_utc())
        .with_context(|| format!("import {}", args.file.display()))?;

    if ctx.json {
        return print_json(&report);
    }

    println!("imported {} leads, {} failed", report.success, report.failed);
    for failure in &report.failures {
        println!("  row {}: {}", failure.row, failure.reason);
    }
    Ok(())
}

pub fn export(ctx: &Context<'_>, args: ExportArgs) -> Result<()> {
    let filter = parse_list_filter(ctx, args.filter.as_deref())?;
    let bytes = workflow::export_view(ctx.store, &filter)?;

    match args.out {
        Some(path) => {
            fs::write(&path, &bytes)
                .with_context(|| format!("write export {}", path.display()))?;
            if ctx.json {
                print_json(&serde_json::json!({
                    "path": path.display().to_string(),
                    "bytes": bytes.len(),
                }))?;
            } else {
                println!("exported to {}", path.display());
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
