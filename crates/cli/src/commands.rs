// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle command handlers

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use aj_adapters::CrontabScheduler;
use aj_core::{AgentType, Provider};
use aj_engine::{AddSpec, Lifecycle};
use aj_storage::{paths, JobStore};

use crate::exit_error::ExitError;
use crate::output::{print_listings, print_status, OutputFormat};

#[derive(Args)]
pub struct AddArgs {
    /// Target runner kind (n8n, langflow, flowise)
    #[arg(value_name = "TYPE")]
    pub agent_type: AgentType,
    /// Identifier passed to the runner (workflow/flow id)
    pub target_id: String,
    /// Recurrence, e.g. "daily at 9am", "every monday at 10am",
    /// "every 15 minutes", or a raw five-field cron expression
    pub schedule: String,
    /// Free-text description; also the duplicate-detection key
    pub description: String,
    /// Inference backend passed through to the runner
    #[arg(long, default_value = "openai")]
    pub provider: Provider,
    /// Extra input text forwarded to the runner
    #[arg(long)]
    pub input: Option<String>,
    /// Run the target in background/detached mode
    #[arg(long)]
    pub background: bool,
    /// Directory for the job's log file (default: per-user state dir)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Job name (slug) or the original description
    pub name_or_description: String,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

fn lifecycle(log_dir: Option<PathBuf>) -> Result<Lifecycle<CrontabScheduler>> {
    let store = JobStore::open_default().map_err(|e| ExitError::new(2, e.to_string()))?;
    let scheduler = CrontabScheduler::from_env(paths::crontab_backup());
    let project_root = std::env::current_dir()?;
    let log_dir = log_dir.unwrap_or_else(paths::logs_dir);
    Ok(Lifecycle::new(store, scheduler, project_root, log_dir))
}

pub async fn add(args: AddArgs) -> Result<()> {
    let lc = lifecycle(args.log_dir)?;
    let spec = AddSpec {
        agent_type: args.agent_type,
        target_id: args.target_id,
        schedule_text: args.schedule,
        description: args.description,
        provider: args.provider,
        input: args.input,
        background: args.background,
    };
    let job = lc.add(spec).await.map_err(ExitError::from)?;
    println!(
        "Scheduled '{}' ({}): {}",
        job.name, job.recurrence, job.description
    );
    Ok(())
}

pub async fn list(args: ListArgs) -> Result<()> {
    let lc = lifecycle(None)?;
    let listings = lc.list().await.map_err(ExitError::from)?;
    print_listings(&listings, args.format)
}

pub async fn remove(args: RemoveArgs) -> Result<()> {
    let lc = lifecycle(None)?;
    let name = lc
        .remove(&args.name_or_description)
        .await
        .map_err(ExitError::from)?;
    println!("Removed '{}'", name);
    Ok(())
}

pub async fn status(args: StatusArgs) -> Result<()> {
    let lc = lifecycle(None)?;
    let report = lc.status().await.map_err(ExitError::from)?;
    print_status(&report, args.format)?;
    if !report.service_running {
        return Err(ExitError::new(
            2,
            "scheduler service is not running; start cron (e.g. `systemctl start cron`) \
             or scheduled jobs will never fire",
        )
        .into());
    }
    Ok(())
}
