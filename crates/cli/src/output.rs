// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text and JSON rendering for job listings.

use aj_engine::{JobListing, StatusReport, SyncState};
use clap::ValueEnum;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn state_label(state: SyncState) -> &'static str {
    match state {
        SyncState::Synced => "ok",
        SyncState::SchedulerOnly => "untracked (no metadata record)",
        SyncState::StoreOnly => "inert (not scheduled)",
    }
}

/// Render listings as an aligned text table.
pub fn render_table(listings: &[JobListing]) -> String {
    let headers = ["NAME", "SCHEDULE", "TYPE", "TARGET", "DESCRIPTION", "STATE"];
    let rows: Vec<[String; 6]> = listings
        .iter()
        .map(|l| {
            let (kind, target) = match &l.record {
                Some(job) => (job.agent_type.to_string(), job.target_id.clone()),
                None => ("-".to_string(), "-".to_string()),
            };
            [
                l.name.clone(),
                l.recurrence.clone(),
                kind,
                target,
                l.description.clone(),
                state_label(l.state).to_string(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    let render_row = |cells: &[&str], out: &mut String| {
        let line = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };
    render_row(&headers, &mut out);
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        render_row(&cells, &mut out);
    }
    out
}

pub fn print_listings(listings: &[JobListing], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if listings.is_empty() {
                println!("No jobs scheduled");
            } else {
                print!("{}", render_table(listings));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(listings)?);
        }
    }
    Ok(())
}

pub fn print_status(report: &StatusReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if report.service_running {
                println!("Scheduler service: running");
            } else {
                let detail = report.service_detail.as_deref().unwrap_or("unknown");
                println!("Scheduler service: NOT RUNNING ({})", detail);
            }
            println!();
            print_listings(&report.jobs, OutputFormat::Text)?;
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }
    Ok(())
}
