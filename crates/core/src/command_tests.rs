// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::job::{AgentType, Provider};
use std::path::PathBuf;

fn job() -> crate::Job {
    crate::job::tests::sample_job("Daily Standup")
}

#[test]
fn pins_working_directory_and_runner() {
    let cmd = build_command(&job(), Path::new("/opt/agents"));
    assert!(cmd.starts_with("cd /opt/agents && scripts/run-n8n.sh wf-123"));
}

#[test]
fn provider_always_explicit() {
    // Default provider is still spelled out so the scheduled line stays
    // reproducible if the runner's default changes later.
    let cmd = build_command(&job(), Path::new("/opt/agents"));
    assert!(cmd.contains(" --provider openai"));
}

#[test]
fn log_flag_always_appended() {
    let cmd = build_command(&job(), Path::new("/opt/agents"));
    assert!(cmd.ends_with(" --log-file /var/log/aj/daily-standup.log"));
}

#[test]
fn background_flag_when_set() {
    let mut j = job();
    j.background = true;
    let cmd = build_command(&j, Path::new("/opt/agents"));
    assert!(cmd.contains(" --background "));
}

#[test]
fn input_passthrough_is_quoted() {
    let mut j = job();
    j.input = Some("summarize today's metrics".to_string());
    let cmd = build_command(&j, Path::new("/opt/agents"));
    assert!(cmd.contains(r"--input 'summarize today'\''s metrics'"));
}

#[test]
fn path_with_spaces_is_quoted() {
    let mut j = job();
    j.log_path = PathBuf::from("/var/log/a j/out.log");
    let cmd = build_command(&j, Path::new("/opt/my agents"));
    assert!(cmd.contains("cd '/opt/my agents' &&"));
    assert!(cmd.contains("--log-file '/var/log/a j/out.log'"));
}

#[test]
fn runner_chosen_by_agent_type() {
    let mut j = job();
    j.agent_type = AgentType::LangFlow;
    j.provider = Provider::Ollama;
    let cmd = build_command(&j, Path::new("/opt/agents"));
    assert!(cmd.contains("scripts/run-langflow.sh"));
    assert!(cmd.contains("--provider ollama"));
}
