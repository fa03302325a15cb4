// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build the exact command line the native scheduler will invoke.

use std::path::Path;

use crate::job::Job;

/// Assemble the scheduled command line for a job.
///
/// The working directory is pinned with an explicit `cd` because scheduled
/// invocations inherit no useful shell working directory. The provider is
/// always passed even when it equals the runner's default, and the log flag
/// is always appended, so the invocation stays reproducible independent of
/// future default changes.
pub fn build_command(job: &Job, project_root: &Path) -> String {
    let mut cmd = format!(
        "cd {} && {} {}",
        quote(&project_root.to_string_lossy()),
        job.agent_type.runner(),
        quote(&job.target_id),
    );
    cmd.push_str(&format!(" --provider {}", job.provider));
    if let Some(input) = &job.input {
        cmd.push_str(&format!(" --input {}", quote(input)));
    }
    if job.background {
        cmd.push_str(" --background");
    }
    cmd.push_str(&format!(" --log-file {}", quote(&job.log_path.to_string_lossy())));
    cmd
}

/// Single-quote a value for `sh` unless it is already shell-safe.
fn quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':'));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
