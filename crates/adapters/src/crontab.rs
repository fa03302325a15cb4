// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crontab text backend.
//!
//! The live crontab is treated as a key-value store: a marker comment line
//! is the key, the following line is the value. The file is never edited in
//! place: every mutation reads the full text, computes the replacement,
//! takes a defensive backup, and installs the new text in one write
//! (`crontab -` in system mode, temp-file rename in file mode).

use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::{ScheduledEntry, Scheduler, SchedulerError, ServiceStatus, MARKER_PREFIX};

enum Source {
    /// The invoking user's crontab, via the `crontab` binary.
    System,
    /// A plain file standing in for the crontab (test hook, also useful
    /// for inspecting what would be installed).
    File(PathBuf),
}

pub struct CrontabScheduler {
    source: Source,
    backup_path: PathBuf,
}

impl CrontabScheduler {
    pub fn system(backup_path: PathBuf) -> Self {
        Self {
            source: Source::System,
            backup_path,
        }
    }

    pub fn with_file(path: PathBuf, backup_path: PathBuf) -> Self {
        Self {
            source: Source::File(path),
            backup_path,
        }
    }

    /// System crontab unless `AJ_CRONTAB_FILE` points at a file.
    pub fn from_env(backup_path: PathBuf) -> Self {
        match std::env::var_os("AJ_CRONTAB_FILE") {
            Some(path) => Self::with_file(PathBuf::from(path), backup_path),
            None => Self::system(backup_path),
        }
    }

    async fn read_current(&self) -> Result<String, SchedulerError> {
        match &self.source {
            Source::File(path) => match tokio::fs::read_to_string(path).await {
                Ok(text) => Ok(text),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
                Err(err) => Err(err.into()),
            },
            Source::System => {
                let output = Command::new("crontab")
                    .arg("-l")
                    .output()
                    .await
                    .map_err(|err| spawn_error("crontab", err))?;
                if output.status.success() {
                    return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
                }
                let stderr = String::from_utf8_lossy(&output.stderr);
                // An empty crontab is not an error condition.
                if stderr.to_lowercase().contains("no crontab") {
                    Ok(String::new())
                } else {
                    Err(SchedulerError::Unavailable {
                        reason: format!("`crontab -l` failed: {}", stderr.trim()),
                    })
                }
            }
        }
    }

    /// Install `text` as the complete schedule in a single operation.
    async fn write_all(&self, text: &str) -> Result<(), SchedulerError> {
        match &self.source {
            Source::File(path) => {
                let tmp = path.with_extension("tmp");
                tokio::fs::write(&tmp, text).await?;
                tokio::fs::rename(&tmp, path).await?;
                Ok(())
            }
            Source::System => {
                let mut child = Command::new("crontab")
                    .arg("-")
                    .stdin(Stdio::piped())
                    .stderr(Stdio::piped())
                    .spawn()
                    .map_err(|err| spawn_error("crontab", err))?;
                if let Some(mut stdin) = child.stdin.take() {
                    stdin.write_all(text.as_bytes()).await?;
                }
                let output = child.wait_with_output().await?;
                if output.status.success() {
                    Ok(())
                } else {
                    Err(SchedulerError::Unavailable {
                        reason: format!(
                            "`crontab -` failed: {}",
                            String::from_utf8_lossy(&output.stderr).trim()
                        ),
                    })
                }
            }
        }
    }

    async fn backup(&self, text: &str) -> Result<(), SchedulerError> {
        if let Some(parent) = self.backup_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.backup_path, text).await?;
        Ok(())
    }
}

fn spawn_error(binary: &str, err: io::Error) -> SchedulerError {
    if err.kind() == io::ErrorKind::NotFound {
        SchedulerError::Unavailable {
            reason: format!("`{}` binary not found; is cron installed?", binary),
        }
    } else {
        SchedulerError::Io(err)
    }
}

/// Scan the schedule text for marker/job line pairs.
///
/// Returns each entry with the line index of its marker. A marker whose
/// following line is missing, blank, a comment, or too short to hold a
/// five-field schedule plus a command makes the whole text malformed;
/// callers must refuse to write rather than risk mangling it further.
fn scan(text: &str) -> Result<Vec<(usize, ScheduledEntry)>, SchedulerError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut entries = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if let Some(rest) = lines[i].strip_prefix(MARKER_PREFIX) {
            let description = rest.trim().to_string();
            let job_line = lines.get(i + 1).map(|l| l.trim()).unwrap_or("");
            if job_line.is_empty() || job_line.starts_with('#') {
                return Err(SchedulerError::Malformed {
                    reason: format!("marker for `{}` has no job line after it", description),
                });
            }
            let parts: Vec<&str> = job_line.split_whitespace().collect();
            if parts.len() < 6 {
                return Err(SchedulerError::Malformed {
                    reason: format!(
                        "job line for `{}` is not `<five-field schedule> <command>`",
                        description
                    ),
                });
            }
            entries.push((
                i,
                ScheduledEntry {
                    description,
                    recurrence: parts[..5].join(" "),
                    command: parts[5..].join(" "),
                },
            ));
            i += 2;
        } else {
            i += 1;
        }
    }
    Ok(entries)
}

#[async_trait::async_trait]
impl Scheduler for CrontabScheduler {
    async fn add(
        &self,
        description: &str,
        recurrence: &str,
        command: &str,
    ) -> Result<(), SchedulerError> {
        let current = self.read_current().await?;
        // Malformed existing content aborts here, before any write.
        let entries = scan(&current)?;
        if entries.iter().any(|(_, e)| e.description == description) {
            return Err(SchedulerError::Duplicate {
                description: description.to_string(),
            });
        }

        self.backup(&current).await?;

        let mut next = current;
        if !next.is_empty() && !next.ends_with('\n') {
            next.push('\n');
        }
        next.push_str(&format!(
            "{} {}\n{} {}\n",
            MARKER_PREFIX, description, recurrence, command
        ));
        self.write_all(&next).await?;
        debug!(description, recurrence, "added crontab entry");
        Ok(())
    }

    async fn remove(&self, description: &str) -> Result<(), SchedulerError> {
        let current = self.read_current().await?;
        let entries = scan(&current)?;
        let Some(&(marker_idx, _)) = entries
            .iter()
            .find(|(_, e)| e.description == description)
        else {
            return Err(SchedulerError::NotFound {
                query: description.to_string(),
            });
        };

        self.backup(&current).await?;

        // Drop the marker line and the job line directly after it.
        let kept: Vec<&str> = current
            .lines()
            .enumerate()
            .filter(|(i, _)| *i != marker_idx && *i != marker_idx + 1)
            .map(|(_, line)| line)
            .collect();
        let mut next = kept.join("\n");
        if !next.is_empty() {
            next.push('\n');
        }
        self.write_all(&next).await?;
        debug!(description, "removed crontab entry");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ScheduledEntry>, SchedulerError> {
        let current = self.read_current().await?;
        Ok(scan(&current)?.into_iter().map(|(_, e)| e).collect())
    }

    async fn service_status(&self) -> Result<ServiceStatus, SchedulerError> {
        match &self.source {
            // A plain file has no daemon to probe.
            Source::File(_) => Ok(ServiceStatus::Running),
            Source::System => {
                if let Err(err) = self.read_current().await {
                    let reason = err.to_string();
                    return Ok(ServiceStatus::NotRunning { reason });
                }
                for daemon in ["cron", "crond"] {
                    match Command::new("pgrep").args(["-x", daemon]).output().await {
                        Ok(output) if output.status.success() => {
                            return Ok(ServiceStatus::Running)
                        }
                        Ok(_) => {}
                        Err(err) => {
                            // Cannot probe without pgrep; assume the service
                            // is fine rather than fail the whole command.
                            warn!(error = %err, "pgrep unavailable, skipping daemon probe");
                            return Ok(ServiceStatus::Running);
                        }
                    }
                }
                Ok(ServiceStatus::NotRunning {
                    reason: "no cron/crond process found".to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "crontab_tests.rs"]
mod tests;
