// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory scheduler for tests.

use parking_lot::Mutex;

use crate::{ScheduledEntry, Scheduler, SchedulerError, ServiceStatus, MARKER_PREFIX};

struct State {
    entries: Vec<ScheduledEntry>,
    fail_next_add: bool,
    unavailable: Option<String>,
}

/// Behaves like the crontab backend without touching any file: duplicate
/// detection by description, not-found on remove, and injectable failures
/// for exercising rollback paths.
pub struct FakeScheduler {
    state: Mutex<State>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                entries: Vec::new(),
                fail_next_add: false,
                unavailable: None,
            }),
        }
    }

    /// Snapshot of the current entries.
    pub fn entries(&self) -> Vec<ScheduledEntry> {
        self.state.lock().entries.clone()
    }

    /// Render what the crontab text would look like, for snapshot asserts.
    pub fn rendered(&self) -> String {
        let mut out = String::new();
        for e in &self.state.lock().entries {
            out.push_str(&format!(
                "{} {}\n{} {}\n",
                MARKER_PREFIX, e.description, e.recurrence, e.command
            ));
        }
        out
    }

    /// The next `add` call fails with an I/O error after no mutation.
    pub fn fail_next_add(&self) {
        self.state.lock().fail_next_add = true;
    }

    /// All subsequent calls fail with `SchedulerError::Unavailable`.
    pub fn set_unavailable(&self, reason: &str) {
        self.state.lock().unavailable = Some(reason.to_string());
    }
}

impl Default for FakeScheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn check_available(state: &State) -> Result<(), SchedulerError> {
    match &state.unavailable {
        Some(reason) => Err(SchedulerError::Unavailable {
            reason: reason.clone(),
        }),
        None => Ok(()),
    }
}

#[async_trait::async_trait]
impl Scheduler for FakeScheduler {
    async fn add(
        &self,
        description: &str,
        recurrence: &str,
        command: &str,
    ) -> Result<(), SchedulerError> {
        let mut state = self.state.lock();
        check_available(&state)?;
        if state.fail_next_add {
            state.fail_next_add = false;
            return Err(SchedulerError::Io(std::io::Error::other(
                "injected add failure",
            )));
        }
        if state.entries.iter().any(|e| e.description == description) {
            return Err(SchedulerError::Duplicate {
                description: description.to_string(),
            });
        }
        state.entries.push(ScheduledEntry {
            description: description.to_string(),
            recurrence: recurrence.to_string(),
            command: command.to_string(),
        });
        Ok(())
    }

    async fn remove(&self, description: &str) -> Result<(), SchedulerError> {
        let mut state = self.state.lock();
        check_available(&state)?;
        let before = state.entries.len();
        state.entries.retain(|e| e.description != description);
        if state.entries.len() == before {
            return Err(SchedulerError::NotFound {
                query: description.to_string(),
            });
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ScheduledEntry>, SchedulerError> {
        let state = self.state.lock();
        check_available(&state)?;
        Ok(state.entries.clone())
    }

    async fn service_status(&self) -> Result<ServiceStatus, SchedulerError> {
        let state = self.state.lock();
        Ok(match &state.unavailable {
            Some(reason) => ServiceStatus::NotRunning {
                reason: reason.clone(),
            },
            None => ServiceStatus::Running,
        })
    }
}
