// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The four lifecycle verbs: add, list, remove, status.
//!
//! Every verb runs to completion synchronously from the operator's point of
//! view and either completes or fails without leaving partial state. The CLI
//! is the sole recovery boundary: no retries happen here.

use std::collections::BTreeMap;
use std::path::PathBuf;

use aj_adapters::{Scheduler, SchedulerError, ServiceStatus};
use aj_core::{build_command, parse_schedule, slugify, AgentType, Job, Provider};
use aj_core::{RecurrenceSpec, ScheduleParseError};
use aj_storage::{JobStore, StoreError};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Parse(#[from] ScheduleParseError),

    #[error("description {description:?} cannot be scheduled: {reason}")]
    InvalidDescription { description: String, reason: String },

    #[error("a job with description `{description}` already exists; `aj remove` it first")]
    Duplicate { description: String },

    #[error("no job matches `{query}`")]
    NotFound { query: String },

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// One half of a mutation succeeded and the compensating action failed.
    /// Surfaced loudly: the operator must reconcile by hand.
    #[error("job `{name}` is in an inconsistent half-registered state: {detail}")]
    PartialRegistration { name: String, detail: String },
}

impl LifecycleError {
    fn from_scheduler(err: SchedulerError) -> Self {
        match err {
            SchedulerError::Duplicate { description } => Self::Duplicate { description },
            SchedulerError::NotFound { query } => Self::NotFound { query },
            other => Self::Scheduler(other),
        }
    }
}

/// Operator input to `add`, before any derivation.
#[derive(Debug, Clone)]
pub struct AddSpec {
    pub agent_type: AgentType,
    pub target_id: String,
    pub schedule_text: String,
    pub description: String,
    pub provider: Provider,
    pub input: Option<String>,
    pub background: bool,
}

/// How a listed job's two sides agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncState {
    /// Scheduler entry and metadata record both present.
    Synced,
    /// Entry fires but has no metadata record.
    SchedulerOnly,
    /// Metadata record exists but nothing is scheduled; the job is inert.
    StoreOnly,
}

/// Merged view of one job for display.
#[derive(Debug, Clone, Serialize)]
pub struct JobListing {
    pub name: String,
    pub description: String,
    pub recurrence: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<Job>,
    pub state: SyncState,
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub service_running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_detail: Option<String>,
    pub jobs: Vec<JobListing>,
}

pub struct Lifecycle<S: Scheduler> {
    store: JobStore,
    scheduler: S,
    project_root: PathBuf,
    log_dir: PathBuf,
}

impl<S: Scheduler> Lifecycle<S> {
    pub fn new(store: JobStore, scheduler: S, project_root: PathBuf, log_dir: PathBuf) -> Self {
        Self {
            store,
            scheduler,
            project_root,
            log_dir,
        }
    }

    /// Schedule a new job.
    ///
    /// Parse and description-validation failures abort before any
    /// mutation. The description becomes a single marker comment line and
    /// the slug becomes a file name, so control characters and
    /// descriptions with no alphanumeric characters are rejected here
    /// rather than letting either backend write state it cannot read
    /// back. Duplicates are checked
    /// against both the metadata store and the live scheduler; the two can
    /// drift, and disagreement is treated as "exists" (the conservative
    /// choice). The metadata record is written first and rolled back if
    /// scheduler registration fails, so a crash between the two steps
    /// leaves at worst an inert record, never an untracked entry.
    pub async fn add(&self, spec: AddSpec) -> Result<Job, LifecycleError> {
        let recurrence: RecurrenceSpec = parse_schedule(&spec.schedule_text)?;
        if spec.description.chars().any(char::is_control) {
            return Err(LifecycleError::InvalidDescription {
                description: spec.description,
                reason: "control characters are not allowed".to_string(),
            });
        }
        let name = slugify(&spec.description);
        if name.is_empty() {
            return Err(LifecycleError::InvalidDescription {
                description: spec.description,
                reason: "needs at least one letter or digit".to_string(),
            });
        }

        if self.store.get(&name)?.is_some() {
            return Err(LifecycleError::Duplicate {
                description: spec.description,
            });
        }
        let scheduled = self.scheduler.list().await?;
        if scheduled.iter().any(|e| e.description == spec.description) {
            return Err(LifecycleError::Duplicate {
                description: spec.description,
            });
        }

        std::fs::create_dir_all(&self.log_dir).map_err(StoreError::from)?;
        let job = Job {
            log_path: self.log_dir.join(format!("{}.log", name)),
            name,
            description: spec.description,
            agent_type: spec.agent_type,
            target_id: spec.target_id,
            schedule_text: spec.schedule_text,
            recurrence,
            provider: spec.provider,
            background: spec.background,
            input: spec.input,
            created_at: Utc::now(),
        };
        let command = build_command(&job, &self.project_root);

        self.store.put(&job)?;
        let registration = self
            .scheduler
            .add(&job.description, &job.recurrence.to_string(), &command)
            .await;
        if let Err(err) = registration {
            warn!(name = %job.name, error = %err, "registration failed, rolling back metadata");
            return match self.store.delete(&job.name) {
                Ok(_) => Err(LifecycleError::from_scheduler(err)),
                Err(rollback_err) => Err(LifecycleError::PartialRegistration {
                    name: job.name.clone(),
                    detail: format!(
                        "scheduler registration failed ({}) and metadata rollback also failed ({})",
                        err, rollback_err
                    ),
                }),
            };
        }

        info!(name = %job.name, schedule = %job.recurrence, "job scheduled");
        Ok(job)
    }

    /// Merge the scheduler's view with the metadata store, by name.
    ///
    /// The scheduler is authoritative for what will fire; the store only
    /// supplies display detail. Entries present on one side but not the
    /// other are flagged, never silently merged.
    pub async fn list(&self) -> Result<Vec<JobListing>, LifecycleError> {
        let entries = self.scheduler.list().await?;
        let mut records: BTreeMap<String, Job> = self
            .store
            .list()?
            .into_iter()
            .map(|j| (j.name.clone(), j))
            .collect();

        let mut listings = Vec::new();
        for entry in entries {
            let name = slugify(&entry.description);
            let record = records.remove(&name);
            let state = if record.is_some() {
                SyncState::Synced
            } else {
                SyncState::SchedulerOnly
            };
            listings.push(JobListing {
                name,
                description: entry.description,
                recurrence: entry.recurrence,
                command: Some(entry.command),
                record,
                state,
            });
        }
        for (name, record) in records {
            listings.push(JobListing {
                name,
                description: record.description.clone(),
                recurrence: record.recurrence.to_string(),
                command: None,
                record: Some(record),
                state: SyncState::StoreOnly,
            });
        }
        listings.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listings)
    }

    /// Remove a job by slug name or by its original description.
    ///
    /// The scheduler entry is deleted first, then the metadata record; a
    /// missing entry reports not-found without mutating anything.
    pub async fn remove(&self, name_or_description: &str) -> Result<String, LifecycleError> {
        let name = slugify(name_or_description);

        // Recover the exact description: from the record if we have one,
        // otherwise by scanning the scheduler's marker comments.
        let description = match self.store.get(&name)? {
            Some(job) => job.description,
            None => {
                let entries = self.scheduler.list().await?;
                match entries
                    .into_iter()
                    .find(|e| slugify(&e.description) == name)
                {
                    Some(entry) => entry.description,
                    None => {
                        return Err(LifecycleError::NotFound {
                            query: name_or_description.to_string(),
                        })
                    }
                }
            }
        };

        self.scheduler
            .remove(&description)
            .await
            .map_err(LifecycleError::from_scheduler)?;

        if let Err(err) = self.store.delete(&name) {
            return Err(LifecycleError::PartialRegistration {
                name,
                detail: format!(
                    "scheduler entry removed but the metadata record could not be deleted ({})",
                    err
                ),
            });
        }

        info!(name = %name, "job removed");
        Ok(name)
    }

    /// Service health plus the merged job listing.
    pub async fn status(&self) -> Result<StatusReport, LifecycleError> {
        let service = self.scheduler.service_status().await?;
        let (service_running, service_detail) = match service {
            ServiceStatus::Running => (true, None),
            ServiceStatus::NotRunning { reason } => (false, Some(reason)),
        };
        let jobs = self.list().await?;
        Ok(StatusReport {
            service_running,
            service_detail,
            jobs,
        })
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
