// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! aj-adapters: Native scheduler backends.
//!
//! The [`Scheduler`] trait is the platform seam. Higher layers never branch
//! on platform: a text scheduler (crontab) and a structured task registry
//! both fit behind the same four operations. Only the crontab backend is
//! implemented here; [`FakeScheduler`] backs the engine tests.

pub mod crontab;
#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use crontab::CrontabScheduler;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeScheduler;

use async_trait::async_trait;
use thiserror::Error;

/// Comment prefix embedded next to each job line. This comment is the sole
/// durable identity used to find the entry again on `remove` and `list`.
pub const MARKER_PREFIX: &str = "# aj job:";

/// A job as reconstructed from the native scheduler itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEntry {
    pub description: String,
    pub recurrence: String,
    pub command: String,
}

/// Health of the underlying scheduler service, independent of any job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    Running,
    NotRunning { reason: String },
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("a job with description `{description}` is already scheduled; remove it first")]
    Duplicate { description: String },

    #[error("no scheduled job matches `{query}`")]
    NotFound { query: String },

    #[error("scheduler unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("refusing to modify schedule: {reason}")]
    Malformed { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Atomic add/list/remove against the host's native scheduler.
///
/// Implementations mutate the live schedule only as read-snapshot →
/// compute-new-state → single-write replace. The read-modify-write window
/// is intentionally unlocked (last writer wins); this tool is for a single
/// interactive operator, so implementations keep the window narrow instead
/// of adding a locking protocol.
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Register an entry. Fails with [`SchedulerError::Duplicate`] if an
    /// entry with the same description already exists; nothing is written
    /// in that case.
    async fn add(
        &self,
        description: &str,
        recurrence: &str,
        command: &str,
    ) -> Result<(), SchedulerError>;

    /// Remove the entry with the given description. Fails with
    /// [`SchedulerError::NotFound`] without mutating anything if absent.
    async fn remove(&self, description: &str) -> Result<(), SchedulerError>;

    /// All entries this tool owns, in schedule order.
    async fn list(&self) -> Result<Vec<ScheduledEntry>, SchedulerError>;

    /// Whether the scheduler service itself is able to fire jobs.
    async fn service_status(&self) -> Result<ServiceStatus, SchedulerError>;
}
