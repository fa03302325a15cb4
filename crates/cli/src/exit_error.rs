// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

use aj_adapters::SchedulerError;
use aj_engine::LifecycleError;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

impl From<LifecycleError> for ExitError {
    fn from(err: LifecycleError) -> Self {
        // 1: recoverable (fix the invocation and re-run)
        // 2: fatal (host scheduler broken or state needs manual cleanup)
        let code = match &err {
            LifecycleError::Parse(_)
            | LifecycleError::InvalidDescription { .. }
            | LifecycleError::Duplicate { .. }
            | LifecycleError::NotFound { .. } => 1,
            LifecycleError::Scheduler(SchedulerError::Duplicate { .. })
            | LifecycleError::Scheduler(SchedulerError::NotFound { .. }) => 1,
            LifecycleError::Scheduler(_)
            | LifecycleError::Store(_)
            | LifecycleError::PartialRegistration { .. } => 2,
        };
        Self::new(code, err.to_string())
    }
}
