// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-user directory layout.
//!
//! Everything lives under one state directory, overridable with
//! `AJ_STATE_DIR` (the hook the workspace specs use for isolation):
//!
//! ```text
//! <state>/jobs/<name>.json   job metadata records
//! <state>/logs/<name>.log    default log destination for scheduled runs
//! <state>/crontab.bak        defensive backup taken before each mutation
//! ```

use std::path::PathBuf;

/// Root state directory: `$AJ_STATE_DIR`, else `<data_dir>/aj`.
pub fn state_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("AJ_STATE_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aj")
}

/// Directory holding one metadata record per job.
pub fn jobs_dir() -> PathBuf {
    state_dir().join("jobs")
}

/// Default log directory: `$AJ_LOG_DIR`, else `<state>/logs`.
pub fn logs_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("AJ_LOG_DIR") {
        return PathBuf::from(dir);
    }
    state_dir().join("logs")
}

/// Where the crontab backend parks its pre-mutation backup.
pub fn crontab_backup() -> PathBuf {
    state_dir().join("crontab.bak")
}
