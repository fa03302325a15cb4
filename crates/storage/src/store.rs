// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed job metadata store.
//!
//! The store is supplementary detail for `list`/`status` display; the
//! native scheduler entry is the source of truth for whether a job fires.

use std::fs;
use std::io;
use std::path::PathBuf;

use aj_core::Job;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("job record `{name}` is corrupt: {source}")]
    Corrupt {
        name: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize job record `{name}`: {source}")]
    Encode {
        name: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// One JSON file per job, keyed by job name.
pub struct JobStore {
    dir: PathBuf,
}

impl JobStore {
    /// Open a store rooted at `dir`, creating the directory if absent.
    pub fn open(dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Open the per-user store (see [`crate::paths::jobs_dir`]).
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(crate::paths::jobs_dir())
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    /// Persist a job record, replacing any existing record of the same name.
    pub fn put(&self, job: &Job) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(job).map_err(|source| StoreError::Encode {
            name: job.name.clone(),
            source,
        })?;
        // Write-then-rename so a crash never leaves a half-written record.
        let tmp = self.dir.join(format!("{}.json.tmp", job.name));
        fs::write(&tmp, data)?;
        fs::rename(&tmp, self.record_path(&job.name))?;
        debug!(name = %job.name, "stored job record");
        Ok(())
    }

    /// Fetch a record by name, or `None` if absent.
    pub fn get(&self, name: &str) -> Result<Option<Job>, StoreError> {
        let data = match fs::read(self.record_path(name)) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let job = serde_json::from_slice(&data).map_err(|source| StoreError::Corrupt {
            name: name.to_string(),
            source,
        })?;
        Ok(Some(job))
    }

    /// Delete a record. Returns whether a record existed.
    pub fn delete(&self, name: &str) -> Result<bool, StoreError> {
        match fs::remove_file(self.record_path(name)) {
            Ok(()) => {
                debug!(name = %name, "deleted job record");
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// All records, sorted by job name.
    pub fn list(&self) -> Result<Vec<Job>, StoreError> {
        let mut jobs = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let data = fs::read(&path)?;
            let job = serde_json::from_slice(&data)
                .map_err(|source| StoreError::Corrupt { name, source })?;
            jobs.push(job);
        }
        jobs.sort_by(|a: &Job, b: &Job| a.name.cmp(&b.name));
        Ok(jobs)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
