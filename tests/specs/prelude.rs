// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared sandbox and assertion helpers for CLI specs.

use std::path::PathBuf;
use std::process::Output;

use tempfile::TempDir;

pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn crontab_path(&self) -> PathBuf {
        self.dir.path().join("crontab")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.dir.path().join("state")
    }

    /// Current crontab text ("" if none was ever written).
    pub fn crontab(&self) -> String {
        std::fs::read_to_string(self.crontab_path()).unwrap_or_default()
    }

    pub fn seed_crontab(&self, text: &str) {
        std::fs::write(self.crontab_path(), text).unwrap();
    }

    /// Path of the metadata record for a job name.
    pub fn job_record(&self, name: &str) -> PathBuf {
        self.state_dir().join("jobs").join(format!("{}.json", name))
    }

    pub fn aj(&self, args: &[&str]) -> Run {
        let mut cmd = assert_cmd::Command::cargo_bin("aj").unwrap();
        let output = cmd
            .args(args)
            .env("AJ_CRONTAB_FILE", self.crontab_path())
            .env("AJ_STATE_DIR", self.state_dir())
            .current_dir(self.dir.path())
            .output()
            .unwrap();
        Run { output }
    }

    pub fn add_standup(&self) {
        self.aj(&["add", "n8n", "wf-123", "daily at 9am", "Daily Standup"])
            .passes();
    }
}

pub struct Run {
    pub output: Output,
}

impl Run {
    fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    #[track_caller]
    pub fn passes(self) -> Self {
        assert!(
            self.output.status.success(),
            "expected success, got {:?}\nstdout: {}\nstderr: {}",
            self.output.status.code(),
            self.stdout(),
            self.stderr(),
        );
        self
    }

    #[track_caller]
    pub fn fails_with(self, code: i32) -> Self {
        assert_eq!(
            self.output.status.code(),
            Some(code),
            "stdout: {}\nstderr: {}",
            self.stdout(),
            self.stderr(),
        );
        self
    }

    #[track_caller]
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout().contains(needle),
            "stdout missing `{}`:\n{}",
            needle,
            self.stdout(),
        );
        self
    }

    #[track_caller]
    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stdout().contains(needle),
            "stdout unexpectedly contains `{}`:\n{}",
            needle,
            self.stdout(),
        );
        self
    }

    #[track_caller]
    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr().contains(needle),
            "stderr missing `{}`:\n{}",
            needle,
            self.stderr(),
        );
        self
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap()
    }
}
