// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Job` model: an operator-managed pairing of a recurrence with a
//! target-runner invocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::recurrence::RecurrenceSpec;

/// Recognized target-runner kinds.
///
/// The scheduler does not know what a runner does; each kind only maps to
/// the wrapper script invoked at trigger time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    N8n,
    LangFlow,
    Flowise,
}

impl AgentType {
    /// Wrapper script invoked at trigger time, relative to the project root.
    pub fn runner(&self) -> &'static str {
        match self {
            Self::N8n => "scripts/run-n8n.sh",
            Self::LangFlow => "scripts/run-langflow.sh",
            Self::Flowise => "scripts/run-flowise.sh",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown agent type `{0}`; expected n8n, langflow, or flowise")]
pub struct UnknownAgentType(pub String);

impl FromStr for AgentType {
    type Err = UnknownAgentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "n8n" => Ok(Self::N8n),
            "langflow" => Ok(Self::LangFlow),
            "flowise" => Ok(Self::Flowise),
            other => Err(UnknownAgentType(other.to_string())),
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::N8n => "n8n",
            Self::LangFlow => "langflow",
            Self::Flowise => "flowise",
        };
        write!(f, "{}", s)
    }
}

/// Inference-backend selector passed through to the target runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Openai,
    Anthropic,
    Ollama,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown provider `{0}`; expected openai, anthropic, or ollama")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::Openai),
            "anthropic" => Ok(Self::Anthropic),
            "ollama" => Ok(Self::Ollama),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Openai => "openai",
            Self::Anthropic => "anthropic",
            Self::Ollama => "ollama",
        };
        write!(f, "{}", s)
    }
}

/// A scheduled job.
///
/// `name` is derived deterministically from `description` (see
/// [`crate::slug::slugify`]); `description` is the duplicate-detection key
/// and the durable identity embedded in the scheduler's marker comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub description: String,
    pub agent_type: AgentType,
    pub target_id: String,
    /// Schedule exactly as the operator typed it.
    pub schedule_text: String,
    pub recurrence: RecurrenceSpec,
    #[serde(default)]
    pub provider: Provider,
    #[serde(default)]
    pub background: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub log_path: PathBuf,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "job_tests.rs"]
pub(crate) mod tests;
