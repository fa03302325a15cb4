// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! aj-core: Core library for the Agent Jobs (aj) CLI tool

pub mod command;
pub mod job;
pub mod recurrence;
pub mod slug;

pub use command::build_command;
pub use job::{AgentType, Job, Provider, UnknownAgentType, UnknownProvider};
pub use recurrence::{parse_schedule, RecurrenceSpec, ScheduleParseError};
pub use slug::slugify;
