// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! aj-engine: Lifecycle orchestration for scheduled agent jobs.

pub mod lifecycle;

pub use lifecycle::{
    AddSpec, JobListing, Lifecycle, LifecycleError, StatusReport, SyncState,
};
