// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::Sandbox;

#[test]
fn no_args_prints_usage() {
    let sb = Sandbox::new();
    sb.aj(&[]).fails_with(2).stderr_has("Usage:");
}

#[test]
fn version_flag() {
    let sb = Sandbox::new();
    sb.aj(&["--version"]).passes().stdout_has("aj");
}

#[test]
fn help_lists_subcommands() {
    let sb = Sandbox::new();
    sb.aj(&["--help"])
        .passes()
        .stdout_has("add")
        .stdout_has("list")
        .stdout_has("remove")
        .stdout_has("status");
}

#[test]
fn add_help_documents_arguments() {
    let sb = Sandbox::new();
    sb.aj(&["add", "--help"])
        .passes()
        .stdout_has("--provider")
        .stdout_has("--background")
        .stdout_has("duplicate-detection key");
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let sb = Sandbox::new();
    sb.aj(&["frobnicate"]).fails_with(2);
}
