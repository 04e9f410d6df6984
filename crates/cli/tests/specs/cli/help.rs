// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and version output.

use crate::prelude::*;

#[test]
fn help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("run").stdout_has("label");
}

#[test]
fn run_help_lists_flags() {
    cli().args(&["run", "--help"]).passes().stdout_has("--fast").stdout_has("--max-ticks");
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    cli().fails_with(2).stderr_has("Usage:");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}
