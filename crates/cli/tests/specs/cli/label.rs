// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `belt label` output.

use crate::prelude::*;

#[test]
fn past_delta_reads_ago() {
    let run = cli().args(&["label", "432000000"]).passes();
    similar_asserts::assert_eq!(run.stdout(), "relative: 5 days ago\nremaining: 5d\n");
}

#[test]
fn negative_delta_reads_in_the_future() {
    let run = cli().args(&["label", "-3600000"]).passes();
    similar_asserts::assert_eq!(run.stdout(), "relative: in 1 hour\nremaining: 1h\n");
}

#[test]
fn json_output() {
    let run = cli().args(&["-o", "json", "label", "10000"]).passes();
    let lines = run.json_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["delta_ms"], 10_000);
    assert_eq!(lines[0]["relative"], "just now");
    assert_eq!(lines[0]["remaining"], "10s");
}

#[test]
fn non_numeric_delta_is_rejected() {
    cli().args(&["label", "soon"]).fails_with(2);
}
