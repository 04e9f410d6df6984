// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `belt run` against plan files.

use crate::prelude::*;

const SHARED_CREW: &str = r#"
[config]
tick_ms = 60000

[[action]]
type = "extract"
subject = "Water"
source = "Extractor"
source_lot = "lot-1"
destination = "Warehouse"
destination_lot = "lot-2"
crew = "crew-a"
duration_ms = 3600000

[[action]]
type = "construct"
subject = "Refinery"
source = "Site"
source_lot = "lot-1"
crew = "crew-a"
duration_ms = 60000
"#;

fn renders<'a>(lines: &'a [Value], subject: &str) -> Vec<(usize, &'a Value)> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line["subject"] == subject)
        .collect()
}

fn first_index(lines: &[Value], subject: &str, state: &str) -> usize {
    renders(lines, subject)
        .into_iter()
        .find(|(_, line)| line["state"] == state)
        .map(|(i, _)| i)
        .unwrap_or_else(|| panic!("{subject} never rendered as {state}"))
}

#[test]
fn fast_run_settles_and_reports_json() {
    let project = Project::empty();
    let plan = project.file("plan.toml", SHARED_CREW);

    let run = cli().args(&["-o", "json", "run", "--fast"]).arg(&plan).passes();
    let lines = run.json_lines();

    let summary = lines.last().unwrap();
    assert_eq!(summary["settled"], true);
    let actions = summary["actions"].as_array().unwrap();
    assert_eq!(actions.len(), 2);
    assert!(actions.iter().all(|a| a["state"] == "done"));
    // Most recently finalized first
    assert_eq!(actions[0]["subject"], "Refinery");
}

#[test]
fn shared_crew_waits_for_the_slot() {
    let project = Project::empty();
    let plan = project.file("plan.toml", SHARED_CREW);

    let run = cli().args(&["-o", "json", "run", "--fast"]).arg(&plan).passes();
    let lines = run.json_lines();

    let water_done = first_index(&lines, "Water", "done");
    let refinery_started = first_index(&lines, "Refinery", "ongoing");
    assert!(water_done < refinery_started, "refinery started while the crew was busy");
}

#[test]
fn text_output_ends_with_summary() {
    let project = Project::empty();
    let plan = project.file("plan.toml", SHARED_CREW);

    cli()
        .args(&["run", "--fast"])
        .arg(&plan)
        .passes()
        .stdout_has("queued extract Water waiting")
        .stdout_has("ongoing extract Water 1h left")
        .stdout_has("settled after");
}

#[test]
fn tick_limit_exits_unsettled() {
    let project = Project::empty();
    let plan = project.file("plan.toml", SHARED_CREW);

    let run = cli()
        .args(&["-o", "json", "run", "--fast", "--max-ticks", "1"])
        .arg(&plan)
        .fails_with(3)
        .stderr_has("plan did not settle after 1 tick(s)");
    let summary = run.json_lines().pop().unwrap();
    assert_eq!(summary["settled"], false);
}

#[test]
fn env_tick_override_applies() {
    let project = Project::empty();
    let plan = project.file(
        "plan.toml",
        "[[action]]\ntype = \"land\"\nsubject = \"Shuttle\"\nsource = \"Port\"\nsource_lot = \"lot-3\"\nduration_ms = 600000\n",
    );

    // One-minute ticks: queue, start, then ten ticks of runtime
    let run = cli()
        .env("BELT_TICK_MS", "60000")
        .args(&["-o", "json", "run", "--fast", "--max-ticks", "20"])
        .arg(&plan)
        .passes();
    let summary = run.json_lines().pop().unwrap();
    assert_eq!(summary["settled"], true);
    assert!(summary["ticks"].as_u64().unwrap() <= 12);
}

#[test]
fn unknown_action_type_fails() {
    let project = Project::empty();
    let plan = project.file(
        "plan.toml",
        "[[action]]\ntype = \"teleport\"\nsubject = \"x\"\nsource = \"a\"\nsource_lot = \"b\"\n",
    );

    cli().args(&["run", "--fast"]).arg(&plan).fails_with(1).stderr_has("action #1").stderr_has("teleport");
}

#[test]
fn malformed_plan_fails() {
    let project = Project::empty();
    let plan = project.file("plan.toml", "[[action]\n");

    cli().args(&["run", "--fast"]).arg(&plan).fails_with(1).stderr_has("invalid plan");
}

#[test]
fn missing_plan_fails() {
    let project = Project::empty();
    let plan = project.path().join("absent.toml");

    cli().args(&["run", "--fast"]).arg(&plan).fails_with(1).stderr_has("failed to read plan");
}
