// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `belt run`: drive a plan file until every action is done.

use anyhow::{Context, Result};
use belt_core::{ActionSpec, Clock, FakeClock, IdGen, SystemClock};
use belt_engine::{run_stepped, run_until_settled, Planner, PlannerConfig, Renderer, RunSummary};
use clap::Args;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use crate::exit_error::{ExitError, EXIT_UNSETTLED};
use crate::output::{write_summary, LineRenderer, OutputFormat};
use crate::plan::Plan;

#[derive(Args)]
pub struct RunArgs {
    /// Plan file (TOML)
    pub plan: PathBuf,
    /// Step a simulated clock instead of waiting in real time
    #[arg(long)]
    pub fast: bool,
    /// Give up after this many ticks
    #[arg(long, value_name = "N")]
    pub max_ticks: Option<u64>,
}

pub async fn handle(args: RunArgs, format: OutputFormat) -> Result<()> {
    let plan = Plan::load(&args.plan)?;
    let specs = plan.specs()?;
    let config = run_config(plan.config);
    tracing::info!(plan = %args.plan.display(), actions = specs.len(), fast = args.fast, "running plan");

    let renderer = LineRenderer::stdout(format);
    let (summary, views) = if args.fast {
        let clock = FakeClock::at(SystemClock.epoch_ms());
        let mut planner = Planner::new(clock, renderer, config);
        enqueue_all(&mut planner, specs)?;
        let summary = run_stepped(&mut planner, args.max_ticks)?;
        (summary, planner.views())
    } else {
        let mut planner = Planner::new(SystemClock, renderer, config);
        enqueue_all(&mut planner, specs)?;
        let shutdown = CancellationToken::new();
        let _ctrl_c = CtrlC::watch(shutdown.clone());
        let summary = run_until_settled(&mut planner, shutdown, args.max_ticks).await?;
        (summary, planner.views())
    };

    write_summary(&mut std::io::stdout(), &summary, &views, format)?;
    check_settled(&summary)
}

/// Plan settings with env overrides; `run` always advances on its own.
fn run_config(config: PlannerConfig) -> PlannerConfig {
    PlannerConfig { auto_advance: true, ..config.with_env_overrides() }
}

fn enqueue_all<C: Clock, R: Renderer, G: IdGen>(
    planner: &mut Planner<C, R, G>,
    specs: Vec<ActionSpec>,
) -> Result<()> {
    for (i, spec) in specs.into_iter().enumerate() {
        planner.enqueue(spec).with_context(|| format!("failed to queue action #{}", i + 1))?;
    }
    Ok(())
}

/// Cancels `shutdown` on Ctrl-C for as long as it is alive.
struct CtrlC(tokio::task::JoinHandle<()>);

impl CtrlC {
    fn watch(shutdown: CancellationToken) -> Self {
        Self(tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.cancel();
            }
        }))
    }
}

impl Drop for CtrlC {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn check_settled(summary: &RunSummary) -> Result<()> {
    if summary.settled {
        return Ok(());
    }
    Err(ExitError::new(
        EXIT_UNSETTLED,
        format!("plan did not settle after {} tick(s)", summary.ticks),
    )
    .into())
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
