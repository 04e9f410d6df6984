// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drive a planner until every action is done.
//!
//! [`run_until_settled`] paces ticks with a tokio interval against the
//! planner's own clock; [`run_stepped`] moves a [`FakeClock`] forward one
//! tick at a time and never sleeps.

use crate::error::PlannerError;
use crate::planner::Planner;
use crate::render::Renderer;
use belt_core::{Clock, FakeClock, IdGen};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub settled: bool,
}

pub async fn run_until_settled<C: Clock, R: Renderer, G: IdGen>(
    planner: &mut Planner<C, R, G>,
    shutdown: CancellationToken,
    max_ticks: Option<u64>,
) -> Result<RunSummary, PlannerError> {
    let mut interval = tokio::time::interval(planner.config().tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks = 0;

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                tracing::info!(ticks, "run loop cancelled");
                break;
            }
            _ = interval.tick() => {}
        }
        planner.tick()?;
        ticks += 1;
        if planner.is_settled() || limit_reached(ticks, max_ticks) {
            break;
        }
    }

    Ok(RunSummary { ticks, settled: planner.is_settled() })
}

pub fn run_stepped<R: Renderer, G: IdGen>(
    planner: &mut Planner<FakeClock, R, G>,
    max_ticks: Option<u64>,
) -> Result<RunSummary, PlannerError> {
    let step = planner.config().tick_interval();
    let clock = planner.clock().clone();
    let mut ticks = 0;

    loop {
        planner.tick()?;
        ticks += 1;
        if planner.is_settled() || limit_reached(ticks, max_ticks) {
            break;
        }
        clock.advance(step);
    }

    Ok(RunSummary { ticks, settled: planner.is_settled() })
}

fn limit_reached(ticks: u64, max_ticks: Option<u64>) -> bool {
    match max_ticks {
        Some(max) if ticks >= max => {
            tracing::warn!(ticks, "tick limit reached before the plan settled");
            true
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
