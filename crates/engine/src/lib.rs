// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! belt-engine: timers, readiness and rendering around the action lifecycle

mod config;
mod env;
mod error;
mod planner;
mod render;
mod runner;
mod scheduler;
mod timer;

pub use config::PlannerConfig;
pub use error::{ConfigError, PlannerError};
pub use planner::{Planner, Removal, TickReport};
#[cfg(any(test, feature = "test-support"))]
pub use render::{RecordingRenderer, RenderCall};
pub use render::{NullRenderer, Renderer};
pub use runner::{run_stepped, run_until_settled, RunSummary};
pub use scheduler::Scheduler;
pub use timer::{TimerId, TimerKind};
