// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Planner configuration.
//!
//! Read from TOML (a standalone file or the `[config]` table of a plan),
//! then overlaid with `BELT_*` environment variables.

use crate::env;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Interval of the run loop
    pub tick_ms: u64,
    /// How long the visual reflection of a state change is deferred
    pub render_delay_ms: u64,
    /// Advance ready actions without waiting for the user
    pub auto_advance: bool,
    /// Allow one ongoing action per crew and source lot
    pub enforce_slots: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { tick_ms: 1_000, render_delay_ms: 0, auto_advance: false, enforce_slots: true }
    }
}

impl PlannerConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml(&content)
    }

    /// Apply `BELT_TICK_MS`, `BELT_RENDER_DELAY_MS` and `BELT_AUTO_ADVANCE`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(ms) = env::tick_ms() {
            self.tick_ms = ms;
        }
        if let Some(ms) = env::render_delay_ms() {
            self.render_delay_ms = ms;
        }
        if let Some(auto) = env::auto_advance() {
            self.auto_advance = auto;
        }
        self
    }

    /// Tick interval, never shorter than one millisecond.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn render_delay(&self) -> Duration {
        Duration::from_millis(self.render_delay_ms)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
