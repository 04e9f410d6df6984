// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plan files: planner settings plus the actions to queue.
//!
//! ```toml
//! [config]
//! tick_ms = 60000
//!
//! [[action]]
//! type = "extract"
//! subject = "Water"
//! source = "Extractor"
//! source_lot = "lot-1"
//! destination = "Warehouse"
//! destination_lot = "lot-2"
//! crew = "crew-a"
//! duration_ms = 3600000
//! ```

use anyhow::{bail, Context};
use belt_core::{ActionSpec, Site};
use belt_engine::PlannerConfig;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    #[serde(default)]
    pub config: PlannerConfig,
    #[serde(default, rename = "action")]
    pub actions: Vec<PlanAction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub subject: String,
    pub source: String,
    pub source_lot: String,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub destination_lot: Option<String>,
    #[serde(default)]
    pub crew: Option<String>,
    #[serde(default)]
    pub duration_ms: u64,
}

impl PlanAction {
    pub fn to_spec(&self) -> anyhow::Result<ActionSpec> {
        let source = Site::new(&self.source, &self.source_lot);
        let mut builder = ActionSpec::parse(&self.kind, &self.subject, source)?.duration_ms(self.duration_ms);
        match (&self.destination, &self.destination_lot) {
            (Some(name), Some(lot)) => builder = builder.destination(Site::new(name, lot)),
            (None, None) => {}
            _ => bail!("destination and destination_lot must be given together"),
        }
        if let Some(crew) = &self.crew {
            builder = builder.crew(crew);
        }
        Ok(builder.build())
    }
}

impl Plan {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("failed to read plan {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid plan {}", path.display()))
    }

    /// Specs for every action, in file order.
    pub fn specs(&self) -> anyhow::Result<Vec<ActionSpec>> {
        self.actions
            .iter()
            .enumerate()
            .map(|(i, action)| action.to_spec().with_context(|| format!("action #{}", i + 1)))
            .collect()
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
