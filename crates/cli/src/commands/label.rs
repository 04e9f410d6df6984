// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `belt label`: show how an interval would be labelled.

use anyhow::Result;
use belt_core::{relative_label, short_remaining_label};
use clap::Args;
use serde::Serialize;

use crate::color;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct LabelArgs {
    /// Milliseconds between then and now; negative values lie in the future
    #[arg(allow_negative_numbers = true)]
    pub delta_ms: i64,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Labels {
    pub delta_ms: i64,
    pub relative: String,
    pub remaining: String,
}

impl Labels {
    pub fn of(delta_ms: i64) -> Self {
        Self {
            delta_ms,
            relative: relative_label(delta_ms),
            remaining: short_remaining_label(delta_ms.unsigned_abs()),
        }
    }
}

pub fn handle(args: LabelArgs, format: OutputFormat) -> Result<()> {
    let labels = Labels::of(args.delta_ms);
    match format {
        OutputFormat::Text => {
            println!("{} {}", color::context("relative:"), labels.relative);
            println!("{} {}", color::context("remaining:"), labels.remaining);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&labels)?),
    }
    Ok(())
}

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;
