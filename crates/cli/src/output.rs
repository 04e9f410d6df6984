// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use belt_core::{ActionId, ActionState, ActionView};
use belt_engine::{Renderer, RunSummary};
use clap::ValueEnum;

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One text line for an action, e.g. `act-0001 ongoing extract Water 2h left`.
pub fn format_view(view: &ActionView) -> String {
    let detail = match view.state {
        ActionState::Done => view.finalized_label.clone().unwrap_or_default(),
        _ if view.ready => "ready".to_string(),
        ActionState::Ongoing => format!("{} left", view.remaining_label),
        ActionState::Queued => "waiting".to_string(),
    };
    format!(
        "{} {} {} {} {}",
        view.id,
        color::state(view.state),
        view.kind,
        view.subject,
        color::context(&detail)
    )
}

/// Renderer that writes one line per render: text or a JSON object.
pub struct LineRenderer<W> {
    format: OutputFormat,
    out: W,
}

impl LineRenderer<std::io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(format, std::io::stdout())
    }
}

impl<W: Write> LineRenderer<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        Self { format, out }
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::warn!(error = %e, "failed to write output line");
        }
    }
}

impl<W: Write> Renderer for LineRenderer<W> {
    fn render(&mut self, view: &ActionView) {
        let line = match self.format {
            OutputFormat::Text => format_view(view),
            OutputFormat::Json => match serde_json::to_string(view) {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!(action_id = %view.id, error = %e, "failed to encode view");
                    return;
                }
            },
        };
        self.write_line(&line);
    }

    fn removed(&mut self, id: &ActionId) {
        let line = match self.format {
            OutputFormat::Text => format!("{id} {}", color::context("removed")),
            OutputFormat::Json => serde_json::json!({ "id": id, "removed": true }).to_string(),
        };
        self.write_line(&line);
    }
}

/// Closing report of `belt run`: tick count, outcome, and the final views.
pub fn write_summary(
    out: &mut impl Write,
    summary: &RunSummary,
    views: &[ActionView],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let unfinished = views.iter().filter(|v| v.state != ActionState::Done).count();
            writeln!(out)?;
            if summary.settled {
                writeln!(out, "settled after {} tick(s)", summary.ticks)?;
            } else {
                writeln!(
                    out,
                    "stopped after {} tick(s), {} action(s) unfinished",
                    summary.ticks, unfinished
                )?;
            }
            for view in views {
                writeln!(out, "  {}", format_view(view))?;
            }
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "ticks": summary.ticks,
                "settled": summary.settled,
                "actions": views,
            });
            writeln!(out, "{}", serde_json::to_string(&obj)?)?;
        }
    }
    Ok(())
}
