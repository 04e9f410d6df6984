// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display snapshot of an action.
//!
//! Renderers are written against `ActionView` alone, so they can be tested
//! without a lifecycle or a display surface.

use crate::action::{Action, ActionId, ActionState, ActionType};
use crate::time_fmt;
use serde::{Deserialize, Serialize};

/// Structured data a renderer needs to draw one list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionView {
    pub id: ActionId,
    pub kind: ActionType,
    pub subject: String,
    pub state: ActionState,
    pub ready: bool,
    pub time_remaining_ms: u64,
    pub remaining_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalized_label: Option<String>,
}

impl ActionView {
    /// Derive the view of `action` as seen at `now`.
    pub fn of(action: &Action, now: u64) -> Self {
        let time_remaining_ms = action.time_remaining(now);
        Self {
            id: action.id.clone(),
            kind: action.kind,
            subject: action.subject.clone(),
            state: action.state,
            ready: action.ready,
            time_remaining_ms,
            remaining_label: time_fmt::short_remaining_label(time_remaining_ms),
            finalized_label: action
                .finalized_at_ms
                .map(|finalized| time_fmt::relative_label_between(now, finalized)),
        }
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
