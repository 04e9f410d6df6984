// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer identifier type for tracking scheduled timers.
//!
//! A `TimerId` names one pending deadline in the [`Scheduler`](crate::Scheduler).
//! Ids are plain strings of the form `<kind>:<action-id>` so they read well
//! in logs; [`TimerKind`] is the typed view used for routing.

use belt_core::ActionId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a timer instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(String);

impl TimerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fires when an ongoing action's runtime has elapsed.
    pub fn ready(action: &ActionId) -> Self {
        TimerKind::Ready(action.clone()).to_timer_id()
    }

    /// Fires when a committed state change should be shown.
    pub fn reveal(action: &ActionId) -> Self {
        TimerKind::Reveal(action.clone()).to_timer_id()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse this timer ID into a typed `TimerKind`.
    pub fn kind(&self) -> Option<TimerKind> {
        TimerKind::parse(&self.0)
    }

    /// The action this timer belongs to, if it parses.
    pub fn action_id(&self) -> Option<ActionId> {
        match self.kind()? {
            TimerKind::Ready(id) | TimerKind::Reveal(id) => Some(id),
        }
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parsed representation of a timer ID for type-safe routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerKind {
    Ready(ActionId),
    Reveal(ActionId),
}

impl TimerKind {
    /// Parse a timer ID string into a typed `TimerKind`.
    ///
    /// Returns `None` for unrecognized formats or an empty action id.
    pub fn parse(id: &str) -> Option<TimerKind> {
        let (kind, rest) = id.split_once(':')?;
        if rest.is_empty() {
            return None;
        }
        let action = ActionId::from_string(rest);
        match kind {
            "ready" => Some(TimerKind::Ready(action)),
            "reveal" => Some(TimerKind::Reveal(action)),
            _ => None,
        }
    }

    /// Format this `TimerKind` back into a canonical `TimerId`.
    pub fn to_timer_id(&self) -> TimerId {
        match self {
            TimerKind::Ready(id) => TimerId::new(format!("ready:{id}")),
            TimerKind::Reveal(id) => TimerId::new(format!("reveal:{id}")),
        }
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
