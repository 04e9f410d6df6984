// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action record and its closed vocabularies.
//!
//! An `Action` is a unit of crew work on an asteroid lot. It is created
//! `Queued`, runs while `Ongoing`, and ends `Done`. The record itself is a
//! flat value; the rules that move it between states live in
//! [`ActionLifecycle`](crate::lifecycle::ActionLifecycle).

use crate::error::LifecycleError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

crate::define_id! {
    /// Unique identifier for an action.
    pub struct ActionId("act-");
}

/// What kind of work an action performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Construct,
    CoreSample,
    Deconstruct,
    Extract,
    Transfer,
    Land,
}

impl ActionType {
    pub const ALL: [ActionType; 6] = [
        ActionType::Construct,
        ActionType::CoreSample,
        ActionType::Deconstruct,
        ActionType::Extract,
        ActionType::Transfer,
        ActionType::Land,
    ];
}

crate::simple_display! {
    ActionType {
        Construct => "construct",
        CoreSample => "core_sample",
        Deconstruct => "deconstruct",
        Extract => "extract",
        Transfer => "transfer",
        Land => "land",
    }
}

impl FromStr for ActionType {
    type Err = LifecycleError;

    /// Parse a type name, ignoring case and `_`/`-`/space separators
    /// (`core_sample`, `Core Sample` and `coresample` are the same type).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "construct" => Ok(ActionType::Construct),
            "coresample" => Ok(ActionType::CoreSample),
            "deconstruct" => Ok(ActionType::Deconstruct),
            "extract" => Ok(ActionType::Extract),
            "transfer" => Ok(ActionType::Transfer),
            "land" => Ok(ActionType::Land),
            _ => Err(LifecycleError::InvalidType(s.to_string())),
        }
    }
}

/// Lifecycle state of an action.
///
/// Transitions only ever move one step forward:
/// `Queued` → `Ongoing` → `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionState {
    Queued,
    Ongoing,
    Done,
}

impl ActionState {
    /// The state a transition leads to, or `None` from the terminal state.
    pub fn next(&self) -> Option<ActionState> {
        match self {
            ActionState::Queued => Some(ActionState::Ongoing),
            ActionState::Ongoing => Some(ActionState::Done),
            ActionState::Done => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ActionState::Done)
    }
}

crate::simple_display! {
    ActionState {
        Queued => "queued",
        Ongoing => "ongoing",
        Done => "done",
    }
}

/// A named place on an asteroid: an asset or building and the lot it sits on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    pub lot_id: String,
}

impl Site {
    pub fn new(name: impl Into<String>, lot_id: impl Into<String>) -> Self {
        Self { name: name.into(), lot_id: lot_id.into() }
    }
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.name, self.lot_id)
    }
}

/// Everything needed to create an action.
///
/// The context fields (`source`, `destination`, `crew`) are stored as given;
/// the lifecycle never validates or dereferences them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpec {
    pub kind: ActionType,
    pub subject: String,
    pub source: Site,
    pub destination: Option<Site>,
    pub crew: Option<String>,
    pub duration_ms: u64,
}

impl ActionSpec {
    pub fn builder(kind: ActionType, subject: impl Into<String>, source: Site) -> ActionSpecBuilder {
        ActionSpecBuilder {
            kind,
            subject: subject.into(),
            source,
            destination: None,
            crew: None,
            duration_ms: 0,
        }
    }

    /// Like [`ActionSpec::builder`], parsing the type from its name.
    pub fn parse(
        kind: &str,
        subject: impl Into<String>,
        source: Site,
    ) -> Result<ActionSpecBuilder, LifecycleError> {
        Ok(Self::builder(kind.parse()?, subject, source))
    }
}

pub struct ActionSpecBuilder {
    kind: ActionType,
    subject: String,
    source: Site,
    destination: Option<Site>,
    crew: Option<String>,
    duration_ms: u64,
}

impl ActionSpecBuilder {
    crate::setters! {
        set {
            duration_ms: u64,
        }
        option {
            destination: Site,
            crew: String,
        }
    }

    pub fn build(self) -> ActionSpec {
        ActionSpec {
            kind: self.kind,
            subject: self.subject,
            source: self.source,
            destination: self.destination,
            crew: self.crew,
            duration_ms: self.duration_ms,
        }
    }
}

/// An action instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub kind: ActionType,
    /// What is being acted upon (a resource or asset name)
    pub subject: String,
    pub source: Site,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Site>,
    /// Opaque crew label from the crew context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew: Option<String>,
    /// Runtime once started; zero for instantaneous actions
    pub duration_ms: u64,
    pub created_at_ms: u64,
    /// Stamped once on entering `Ongoing`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at_ms: Option<u64>,
    /// Stamped once on entering `Done`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalized_at_ms: Option<u64>,
    pub state: ActionState,
    /// Condition to advance is satisfied; waiting on an explicit transition
    pub ready: bool,
    /// Creation ordinal within the owning lifecycle
    pub seq: u64,
}

impl Action {
    pub(crate) fn new(id: ActionId, spec: ActionSpec, seq: u64, now: u64) -> Self {
        Self {
            id,
            kind: spec.kind,
            subject: spec.subject,
            source: spec.source,
            destination: spec.destination,
            crew: spec.crew,
            duration_ms: spec.duration_ms,
            created_at_ms: now,
            started_at_ms: None,
            finalized_at_ms: None,
            state: ActionState::Queued,
            ready: false,
            seq,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Runtime left at `now`; zero unless `Ongoing`, and never negative.
    pub fn time_remaining(&self, now: u64) -> u64 {
        match (self.state, self.started_at_ms) {
            (ActionState::Ongoing, Some(started)) => {
                self.duration_ms.saturating_sub(now.saturating_sub(started))
            }
            _ => 0,
        }
    }

    /// `Ongoing` with the full runtime elapsed.
    pub fn is_overdue(&self, now: u64) -> bool {
        self.state == ActionState::Ongoing && self.time_remaining(now) == 0
    }

    /// Key for the one-ongoing-action-per-crew-and-lot rule.
    pub fn slot(&self) -> (&str, Option<&str>) {
        (self.source.lot_id.as_str(), self.crew.as_deref())
    }
}

crate::builder! {
    pub struct ActionBuilder => Action {
        into {
            id: ActionId = "act-test",
            subject: String = "Water",
        }
        set {
            kind: ActionType = ActionType::Extract,
            source: Site = Site::new("Extractor", "lot-1"),
            destination: Option<Site> = None,
            crew: Option<String> = None,
            duration_ms: u64 = 0,
            created_at_ms: u64 = 0,
            started_at_ms: Option<u64> = None,
            finalized_at_ms: Option<u64> = None,
            state: ActionState = ActionState::Queued,
            ready: bool = false,
            seq: u64 = 0,
        }
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
