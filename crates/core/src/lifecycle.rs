// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action collection and state machine.
//!
//! `ActionLifecycle` is the single owner of every live action. It is the
//! only place an action's `state` changes, and every time-derived value it
//! reports is a pure function of the `now` the caller passes in.
//!
//! | State   | Entry sets           | Next    |
//! |---------|----------------------|---------|
//! | Queued  | `created_at_ms`      | Ongoing |
//! | Ongoing | `started_at_ms`      | Done    |
//! | Done    | `finalized_at_ms`    | (end)   |

use crate::action::{Action, ActionId, ActionSpec, ActionState};
use crate::error::{LifecycleError, Result};
use crate::id::{IdGen, NanoIdGen};
use crate::time_fmt;
use indexmap::IndexMap;
use std::cmp::Reverse;

/// Owned set of actions, kept in creation order.
#[derive(Debug)]
pub struct ActionLifecycle<G = NanoIdGen> {
    actions: IndexMap<ActionId, Action>,
    id_gen: G,
    next_seq: u64,
}

impl ActionLifecycle<NanoIdGen> {
    pub fn new() -> Self {
        Self::with_id_gen(NanoIdGen)
    }
}

impl Default for ActionLifecycle<NanoIdGen> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGen> ActionLifecycle<G> {
    pub fn with_id_gen(id_gen: G) -> Self {
        Self { actions: IndexMap::new(), id_gen, next_seq: 0 }
    }

    /// Create a `Queued`, not-ready action stamped `created_at_ms = now`.
    pub fn create(&mut self, spec: ActionSpec, now: u64) -> &Action {
        let id = self.fresh_id();
        let seq = self.next_seq;
        self.next_seq += 1;
        let (index, _) = self.actions.insert_full(id.clone(), Action::new(id, spec, seq, now));
        &self.actions[index]
    }

    /// Flag an action as ready for its next transition.
    ///
    /// Idempotent. A `Done` action has nothing to become ready for, so the
    /// flag is left alone.
    pub fn mark_ready(&mut self, id: &str) -> Result<()> {
        let action = self.get_mut(id)?;
        if !action.is_terminal() {
            action.ready = true;
        }
        Ok(())
    }

    /// Advance a ready action exactly one state.
    ///
    /// Clears `ready`, and stamps `started_at_ms` on entering `Ongoing` or
    /// `finalized_at_ms` on entering `Done`. Neither timestamp is ever
    /// overwritten. On error nothing changes.
    pub fn transition(&mut self, id: &str, now: u64) -> Result<&Action> {
        let action = self.get_mut(id)?;
        let next = action.state.next().ok_or_else(|| LifecycleError::AlreadyTerminal(action.id.clone()))?;
        if !action.ready {
            return Err(LifecycleError::NotReady(action.id.clone()));
        }

        action.ready = false;
        action.state = next;
        match next {
            ActionState::Ongoing => {
                action.started_at_ms.get_or_insert(now);
            }
            ActionState::Done => {
                action.finalized_at_ms.get_or_insert(now);
            }
            ActionState::Queued => {}
        }
        Ok(action)
    }

    /// Delete an action in any state. Returns whether it was present.
    ///
    /// Cancelling an `Ongoing` action is allowed here; asking the user to
    /// confirm that is up to the caller.
    pub fn remove(&mut self, id: &str) -> bool {
        self.actions.shift_remove(id).is_some()
    }

    /// Runtime left for an `Ongoing` action, clamped at zero. Zero for
    /// `Queued` and `Done` actions.
    pub fn time_remaining(&self, id: &str, now: u64) -> Result<u64> {
        Ok(self.lookup(id)?.time_remaining(now))
    }

    /// Whether an `Ongoing` action has used up its full runtime.
    pub fn is_overdue(&self, id: &str, now: u64) -> Result<bool> {
        Ok(self.lookup(id)?.is_overdue(now))
    }

    /// "5 days ago"-style label for when the action finished, or `None`
    /// while it is not `Done`.
    pub fn relative_finalized_label(&self, id: &str, now: u64) -> Result<Option<String>> {
        let action = self.lookup(id)?;
        Ok(action.finalized_at_ms.map(|finalized| time_fmt::relative_label_between(now, finalized)))
    }

    pub fn get(&self, id: &str) -> Option<&Action> {
        self.actions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.actions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// All actions in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    /// Actions in the given state, in creation order.
    pub fn in_state(&self, state: ActionState) -> impl Iterator<Item = &Action> {
        self.actions.values().filter(move |a| a.state == state)
    }

    /// Queued actions, first in first out.
    pub fn queued(&self) -> impl Iterator<Item = &Action> {
        self.in_state(ActionState::Queued)
    }

    /// Ongoing actions, first in first out.
    pub fn ongoing(&self) -> impl Iterator<Item = &Action> {
        self.in_state(ActionState::Ongoing)
    }

    /// Done actions as a feed: most recently finalized first, simultaneous
    /// finalizations in creation order.
    pub fn done(&self) -> Vec<&Action> {
        let mut done: Vec<&Action> = self.in_state(ActionState::Done).collect();
        done.sort_by_key(|a| (Reverse(a.finalized_at_ms), a.seq));
        done
    }

    fn lookup(&self, id: &str) -> Result<&Action> {
        self.actions.get(id).ok_or_else(|| LifecycleError::NotFound(ActionId::from_string(id)))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Action> {
        self.actions.get_mut(id).ok_or_else(|| LifecycleError::NotFound(ActionId::from_string(id)))
    }

    /// Draw ids until one is not held by a live action.
    fn fresh_id(&self) -> ActionId {
        loop {
            let id = ActionId::from_string(format!("{}{}", ActionId::PREFIX, self.id_gen.next()));
            if !self.actions.contains_key(id.as_str()) {
                return id;
            }
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
