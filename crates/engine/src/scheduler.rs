// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline timers driven by an explicit clock reading.
//!
//! The scheduler never sleeps or spawns; the caller asks which timers have
//! fired as of `now` and routes them.

use crate::timer::TimerId;
use belt_core::ActionId;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct Scheduler {
    /// Deadline in epoch milliseconds per timer
    timers: HashMap<TimerId, u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer `duration` after `now`, replacing any timer with the same id.
    pub fn set_timer(&mut self, id: TimerId, duration: Duration, now: u64) {
        let deadline = now.saturating_add(duration.as_millis() as u64);
        tracing::debug!(timer_id = %id, deadline, "timer set");
        self.timers.insert(id, deadline);
    }

    pub fn cancel_timer(&mut self, id: &TimerId) -> bool {
        let cancelled = self.timers.remove(id).is_some();
        if cancelled {
            tracing::debug!(timer_id = %id, "timer cancelled");
        }
        cancelled
    }

    /// Cancel every timer belonging to `action`.
    pub fn cancel_timers_for(&mut self, action: &ActionId) {
        self.cancel_timer(&TimerId::ready(action));
        self.cancel_timer(&TimerId::reveal(action));
    }

    /// Remove and return every timer whose deadline is at or before `now`,
    /// earliest deadline first.
    pub fn fired_timers(&mut self, now: u64) -> Vec<TimerId> {
        let mut fired: Vec<(u64, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, deadline)| (*deadline, id.clone()))
            .collect();
        fired.sort();
        for (_, id) in &fired {
            self.timers.remove(id);
        }
        fired.into_iter().map(|(_, id)| id).collect()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.values().copied().min()
    }

    pub fn deadline(&self, id: &TimerId) -> Option<u64> {
        self.timers.get(id).copied()
    }

    pub fn has_timers(&self) -> bool {
        !self.timers.is_empty()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
