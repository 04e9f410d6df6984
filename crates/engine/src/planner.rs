// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Planner: the scheduling loop around an [`ActionLifecycle`].
//!
//! The lifecycle only knows how to move one action one step. The planner
//! decides *when* actions become ready (runtime timers, free crew slots),
//! applies user requests, and tells the renderer about every change.
//!
//! State changes commit synchronously. Only their visual reflection may be
//! deferred, through a `reveal:` timer armed for `render_delay_ms`.

use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::render::Renderer;
use crate::scheduler::Scheduler;
use crate::timer::{TimerId, TimerKind};
use belt_core::{
    Action, ActionId, ActionLifecycle, ActionSpec, ActionState, ActionView, Clock, IdGen, NanoIdGen,
};
use std::collections::HashSet;
use std::time::Duration;

/// How sure the caller is about removing an action.
///
/// Removing an `Ongoing` action cancels work in flight and only goes ahead
/// when `Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Unconfirmed,
    Confirmed,
}

/// What a single [`Planner::tick`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub now: u64,
    /// Actions that became ready this tick
    pub readied: Vec<ActionId>,
    /// Actions advanced automatically, with the state they entered
    pub advanced: Vec<(ActionId, ActionState)>,
    /// Actions whose deferred render was shown
    pub revealed: Vec<ActionId>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.readied.is_empty() && self.advanced.is_empty() && self.revealed.is_empty()
    }
}

type Slot = (String, String);

fn slot_of(action: &Action) -> Option<Slot> {
    match action.slot() {
        (lot, Some(crew)) => Some((lot.to_string(), crew.to_string())),
        (_, None) => None,
    }
}

pub struct Planner<C, R, G = NanoIdGen> {
    lifecycle: ActionLifecycle<G>,
    scheduler: Scheduler,
    clock: C,
    renderer: R,
    config: PlannerConfig,
}

impl<C: Clock, R: Renderer> Planner<C, R, NanoIdGen> {
    pub fn new(clock: C, renderer: R, config: PlannerConfig) -> Self {
        Self::with_id_gen(clock, renderer, config, NanoIdGen)
    }
}

impl<C: Clock, R: Renderer, G: IdGen> Planner<C, R, G> {
    pub fn with_id_gen(clock: C, renderer: R, config: PlannerConfig, id_gen: G) -> Self {
        Self {
            lifecycle: ActionLifecycle::with_id_gen(id_gen),
            scheduler: Scheduler::new(),
            clock,
            renderer,
            config,
        }
    }

    pub fn lifecycle(&self) -> &ActionLifecycle<G> {
        &self.lifecycle
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Queue a new action and make it ready if its crew slot is free.
    pub fn enqueue(&mut self, spec: ActionSpec) -> Result<ActionId, PlannerError> {
        let now = self.clock.epoch_ms();
        let action = self.lifecycle.create(spec, now);
        let id = action.id.clone();
        tracing::info!(
            action_id = %id,
            kind = %action.kind,
            subject = %action.subject,
            source = %action.source,
            duration_ms = action.duration_ms,
            "action queued"
        );
        self.render(&id, now);
        self.promote_queued(now)?;
        Ok(id)
    }

    /// Mark an action ready by hand, bypassing timers and slot promotion.
    pub fn mark_ready(&mut self, id: &str) -> Result<(), PlannerError> {
        let now = self.clock.epoch_ms();
        self.lifecycle.mark_ready(id)?;
        self.render(id, now);
        Ok(())
    }

    /// User-triggered transition of a ready action.
    ///
    /// Entering `Ongoing` arms the runtime timer (or marks the action ready
    /// at once for zero-duration work). Entering `Done` frees the crew slot.
    pub fn advance(&mut self, id: &str) -> Result<ActionState, PlannerError> {
        let now = self.clock.epoch_ms();
        self.check_slot_free(id)?;

        let action = self.lifecycle.transition(id, now)?;
        let (id, state, duration_ms) = (action.id.clone(), action.state, action.duration_ms);
        tracing::info!(action_id = %id, %state, "action advanced");

        match state {
            ActionState::Ongoing if duration_ms == 0 => {
                self.lifecycle.mark_ready(&id)?;
            }
            ActionState::Ongoing => {
                self.scheduler.set_timer(TimerId::ready(&id), Duration::from_millis(duration_ms), now);
            }
            ActionState::Done => {
                self.scheduler.cancel_timer(&TimerId::ready(&id));
            }
            ActionState::Queued => {}
        }

        self.reveal(&id, now);
        if state == ActionState::Done {
            self.promote_queued(now)?;
        }
        Ok(state)
    }

    /// Remove an action. Unknown ids are a no-op returning `Ok(false)`.
    pub fn discard(&mut self, id: &str, removal: Removal) -> Result<bool, PlannerError> {
        let Some(action) = self.lifecycle.get(id) else {
            return Ok(false);
        };
        let was_ongoing = action.state == ActionState::Ongoing;
        if was_ongoing && removal != Removal::Confirmed {
            return Err(PlannerError::CancellationUnconfirmed(action.id.clone()));
        }
        let id = action.id.clone();

        self.lifecycle.remove(&id);
        self.scheduler.cancel_timers_for(&id);
        if was_ongoing {
            tracing::warn!(action_id = %id, "ongoing action cancelled");
        } else {
            tracing::info!(action_id = %id, "action discarded");
        }
        self.renderer.removed(&id);

        self.promote_queued(self.clock.epoch_ms())?;
        Ok(true)
    }

    /// Process everything that is due as of the clock's current reading.
    pub fn tick(&mut self) -> Result<TickReport, PlannerError> {
        let now = self.clock.epoch_ms();
        let mut report = TickReport { now, ..TickReport::default() };

        for timer in self.scheduler.fired_timers(now) {
            match timer.kind() {
                Some(TimerKind::Ready(id)) => {
                    if self.make_ready(&id, now)? {
                        report.readied.push(id);
                    }
                }
                Some(TimerKind::Reveal(id)) => {
                    if self.lifecycle.contains(&id) {
                        self.render(&id, now);
                        report.revealed.push(id);
                    }
                }
                None => tracing::warn!(timer_id = %timer, "unrecognized timer fired"),
            }
        }

        // Backstop for runtimes that elapsed without a timer (e.g. the
        // clock jumped past several deadlines between ticks).
        let overdue: Vec<ActionId> = self
            .lifecycle
            .ongoing()
            .filter(|a| !a.ready && a.is_overdue(now))
            .map(|a| a.id.clone())
            .collect();
        for id in overdue {
            self.scheduler.cancel_timer(&TimerId::ready(&id));
            if self.make_ready(&id, now)? {
                report.readied.push(id);
            }
        }

        report.readied.extend(self.promote_queued(now)?);

        if self.config.auto_advance {
            let ready: Vec<ActionId> =
                self.lifecycle.iter().filter(|a| a.ready).map(|a| a.id.clone()).collect();
            for id in ready {
                match self.advance(&id) {
                    Ok(state) => report.advanced.push((id, state)),
                    Err(PlannerError::SlotBusy { .. }) => {
                        tracing::debug!(action_id = %id, "slot busy, leaving action queued");
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        if !report.is_empty() {
            tracing::debug!(
                now,
                readied = report.readied.len(),
                advanced = report.advanced.len(),
                revealed = report.revealed.len(),
                "tick"
            );
        }
        Ok(report)
    }

    /// Views in display order: queued, ongoing, then the done feed.
    pub fn views(&self) -> Vec<ActionView> {
        let now = self.clock.epoch_ms();
        self.lifecycle
            .queued()
            .chain(self.lifecycle.ongoing())
            .chain(self.lifecycle.done())
            .map(|a| ActionView::of(a, now))
            .collect()
    }

    /// Nothing queued, nothing ongoing, and no render still pending.
    pub fn is_settled(&self) -> bool {
        self.lifecycle.queued().next().is_none()
            && self.lifecycle.ongoing().next().is_none()
            && !self.scheduler.has_timers()
    }

    /// Mark `id` ready and render it; false if it was already ready or gone.
    fn make_ready(&mut self, id: &ActionId, now: u64) -> Result<bool, PlannerError> {
        match self.lifecycle.get(id) {
            Some(action) if !action.ready && !action.is_terminal() => {}
            _ => return Ok(false),
        }
        self.lifecycle.mark_ready(id)?;
        tracing::info!(action_id = %id, "action ready");
        self.render(id, now);
        Ok(true)
    }

    /// Ready the first queued action of every free crew slot.
    ///
    /// With slot enforcement off, or for actions without a crew, every
    /// queued action is ready as soon as it exists.
    fn promote_queued(&mut self, now: u64) -> Result<Vec<ActionId>, PlannerError> {
        let mut claimed: HashSet<Slot> = self.lifecycle.ongoing().filter_map(slot_of).collect();
        let mut promote = Vec::new();
        for action in self.lifecycle.queued() {
            let slot = if self.config.enforce_slots { slot_of(action) } else { None };
            let free = match slot {
                Some(slot) => claimed.insert(slot),
                None => true,
            };
            if free && !action.ready {
                promote.push(action.id.clone());
            }
        }

        let mut readied = Vec::new();
        for id in promote {
            if self.make_ready(&id, now)? {
                readied.push(id);
            }
        }
        Ok(readied)
    }

    /// Refuse to start a queued action whose crew is busy on the same lot.
    fn check_slot_free(&self, id: &str) -> Result<(), PlannerError> {
        if !self.config.enforce_slots {
            return Ok(());
        }
        let Some(action) = self.lifecycle.get(id) else {
            return Ok(());
        };
        if action.state != ActionState::Queued {
            return Ok(());
        }
        let Some(slot) = slot_of(action) else {
            return Ok(());
        };
        if self.lifecycle.ongoing().any(|other| slot_of(other).as_ref() == Some(&slot)) {
            let (lot, crew) = slot;
            return Err(PlannerError::SlotBusy { id: action.id.clone(), lot, crew });
        }
        Ok(())
    }

    /// Show a committed change now, or after the configured delay.
    fn reveal(&mut self, id: &ActionId, now: u64) {
        let reveal = TimerId::reveal(id);
        if self.config.render_delay_ms == 0 {
            self.scheduler.cancel_timer(&reveal);
            self.render(id, now);
        } else {
            self.scheduler.set_timer(reveal, self.config.render_delay(), now);
        }
    }

    fn render(&mut self, id: &str, now: u64) {
        if let Some(action) = self.lifecycle.get(id) {
            self.renderer.render(&ActionView::of(action, now));
        }
    }
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
