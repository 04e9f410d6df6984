// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::action::{ActionSpec, ActionType, Site};
use crate::id::SequentialIdGen;
use crate::lifecycle::ActionLifecycle;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for the action state machine.
pub mod strategies {
    use crate::action::{ActionSpec, ActionState, ActionType, Site};
    use proptest::prelude::*;

    pub fn arb_action_type() -> impl Strategy<Value = ActionType> {
        proptest::sample::select(ActionType::ALL.to_vec())
    }

    pub fn arb_action_state() -> impl Strategy<Value = ActionState> {
        prop_oneof![Just(ActionState::Queued), Just(ActionState::Ongoing), Just(ActionState::Done)]
    }

    pub fn arb_site() -> impl Strategy<Value = Site> {
        ("[A-Z][a-z]{2,8}", 1u32..500).prop_map(|(name, lot)| Site::new(name, format!("lot-{lot}")))
    }

    pub fn arb_spec() -> impl Strategy<Value = ActionSpec> {
        (arb_action_type(), "[a-z]{1,10}", arb_site(), 0u64..10_000_000).prop_map(
            |(kind, subject, source, duration_ms)| {
                ActionSpec::builder(kind, subject, source).duration_ms(duration_ms).build()
            },
        )
    }

    /// One caller-driven operation against a lifecycle holding `n` actions;
    /// the `usize` picks an action by position.
    #[derive(Debug, Clone)]
    pub enum LifecycleOp {
        MarkReady(usize),
        Transition(usize),
        Remove(usize),
        Advance(u64),
    }

    pub fn arb_lifecycle_op() -> impl Strategy<Value = LifecycleOp> {
        prop_oneof![
            3 => (0usize..8).prop_map(LifecycleOp::MarkReady),
            3 => (0usize..8).prop_map(LifecycleOp::Transition),
            1 => (0usize..8).prop_map(LifecycleOp::Remove),
            2 => (0u64..5_000_000).prop_map(LifecycleOp::Advance),
        ]
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────

/// Lifecycle with deterministic ids: `act-0001`, `act-0002`, ...
pub fn lifecycle() -> ActionLifecycle<SequentialIdGen> {
    ActionLifecycle::with_id_gen(SequentialIdGen::new())
}

/// Extract-water spec on `lot-1` with the given runtime.
pub fn extract_spec(duration_ms: u64) -> ActionSpec {
    ActionSpec::builder(ActionType::Extract, "Water", Site::new("Extractor", "lot-1"))
        .destination(Site::new("Warehouse", "lot-2"))
        .duration_ms(duration_ms)
        .build()
}

/// Spec for `crew` working on `lot`.
pub fn crew_spec(crew: &str, lot: &str, duration_ms: u64) -> ActionSpec {
    ActionSpec::builder(ActionType::Construct, "Warehouse", Site::new("Site", lot))
        .crew(crew)
        .duration_ms(duration_ms)
        .build()
}
