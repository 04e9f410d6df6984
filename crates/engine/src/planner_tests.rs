// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::render::RecordingRenderer;
use belt_core::test_support::{crew_spec, extract_spec};
use belt_core::{FakeClock, LifecycleError, SequentialIdGen};

const MIN: Duration = Duration::from_secs(60);
const HOUR_MS: u64 = 3_600_000;

type TestPlanner = Planner<FakeClock, RecordingRenderer, SequentialIdGen>;

fn setup(config: PlannerConfig) -> (TestPlanner, FakeClock, RecordingRenderer) {
    let clock = FakeClock::new();
    let renderer = RecordingRenderer::new();
    let planner = Planner::with_id_gen(clock.clone(), renderer.clone(), config, SequentialIdGen::new());
    (planner, clock, renderer)
}

fn state(planner: &TestPlanner, id: &str) -> ActionState {
    planner.lifecycle().get(id).map(|a| a.state).unwrap()
}

fn ready(planner: &TestPlanner, id: &str) -> bool {
    planner.lifecycle().get(id).map(|a| a.ready).unwrap()
}

#[test]
fn enqueue_without_crew_is_ready_immediately() {
    let (mut planner, _clock, renderer) = setup(PlannerConfig::default());
    let id = planner.enqueue(extract_spec(HOUR_MS)).unwrap();

    assert_eq!(id, "act-0001");
    assert!(ready(&planner, &id));
    let views = renderer.views_for(&id);
    assert_eq!(views.len(), 2);
    assert!(!views[0].ready);
    assert!(views[1].ready);
    assert_eq!(views[1].state, ActionState::Queued);
}

#[test]
fn runtime_timer_readies_ongoing_action() {
    let (mut planner, clock, _renderer) = setup(PlannerConfig::default());
    let id = planner.enqueue(extract_spec(HOUR_MS)).unwrap();
    assert_eq!(planner.advance(&id).unwrap(), ActionState::Ongoing);
    assert!(!ready(&planner, &id));

    clock.advance(30 * MIN);
    let report = planner.tick().unwrap();
    assert!(report.readied.is_empty());
    assert_eq!(planner.lifecycle().time_remaining(&id, clock.epoch_ms()), Ok(HOUR_MS / 2));

    clock.advance(30 * MIN);
    let report = planner.tick().unwrap();
    assert_eq!(report.readied, vec![ActionId::from_string("act-0001")]);
    assert!(ready(&planner, &id));
    assert!(!planner.scheduler().has_timers());

    assert_eq!(planner.advance(&id).unwrap(), ActionState::Done);
    assert!(planner.is_settled());
}

#[test]
fn overdue_backstop_readies_without_timer() {
    let (mut planner, clock, _renderer) = setup(PlannerConfig::default());
    let id = planner.enqueue(extract_spec(HOUR_MS)).unwrap();
    planner.advance(&id).unwrap();
    planner.scheduler.cancel_timer(&TimerId::ready(&id));

    clock.advance(90 * MIN);
    let report = planner.tick().unwrap();
    assert_eq!(report.readied.len(), 1);
    assert!(ready(&planner, &id));
}

#[test]
fn zero_duration_action_is_ready_on_start() {
    let (mut planner, _clock, _renderer) = setup(PlannerConfig::default());
    let id = planner.enqueue(extract_spec(0)).unwrap();
    planner.advance(&id).unwrap();
    assert!(ready(&planner, &id));
    assert!(!planner.scheduler().has_timers());
    assert_eq!(planner.advance(&id).unwrap(), ActionState::Done);
}

#[test]
fn advance_not_ready_is_refused() {
    let (mut planner, _clock, _renderer) = setup(PlannerConfig::default());
    let id = planner.enqueue(extract_spec(HOUR_MS)).unwrap();
    planner.advance(&id).unwrap();

    let err = planner.advance(&id).unwrap_err();
    assert!(matches!(err, PlannerError::Lifecycle(LifecycleError::NotReady(_))));
    assert_eq!(state(&planner, &id), ActionState::Ongoing);
}

#[test]
fn crew_slot_holds_second_action_until_first_is_done() {
    let (mut planner, clock, _renderer) = setup(PlannerConfig::default());
    let first = planner.enqueue(crew_spec("crew-a", "lot-1", HOUR_MS)).unwrap();
    let second = planner.enqueue(crew_spec("crew-a", "lot-1", HOUR_MS)).unwrap();
    let other_lot = planner.enqueue(crew_spec("crew-a", "lot-2", HOUR_MS)).unwrap();

    assert!(ready(&planner, &first));
    assert!(!ready(&planner, &second));
    assert!(ready(&planner, &other_lot));

    planner.advance(&first).unwrap();
    planner.tick().unwrap();
    assert!(!ready(&planner, &second));

    clock.advance(60 * MIN);
    planner.tick().unwrap();
    planner.advance(&first).unwrap();
    assert!(ready(&planner, &second));
}

#[test]
fn advance_into_busy_slot_is_refused() {
    let (mut planner, _clock, _renderer) = setup(PlannerConfig::default());
    let first = planner.enqueue(crew_spec("crew-a", "lot-1", HOUR_MS)).unwrap();
    let second = planner.enqueue(crew_spec("crew-a", "lot-1", HOUR_MS)).unwrap();
    planner.advance(&first).unwrap();
    planner.mark_ready(&second).unwrap();

    let err = planner.advance(&second).unwrap_err();
    match err {
        PlannerError::SlotBusy { id, lot, crew } => {
            assert_eq!(id, second);
            assert_eq!(lot, "lot-1");
            assert_eq!(crew, "crew-a");
        }
        other => panic!("expected SlotBusy, got {other}"),
    }
    assert_eq!(state(&planner, &second), ActionState::Queued);
}

#[test]
fn slots_off_readies_everything() {
    let config = PlannerConfig { enforce_slots: false, ..PlannerConfig::default() };
    let (mut planner, _clock, _renderer) = setup(config);
    let first = planner.enqueue(crew_spec("crew-a", "lot-1", HOUR_MS)).unwrap();
    let second = planner.enqueue(crew_spec("crew-a", "lot-1", HOUR_MS)).unwrap();
    planner.advance(&first).unwrap();
    assert!(ready(&planner, &second));
    assert_eq!(planner.advance(&second).unwrap(), ActionState::Ongoing);
}

#[test]
fn render_delay_defers_only_the_visual() {
    let config = PlannerConfig { render_delay_ms: 500, ..PlannerConfig::default() };
    let (mut planner, clock, renderer) = setup(config);
    let id = planner.enqueue(extract_spec(HOUR_MS)).unwrap();

    planner.advance(&id).unwrap();
    assert_eq!(state(&planner, &id), ActionState::Ongoing);
    assert_eq!(renderer.last_state(&id), Some(ActionState::Queued));

    clock.advance(Duration::from_millis(499));
    assert!(planner.tick().unwrap().revealed.is_empty());

    clock.advance(Duration::from_millis(1));
    let report = planner.tick().unwrap();
    assert_eq!(report.revealed.len(), 1);
    assert_eq!(renderer.last_state(&id), Some(ActionState::Ongoing));
}

#[test]
fn settled_waits_for_pending_reveal() {
    let config = PlannerConfig { render_delay_ms: 500, ..PlannerConfig::default() };
    let (mut planner, clock, _renderer) = setup(config);
    let id = planner.enqueue(extract_spec(0)).unwrap();
    planner.advance(&id).unwrap();
    planner.advance(&id).unwrap();
    assert!(!planner.is_settled());

    clock.advance(Duration::from_secs(1));
    planner.tick().unwrap();
    assert!(planner.is_settled());
}

#[test]
fn discard_ongoing_needs_confirmation() {
    let (mut planner, _clock, renderer) = setup(PlannerConfig::default());
    let id = planner.enqueue(extract_spec(HOUR_MS)).unwrap();
    planner.advance(&id).unwrap();

    let err = planner.discard(&id, Removal::Unconfirmed).unwrap_err();
    assert!(matches!(err, PlannerError::CancellationUnconfirmed(_)));
    assert!(planner.lifecycle().contains(&id));
    assert!(planner.scheduler().has_timers());

    assert!(planner.discard(&id, Removal::Confirmed).unwrap());
    assert!(!planner.lifecycle().contains(&id));
    assert!(!planner.scheduler().has_timers());
    assert!(renderer.was_removed(&id));
}

#[test]
fn discard_queued_or_unknown() {
    let (mut planner, _clock, _renderer) = setup(PlannerConfig::default());
    let id = planner.enqueue(extract_spec(HOUR_MS)).unwrap();
    assert!(planner.discard(&id, Removal::Unconfirmed).unwrap());
    assert!(!planner.discard(&id, Removal::Unconfirmed).unwrap());
    assert!(!planner.discard("act-missing", Removal::Confirmed).unwrap());
}

#[test]
fn cancelling_ongoing_frees_the_slot() {
    let (mut planner, _clock, _renderer) = setup(PlannerConfig::default());
    let first = planner.enqueue(crew_spec("crew-a", "lot-1", HOUR_MS)).unwrap();
    let second = planner.enqueue(crew_spec("crew-a", "lot-1", HOUR_MS)).unwrap();
    planner.advance(&first).unwrap();

    planner.discard(&first, Removal::Confirmed).unwrap();
    assert!(ready(&planner, &second));
}

#[test]
fn discarding_queued_slot_head_readies_the_next() {
    let (mut planner, _clock, _renderer) = setup(PlannerConfig::default());
    let first = planner.enqueue(crew_spec("crew-a", "lot-1", HOUR_MS)).unwrap();
    let second = planner.enqueue(crew_spec("crew-a", "lot-1", HOUR_MS)).unwrap();
    assert!(ready(&planner, &first));
    assert!(!ready(&planner, &second));

    assert!(planner.discard(&first, Removal::Unconfirmed).unwrap());
    assert!(ready(&planner, &second));
    assert_eq!(planner.advance(&second).unwrap(), ActionState::Ongoing);
}

#[test]
fn auto_advance_runs_plan_to_completion() {
    let config = PlannerConfig { auto_advance: true, ..PlannerConfig::default() };
    let (mut planner, clock, _renderer) = setup(config);
    let a = planner.enqueue(crew_spec("crew-a", "lot-1", 10 * 60_000)).unwrap();
    let b = planner.enqueue(crew_spec("crew-a", "lot-1", 5 * 60_000)).unwrap();
    let c = planner.enqueue(extract_spec(0)).unwrap();

    let mut ticks = 0;
    while !planner.is_settled() && ticks < 100 {
        planner.tick().unwrap();
        clock.advance(MIN);
        ticks += 1;
    }
    assert!(planner.is_settled());

    let done: Vec<String> = planner.lifecycle().done().iter().map(|a| a.id.to_string()).collect();
    // b finished last, c first
    assert_eq!(done, vec![b.to_string(), a.to_string(), c.to_string()]);
    let first_b_start = planner.lifecycle().get(&b).and_then(|x| x.started_at_ms).unwrap();
    let a_end = planner.lifecycle().get(&a).and_then(|x| x.finalized_at_ms).unwrap();
    assert!(first_b_start >= a_end);
}

#[test]
fn views_are_in_display_order() {
    let (mut planner, _clock, _renderer) = setup(PlannerConfig::default());
    let done = planner.enqueue(extract_spec(0)).unwrap();
    let ongoing = planner.enqueue(extract_spec(HOUR_MS)).unwrap();
    let queued = planner.enqueue(extract_spec(HOUR_MS)).unwrap();
    planner.advance(&done).unwrap();
    planner.advance(&done).unwrap();
    planner.advance(&ongoing).unwrap();

    let order: Vec<(ActionId, ActionState)> =
        planner.views().into_iter().map(|v| (v.id, v.state)).collect();
    assert_eq!(
        order,
        vec![
            (queued, ActionState::Queued),
            (ongoing, ActionState::Ongoing),
            (done, ActionState::Done),
        ]
    );
}

mod slot_policy {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[derive(Debug, Clone)]
    enum Op {
        Advance(usize),
        Discard(usize),
        Wait(u64),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0usize..6).prop_map(Op::Advance),
            1 => (0usize..6).prop_map(Op::Discard),
            2 => (1u64..90).prop_map(Op::Wait),
        ]
    }

    proptest! {
        #[test]
        fn never_two_ongoing_actions_in_one_slot(
            crews in proptest::collection::vec((0u8..2, 0u8..2, 1u64..60), 1..6),
            ops in proptest::collection::vec(arb_op(), 0..40),
        ) {
            let (mut planner, clock, _renderer) = setup(PlannerConfig::default());
            let ids: Vec<ActionId> = crews
                .iter()
                .map(|(crew, lot, minutes)| {
                    let spec = crew_spec(&format!("crew-{crew}"), &format!("lot-{lot}"), minutes * 60_000);
                    planner.enqueue(spec).unwrap()
                })
                .collect();

            for op in ops {
                match op {
                    Op::Advance(i) => {
                        let _ = planner.advance(&ids[i % ids.len()]);
                    }
                    Op::Discard(i) => {
                        planner.discard(&ids[i % ids.len()], Removal::Confirmed).unwrap();
                    }
                    Op::Wait(minutes) => {
                        clock.advance(Duration::from_secs(minutes * 60));
                        planner.tick().unwrap();
                    }
                }

                let mut slots = HashSet::new();
                for action in planner.lifecycle().ongoing() {
                    prop_assert!(slots.insert(slot_of(action)), "two ongoing actions share a slot");
                }
            }
        }
    }
}
