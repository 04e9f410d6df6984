// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! belt-core: action lifecycle for the belt mining planner

pub mod macros;

pub mod action;
pub mod clock;
pub mod error;
pub mod id;
pub mod lifecycle;
pub mod time_fmt;
pub mod view;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(any(test, feature = "test-support"))]
pub use action::ActionBuilder;
pub use action::{Action, ActionId, ActionSpec, ActionSpecBuilder, ActionState, ActionType, Site};
pub use clock::{Clock, FakeClock, SystemClock};
pub use error::LifecycleError;
pub use id::{IdGen, NanoIdGen, SequentialIdGen};
pub use lifecycle::ActionLifecycle;
pub use time_fmt::{relative_label, relative_label_between, short_remaining_label};
pub use view::ActionView;
