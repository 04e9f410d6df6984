// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Renderer seam.
//!
//! The planner hands a renderer an [`ActionView`] after each mutation it
//! makes. Producing pixels, markup or terminal lines is the renderer's
//! business; nothing here depends on a display surface.

use belt_core::{ActionId, ActionView};

pub trait Renderer {
    /// Draw (or redraw) one action.
    fn render(&mut self, view: &ActionView);

    /// The action is gone from the collection.
    fn removed(&mut self, _id: &ActionId) {}
}

/// Renderer that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _view: &ActionView) {}
}

#[cfg(any(test, feature = "test-support"))]
pub use recording::{RecordingRenderer, RenderCall};

#[cfg(any(test, feature = "test-support"))]
mod recording {
    use super::Renderer;
    use belt_core::{ActionId, ActionState, ActionView};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RenderCall {
        Render(ActionView),
        Removed(ActionId),
    }

    /// Records every call; clones share the same log.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingRenderer {
        calls: Arc<Mutex<Vec<RenderCall>>>,
    }

    impl RecordingRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<RenderCall> {
            self.calls.lock().clone()
        }

        /// Every view rendered for `id`, oldest first.
        pub fn views_for(&self, id: &str) -> Vec<ActionView> {
            self.calls
                .lock()
                .iter()
                .filter_map(|call| match call {
                    RenderCall::Render(view) if view.id == id => Some(view.clone()),
                    _ => None,
                })
                .collect()
        }

        /// State shown by the most recent render of `id`.
        pub fn last_state(&self, id: &str) -> Option<ActionState> {
            self.views_for(id).last().map(|view| view.state)
        }

        pub fn was_removed(&self, id: &str) -> bool {
            self.calls.lock().iter().any(|call| matches!(call, RenderCall::Removed(r) if r == id))
        }

        pub fn clear(&self) {
            self.calls.lock().clear();
        }
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, view: &ActionView) {
            self.calls.lock().push(RenderCall::Render(view.clone()));
        }

        fn removed(&mut self, id: &ActionId) {
            self.calls.lock().push(RenderCall::Removed(id.clone()));
        }
    }
}
