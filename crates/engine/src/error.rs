// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine errors.

use belt_core::{ActionId, LifecycleError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("crew {crew} already has an ongoing action on {lot}; {id} has to wait")]
    SlotBusy { id: ActionId, lot: String, crew: String },

    #[error("action {0} is ongoing; removing it cancels it and needs confirmation")]
    CancellationUnconfirmed(ActionId),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
