// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle errors.

use crate::action::ActionId;
use thiserror::Error;

/// Reasons the lifecycle refuses an operation.
///
/// Every refusal leaves the collection untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("action not found: {0}")]
    NotFound(ActionId),

    #[error("action {0} is not ready to transition")]
    NotReady(ActionId),

    #[error("action {0} is already done")]
    AlreadyTerminal(ActionId),

    #[error("unknown action type: {0:?}")]
    InvalidType(String),
}

pub type Result<T> = std::result::Result<T, LifecycleError>;
