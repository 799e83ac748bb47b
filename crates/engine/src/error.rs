// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use bw_adapters::AdapterError;
use bw_core::{BatchAction, BatchId};
use thiserror::Error;

/// Errors surfaced by the coordinator.
///
/// Polling never fails outward; only construction and explicit control
/// actions report errors.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("progress coordinator must be created inside a tokio runtime")]
    NoRuntime,
    #[error("{action} of batch {batch} failed")]
    Action {
        batch: BatchId,
        action: BatchAction,
        #[source]
        source: AdapterError,
    },
}
