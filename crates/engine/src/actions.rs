// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch control actions (stop, resume, retry, retry-failed).

use crate::coordinator::ProgressCoordinator;
use crate::error::CoordinatorError;
use bw_adapters::ProgressAdapter;
use bw_core::{BatchAction, BatchId, Clock, ProgressSnapshot};

impl<A: ProgressAdapter, C: Clock> ProgressCoordinator<A, C> {
    /// Send `action` for `id`, then refresh it.
    ///
    /// A successful action opens a force-poll window so the state change is
    /// picked up even when the cached status is terminal. Restarting actions
    /// also drop the cached snapshot. Returns the refreshed snapshot, or
    /// `None` when the follow-up query failed.
    pub async fn run_action(
        &self,
        id: &BatchId,
        action: BatchAction,
    ) -> Result<Option<ProgressSnapshot>, CoordinatorError> {
        self.inner.adapter.control(id, action).await.map_err(|source| {
            tracing::warn!(batch = %id, %action, error = %source, "batch action failed");
            CoordinatorError::Action { batch: id.clone(), action, source }
        })?;
        tracing::info!(batch = %id, %action, "batch action accepted");

        if action.restarts_run() {
            self.clear_cached_snapshot(id);
        }
        self.force_polling(id, self.inner.config.force_window);
        Ok(self.fetch_progress(id).await)
    }
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
