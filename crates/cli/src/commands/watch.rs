// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bw watch <id>...`: follow batches through the shared coordinator.

use super::Coordinator;
use crate::exit_error::ExitError;
use crate::output::{print_snapshot, OutputFormat};
use anyhow::Result;
use bw_core::{BatchId, BatchStatus, ProgressSnapshot};
use bw_engine::Visibility;
use clap::Args;
use std::collections::HashMap;
use tokio::sync::mpsc;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Batch ids
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Keep watching after every batch has settled
    #[arg(long)]
    pub follow: bool,

    /// Poll at the relaxed background cadence
    #[arg(long)]
    pub background: bool,
}

/// Latest snapshot per watched batch.
pub(crate) struct WatchState {
    ids: Vec<BatchId>,
    latest: HashMap<BatchId, ProgressSnapshot>,
}

impl WatchState {
    pub(crate) fn new(ids: impl IntoIterator<Item = BatchId>) -> Self {
        let mut unique: Vec<BatchId> = Vec::new();
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self { ids: unique, latest: HashMap::new() }
    }

    pub(crate) fn ids(&self) -> &[BatchId] {
        &self.ids
    }

    /// Store `snapshot` for `id`. Returns false when nothing but the
    /// timestamps changed since the last one.
    pub(crate) fn record(&mut self, id: BatchId, snapshot: ProgressSnapshot) -> bool {
        if let Some(prev) = self.latest.get(&id).filter(|prev| unexpected_transition(prev, &snapshot)) {
            tracing::debug!(batch = %id, from = %prev.status, to = %snapshot.status, "unexpected status transition");
        }
        let changed = !matches!(self.latest.get(&id), Some(prev) if same_progress(prev, &snapshot));
        self.latest.insert(id, snapshot);
        changed
    }

    /// Every batch has reported a status that no longer changes by itself.
    pub(crate) fn settled(&self) -> bool {
        self.ids.iter().all(|id| self.latest.get(id).is_some_and(|s| !s.status.is_active()))
    }

    pub(crate) fn failed(&self) -> Vec<BatchId> {
        self.ids
            .iter()
            .filter(|id| self.latest.get(*id).is_some_and(|s| s.status == BatchStatus::Failed))
            .cloned()
            .collect()
    }
}

/// The server reported a status change outside the batch lifecycle, e.g. a
/// completed batch going back to processing without a retry.
pub(crate) fn unexpected_transition(prev: &ProgressSnapshot, next: &ProgressSnapshot) -> bool {
    !prev.status.can_transition_to(next.status)
}

fn same_progress(a: &ProgressSnapshot, b: &ProgressSnapshot) -> bool {
    a.status == b.status
        && a.total_rows == b.total_rows
        && a.processed_rows == b.processed_rows
        && a.pending_count == b.pending_count
        && a.running_count == b.running_count
        && a.completed_count == b.completed_count
        && a.failed_count == b.failed_count
        && a.error == b.error
}

pub async fn handle(coordinator: &Coordinator, args: WatchArgs, format: OutputFormat) -> Result<()> {
    let mut state = WatchState::new(args.ids.into_iter().map(BatchId::new));
    if args.background {
        coordinator.set_visibility(Visibility::Hidden).await;
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let subscriptions: Vec<_> = state
        .ids()
        .iter()
        .map(|id| {
            let tx = tx.clone();
            let watched = id.clone();
            coordinator.subscribe(id.clone(), move |snapshot: &ProgressSnapshot| {
                let _ = tx.send((watched.clone(), snapshot.clone()));
            })
        })
        .collect();
    drop(tx);
    tracing::info!(batches = subscriptions.len(), "watching");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            update = rx.recv() => {
                let Some((id, snapshot)) = update else { break };
                if state.record(id, snapshot.clone()) {
                    print_snapshot(&snapshot, format)?;
                }
                if !args.follow && state.settled() {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                return Err(ExitError::Interrupted.into());
            }
        }
    }
    drop(subscriptions);

    let failed = state.failed();
    if !failed.is_empty() {
        return Err(ExitError::BatchFailed(failed).into());
    }
    Ok(())
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
