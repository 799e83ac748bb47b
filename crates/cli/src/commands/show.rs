// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bw show <id>...`: one-shot progress query.

use super::Coordinator;
use crate::exit_error::ExitError;
use crate::output::{print_snapshot, OutputFormat};
use anyhow::Result;
use bw_core::{BatchId, BatchStatus};

pub async fn handle(coordinator: &Coordinator, ids: Vec<String>, format: OutputFormat) -> Result<()> {
    let mut missing = Vec::new();
    let mut failed = Vec::new();
    for id in ids.into_iter().map(BatchId::new) {
        match coordinator.fetch_progress(&id).await {
            Some(snapshot) => {
                print_snapshot(&snapshot, format)?;
                if snapshot.status == BatchStatus::Failed {
                    failed.push(id);
                }
            }
            None => missing.push(id),
        }
    }

    if !missing.is_empty() {
        return Err(ExitError::Unavailable(missing).into());
    }
    if !failed.is_empty() {
        return Err(ExitError::BatchFailed(failed).into());
    }
    Ok(())
}
