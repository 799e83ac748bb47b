// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch lifecycle status and control actions.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a batch as reported by the server.
///
/// ```text
/// pending ──► processing ──► completed
///                 │    └───► failed ──(retry)──► pending | processing
///                 ▼
///              stopped ──(resume)──► processing
///                 └─────(retry)───► pending
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    /// Accepted by the server, not started yet
    #[default]
    Pending,
    /// Rows are being executed
    Processing,
    /// All rows finished
    Completed,
    /// The run failed; a retry starts a new run
    Failed,
    /// Paused by the user; resumable
    Stopped,
}

impl BatchStatus {
    /// No further progress is expected without a user action.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Statuses that are refreshed on every polling tick.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }

    /// Whether the server may report `next` after `self`.
    pub fn can_transition_to(self, next: BatchStatus) -> bool {
        use BatchStatus::*;
        self == next
            || matches!(
                (self, next),
                (Pending, Processing)
                    | (Processing, Completed | Failed | Stopped)
                    | (Stopped, Processing | Pending)
                    | (Failed, Pending | Processing)
            )
    }
}

crate::wire_names! {
    BatchStatus {
        Pending => "pending",
        Processing => "processing",
        Completed => "completed",
        Failed => "failed",
        Stopped => "stopped",
    }
}

/// User-issued control action on a running or finished batch. The wire name
/// doubles as the path segment of its control endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchAction {
    Stop,
    Resume,
    /// Restart every row from scratch
    Retry,
    /// Re-run only the rows that failed, keeping completed ones
    RetryFailed,
}

impl BatchAction {
    pub const ALL: [BatchAction; 4] = [Self::Stop, Self::Resume, Self::Retry, Self::RetryFailed];

    /// Retries start a new run, so the previous snapshot no longer applies.
    pub fn restarts_run(self) -> bool {
        matches!(self, Self::Retry | Self::RetryFailed)
    }
}

crate::wire_names! {
    BatchAction {
        Stop => "stop",
        Resume => "resume",
        Retry => "retry",
        RetryFailed => "retry-failed",
    }
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
