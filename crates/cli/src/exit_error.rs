// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcomes that end `bw` with a non-zero status other than 1.
//!
//! `main()` downcasts to this type to pick the process exit code; any other
//! error exits with 1.

use bw_core::BatchId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExitError {
    #[error("failed: {}", join(.0))]
    BatchFailed(Vec<BatchId>),

    #[error("progress unavailable for {}", join(.0))]
    Unavailable(Vec<BatchId>),

    /// Ctrl-C; nothing is printed
    #[error("")]
    Interrupted,
}

impl ExitError {
    pub fn code(&self) -> i32 {
        match self {
            ExitError::BatchFailed(_) => 2,
            ExitError::Unavailable(_) => 3,
            ExitError::Interrupted => 130,
        }
    }
}

fn join(ids: &[BatchId]) -> String {
    ids.iter().map(BatchId::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
