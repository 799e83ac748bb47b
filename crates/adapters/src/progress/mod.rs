// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress service adapter: the coordinator's only remote collaborator.

mod http;

pub use http::{HttpProgressAdapter, HttpProgressConfig};

use async_trait::async_trait;
use bw_core::{BatchAction, BatchId};
use thiserror::Error;

/// Errors from progress service calls
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdapterError {
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("service returned code {code}: {msg}")]
    Api { code: i64, msg: String },
    #[error("response carried no progress data")]
    EmptyPayload,
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for AdapterError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

/// Remote progress service for batch runs.
///
/// `query_progress` returns the raw payload untouched; normalizing it is the
/// caller's job (see [`bw_core::sanitize`]).
#[async_trait]
pub trait ProgressAdapter: Clone + Send + Sync + 'static {
    /// Fetch the current progress payload of one batch.
    async fn query_progress(&self, id: &BatchId) -> Result<serde_json::Value, AdapterError>;

    /// Issue a control action (stop, resume, retry) for one batch.
    async fn control(&self, id: &BatchId, action: BatchAction) -> Result<(), AdapterError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProgressAdapter, ProgressCall};
