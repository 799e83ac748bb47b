// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable in-memory progress adapter for tests.

use super::{AdapterError, ProgressAdapter};
use async_trait::async_trait;
use bw_core::{BatchAction, BatchId};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

/// Recorded adapter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressCall {
    Query(BatchId),
    Control(BatchId, BatchAction),
}

#[derive(Default)]
struct FakeProgressState {
    calls: Vec<ProgressCall>,
    payloads: HashMap<BatchId, Value>,
    failing: HashSet<BatchId>,
    delay: Duration,
    queued_delays: HashMap<BatchId, VecDeque<Duration>>,
    control_error: Option<AdapterError>,
    in_flight: usize,
    max_in_flight: usize,
}

/// Fake progress adapter for testing.
///
/// Payloads are captured when a query starts, so a delayed query returns the
/// payload that was current when it was issued.
#[derive(Clone, Default)]
pub struct FakeProgressAdapter {
    inner: Arc<Mutex<FakeProgressState>>,
}

impl FakeProgressAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload returned for every later query of `id`.
    pub fn set_payload(&self, id: impl Into<BatchId>, payload: Value) {
        self.inner.lock().payloads.insert(id.into(), payload);
    }

    /// Make queries of `id` fail with a transport error until [`Self::recover`].
    pub fn fail(&self, id: impl Into<BatchId>) {
        self.inner.lock().failing.insert(id.into());
    }

    pub fn recover(&self, id: &BatchId) {
        self.inner.lock().failing.remove(id);
    }

    /// Latency applied to every query.
    pub fn set_delay(&self, delay: Duration) {
        self.inner.lock().delay = delay;
    }

    /// Latency for the next query of `id` only, overriding the global delay.
    pub fn push_delay(&self, id: impl Into<BatchId>, delay: Duration) {
        self.inner.lock().queued_delays.entry(id.into()).or_default().push_back(delay);
    }

    /// Make every control action fail with `error`.
    pub fn fail_control(&self, error: AdapterError) {
        self.inner.lock().control_error = Some(error);
    }

    pub fn calls(&self) -> Vec<ProgressCall> {
        self.inner.lock().calls.clone()
    }

    /// Number of progress queries issued for `id`.
    pub fn query_count(&self, id: &BatchId) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, ProgressCall::Query(q) if q == id))
            .count()
    }

    pub fn total_queries(&self) -> usize {
        self.inner.lock().calls.iter().filter(|c| matches!(c, ProgressCall::Query(_))).count()
    }

    /// Highest number of simultaneously outstanding queries seen so far.
    pub fn max_in_flight(&self) -> usize {
        self.inner.lock().max_in_flight
    }

    pub fn clear_calls(&self) {
        let mut state = self.inner.lock();
        state.calls.clear();
        state.max_in_flight = state.in_flight;
    }
}

#[async_trait]
impl ProgressAdapter for FakeProgressAdapter {
    async fn query_progress(&self, id: &BatchId) -> Result<Value, AdapterError> {
        let (delay, outcome) = {
            let mut state = self.inner.lock();
            state.calls.push(ProgressCall::Query(id.clone()));
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
            let delay = state
                .queued_delays
                .get_mut(id)
                .and_then(VecDeque::pop_front)
                .unwrap_or(state.delay);
            let outcome = if state.failing.contains(id) {
                Err(AdapterError::Transport("connection refused".to_string()))
            } else {
                state.payloads.get(id).cloned().ok_or(AdapterError::EmptyPayload)
            };
            (delay, outcome)
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.inner.lock().in_flight -= 1;
        outcome
    }

    async fn control(&self, id: &BatchId, action: BatchAction) -> Result<(), AdapterError> {
        let mut state = self.inner.lock();
        state.calls.push(ProgressCall::Control(id.clone(), action));
        match &state.control_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
