// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared polling coordinator.
//!
//! All subscribers share one timer. A tick refreshes the batches that can
//! still change (see [`crate::registry`]) in bounded concurrent chunks, and
//! every sanitized snapshot is cached and broadcast to the batch's listeners.
//!
//! Locking: the state mutex is never held across an `.await` or while a
//! listener runs, so listeners may call back into the coordinator.

use crate::config::{CoordinatorConfig, Visibility};
use crate::error::CoordinatorError;
use crate::registry::{Listener, ListenerId, Registry};
use crate::subscription::{Subscription, Unsubscribe};
use crate::timer::PollTimer;
use bw_adapters::ProgressAdapter;
use bw_core::{sanitize, BatchId, Clock, ProgressSnapshot, SystemClock};
use futures_util::future::join_all;
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;

pub(crate) struct State {
    pub(crate) registry: Registry,
    timer: Option<PollTimer>,
    interval: Duration,
    visibility: Visibility,
}

pub(crate) struct Inner<A, C> {
    pub(crate) adapter: A,
    pub(crate) clock: C,
    pub(crate) config: CoordinatorConfig,
    runtime: Handle,
    pub(crate) state: Mutex<State>,
}

/// Upper bound for a force-poll window (about 100 years).
pub const MAX_FORCE_WINDOW: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Multiplexes progress subscriptions onto a single polling loop.
///
/// Cheap to clone; clones share state. Construct one per composition root.
pub struct ProgressCoordinator<A: ProgressAdapter, C: Clock = SystemClock> {
    pub(crate) inner: Arc<Inner<A, C>>,
}

impl<A: ProgressAdapter, C: Clock> Clone for ProgressCoordinator<A, C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<A: ProgressAdapter, C: Clock> ProgressCoordinator<A, C> {
    /// Create a coordinator bound to the current tokio runtime.
    pub fn new(adapter: A, clock: C, config: CoordinatorConfig) -> Result<Self, CoordinatorError> {
        let runtime = Handle::try_current().map_err(|_| CoordinatorError::NoRuntime)?;
        let interval = config.interval;
        Ok(Self {
            inner: Arc::new(Inner {
                adapter,
                clock,
                config,
                runtime,
                state: Mutex::new(State {
                    registry: Registry::default(),
                    timer: None,
                    interval,
                    visibility: Visibility::default(),
                }),
            }),
        })
    }

    /// Register `listener` for `id` and make sure polling runs.
    ///
    /// A cached snapshot is replayed to the new listener before this returns.
    pub fn subscribe<F>(&self, id: impl Into<BatchId>, listener: F) -> Subscription
    where
        F: Fn(&ProgressSnapshot) + Send + Sync + 'static,
    {
        let id = id.into();
        let listener: Listener = Arc::new(listener);
        let (listener_id, cached) = {
            let mut state = self.inner.state.lock();
            let listener_id = state.registry.add_listener(&id, Arc::clone(&listener));
            let cached = state.registry.snapshot(&id).cloned();
            if state.timer.is_none() {
                let period = state.interval;
                state.timer = Some(self.start_timer(period));
            }
            (listener_id, cached)
        };
        tracing::debug!(batch = %id, listener = ?listener_id, "subscribed");

        if let Some(snapshot) = cached {
            notify(&id, std::slice::from_ref(&listener), &snapshot);
        }

        let owner: Weak<dyn Unsubscribe> = Arc::downgrade(&self.inner) as Weak<dyn Unsubscribe>;
        Subscription::new(owner, id, listener_id)
    }

    /// Remove one listener. Releasing an already removed listener is a no-op.
    pub fn unsubscribe(&self, id: &BatchId, listener: ListenerId) {
        self.inner.unsubscribe(id, listener);
    }

    /// Poll `id` until `now + duration` even if its status is terminal.
    /// Calling it again resets the window. Unsubscribed batches are ignored.
    /// Windows longer than [`MAX_FORCE_WINDOW`] are clamped to it.
    pub fn force_polling(&self, id: &BatchId, duration: Duration) {
        let duration = duration.min(MAX_FORCE_WINDOW);
        let now = self.inner.clock.now();
        let Some(until) = now.checked_add(duration) else {
            tracing::warn!(batch = %id, "force window does not fit the monotonic clock");
            return;
        };
        if self.inner.state.lock().registry.force(id, until) {
            tracing::debug!(batch = %id, window_ms = duration.as_millis() as u64, "force polling");
        } else {
            tracing::debug!(batch = %id, "force polling ignored for unsubscribed batch");
        }
    }

    /// Query `id` once, then cache and broadcast the sanitized snapshot.
    ///
    /// Returns `None` when the query fails. A response overtaken by a newer
    /// one, or for a batch nobody listens to anymore, is returned but neither
    /// cached nor broadcast.
    pub async fn fetch_progress(&self, id: &BatchId) -> Option<ProgressSnapshot> {
        let seq = self.inner.state.lock().registry.begin_fetch();
        let raw = match self.inner.adapter.query_progress(id).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(batch = %id, error = %e, "progress query failed");
                return None;
            }
        };

        let snapshot = sanitize(&raw, id, self.inner.clock.utc_now());
        let listeners = self.inner.state.lock().registry.apply(id, seq, &snapshot);
        match listeners {
            Some(listeners) => notify(id, &listeners, &snapshot),
            None => tracing::debug!(batch = %id, seq, "progress response not applied"),
        }
        Some(snapshot)
    }

    /// Run one polling tick over every batch that is due.
    pub async fn poll_all(&self) {
        let now = self.inner.clock.now();
        let due = self.inner.state.lock().registry.due_batches(now);
        if due.is_empty() {
            return;
        }
        tracing::trace!(batches = due.len(), "polling tick");

        let chunk_size = self.inner.config.chunk_size.max(1);
        for (n, chunk) in due.chunks(chunk_size).enumerate() {
            if n > 0 {
                tokio::time::sleep(self.inner.config.chunk_pause).await;
            }
            join_all(chunk.iter().map(|id| self.fetch_progress(id))).await;
        }
    }

    /// Adapt the cadence to page visibility. Becoming visible also refreshes
    /// immediately.
    pub async fn set_visibility(&self, visibility: Visibility) {
        let restarted = {
            let mut state = self.inner.state.lock();
            state.visibility = visibility;
            let interval = match visibility {
                Visibility::Visible => self.inner.config.visible_interval,
                Visibility::Hidden => self.inner.config.hidden_interval,
            };
            self.apply_interval(&mut state, interval)
        };
        tracing::debug!(%visibility, restarted, "visibility changed");

        // A restarted timer polls on its first tick
        if visibility == Visibility::Visible && !restarted {
            self.poll_all().await;
        }
    }

    /// Override the polling cadence, restarting a running timer.
    pub fn set_polling_interval(&self, interval: Duration) {
        let mut state = self.inner.state.lock();
        self.apply_interval(&mut state, interval);
    }

    pub fn visibility(&self) -> Visibility {
        self.inner.state.lock().visibility
    }

    pub fn polling_interval(&self) -> Duration {
        self.inner.state.lock().interval
    }

    pub fn is_polling(&self) -> bool {
        self.inner.state.lock().timer.is_some()
    }

    pub fn subscribed_batch_count(&self) -> usize {
        self.inner.state.lock().registry.batch_count()
    }

    pub fn listener_count(&self, id: &BatchId) -> usize {
        self.inner.state.lock().registry.listener_count(id)
    }

    pub fn cached_snapshot(&self, id: &BatchId) -> Option<ProgressSnapshot> {
        self.inner.state.lock().registry.snapshot(id).cloned()
    }

    /// Remaining force-poll window for `id`, if one is open.
    pub fn force_window_remaining(&self, id: &BatchId) -> Option<Duration> {
        let now = self.inner.clock.now();
        self.inner.state.lock().registry.force_remaining(id, now)
    }

    /// True when the cached status of `id` is completed or failed.
    pub fn is_batch_terminal(&self, id: &BatchId) -> bool {
        self.inner.state.lock().registry.snapshot(id).is_some_and(ProgressSnapshot::is_terminal)
    }

    /// Forget the cached snapshot so the next tick polls `id` again.
    pub fn clear_cached_snapshot(&self, id: &BatchId) -> bool {
        self.inner.state.lock().registry.clear_snapshot(id)
    }

    /// Set the cadence. Returns true when a running timer was restarted.
    fn apply_interval(&self, state: &mut State, interval: Duration) -> bool {
        if state.interval == interval {
            return false;
        }
        state.interval = interval;
        if state.timer.is_none() {
            return false;
        }
        state.timer = Some(self.start_timer(interval));
        true
    }

    fn start_timer(&self, period: Duration) -> PollTimer {
        let weak = Arc::downgrade(&self.inner);
        PollTimer::start(&self.inner.runtime, period, move || {
            let inner = weak.upgrade()?;
            Some(async move { ProgressCoordinator { inner }.poll_all().await })
        })
    }
}

impl<A: ProgressAdapter, C: Clock> Unsubscribe for Inner<A, C> {
    fn unsubscribe(&self, batch: &BatchId, listener: ListenerId) {
        let (removed, timer) = {
            let mut state = self.state.lock();
            let removed = state.registry.remove_listener(batch, listener);
            let timer = if state.registry.is_empty() { state.timer.take() } else { None };
            (removed, timer)
        };
        if removed.is_some() {
            tracing::debug!(batch = %batch, listener = ?listener, "unsubscribed");
        }
        // Dropped outside the lock: a listener may own a Subscription
        drop(removed);
        drop(timer);
    }
}

/// Invoke every listener with `snapshot`, isolating panics.
fn notify(id: &BatchId, listeners: &[Listener], snapshot: &ProgressSnapshot) {
    for listener in listeners {
        if catch_unwind(AssertUnwindSafe(|| listener(snapshot))).is_err() {
            tracing::error!(batch = %id, "progress listener panicked");
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
