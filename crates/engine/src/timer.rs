// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single shared poll timer.

use std::future::Future;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Lower bound for the tick period; `tokio::time::interval` rejects zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Periodic tick task. Aborted when dropped.
///
/// The first tick fires immediately. Each tick's work runs in its own task,
/// so tearing the timer down never cancels a poll that is already running.
pub(crate) struct PollTimer {
    period: Duration,
    task: JoinHandle<()>,
}

impl PollTimer {
    /// Start ticking every `period`. `on_tick` returns the work for one tick,
    /// or `None` once the owner is gone, which ends the timer.
    pub(crate) fn start<F, Fut>(runtime: &Handle, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> Option<Fut> + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);
        let spawner = runtime.clone();
        let task = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match on_tick() {
                    Some(work) => {
                        spawner.spawn(work);
                    }
                    None => break,
                }
            }
        });
        tracing::debug!(period_ms = period.as_millis() as u64, "poll timer started");
        Self { period, task }
    }

    #[cfg(test)]
    pub(crate) fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!(period_ms = self.period.as_millis() as u64, "poll timer stopped");
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
