// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for coordinator tests.

use crate::{CoordinatorConfig, ProgressCoordinator};
use bw_adapters::FakeProgressAdapter;
use bw_core::{FakeClock, ProgressSnapshot};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;

pub(crate) struct Harness {
    pub(crate) coordinator: ProgressCoordinator<FakeProgressAdapter, FakeClock>,
    pub(crate) adapter: FakeProgressAdapter,
    pub(crate) clock: FakeClock,
}

pub(crate) fn harness() -> Harness {
    harness_with(CoordinatorConfig::default())
}

pub(crate) fn harness_with(config: CoordinatorConfig) -> Harness {
    let adapter = FakeProgressAdapter::new();
    let clock = FakeClock::new();
    let coordinator = ProgressCoordinator::new(adapter.clone(), clock.clone(), config).unwrap();
    Harness { coordinator, adapter, clock }
}

pub(crate) fn progress(status: &str, processed: u64, total: u64) -> Value {
    json!({ "status": status, "processed_rows": processed, "total_rows": total })
}

/// Let spawned tick work run to completion without moving time.
pub(crate) async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

/// Collects every snapshot delivered to its listener.
#[derive(Clone, Default)]
pub(crate) struct Recorder(Arc<Mutex<Vec<ProgressSnapshot>>>);

impl Recorder {
    pub(crate) fn listener(&self) -> impl Fn(&ProgressSnapshot) + Send + Sync + 'static {
        let seen = Arc::clone(&self.0);
        move |snapshot| seen.lock().push(snapshot.clone())
    }

    pub(crate) fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub(crate) fn processed(&self) -> Vec<u64> {
        self.0.lock().iter().map(|s| s.processed_rows).collect()
    }

    pub(crate) fn last(&self) -> Option<ProgressSnapshot> {
        self.0.lock().last().cloned()
    }
}
