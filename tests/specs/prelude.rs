// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared spec helpers.

#![allow(dead_code)]

pub use bw_adapters::{AdapterError, FakeProgressAdapter, ProgressCall};
pub use bw_core::{BatchAction, BatchId, BatchStatus, FakeClock, ProgressSnapshot};
pub use bw_engine::{CoordinatorConfig, ProgressCoordinator, Subscription, Visibility};
pub use parking_lot::Mutex;
pub use serde_json::{json, Value};
pub use std::sync::Arc;
pub use std::time::Duration;

/// A closed local port: connections are refused immediately.
pub const UNREACHABLE: &str = "http://127.0.0.1:9/admin/gaia/workflow";

const BW_VARS: &[&str] = &[
    "BW_BASE_URL",
    "BW_TOKEN",
    "BW_POLL_INTERVAL_MS",
    "BW_HIDDEN_INTERVAL_MS",
    "BW_FORCE_WINDOW_MS",
    "BW_HTTP_TIMEOUT_MS",
    "BW_LOG",
    "RUST_LOG",
];

/// `bw` with a clean environment and colors off.
pub fn cli() -> Cli {
    let mut cmd = assert_cmd::Command::cargo_bin("bw").unwrap();
    for var in BW_VARS {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1").timeout(std::time::Duration::from_secs(30));
    Cli { cmd }
}

pub struct Cli {
    cmd: assert_cmd::Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and assert exit code 0.
    pub fn passes(mut self) -> Output {
        let output = self.cmd.output().unwrap();
        let out = Output::from(output);
        assert_eq!(out.code, Some(0), "expected success\n{out}");
        out
    }

    /// Run and assert the given exit code.
    pub fn exits_with(mut self, code: i32) -> Output {
        let output = self.cmd.output().unwrap();
        let out = Output::from(output);
        assert_eq!(out.code, Some(code), "unexpected exit code\n{out}");
        out
    }
}

pub struct Output {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Output {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl std::fmt::Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "--- stdout ---\n{}\n--- stderr ---\n{}", self.stdout, self.stderr)
    }
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout lacks {needle:?}\n{self}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr lacks {needle:?}\n{self}");
        self
    }

    pub fn stdout_is_empty(self) -> Self {
        assert!(self.stdout.is_empty(), "stdout not empty\n{self}");
        self
    }
}

/// Coordinator wired to fakes.
pub struct World {
    pub coordinator: ProgressCoordinator<FakeProgressAdapter, FakeClock>,
    pub adapter: FakeProgressAdapter,
    pub clock: FakeClock,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self::with(CoordinatorConfig::default())
    }

    pub fn with(config: CoordinatorConfig) -> Self {
        let adapter = FakeProgressAdapter::new();
        let clock = FakeClock::new();
        let coordinator = ProgressCoordinator::new(adapter.clone(), clock.clone(), config).unwrap();
        Self { coordinator, adapter, clock }
    }

    pub fn progress(&self, id: &str, status: &str, processed: u64, total: u64) {
        self.adapter.set_payload(
            id,
            json!({ "id": id, "status": status, "processed_rows": processed, "total_rows": total }),
        );
    }
}

/// Collects delivered snapshots.
#[derive(Clone, Default)]
pub struct Seen(Arc<Mutex<Vec<ProgressSnapshot>>>);

impl Seen {
    pub fn listener(&self) -> impl Fn(&ProgressSnapshot) + Send + Sync + 'static {
        let seen = Arc::clone(&self.0);
        move |snapshot| seen.lock().push(snapshot.clone())
    }

    pub fn statuses(&self) -> Vec<BatchStatus> {
        self.0.lock().iter().map(|s| s.status).collect()
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }
}

/// Run ready tasks without moving the paused clock.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
