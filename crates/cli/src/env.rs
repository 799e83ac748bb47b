// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::time::Duration;

fn millis(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.trim().parse::<u64>().ok()).map(Duration::from_millis)
}

/// Route prefix of the batch workflow API (`BW_BASE_URL`).
pub fn base_url() -> Option<String> {
    std::env::var("BW_BASE_URL").ok().filter(|s| !s.is_empty())
}

/// Bearer token for the batch workflow API (`BW_TOKEN`).
pub fn token() -> Option<String> {
    std::env::var("BW_TOKEN").ok().filter(|s| !s.is_empty())
}

/// Polling cadence while the terminal is in the foreground.
pub fn poll_interval() -> Option<Duration> {
    millis("BW_POLL_INTERVAL_MS")
}

pub fn hidden_interval() -> Option<Duration> {
    millis("BW_HIDDEN_INTERVAL_MS")
}

/// Force-poll window opened after a control action.
pub fn force_window() -> Option<Duration> {
    millis("BW_FORCE_WINDOW_MS")
}

/// HTTP request timeout (default 10s).
pub fn http_timeout() -> Duration {
    millis("BW_HTTP_TIMEOUT_MS").unwrap_or(Duration::from_secs(10))
}

/// Log filter directive: `BW_LOG`, then `RUST_LOG`, then `warn`.
pub fn log_filter() -> String {
    std::env::var("BW_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "warn".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
