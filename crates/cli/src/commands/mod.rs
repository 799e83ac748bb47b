// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod action;
pub mod show;
pub mod watch;

pub use watch::WatchArgs;

use crate::env;
use anyhow::{anyhow, Result};
use bw_adapters::{HttpProgressAdapter, HttpProgressConfig};
use bw_core::SystemClock;
use bw_engine::{CoordinatorConfig, ProgressCoordinator};
use clap::Args;
use std::time::Duration;

pub type Coordinator = ProgressCoordinator<HttpProgressAdapter, SystemClock>;

/// Connection and cadence flags shared by every command. Each falls back to
/// its `BW_*` environment variable.
#[derive(Args, Debug, Default)]
pub struct ApiArgs {
    /// Batch workflow API prefix, e.g. https://host/admin/gaia/workflow [env: BW_BASE_URL]
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token [env: BW_TOKEN]
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Polling interval in milliseconds [env: BW_POLL_INTERVAL_MS]
    #[arg(long, global = true)]
    pub interval_ms: Option<u64>,

    /// Polling interval in the background, in milliseconds [env: BW_HIDDEN_INTERVAL_MS]
    #[arg(long, global = true)]
    pub hidden_interval_ms: Option<u64>,

    /// Force-poll window after a control action, in milliseconds [env: BW_FORCE_WINDOW_MS]
    #[arg(long, global = true)]
    pub force_window_ms: Option<u64>,

    /// HTTP request timeout in milliseconds [env: BW_HTTP_TIMEOUT_MS]
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
}

impl ApiArgs {
    /// Coordinator settings: flags, then environment, then defaults.
    pub fn coordinator_config(&self) -> CoordinatorConfig {
        let mut config = CoordinatorConfig::default();
        if let Some(interval) = self.interval_ms.map(Duration::from_millis).or_else(env::poll_interval) {
            config = config.interval(interval).visible_interval(interval);
        }
        if let Some(hidden) =
            self.hidden_interval_ms.map(Duration::from_millis).or_else(env::hidden_interval)
        {
            config = config.hidden_interval(hidden);
        }
        if let Some(window) = self.force_window_ms.map(Duration::from_millis).or_else(env::force_window)
        {
            config = config.force_window(window);
        }
        config
    }

    pub fn http_config(&self) -> Result<HttpProgressConfig> {
        let base_url = self
            .base_url
            .clone()
            .or_else(env::base_url)
            .ok_or_else(|| anyhow!("no API base URL: pass --base-url or set BW_BASE_URL"))?;
        let timeout = self.timeout_ms.map(Duration::from_millis).unwrap_or_else(env::http_timeout);
        Ok(HttpProgressConfig::new(base_url)
            .token(self.token.clone().or_else(env::token))
            .timeout(timeout))
    }
}

pub fn coordinator(api: &ApiArgs) -> Result<Coordinator> {
    let adapter = HttpProgressAdapter::new(api.http_config()?)?;
    Ok(ProgressCoordinator::new(adapter, SystemClock, api.coordinator_config())?)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
