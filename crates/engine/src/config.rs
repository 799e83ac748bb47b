// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Polling cadence and fan-out limits for [`crate::ProgressCoordinator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Cadence when the coordinator is created
    pub interval: Duration,
    /// Cadence restored when the page becomes visible again
    pub visible_interval: Duration,
    /// Relaxed cadence while the page is hidden
    pub hidden_interval: Duration,
    /// Maximum number of progress queries in flight per tick
    pub chunk_size: usize,
    /// Pause between two chunks of the same tick
    pub chunk_pause: Duration,
    /// Force-poll window opened after a control action
    pub force_window: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(3000),
            visible_interval: Duration::from_millis(3000),
            hidden_interval: Duration::from_millis(15_000),
            chunk_size: 10,
            chunk_pause: Duration::from_millis(100),
            force_window: Duration::from_millis(15_000),
        }
    }
}

impl CoordinatorConfig {
    bw_core::setters! {
        interval: Duration,
        visible_interval: Duration,
        hidden_interval: Duration,
        chunk_size: usize,
        chunk_pause: Duration,
        force_window: Duration,
    }
}

/// Visibility of the page (or terminal) hosting the subscribers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

bw_core::wire_names! {
    Visibility {
        Visible => "visible",
        Hidden => "hidden",
    }
}
