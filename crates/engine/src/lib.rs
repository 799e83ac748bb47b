// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bw-engine: the batch progress coordinator
//!
//! One [`ProgressCoordinator`] multiplexes any number of subscribers onto a
//! single shared polling loop. Each tick queries only the batches that can
//! still change, in bounded chunks, and fans sanitized snapshots out to every
//! listener of the batch.

mod actions;
mod config;
mod coordinator;
mod error;
mod registry;
mod subscription;
#[cfg(test)]
mod test_support;
mod timer;

pub use config::{CoordinatorConfig, Visibility};
pub use coordinator::{ProgressCoordinator, MAX_FORCE_WINDOW};
pub use error::CoordinatorError;
pub use registry::{Listener, ListenerId};
pub use subscription::Subscription;
