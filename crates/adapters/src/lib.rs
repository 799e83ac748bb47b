// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for the batch progress service

pub mod progress;

pub use progress::{AdapterError, HttpProgressAdapter, HttpProgressConfig, ProgressAdapter};

#[cfg(any(test, feature = "test-support"))]
pub use progress::{FakeProgressAdapter, ProgressCall};
