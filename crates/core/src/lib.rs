// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bw-core: domain types for batch progress tracking

pub mod macros;

pub mod batch;
pub mod clock;
pub mod id;
pub mod snapshot;

pub use batch::{BatchAction, BatchStatus};
#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
pub use clock::{Clock, SystemClock};
pub use id::BatchId;
pub use snapshot::{sanitize, ProgressSnapshot};
