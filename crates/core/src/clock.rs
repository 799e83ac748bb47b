// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time source for force-poll windows and snapshot timestamps.
//!
//! Monotonic time (`now`) decides when a force-poll window expires; wall-clock
//! time (`utc_now`) fills in snapshot timestamps the server left out.

use chrono::{DateTime, Utc};
use std::time::Instant;

pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
    fn utc_now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::Clock;
    use chrono::{DateTime, Utc};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    /// Hand-driven clock for tests. Clones observe the same time, so a clock
    /// handed to a coordinator can still be advanced from the test body.
    #[derive(Clone)]
    pub struct FakeClock {
        at: Arc<Mutex<(Instant, DateTime<Utc>)>>,
    }

    impl FakeClock {
        /// Wall clock starts at 2024-01-01T00:00:00Z.
        pub fn new() -> Self {
            let wall = DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default();
            Self { at: Arc::new(Mutex::new((Instant::now(), wall))) }
        }

        pub fn advance(&self, by: Duration) {
            let mut at = self.at.lock();
            at.0 += by;
            at.1 += chrono::Duration::from_std(by).unwrap_or_else(|_| chrono::Duration::zero());
        }

        /// Jump the wall clock without touching monotonic time.
        pub fn set_utc(&self, wall: DateTime<Utc>) {
            self.at.lock().1 = wall;
        }
    }

    impl Default for FakeClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            self.at.lock().0
        }

        fn utc_now(&self) -> DateTime<Utc> {
            self.at.lock().1
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClock;

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
