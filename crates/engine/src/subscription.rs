// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::registry::ListenerId;
use bw_core::BatchId;
use std::sync::Weak;

/// Implemented by the coordinator state a [`Subscription`] releases into.
pub(crate) trait Unsubscribe: Send + Sync {
    fn unsubscribe(&self, batch: &BatchId, listener: ListenerId);
}

/// Ownership of one listener registration.
///
/// Releasing it, explicitly through [`Subscription::unsubscribe`] or by
/// dropping it, removes exactly this listener once. It holds only a weak
/// reference, so an outstanding subscription never keeps the coordinator
/// alive.
#[must_use = "dropping a Subscription unsubscribes its listener immediately"]
pub struct Subscription {
    batch: BatchId,
    listener: ListenerId,
    owner: Option<Weak<dyn Unsubscribe>>,
}

impl Subscription {
    pub(crate) fn new(owner: Weak<dyn Unsubscribe>, batch: BatchId, listener: ListenerId) -> Self {
        Self { batch, listener, owner: Some(owner) }
    }

    pub fn batch_id(&self) -> &BatchId {
        &self.batch
    }

    pub fn listener_id(&self) -> ListenerId {
        self.listener
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(owner) = self.owner.take().and_then(|weak| weak.upgrade()) {
            owner.unsubscribe(&self.batch, self.listener);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("batch", &self.batch)
            .field("listener", &self.listener)
            .field("active", &self.owner.is_some())
            .finish()
    }
}
