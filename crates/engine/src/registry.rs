// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-batch subscriber bookkeeping.
//!
//! A batch has an entry exactly while it has at least one listener; the
//! cached snapshot and force-poll window live inside the entry, so removing
//! the last listener purges both.

use bw_core::{BatchId, ProgressSnapshot};
use indexmap::IndexMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Callback invoked with every new snapshot of a subscribed batch.
pub type Listener = Arc<dyn Fn(&ProgressSnapshot) + Send + Sync>;

/// Identifies one listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct BatchEntry {
    listeners: Vec<(ListenerId, Listener)>,
    snapshot: Option<ProgressSnapshot>,
    force_until: Option<Instant>,
    /// Sequence of the request that produced `snapshot`
    applied_seq: u64,
}

#[derive(Default)]
pub(crate) struct Registry {
    batches: IndexMap<BatchId, BatchEntry>,
    next_listener: u64,
    /// Last request sequence handed out, shared by all batches
    last_seq: u64,
}

impl Registry {
    pub(crate) fn add_listener(&mut self, id: &BatchId, listener: Listener) -> ListenerId {
        self.next_listener += 1;
        let listener_id = ListenerId(self.next_listener);
        let last_seq = self.last_seq;
        self.batches
            .entry(id.clone())
            .or_insert_with(|| BatchEntry {
                listeners: Vec::new(),
                snapshot: None,
                force_until: None,
                // Responses to requests issued before the first subscription are stale
                applied_seq: last_seq,
            })
            .listeners
            .push((listener_id, listener));
        listener_id
    }

    /// Remove one listener, purging the batch entry when it was the last.
    ///
    /// The removed callback is handed back so the caller can drop it after
    /// releasing any lock; it may own a [`crate::Subscription`].
    pub(crate) fn remove_listener(&mut self, id: &BatchId, listener: ListenerId) -> Option<Listener> {
        let entry = self.batches.get_mut(id)?;
        let index = entry.listeners.iter().position(|(lid, _)| *lid == listener)?;
        let (_, removed) = entry.listeners.remove(index);
        if entry.listeners.is_empty() {
            self.batches.shift_remove(id);
        }
        Some(removed)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub(crate) fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub(crate) fn listener_count(&self, id: &BatchId) -> usize {
        self.batches.get(id).map_or(0, |e| e.listeners.len())
    }

    pub(crate) fn snapshot(&self, id: &BatchId) -> Option<&ProgressSnapshot> {
        self.batches.get(id)?.snapshot.as_ref()
    }

    pub(crate) fn clear_snapshot(&mut self, id: &BatchId) -> bool {
        self.batches.get_mut(id).is_some_and(|e| e.snapshot.take().is_some())
    }

    /// Open (or reset) a force-poll window. Ignored for unsubscribed batches.
    pub(crate) fn force(&mut self, id: &BatchId, until: Instant) -> bool {
        match self.batches.get_mut(id) {
            Some(entry) => {
                entry.force_until = Some(until);
                true
            }
            None => false,
        }
    }

    /// Remaining force-poll window at `now`, if any.
    pub(crate) fn force_remaining(&self, id: &BatchId, now: Instant) -> Option<Duration> {
        let until = self.batches.get(id)?.force_until?;
        (now < until).then(|| until - now)
    }

    /// Hand out the sequence number for a new progress request.
    pub(crate) fn begin_fetch(&mut self) -> u64 {
        self.last_seq += 1;
        self.last_seq
    }

    /// Cache `snapshot` if the batch is still subscribed and no newer response
    /// was applied. Returns the listeners to notify, or `None` when dropped.
    pub(crate) fn apply(
        &mut self,
        id: &BatchId,
        seq: u64,
        snapshot: &ProgressSnapshot,
    ) -> Option<Vec<Listener>> {
        let entry = self.batches.get_mut(id)?;
        if seq <= entry.applied_seq {
            return None;
        }
        entry.applied_seq = seq;
        entry.snapshot = Some(snapshot.clone());
        Some(entry.listeners.iter().map(|(_, l)| Arc::clone(l)).collect())
    }

    /// Batches to refresh on a tick at `now`, in subscription order.
    ///
    /// Terminal batches are skipped unless force-polled; otherwise a batch is
    /// due when force-polled, never fetched, or still pending/processing.
    /// Expired force windows are dropped along the way.
    pub(crate) fn due_batches(&mut self, now: Instant) -> Vec<BatchId> {
        let mut due = Vec::new();
        for (id, entry) in self.batches.iter_mut() {
            let forced = match entry.force_until {
                Some(until) if now < until => true,
                Some(_) => {
                    entry.force_until = None;
                    false
                }
                None => false,
            };
            let status = entry.snapshot.as_ref().map(|s| s.status);
            match status {
                Some(s) if s.is_terminal() && !forced => continue,
                Some(s) if !forced && !s.is_active() => continue,
                _ => due.push(id.clone()),
            }
        }
        due
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
