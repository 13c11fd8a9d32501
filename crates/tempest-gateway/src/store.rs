//! Observation store: bounded history plus the latest record.
//!
//! The poller is the only writer. Handlers read concurrently from other
//! worker threads, so the ring sits behind an `RwLock`. Records are stored as
//! `Arc` and never mutated, which means a reader holds either the previous
//! full record or the new one. "Latest" is the ring's newest slot rather than
//! a separate field, so it cannot drift from the history.

use std::sync::{Arc, PoisonError, RwLock};

use tempest_core::{HistoryRing, ObservationRecord};

pub struct ObservationStore {
    ring: RwLock<HistoryRing<Arc<ObservationRecord>>>,
}

impl ObservationStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: RwLock::new(HistoryRing::with_capacity(capacity)),
        }
    }

    /// Append a record and publish it as latest.
    /// Returns the evicted oldest record when the history was full.
    pub fn append(&self, record: ObservationRecord) -> Option<Arc<ObservationRecord>> {
        let record = Arc::new(record);
        // A poisoned lock only means a reader panicked; the ring itself is
        // never left half-written because push is a single slot assignment.
        let mut ring = self.ring.write().unwrap_or_else(PoisonError::into_inner);
        ring.push(record)
    }

    pub fn latest(&self) -> Option<Arc<ObservationRecord>> {
        let ring = self.ring.read().unwrap_or_else(PoisonError::into_inner);
        ring.latest().cloned()
    }

    /// Chronological snapshot of the retained records.
    pub fn history(&self) -> Vec<Arc<ObservationRecord>> {
        let ring = self.ring.read().unwrap_or_else(PoisonError::into_inner);
        ring.to_vec()
    }

    pub fn len(&self) -> usize {
        self.ring.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.ring.read().unwrap_or_else(PoisonError::into_inner).capacity()
    }
}
