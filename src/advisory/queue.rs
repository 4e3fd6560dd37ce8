use std::collections::VecDeque;

use tracing::debug;

use super::correction::Correction;

// ---------------------------------------------------------------------------
// Bounded FIFO of corrections in transit to the pilot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CorrectionQueue {
    pending: VecDeque<Correction>,
    capacity: usize,
}

impl CorrectionQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a correction. Returns `false` (and drops it) when the queue is full.
    pub fn insert(&mut self, correction: Correction) -> bool {
        if self.pending.len() >= self.capacity {
            debug!(
                eval_time = correction.eval_time,
                capacity = self.capacity,
                "correction queue full, dropping advisory"
            );
            return false;
        }
        self.pending.push_back(correction);
        true
    }

    /// Remove and return every correction due at `now`, in insertion order.
    /// Entries not yet due stay queued in their original order.
    pub fn drain(&mut self, now: f64) -> Vec<Correction> {
        if !self.pending.iter().any(|c| c.is_due(now)) {
            return Vec::new();
        }
        let (due, waiting): (VecDeque<_>, VecDeque<_>) =
            self.pending.drain(..).partition(|c| c.is_due(now));
        self.pending = waiting;
        due.into()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Correction> {
        self.pending.iter()
    }
}
