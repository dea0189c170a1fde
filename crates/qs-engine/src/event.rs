//! The event queue — pending process resumptions ordered by `(time, sequence)`.
//!
//! # Why a sequence counter
//!
//! Simulated times collide constantly: N parallel lines started together all
//! finish their first takt at the same instant.  A heap ordered by time alone
//! would pop them in an unspecified order and runs would stop being
//! reproducible.  Every scheduled event therefore carries a monotonically
//! increasing sequence number assigned at scheduling time; ties break toward
//! the earlier-scheduled event.
//!
//! The heap stores `Reverse<Event<T>>` so `BinaryHeap` (a max-heap) pops the
//! earliest event first.  Ordering looks only at `(time, seq)`; the wake
//! payload rides along.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use qs_core::{Hours, ProcessId};

use crate::process::Wake;

// ── Event ─────────────────────────────────────────────────────────────────────

/// One scheduled resumption of a process.
#[derive(Debug)]
pub(crate) struct Event<T> {
    pub time:   Hours,
    /// Tie-breaker for events at the same simulated time; unique per queue.
    pub seq:    u64,
    pub target: ProcessId,
    pub wake:   Wake<T>,
}

impl<T> PartialEq for Event<T> {
    fn eq(&self, other: &Self) -> bool {
        // seq is unique per queue, so it alone decides equality.
        self.seq == other.seq
    }
}

impl<T> Eq for Event<T> {}

impl<T> PartialOrd for Event<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Event<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

// ── EventQueue ────────────────────────────────────────────────────────────────

/// Min-queue of pending resumptions.
pub(crate) struct EventQueue<T> {
    heap: BinaryHeap<Reverse<Event<T>>>,
    /// Next sequence number — monotonically increasing for the whole run.
    seq:  u64,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq:  0,
        }
    }

    /// Enqueue a resumption of `target` at `time`.
    pub fn push(&mut self, time: Hours, target: ProcessId, wake: Wake<T>) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Event { time, seq, target, wake }));
    }

    /// Remove and return the earliest event.
    pub fn pop(&mut self) -> Option<Event<T>> {
        self.heap.pop().map(|Reverse(ev)| ev)
    }

    /// Time of the earliest pending event without removing it.
    pub fn peek_time(&self) -> Option<Hours> {
        self.heap.peek().map(|Reverse(ev)| ev.time)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
