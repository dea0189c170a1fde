//! Bounded storage resources — the hand-off points between production stages.
//!
//! A `Storage<T>` is the only shared mutable state between processes.  All
//! mutation goes through the engine's handling of [`Action::Get`] and
//! [`Action::Put`]; because the scheduler is cooperative and single-threaded,
//! insertion and removal are atomic with respect to every other process.
//!
//! # Invariants
//!
//! - `0 <= items.len() <= capacity` at every simulated instant.
//! - `get_waiters` is non-empty only while `items` is empty;
//!   `put_waiters` is non-empty only while `items` is full.
//! - Waiters are served strictly in arrival order (FIFO) — no priorities,
//!   no starvation beyond FIFO.
//!
//! [`Action::Get`]: crate::process::Action::Get
//! [`Action::Put`]: crate::process::Action::Put

use std::collections::VecDeque;

use qs_core::{Hours, ProcessId};

/// A capacity-bounded FIFO buffer with blocking put/get semantics.
pub struct Storage<T> {
    capacity: usize,
    pub(crate) items: VecDeque<T>,
    /// Processes blocked on `get`, oldest first.
    pub(crate) get_waiters: VecDeque<ProcessId>,
    /// Processes blocked on `put`, oldest first, parked with their item.
    pub(crate) put_waiters: VecDeque<(ProcessId, T)>,
    /// Timestamp of every successful put, in order.  Survives removals, so
    /// post-run queries can read the N-th completion time of the stage that
    /// feeds this buffer.
    pub(crate) deposits: Vec<Hours>,
}

impl<T> Storage<T> {
    /// Capacity is validated by `Engine::add_storage`; this constructor
    /// trusts it.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity >= 1);
        Self {
            capacity,
            items:       VecDeque::new(),
            get_waiters: VecDeque::new(),
            put_waiters: VecDeque::new(),
            deposits:    Vec::new(),
        }
    }

    /// Maximum number of items the buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Items currently buffered.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Number of processes currently blocked on `get`.
    #[inline]
    pub fn blocked_getters(&self) -> usize {
        self.get_waiters.len()
    }

    /// Number of processes currently blocked on `put`.
    #[inline]
    pub fn blocked_putters(&self) -> usize {
        self.put_waiters.len()
    }

    /// Timestamps of every successful put into this buffer, in order.
    #[inline]
    pub fn deposits(&self) -> &[Hours] {
        &self.deposits
    }

    /// Completion time of the N-th unit deposited here (0-based).
    #[inline]
    pub fn nth_deposit(&self, n: usize) -> Option<Hours> {
        self.deposits.get(n).copied()
    }
}
