//! The engine: clock, event loop, and resource arbitration.

use qs_core::{Hours, ProcessId, StorageId};

use crate::error::{EngineError, EngineResult};
use crate::event::EventQueue;
use crate::observer::{EngineObserver, NoopObserver};
use crate::process::{Action, Process, ProcessState, Wake};
use crate::storage::Storage;

// ── RunOutcome ────────────────────────────────────────────────────────────────

/// How a call to [`Engine::run_until_idle`] ended.
///
/// The three variants are deliberately distinct result states (not errors):
/// callers must be able to tell "everything finished" from "broken
/// configuration" from "ran out of simulated time".
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Every started process reached `Completed` and no events remain.
    Completed { elapsed: Hours },

    /// No events remain but some processes are parked on a storage that can
    /// never free.  `stalled` names each one and what it is waiting for.
    Deadlock { elapsed: Hours, stalled: Vec<Stall> },

    /// The configured horizon was reached with work still outstanding.
    /// A partial result, not an error; `incomplete` lists every process
    /// left mid-state (none are forcibly terminated).
    HorizonReached { horizon: Hours, incomplete: Vec<ProcessId> },
}

impl RunOutcome {
    /// Simulated time at which the run stopped.
    pub fn elapsed(&self) -> Hours {
        match *self {
            RunOutcome::Completed { elapsed } => elapsed,
            RunOutcome::Deadlock { elapsed, .. } => elapsed,
            RunOutcome::HorizonReached { horizon, .. } => horizon,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }

    pub fn reached_horizon(&self) -> bool {
        matches!(self, RunOutcome::HorizonReached { .. })
    }
}

/// One process found blocked when the event queue drained.
#[derive(Debug, Clone, PartialEq)]
pub struct Stall {
    pub process:     ProcessId,
    pub name:        String,
    pub storage:     StorageId,
    pub waiting_for: WaitKind,
}

/// Which side of a storage a stalled process is blocked on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WaitKind {
    /// Blocked in `get` — the storage is empty and no producer remains.
    Input,
    /// Blocked in `put` — the storage is full and no consumer remains.
    Space,
}

// ── Engine ────────────────────────────────────────────────────────────────────

struct Slot<T> {
    process: Box<dyn Process<T>>,
    state:   ProcessState,
}

/// The cooperative virtual-time scheduler.
///
/// Owns the clock, the event queue, every registered process, and every
/// storage resource.  Processes refer to storages by [`StorageId`] only;
/// no ambient or global state exists.
pub struct Engine<T> {
    now:       Hours,
    queue:     EventQueue<T>,
    storages:  Vec<Storage<T>>,
    processes: Vec<Slot<T>>,
}

impl<T> Default for Engine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Engine<T> {
    pub fn new() -> Self {
        Self {
            now:       Hours::ZERO,
            queue:     EventQueue::new(),
            storages:  Vec::new(),
            processes: Vec::new(),
        }
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Create a bounded storage resource.  Capacity 0 is rejected here —
    /// it would make every `put` block with no possible `get` to unblock it,
    /// which is a configuration error, not a runtime deadlock.
    pub fn add_storage(&mut self, capacity: usize) -> EngineResult<StorageId> {
        if capacity == 0 {
            return Err(EngineError::ZeroCapacityStorage);
        }
        let id = StorageId(self.storages.len() as u32);
        self.storages.push(Storage::new(capacity));
        Ok(id)
    }

    /// Register a process.  Registration order is part of the deterministic
    /// contract: it fixes the sequence numbers of the start events.
    pub fn register(&mut self, process: Box<dyn Process<T>>) -> ProcessId {
        let id = ProcessId(self.processes.len() as u32);
        self.processes.push(Slot {
            process,
            state: ProcessState::Idle,
        });
        id
    }

    /// Schedule a registered process for its first resumption at the current
    /// simulated time.
    pub fn start(&mut self, id: ProcessId) -> EngineResult<()> {
        let slot = self
            .processes
            .get_mut(id.index())
            .ok_or(EngineError::UnknownProcess(id))?;
        if slot.state != ProcessState::Idle {
            return Err(EngineError::AlreadyStarted(id));
        }
        slot.state = ProcessState::Running;
        self.queue.push(self.now, id, Wake::Start);
        Ok(())
    }

    // ── Run ───────────────────────────────────────────────────────────────

    /// Run until no events remain or `horizon` is reached.
    ///
    /// See [`RunOutcome`] for the three ways this returns.  An `Err` is
    /// reserved for wiring bugs (unknown IDs, invalid delays) that a
    /// correctly assembled simulation cannot produce.
    pub fn run_until_idle(&mut self, horizon: Option<Hours>) -> EngineResult<RunOutcome> {
        self.run_observed(horizon, &mut NoopObserver)
    }

    /// [`run_until_idle`][Self::run_until_idle] with observer callbacks.
    pub fn run_observed<O: EngineObserver>(
        &mut self,
        horizon: Option<Hours>,
        observer: &mut O,
    ) -> EngineResult<RunOutcome> {
        while let Some(next_time) = self.queue.peek_time() {
            if let Some(h) = horizon {
                if next_time.total_cmp(&h) == std::cmp::Ordering::Greater {
                    // Stop at the ceiling; leave pending events untouched so
                    // the incomplete processes stay inspectable mid-state.
                    self.now = self.now.max(h);
                    observer.on_run_end(self.now);
                    return Ok(RunOutcome::HorizonReached {
                        horizon:    h,
                        incomplete: self.incomplete(),
                    });
                }
            }

            // pop() must agree with peek_time(); the queue is untouched since.
            let Some(event) = self.queue.pop() else { break };
            debug_assert!(event.time.total_cmp(&self.now) != std::cmp::Ordering::Less);
            self.now = event.time;
            observer.on_event(self.now, event.target);
            self.dispatch(event.target, event.wake, observer)?;
        }

        observer.on_run_end(self.now);
        let stalled = self.stalled();
        if stalled.is_empty() {
            Ok(RunOutcome::Completed { elapsed: self.now })
        } else {
            Ok(RunOutcome::Deadlock {
                elapsed: self.now,
                stalled,
            })
        }
    }

    /// Drive one process from `wake` to its next suspension point.
    ///
    /// Non-blocking gets and puts do not suspend: the loop keeps resuming
    /// the same process synchronously, so everything between two real
    /// suspension points is atomic with respect to the rest of the run.
    fn dispatch<O: EngineObserver>(
        &mut self,
        id: ProcessId,
        mut wake: Wake<T>,
        observer: &mut O,
    ) -> EngineResult<()> {
        loop {
            let slot = self
                .processes
                .get_mut(id.index())
                .ok_or(EngineError::UnknownProcess(id))?;
            slot.state = ProcessState::Running;
            let action = slot.process.resume(wake, self.now);

            match action {
                Action::Delay(d) => {
                    if !d.is_valid_duration() {
                        return Err(EngineError::InvalidDelay { id, hours: d.get() });
                    }
                    self.queue.push(self.now + d, id, Wake::DelayElapsed);
                    self.processes[id.index()].state = ProcessState::WaitingForDelay;
                    return Ok(());
                }

                Action::Get(sid) => {
                    let storage = self
                        .storages
                        .get_mut(sid.index())
                        .ok_or(EngineError::UnknownStorage(sid))?;
                    match storage.items.pop_front() {
                        Some(item) => {
                            observer.on_withdraw(sid, self.now);
                            // A slot was freed: admit the earliest parked
                            // putter and schedule its resumption.
                            if let Some((putter, parked)) = storage.put_waiters.pop_front() {
                                storage.items.push_back(parked);
                                storage.deposits.push(self.now);
                                observer.on_deposit(sid, self.now);
                                self.queue.push(self.now, putter, Wake::SpaceGranted);
                                self.processes[putter.index()].state = ProcessState::Running;
                            }
                            wake = Wake::ItemGranted(item);
                        }
                        None => {
                            storage.get_waiters.push_back(id);
                            self.processes[id.index()].state = ProcessState::WaitingForInput;
                            return Ok(());
                        }
                    }
                }

                Action::Put(sid, item) => {
                    let storage = self
                        .storages
                        .get_mut(sid.index())
                        .ok_or(EngineError::UnknownStorage(sid))?;
                    if let Some(getter) = storage.get_waiters.pop_front() {
                        // A getter can only be parked while the buffer is
                        // empty, so this item is the oldest: hand it over
                        // directly rather than bouncing through the buffer.
                        debug_assert!(storage.items.is_empty());
                        storage.deposits.push(self.now);
                        observer.on_deposit(sid, self.now);
                        observer.on_withdraw(sid, self.now);
                        self.queue.push(self.now, getter, Wake::ItemGranted(item));
                        self.processes[getter.index()].state = ProcessState::Running;
                        wake = Wake::SpaceGranted;
                    } else if !storage.is_full() {
                        storage.items.push_back(item);
                        storage.deposits.push(self.now);
                        observer.on_deposit(sid, self.now);
                        wake = Wake::SpaceGranted;
                    } else {
                        storage.put_waiters.push_back((id, item));
                        self.processes[id.index()].state = ProcessState::WaitingForSpace;
                        return Ok(());
                    }
                }

                Action::Complete => {
                    self.processes[id.index()].state = ProcessState::Completed;
                    observer.on_process_completed(id, self.now);
                    return Ok(());
                }
            }
        }
    }

    /// Every process parked in a storage waiter queue, in storage order then
    /// arrival order.  Non-empty with a drained event queue means deadlock:
    /// a blocked process holds no event, so an empty queue proves no
    /// resumption can ever reach it.
    fn stalled(&self) -> Vec<Stall> {
        let mut stalled = Vec::new();
        for (i, storage) in self.storages.iter().enumerate() {
            let sid = StorageId(i as u32);
            for &pid in &storage.get_waiters {
                stalled.push(Stall {
                    process:     pid,
                    name:        self.name_of(pid),
                    storage:     sid,
                    waiting_for: WaitKind::Input,
                });
            }
            for (pid, _) in &storage.put_waiters {
                stalled.push(Stall {
                    process:     *pid,
                    name:        self.name_of(*pid),
                    storage:     sid,
                    waiting_for: WaitKind::Space,
                });
            }
        }
        stalled
    }

    fn name_of(&self, id: ProcessId) -> String {
        self.processes
            .get(id.index())
            .map(|s| s.process.name().to_owned())
            .unwrap_or_default()
    }

    // ── Post-run queries ──────────────────────────────────────────────────

    /// Current simulated time.  Monotonically non-decreasing; advanced only
    /// by event processing, never reset during a run.
    #[inline]
    pub fn now(&self) -> Hours {
        self.now
    }

    pub fn storage(&self, id: StorageId) -> Option<&Storage<T>> {
        self.storages.get(id.index())
    }

    pub fn process_state(&self, id: ProcessId) -> Option<ProcessState> {
        self.processes.get(id.index()).map(|s| s.state)
    }

    pub fn process_name(&self, id: ProcessId) -> Option<&str> {
        self.processes.get(id.index()).map(|s| s.process.name())
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// Every process that has not reached `Completed`, in registration order.
    pub fn incomplete(&self) -> Vec<ProcessId> {
        self.processes
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.state.is_completed())
            .map(|(i, _)| ProcessId(i as u32))
            .collect()
    }

    /// Number of events still pending.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }
}
