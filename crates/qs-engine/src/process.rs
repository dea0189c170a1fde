//! The process abstraction — an explicit, re-entrant state machine.
//!
//! Instead of coroutine or generator semantics, a process is an explicit
//! request/response protocol: the engine resumes it with the [`Wake`] it
//! earned, and the process answers with the next [`Action`] it wants to
//! suspend on.
//! Everything between two suspension points runs atomically with respect to
//! the clock and the shared storage resources.
//!
//! A process is only ever resumed through an event it caused — a delay it
//! requested or a storage wait it was granted.  The engine never pokes an
//! idle process on its own initiative.

use qs_core::{Hours, StorageId};

// ── Wake ──────────────────────────────────────────────────────────────────────

/// Why a process is being resumed.
///
/// Each variant answers exactly one prior [`Action`] (or `start()` for
/// [`Wake::Start`]); the engine never delivers a wake the process didn't
/// request.
#[derive(Debug)]
pub enum Wake<T> {
    /// First resumption after `Engine::start`.
    Start,
    /// The requested [`Action::Delay`] has elapsed.
    DelayElapsed,
    /// The requested [`Action::Get`] was granted; here is the item.
    ItemGranted(T),
    /// The requested [`Action::Put`] was granted; the item is in storage.
    SpaceGranted,
}

// ── Action ────────────────────────────────────────────────────────────────────

/// The next suspension point a process wants to reach.
#[derive(Debug)]
pub enum Action<T> {
    /// Suspend for a fixed simulated duration.
    ///
    /// `Delay(Hours::ZERO)` is legal and still costs one scheduling tick:
    /// the process is re-queued behind everything already scheduled at the
    /// current instant, so a zero-takt line cannot starve its siblings.
    Delay(Hours),
    /// Remove the oldest item from a storage; blocks while it is empty.
    Get(StorageId),
    /// Append an item to a storage; blocks while it is full.
    Put(StorageId, T),
    /// Terminal: the process has exhausted its work.
    Complete,
}

// ── ProcessState ──────────────────────────────────────────────────────────────

/// Engine-tracked lifecycle state of a registered process.
///
/// Transitions happen only through engine-mediated resumption:
///
/// ```text
/// Idle ──start()──▶ Running ──Delay──▶ WaitingForDelay ──elapsed──▶ Running
///                      │  ──Get (empty)──▶ WaitingForInput ──item──▶ Running
///                      │  ──Put (full)───▶ WaitingForSpace ──space─▶ Running
///                      └──Complete──▶ Completed (terminal)
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ProcessState {
    /// Registered but not yet started.
    Idle,
    /// Currently being driven, or scheduled to resume.
    Running,
    /// Parked on a timed delay.
    WaitingForDelay,
    /// Parked in a storage's get-waiter queue (storage empty).
    WaitingForInput,
    /// Parked in a storage's put-waiter queue (storage full).
    WaitingForSpace,
    /// Terminal.
    Completed,
}

impl ProcessState {
    /// `true` once the process has finished all of its work.
    #[inline]
    pub fn is_completed(self) -> bool {
        self == ProcessState::Completed
    }
}

// ── Process ───────────────────────────────────────────────────────────────────

/// An independent schedulable actor driven by the engine.
///
/// Implementors keep their own internal step state; `resume` is called once
/// per earned wake and must return the next suspension request without
/// blocking or sleeping for real.
pub trait Process<T> {
    /// Human-readable name used in stall and progress reporting.
    fn name(&self) -> &str;

    /// Resume from `wake` at simulated time `now` and run to the next
    /// suspension point.
    fn resume(&mut self, wake: Wake<T>, now: Hours) -> Action<T>;
}
