//! Engine observer trait for progress reporting and data collection.

use qs_core::{Hours, ProcessId, StorageId};

/// Callbacks invoked by [`Engine::run_observed`][crate::Engine::run_observed]
/// at key points in the event loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — deposit printer
///
/// ```rust,ignore
/// struct DepositPrinter;
///
/// impl EngineObserver for DepositPrinter {
///     fn on_deposit(&mut self, storage: StorageId, now: Hours) {
///         println!("{now}: unit deposited into {storage}");
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called when an event is popped, after the clock has advanced to it.
    fn on_event(&mut self, _now: Hours, _target: ProcessId) {}

    /// Called on every successful put (whether immediate or after a wait).
    fn on_deposit(&mut self, _storage: StorageId, _now: Hours) {}

    /// Called on every successful get.
    fn on_withdraw(&mut self, _storage: StorageId, _now: Hours) {}

    /// Called when a process transitions to `Completed`.
    fn on_process_completed(&mut self, _process: ProcessId, _now: Hours) {}

    /// Called once when the run stops, for any outcome.
    fn on_run_end(&mut self, _now: Hours) {}
}

/// An [`EngineObserver`] that does nothing.  Use when you need to run the
/// engine but don't want progress callbacks.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
