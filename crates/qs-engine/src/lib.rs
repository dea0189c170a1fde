//! `qs-engine` — the discrete-event core of the quayside simulator.
//!
//! A single-threaded, cooperative, virtual-time scheduler.  "Concurrency" is
//! purely the interleaving of process suspension points in simulated time;
//! no real parallelism exists and none is needed — mutual exclusion over the
//! shared storage resources holds by construction.
//!
//! # The event loop
//!
//! ```text
//! while let Some(event) = queue.pop():          // earliest (time, sequence)
//!   now = event.time                            // clock only moves here
//!   loop:                                       // drive one process…
//!     action = process.resume(event.wake, now)  // …to its next suspension
//!     Delay(d)      → schedule wake at now + d; park
//!     Get(storage)  → item ready? continue synchronously : park in FIFO
//!     Put(st, item) → space ready? continue synchronously : park in FIFO
//!     Complete      → terminal
//! ```
//!
//! A process suspends only at a timed delay, a *blocking* get, or a
//! *blocking* put.  Non-blocking storage operations continue within the same
//! event, so no other process ever observes a step half-done.
//!
//! # Determinism
//!
//! Events are ordered by `(time, sequence)` where `sequence` is assigned at
//! scheduling time.  Two runs with the same configuration and the same
//! registration order produce identical timestamps.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut engine = Engine::new();
//! let buffer = engine.add_storage(2)?;
//! let line = engine.register(Box::new(MyLine::new(buffer)));
//! engine.start(line)?;
//! match engine.run_until_idle(None)? {
//!     RunOutcome::Completed { elapsed } => println!("done at {elapsed}"),
//!     other => eprintln!("run did not complete: {other:?}"),
//! }
//! ```

pub mod engine;
pub mod error;
mod event;
pub mod observer;
pub mod process;
pub mod storage;

#[cfg(test)]
mod tests;

pub use engine::{Engine, RunOutcome, Stall, WaitKind};
pub use error::{EngineError, EngineResult};
pub use observer::{EngineObserver, NoopObserver};
pub use process::{Action, Process, ProcessState, Wake};
pub use storage::Storage;
