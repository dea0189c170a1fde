//! `qs-port` — the quayside installation phase.
//!
//! Models port-side assembly and installation of moored offshore-wind
//! turbines on top of the `qs-engine` scheduler:
//!
//! ```text
//! N substructure lines ──▶ wet storage ──▶ M turbine lines
//!                      ──▶ assembly storage ──▶ G tow/install groups ──▶ site
//! ```
//!
//! Each stage paces production at a fixed takt time and hands finished units
//! through a bounded storage buffer; parallel lines contend for the same
//! buffer and are arbitrated by its FIFO waiter queues.
//!
//! [`InstallationPhase`] is the orchestrator: it validates the configuration,
//! sizes the buffers, registers and starts every process in a fixed order
//! (part of the deterministic contract), runs the engine, and distils the
//! result into an [`InstallationReport`].

pub mod error;
pub mod item;
pub mod lines;
pub mod phase;
pub mod report;
pub mod towing;


pub use error::{PortError, PortResult};
pub use item::PortItem;
pub use lines::{SubstructureAssemblyLine, TurbineAssemblyLine};
pub use phase::{InstallationPhase, InstallationReport};
pub use report::ReportWriter;
pub use towing::{InstallLog, TowInstallGroup};
