//! `qs-core` — foundational types for the quayside offshore-wind simulator.
//!
//! This crate is a dependency of every other `qs-*` crate.  It intentionally
//! has no `qs-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                            |
//! |-------------|-----------------------------------------------------|
//! | [`ids`]     | `ProcessId`, `StorageId`                            |
//! | [`time`]    | `Hours` — simulated time in fractional hours        |
//! | [`config`]  | `InstallationConfig` and per-stage config structs   |
//! | [`sizing`]  | `SizingRecord` — substructure sizing hand-off       |
//! | [`error`]   | `ConfigError`, `ConfigResult`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod config;
pub mod error;
pub mod ids;
pub mod sizing;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{InstallationConfig, StageConfig, StorageConfig, TowingConfig};
pub use error::{ConfigError, ConfigResult};
pub use ids::{ProcessId, StorageId};
pub use sizing::SizingRecord;
pub use time::Hours;
