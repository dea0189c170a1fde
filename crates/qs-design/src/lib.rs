//! `qs-design` — structural sizing for moored/monopile substructures.
//!
//! | Module     | Contents                                             |
//! |------------|------------------------------------------------------|
//! | `params`   | Tunable design parameters with methodology defaults  |
//! | `monopile` | Monopile + transition-piece sizing and cost rollups  |
//! | `error`    | `DesignError` and the crate `Result` alias           |
//!
//! The output of a design run is a [`SizingRecord`](qs_core::SizingRecord)
//! that the installation phase carries with each produced unit.

pub mod error;
pub mod monopile;
pub mod params;


pub use error::{DesignError, DesignResult};
pub use monopile::{
    DesignOutput, MaterialCost, MonopileDesign, MonopileSizing, SiteSpec, TransitionPieceSizing,
    TurbineSpec,
};
pub use params::DesignParams;
