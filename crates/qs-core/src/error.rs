//! Configuration error type.
//!
//! Every rejection here is fatal to a run and surfaced at setup time — a
//! value that would later deadlock or stall the engine is a configuration
//! error, never a runtime condition to clamp or paper over.

use thiserror::Error;

/// Rejections produced while validating an installation configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Capacity 0 would make every `put` block with no `get` able to free it.
    #[error("{name}: storage capacity must be at least 1")]
    ZeroCapacity { name: &'static str },

    #[error("{stage}: {units} units configured but no assembly lines to produce them")]
    NoLines { stage: &'static str, units: u32 },

    #[error("{stage}: takt time must be finite and non-negative (got {takt})")]
    InvalidTakt { stage: &'static str, takt: f64 },

    #[error("plant: num_turbines must be positive")]
    NoUnits,

    #[error("towing: {units} units configured but no tow groups to install them")]
    NoTowGroups { units: u32 },

    #[error("towing: tow speed must be positive (got {speed} km/h)")]
    InvalidTowSpeed { speed: f64 },

    #[error("site: distance must be finite and non-negative (got {distance} km)")]
    InvalidDistance { distance: f64 },

    #[error("horizon must be finite and positive (got {horizon})")]
    InvalidHorizon { horizon: f64 },
}

/// Shorthand result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;
