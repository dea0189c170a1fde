//! Validated installation-phase configuration.
//!
//! Every recognized option is a named field, defaults live in the `Default`
//! impls next to the fields they describe, and
//! [`InstallationConfig::validate`] rejects anything the engine could not
//! run to completion.  Validation failures are fatal and never clamped.

use crate::error::{ConfigError, ConfigResult};
use crate::time::Hours;

// ── StageConfig ───────────────────────────────────────────────────────────────

/// One port-side production stage: N parallel lines pacing at a fixed takt.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageConfig {
    /// Number of independent, logically-parallel assembly lines.
    pub lines: u32,
    /// Fixed time one line needs to finish one unit.  Zero is permitted
    /// (instantaneous production); the engine still yields once per unit.
    pub takt_time: Hours,
}

impl StageConfig {
    pub fn new(lines: u32, takt_time: Hours) -> Self {
        Self { lines, takt_time }
    }

    fn validate(&self, stage: &'static str, units: u32) -> ConfigResult<()> {
        if self.lines == 0 && units > 0 {
            return Err(ConfigError::NoLines { stage, units });
        }
        if !self.takt_time.is_valid_duration() {
            return Err(ConfigError::InvalidTakt { stage, takt: self.takt_time.get() });
        }
        Ok(())
    }
}

// ── StorageConfig ─────────────────────────────────────────────────────────────

/// A bounded intermediate buffer at the port.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StorageConfig {
    /// Maximum number of finished units the buffer can hold.  Must be ≥ 1.
    pub capacity: usize,
}

impl Default for StorageConfig {
    /// Two berths.
    fn default() -> Self {
        Self { capacity: 2 }
    }
}

impl StorageConfig {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    fn validate(&self, name: &'static str) -> ConfigResult<()> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity { name });
        }
        Ok(())
    }
}

// ── TowingConfig ──────────────────────────────────────────────────────────────

/// Tow-out and installation groups that drain assembly storage.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TowingConfig {
    /// Number of independent tow/installation vessel groups.
    pub groups: u32,
    /// Towing speed (km/h) for the loaded and return legs.
    pub tow_speed_kmh: f64,
    /// Port-to-site distance (km).
    pub site_distance_km: f64,
    /// On-site positioning, hook-up, and commissioning time per unit.
    pub positioning_time: Hours,
}

impl Default for TowingConfig {
    fn default() -> Self {
        Self {
            groups: 1,
            tow_speed_kmh: 6.0,
            site_distance_km: 50.0,
            positioning_time: Hours(12.0),
        }
    }
}

impl TowingConfig {
    /// Loaded leg: tow to site, then position and hook up.
    pub fn outbound_time(&self) -> Hours {
        Hours(self.site_distance_km / self.tow_speed_kmh) + self.positioning_time
    }

    /// Empty return leg to port.
    pub fn return_time(&self) -> Hours {
        Hours(self.site_distance_km / self.tow_speed_kmh)
    }

    /// Full round trip for one unit: tow out, position and hook up, tow back.
    pub fn trip_time(&self) -> Hours {
        self.outbound_time() + self.return_time()
    }

    fn validate(&self, units: u32) -> ConfigResult<()> {
        if self.groups == 0 && units > 0 {
            return Err(ConfigError::NoTowGroups { units });
        }
        if !(self.tow_speed_kmh.is_finite() && self.tow_speed_kmh > 0.0) {
            return Err(ConfigError::InvalidTowSpeed { speed: self.tow_speed_kmh });
        }
        if !(self.site_distance_km.is_finite() && self.site_distance_km >= 0.0) {
            return Err(ConfigError::InvalidDistance { distance: self.site_distance_km });
        }
        if !self.positioning_time.is_valid_duration() {
            return Err(ConfigError::InvalidTakt {
                stage: "towing positioning",
                takt:  self.positioning_time.get(),
            });
        }
        Ok(())
    }
}

// ── InstallationConfig ────────────────────────────────────────────────────────

/// Top-level configuration of the quayside installation phase.
///
/// Per-stage line counts and takt times, the two bounded storage buffers
/// (default capacity 2), the plant size, and the towing collaborators.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstallationConfig {
    /// Total number of turbines to assemble and install.
    pub num_turbines: u32,
    /// Substructure production stage.
    pub substructure: StageConfig,
    /// Turbine assembly stage (consumes finished substructures).
    pub turbine: StageConfig,
    /// Wet storage between substructure production and turbine assembly.
    pub wet_storage: StorageConfig,
    /// Assembly storage between turbine assembly and tow-out.
    pub assembly_storage: StorageConfig,
    /// Tow-out / installation vessel groups.
    pub towing: TowingConfig,
    /// Optional ceiling on simulated time.  A run that hits it reports a
    /// partial result rather than an error.
    pub horizon: Option<Hours>,
}

impl InstallationConfig {
    /// Reject any combination the engine could not run to completion.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_turbines == 0 {
            return Err(ConfigError::NoUnits);
        }
        self.substructure.validate("substructure", self.num_turbines)?;
        self.turbine.validate("turbine", self.num_turbines)?;
        self.wet_storage.validate("wet_storage")?;
        self.assembly_storage.validate("assembly_storage")?;
        self.towing.validate(self.num_turbines)?;
        if let Some(h) = self.horizon {
            if !(h.get().is_finite() && h.get() > 0.0) {
                return Err(ConfigError::InvalidHorizon { horizon: h.get() });
            }
        }
        Ok(())
    }
}
