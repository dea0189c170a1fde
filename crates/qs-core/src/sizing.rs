//! Substructure sizing hand-off record.

/// Physical sizing of one substructure, produced by the design phase and
/// carried (opaquely) through the installation simulation.
///
/// The scheduler never reads these fields; they ride along with each produced
/// unit so downstream cost and logistics rollups can use them.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizingRecord {
    /// Pile diameter (m).
    pub diameter: f64,
    /// Wall thickness (m).
    pub thickness: f64,
    /// Fabricated weight (t).
    pub weight: f64,
    /// Total length (m).
    pub length: f64,
    /// Vessel deck space required (m²).
    pub deck_space: f64,
}

impl SizingRecord {
    /// A placeholder record for simulations that don't carry real sizing
    /// data (tests, pacing-only studies).
    pub fn placeholder() -> Self {
        Self {
            diameter:   0.0,
            thickness:  0.0,
            weight:     0.0,
            length:     0.0,
            deck_space: 0.0,
        }
    }
}
