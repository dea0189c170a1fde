//! Structural design parameters and their defaults.

/// Tunable parameters of the monopile and transition-piece sizing model.
///
/// Every field defaults to the standard value from the underlying design
/// methodology (Arany & Bhattacharya, DNV-GL load cases); override only what
/// a specific site study calls for.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DesignParams {
    /// Steel yield stress (Pa).
    pub yield_stress: f64,
    /// Material safety factor on yield.
    pub material_factor: f64,
    /// Load safety factor on the extreme wind moment.
    pub load_factor: f64,
    /// Monopile steel density (kg/m³).
    pub monopile_density: f64,
    /// Monopile Young's modulus (Pa).
    pub monopile_modulus: f64,
    /// Pile-to-TP connection wall thickness (m); zero for a bolted
    /// connection.
    pub tp_connection_thickness: f64,
    /// Transition piece steel density (kg/m³).
    pub tp_density: f64,
    /// Transition piece wall thickness (m).  `None` means "same as the pile
    /// wall".
    pub tp_thickness: Option<f64>,
    /// Transition piece length (m).
    pub tp_length: f64,
    /// Coefficient of subgrade reaction (N/m³).
    pub soil_coefficient: f64,
    /// Air density (kg/m³).
    pub air_density: f64,
    /// Weibull shape factor of the site wind distribution.
    pub weibull_shape: f64,
    /// Weibull scale factor (m/s).  `None` means "use the site mean wind
    /// speed".
    pub weibull_scale: Option<f64>,
    /// Turbulence integral length scale (m).
    pub turb_length_scale: f64,
    /// Hub airgap above mean sea level built into the pile length (m).
    pub airgap: f64,
    /// Engineering time for the design phase (h).
    pub design_time: f64,
    /// Engineering cost for the design phase (USD).
    pub design_cost: f64,
    /// Fabricated monopile steel cost (USD/t).
    pub monopile_steel_cost: f64,
    /// Fabricated transition piece steel cost (USD/t).
    pub tp_steel_cost: f64,
}

impl Default for DesignParams {
    fn default() -> Self {
        Self {
            yield_stress:            355e6,
            material_factor:         1.1,
            load_factor:             1.35,
            monopile_density:        7860.0,
            monopile_modulus:        200e9,
            tp_connection_thickness: 0.0,
            tp_density:              7860.0,
            tp_thickness:            None,
            tp_length:               25.0,
            soil_coefficient:        4e6,
            air_density:             1.225,
            weibull_shape:           2.0,
            weibull_scale:           None,
            turb_length_scale:       340.2,
            airgap:                  10.0,
            design_time:             0.0,
            design_cost:             0.0,
            monopile_steel_cost:     3000.0,
            tp_steel_cost:           4500.0,
        }
    }
}
