//! Monopile and transition-piece sizing.
//!
//! Implements the ten-step monopile design methodology of Arany &
//! Bhattacharya (Soil Dynamics and Earthquake Engineering 92, 2017) for the
//! governing 50-year extreme-gust load case: extreme wind statistics from
//! the site Weibull distribution, thrust at rated wind speed per Frohboese &
//! Schmuck (2010), then the pile diameter that satisfies the combined yield
//! criterion (eqs. 99 & 101), solved by bracketed bisection.  Wall
//! thickness, embedment length, and the transition piece follow in closed
//! form.

use qs_core::{Hours, SizingRecord};

use crate::error::{DesignError, DesignResult};
use crate::params::DesignParams;

use std::f64::consts::PI;

/// Short tons per kilogram divisor used by the source methodology's mass
/// outputs.
const KG_PER_TONNE: f64 = 907.185;

/// Number of 10-minute reference periods in one year (eq. 27).
const TEN_MIN_PERIODS_PER_YEAR: f64 = 52596.0;

// ── input specs ───────────────────────────────────────────────────────────────

/// Site environment for the structural design.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SiteSpec {
    /// Water depth (m).
    pub depth: f64,
    /// Mean wind speed at hub height (m/s).
    pub mean_windspeed: f64,
}

impl SiteSpec {
    fn validate(&self) -> DesignResult<()> {
        if !(self.depth.is_finite() && self.depth > 0.0) {
            return Err(DesignError::InvalidSite { name: "depth", value: self.depth });
        }
        if !(self.mean_windspeed.is_finite() && self.mean_windspeed > 0.0) {
            return Err(DesignError::InvalidSite {
                name:  "mean_windspeed",
                value: self.mean_windspeed,
            });
        }
        Ok(())
    }
}

/// The turbine the substructure must carry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TurbineSpec {
    /// Rotor diameter (m).
    pub rotor_diameter: f64,
    /// Hub height above mean sea level (m).
    pub hub_height: f64,
    /// Rated wind speed (m/s).
    pub rated_windspeed: f64,
}

impl TurbineSpec {
    fn validate(&self) -> DesignResult<()> {
        for (name, value) in [
            ("rotor_diameter", self.rotor_diameter),
            ("hub_height", self.hub_height),
            ("rated_windspeed", self.rated_windspeed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(DesignError::InvalidTurbine { name, value });
            }
        }
        Ok(())
    }
}

// ── outputs ───────────────────────────────────────────────────────────────────

/// Sizing of the designed monopile.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MonopileSizing {
    /// Pile diameter (m).
    pub diameter: f64,
    /// Wall thickness (m).
    pub thickness: f64,
    /// Bending moment of inertia (m⁴).
    pub moment: f64,
    /// Embedment length below mudline (m).
    pub embedment_length: f64,
    /// Total length: embedment + water depth + airgap (m).
    pub length: f64,
    /// Fabricated mass (t).
    pub mass: f64,
    /// Vessel deck space required (m²).
    pub deck_space: f64,
}

/// Sizing of the transition piece (Arany 2016, sections 2.2.7 - 2.2.8).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransitionPieceSizing {
    /// Outer diameter (m).
    pub diameter: f64,
    /// Wall thickness (m).
    pub thickness: f64,
    /// Length (m).
    pub length: f64,
    /// Fabricated mass (t).
    pub mass: f64,
    /// Vessel deck space required (m²).
    pub deck_space: f64,
}

/// Per-plant material cost split (USD).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaterialCost {
    pub monopile:         f64,
    pub transition_piece: f64,
}

impl MaterialCost {
    pub fn total(&self) -> f64 {
        self.monopile + self.transition_piece
    }
}

/// Complete result of one design run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DesignOutput {
    pub monopile:         MonopileSizing,
    pub transition_piece: TransitionPieceSizing,
    params:               DesignParams,
}

impl DesignOutput {
    /// The hand-off record the installation phase carries with each unit.
    pub fn sizing_record(&self) -> SizingRecord {
        SizingRecord {
            diameter:   self.monopile.diameter,
            thickness:  self.monopile.thickness,
            weight:     self.monopile.mass,
            length:     self.monopile.length,
            deck_space: self.monopile.deck_space,
        }
    }

    /// Fabricated steel cost for a plant of `num_turbines` units.
    pub fn material_cost(&self, num_turbines: u32) -> MaterialCost {
        let n = f64::from(num_turbines);
        MaterialCost {
            monopile:         n * self.monopile.mass * self.params.monopile_steel_cost,
            transition_piece: n * self.transition_piece.mass * self.params.tp_steel_cost,
        }
    }

    /// Engineering plus material cost for the whole plant (USD).
    pub fn total_cost(&self, num_turbines: u32) -> f64 {
        self.params.design_cost + self.material_cost(num_turbines).total()
    }

    /// Engineering time spent on the design.
    pub fn design_time(&self) -> Hours {
        Hours(self.params.design_time)
    }
}

// ── MonopileDesign ────────────────────────────────────────────────────────────

/// Sizes a monopile substructure for one site/turbine combination.
pub struct MonopileDesign {
    site:    SiteSpec,
    turbine: TurbineSpec,
    params:  DesignParams,
}

impl MonopileDesign {
    pub fn new(site: SiteSpec, turbine: TurbineSpec, params: DesignParams) -> Self {
        Self { site, turbine, params }
    }

    /// Run the full sizing chain.
    pub fn design(&self) -> DesignResult<DesignOutput> {
        self.site.validate()?;
        self.turbine.validate()?;

        let m_50y = self.extreme_wind_moment();
        let diameter = solve_pile_diameter(
            self.params.yield_stress,
            self.params.material_factor,
            m_50y,
        )?;
        let thickness = pile_thickness(diameter);
        let moment = pile_moment(diameter, thickness);
        let embedment_length = 4.0
            * ((self.params.monopile_modulus * moment) / self.params.soil_coefficient).powf(0.2);
        let length = embedment_length + self.site.depth + self.params.airgap;
        let volume = (PI / 4.0) * (diameter.powi(2) - (diameter - thickness).powi(2)) * length;
        let mass = self.params.monopile_density * volume / KG_PER_TONNE;

        let monopile = MonopileSizing {
            diameter,
            thickness,
            moment,
            embedment_length,
            length,
            mass,
            deck_space: diameter.powi(2),
        };

        Ok(DesignOutput {
            monopile,
            transition_piece: self.design_transition_piece(&monopile),
            params: self.params,
        })
    }

    /// Transition piece sized off the finished pile (Arany 2016, eqs. in
    /// sections 2.2.7 - 2.2.8).
    fn design_transition_piece(&self, pile: &MonopileSizing) -> TransitionPieceSizing {
        let t_c = self.params.tp_connection_thickness;
        let t_tp = self.params.tp_thickness.unwrap_or(pile.thickness);
        let l_tp = self.params.tp_length;
        let d_tp = pile.diameter + 2.0 * (t_c + t_tp);
        let mass =
            self.params.tp_density * (pile.diameter + 2.0 * t_c + t_tp) * PI * t_tp * l_tp
                / KG_PER_TONNE;

        TransitionPieceSizing {
            diameter: d_tp,
            thickness: t_tp,
            length: l_tp,
            mass,
            deck_space: d_tp.powi(2),
        }
    }

    /// 50-year extreme wind moment at the mudline, load factor applied
    /// (eq. 30).
    fn extreme_wind_moment(&self) -> f64 {
        let arm = self.site.depth + self.turbine.hub_height;
        self.extreme_wind_load() * arm * self.params.load_factor
    }

    /// 50-year extreme wind load: thrust at rated speed plus the extreme
    /// operating gust (eq. 29).
    fn extreme_wind_load(&self) -> f64 {
        let swept_area = PI * (self.turbine.rotor_diameter / 2.0).powi(2);
        let ct = thrust_coefficient(self.turbine.rated_windspeed);
        let u_eog = self.extreme_gust();
        0.5 * self.params.air_density
            * swept_area
            * ct
            * (self.turbine.rated_windspeed + u_eog).powi(2)
    }

    /// 50-year extreme operating gust speed (eq. 28).
    fn extreme_gust(&self) -> f64 {
        let u_50y = self.extreme_windspeed();
        let u_1y = 0.8 * u_50y;
        let sigma = 0.11 * u_1y;
        let gust = 3.3 * sigma
            / (1.0 + 0.1 * self.turbine.rotor_diameter / (self.params.turb_length_scale / 8.0));
        (1.35 * (u_1y - self.turbine.rated_windspeed)).min(gust)
    }

    /// 50-year extreme 10-minute wind speed from the site Weibull
    /// distribution (eq. 27).
    fn extreme_windspeed(&self) -> f64 {
        let scale = self.params.weibull_scale.unwrap_or(self.site.mean_windspeed);
        let exceedance = 1.0 - 0.98f64.powf(1.0 / TEN_MIN_PERIODS_PER_YEAR);
        scale * (-exceedance.ln()).powf(1.0 / self.params.weibull_shape)
    }
}

// ── pile equations ────────────────────────────────────────────────────────────

/// Thrust coefficient at rated wind speed, capped at 1
/// (Frohboese & Schmuck 2010).
pub(crate) fn thrust_coefficient(rated_windspeed: f64) -> f64 {
    (3.5 * (2.0 * rated_windspeed + 3.5) / rated_windspeed.powi(2)).min(1.0)
}

/// Wall thickness from diameter (eq. 1).
fn pile_thickness(diameter: f64) -> f64 {
    0.00635 + diameter / 100.0
}

/// Bending moment of inertia of the pile cross-section.
fn pile_moment(diameter: f64, thickness: f64) -> f64 {
    0.125 * (diameter - thickness).powi(3) * thickness * PI
}

/// Combined yield criterion whose root is the required pile diameter
/// (eqs. 99 & 101).  Strictly negative below the root, positive above it
/// within the physical range.
pub(crate) fn diameter_residual(d: f64, yield_stress: f64, material_factor: f64, m_50y: f64) -> f64 {
    let a = yield_stress * PI / (4.0 * material_factor * m_50y);
    a * (0.99 * d - 0.00635).powi(3) * (0.00635 + 0.01 * d) - d
}

/// Bisect [`diameter_residual`] over a fixed physical bracket.
///
/// The bracket spans every diameter the methodology can produce; a load case
/// whose root falls outside it is rejected rather than extrapolated.
pub(crate) fn solve_pile_diameter(
    yield_stress: f64,
    material_factor: f64,
    m_50y: f64,
) -> DesignResult<f64> {
    const LO: f64 = 0.01;
    const HI: f64 = 100.0;
    const TOL: f64 = 1e-10;

    let f = |d: f64| diameter_residual(d, yield_stress, material_factor, m_50y);

    let (mut lo, mut hi) = (LO, HI);
    let (f_lo, f_hi) = (f(lo), f(hi));
    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if f_lo.signum() == f_hi.signum() {
        return Err(DesignError::NoBracket { lo: LO, hi: HI });
    }

    while hi - lo > TOL {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        if f_mid == 0.0 {
            return Ok(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(0.5 * (lo + hi))
}
