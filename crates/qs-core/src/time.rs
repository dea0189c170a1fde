//! Simulated time model.
//!
//! # Design
//!
//! Time is a quantity of simulated hours stored as `f64`.  Takt times in the
//! source data are fractional-hour durations, so an integer tick would force
//! a resolution choice onto every caller; `f64` keeps the arithmetic exact
//! for the short sums a run performs and matches the units of every input.
//!
//! Determinism does not suffer: the engine is single-threaded and orders
//! same-time events by a sequence counter, never by float identity.  Where a
//! total order over times is needed (the event queue), use
//! [`Hours::total_cmp`], which is IEEE-754 `totalOrder` and never panics.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A duration or instant in simulated hours.
///
/// `Hours` is both a point on the simulation timeline (measured from the
/// start of the run) and a span between two points; the engine never needs
/// to distinguish the two.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hours(pub f64);

impl Hours {
    pub const ZERO: Hours = Hours(0.0);

    /// Build from a number of simulated days (24 h each).
    #[inline]
    pub fn from_days(days: f64) -> Hours {
        Hours(days * 24.0)
    }

    /// The raw hour count.
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Total order over all `f64` values, including NaN and signed zero.
    /// This is what the event queue sorts by.
    #[inline]
    pub fn total_cmp(&self, other: &Hours) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    /// `true` for finite, non-negative values — the only durations a
    /// validated configuration can produce.
    #[inline]
    pub fn is_valid_duration(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }

    /// The larger of two times (by total order).
    #[inline]
    pub fn max(self, other: Hours) -> Hours {
        if self.total_cmp(&other) == Ordering::Less { other } else { self }
    }
}

impl Add for Hours {
    type Output = Hours;
    #[inline]
    fn add(self, rhs: Hours) -> Hours {
        Hours(self.0 + rhs.0)
    }
}

impl AddAssign for Hours {
    #[inline]
    fn add_assign(&mut self, rhs: Hours) {
        self.0 += rhs.0;
    }
}

impl Sub for Hours {
    type Output = Hours;
    #[inline]
    fn sub(self, rhs: Hours) -> Hours {
        Hours(self.0 - rhs.0)
    }
}

impl Mul<f64> for Hours {
    type Output = Hours;
    #[inline]
    fn mul(self, rhs: f64) -> Hours {
        Hours(self.0 * rhs)
    }
}

impl From<f64> for Hours {
    #[inline]
    fn from(h: f64) -> Hours {
        Hours(h)
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} h", self.0)
    }
}
