//! Tow-out and installation groups.
//!
//! A tow group drains assembly storage: per unit it secures an assembled
//! turbine, tows it to site and hooks it up (the outbound leg), then sails
//! back empty for the next one.  Weather-driven downtime is outside this
//! model; leg durations are opaque, pre-computed durations supplied by
//! configuration.
//!
//! Installation timestamps are the phase's final output, but a finished unit
//! leaves the simulation here rather than landing in another buffer — so the
//! groups share an [`InstallLog`] that records each hook-up as it happens.
//! The log is plain shared state: the scheduler is cooperative and
//! single-threaded, so no locking is involved.

use std::cell::RefCell;
use std::rc::Rc;

use qs_core::{Hours, StorageId};
use qs_engine::{Action, Process, Wake};

use crate::item::PortItem;

// ── InstallLog ────────────────────────────────────────────────────────────────

/// Shared, append-only record of installation completion times.
#[derive(Clone, Default)]
pub struct InstallLog {
    inner: Rc<RefCell<Vec<Hours>>>,
}

impl InstallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, t: Hours) {
        self.inner.borrow_mut().push(t);
    }

    /// Completion times recorded so far, in event order.
    pub fn times(&self) -> Vec<Hours> {
        self.inner.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

// ── TowInstallGroup ───────────────────────────────────────────────────────────

/// Which leg of a trip the group's current delay represents.
enum Leg {
    /// Towing a unit to site, positioning, and hooking up.
    Outbound,
    /// Sailing back to port empty.
    Returning,
}

/// One tow/installation vessel group working a fixed quota of units.
pub struct TowInstallGroup {
    name:      String,
    input:     StorageId,
    /// Tow to site + position + hook up.
    outbound:  Hours,
    /// Empty return to port.
    inbound:   Hours,
    remaining: u32,
    leg:       Leg,
    log:       InstallLog,
}

impl TowInstallGroup {
    pub fn new(
        name: impl Into<String>,
        input: StorageId,
        outbound: Hours,
        inbound: Hours,
        units: u32,
        log: InstallLog,
    ) -> Self {
        Self {
            name: name.into(),
            input,
            outbound,
            inbound,
            remaining: units,
            leg: Leg::Outbound,
            log,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Process<PortItem> for TowInstallGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn resume(&mut self, wake: Wake<PortItem>, now: Hours) -> Action<PortItem> {
        match wake {
            Wake::Start => {
                if self.remaining == 0 {
                    Action::Complete
                } else {
                    Action::Get(self.input)
                }
            }
            // Assembled turbine secured: tow out and install.
            Wake::ItemGranted(_) => {
                self.leg = Leg::Outbound;
                Action::Delay(self.outbound)
            }
            Wake::DelayElapsed => match self.leg {
                Leg::Outbound => {
                    // Hooked up on site: the unit is installed.
                    self.log.push(now);
                    self.remaining -= 1;
                    if self.remaining == 0 {
                        Action::Complete
                    } else {
                        self.leg = Leg::Returning;
                        Action::Delay(self.inbound)
                    }
                }
                Leg::Returning => Action::Get(self.input),
            },
            Wake::SpaceGranted => unreachable!("tow group never issues Put"),
        }
    }
}
