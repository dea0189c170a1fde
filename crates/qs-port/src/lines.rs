//! Assembly-line processes.
//!
//! Both line kinds follow the same per-unit cycle from the installation
//! model: secure one unit of input, occupy the line for exactly one takt
//! period (no early completion, no skipping), then deposit the finished unit
//! downstream — blocking whenever the sink is full.  A line assigned zero
//! units completes immediately on start without touching any storage.

use qs_core::{Hours, SizingRecord, StorageId};
use qs_engine::{Action, Process, Wake};

use crate::item::PortItem;

// ── SubstructureAssemblyLine ──────────────────────────────────────────────────

/// Produces substructures into wet storage.
///
/// Raw input (steel, anchors, mooring gear) is modelled as unlimited: the
/// line is gated only by its takt time and by space in wet storage.
pub struct SubstructureAssemblyLine {
    name:      String,
    takt:      Hours,
    output:    StorageId,
    sizing:    SizingRecord,
    remaining: u32,
}

impl SubstructureAssemblyLine {
    pub fn new(
        name: impl Into<String>,
        takt: Hours,
        output: StorageId,
        sizing: SizingRecord,
        units: u32,
    ) -> Self {
        Self {
            name: name.into(),
            takt,
            output,
            sizing,
            remaining: units,
        }
    }

    /// Units this line has still to produce.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Process<PortItem> for SubstructureAssemblyLine {
    fn name(&self) -> &str {
        &self.name
    }

    fn resume(&mut self, wake: Wake<PortItem>, _now: Hours) -> Action<PortItem> {
        match wake {
            // Deposit confirmed: one unit done, move to the next.
            Wake::Start | Wake::SpaceGranted => {
                if matches!(wake, Wake::SpaceGranted) {
                    self.remaining -= 1;
                }
                if self.remaining == 0 {
                    Action::Complete
                } else {
                    Action::Delay(self.takt)
                }
            }
            // Takt period over: hand the finished substructure downstream.
            Wake::DelayElapsed => Action::Put(self.output, PortItem::Substructure(self.sizing)),
            Wake::ItemGranted(_) => {
                unreachable!("substructure line never issues Get")
            }
        }
    }
}

// ── TurbineAssemblyLine ───────────────────────────────────────────────────────

/// Assembles a turbine onto a substructure pulled from wet storage.
///
/// Per unit: blocking `get` from wet storage, one takt period on the
/// assembly crane, then a (possibly blocking) deposit into assembly storage.
pub struct TurbineAssemblyLine {
    name:      String,
    takt:      Hours,
    input:     StorageId,
    output:    StorageId,
    remaining: u32,
    /// The substructure currently on the crane, between `get` and `put`.
    in_progress: Option<SizingRecord>,
}

impl TurbineAssemblyLine {
    pub fn new(
        name: impl Into<String>,
        takt: Hours,
        input: StorageId,
        output: StorageId,
        units: u32,
    ) -> Self {
        Self {
            name: name.into(),
            takt,
            input,
            output,
            remaining: units,
            in_progress: None,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Process<PortItem> for TurbineAssemblyLine {
    fn name(&self) -> &str {
        &self.name
    }

    fn resume(&mut self, wake: Wake<PortItem>, _now: Hours) -> Action<PortItem> {
        match wake {
            Wake::Start | Wake::SpaceGranted => {
                if matches!(wake, Wake::SpaceGranted) {
                    self.remaining -= 1;
                }
                if self.remaining == 0 {
                    Action::Complete
                } else {
                    Action::Get(self.input)
                }
            }
            // Substructure secured: occupy the crane for one takt period.
            Wake::ItemGranted(item) => {
                self.in_progress = Some(item.sizing());
                Action::Delay(self.takt)
            }
            // Assembly finished: deposit into assembly storage.
            Wake::DelayElapsed => {
                let sizing = self.in_progress.take().unwrap_or_else(SizingRecord::placeholder);
                Action::Put(self.output, PortItem::AssembledTurbine(sizing))
            }
        }
    }
}
