//! The item type flowing through the port's storage buffers.

use qs_core::SizingRecord;

/// One unit of work in a port buffer.
///
/// The scheduler treats items as opaque cargo; the sizing record rides along
/// for downstream cost and deck-space rollups.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PortItem {
    /// A finished substructure floating in wet storage.
    Substructure(SizingRecord),
    /// A turbine fully assembled onto its substructure, awaiting tow-out.
    AssembledTurbine(SizingRecord),
}

impl PortItem {
    /// The substructure sizing carried by this item, whichever stage it is in.
    pub fn sizing(&self) -> SizingRecord {
        match *self {
            PortItem::Substructure(s) => s,
            PortItem::AssembledTurbine(s) => s,
        }
    }

    pub fn is_assembled(&self) -> bool {
        matches!(self, PortItem::AssembledTurbine(_))
    }
}
