//! The per-circuit netlist and the connectivity queries answered from it.

use crate::arena::Arena;
use crate::component::{ClockSource, Direction, NetlistComponent};
use crate::ids::NetId;
use crate::net::{ConnectionPoint, Net};
use circa_common::correct_label;
use serde::{Deserialize, Serialize};

/// A contiguous, ascending bit range of one root bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusRange {
    /// The root bus.
    pub net: NetId,
    /// Lowest bit.
    pub lo: u32,
    /// Highest bit.
    pub hi: u32,
}

/// Connectivity of one circuit definition.
///
/// Nets are indexed by their stable upstream [`NetId`]. Components are
/// split into primitives (`components`) and sub-circuit instances
/// (`subcircuits`); pins are kept in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Netlist {
    /// All nets, single wires and buses.
    #[serde(default)]
    pub nets: Arena<NetId, Net>,
    /// Primitive components.
    #[serde(default)]
    pub components: Vec<NetlistComponent>,
    /// Sub-circuit instances.
    #[serde(default)]
    pub subcircuits: Vec<NetlistComponent>,
    /// Input pins, in declaration order.
    #[serde(default)]
    pub inputs: Vec<NetlistComponent>,
    /// Output pins, in declaration order.
    #[serde(default)]
    pub outputs: Vec<NetlistComponent>,
    /// Bidirectional pins, in declaration order.
    #[serde(default)]
    pub inouts: Vec<NetlistComponent>,
    /// Clock sources placed in this circuit.
    #[serde(default)]
    pub clock_sources: Vec<ClockSource>,
    /// Number of clock domains reaching this circuit.
    #[serde(default)]
    pub clock_trees: u32,
    /// The circuit needs the free-running board clock.
    #[serde(default)]
    pub requires_global_clock: bool,
    /// Number of input bubbles.
    #[serde(default)]
    pub input_bubbles: u32,
    /// Number of output bubbles.
    #[serde(default)]
    pub output_bubbles: u32,
    /// Number of bidirectional bubbles.
    #[serde(default)]
    pub inout_bubbles: u32,
}

impl Netlist {
    /// Creates an empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the net with the given ID.
    pub fn net(&self, id: NetId) -> Option<&Net> {
        self.nets.try_get(id)
    }

    /// Follows the parent chain of a bus view until a net with its own
    /// storage is reached, translating the bit index on the way.
    ///
    /// Single-bit nets and root buses resolve to themselves. Returns `None`
    /// for dangling references, an overflowing offset or a parent cycle.
    pub fn root_of(&self, point: ConnectionPoint) -> Option<ConnectionPoint> {
        let mut current = point;
        for _ in 0..=self.nets.len() {
            let net = self.net(current.net)?;
            if current.bit >= net.width {
                return None;
            }
            match net.parent {
                Some(slice) if net.is_bus() && !net.forced_root => {
                    let bit = current.bit.checked_add(slice.offset)?;
                    current = ConnectionPoint::new(slice.net, bit);
                }
                _ => return Some(current),
            }
        }
        None
    }

    /// Finds the end of `instance` that carries the pin `label` in the given
    /// direction. Labels are compared after sanitising.
    pub fn end_index(
        &self,
        instance: &NetlistComponent,
        label: &str,
        direction: Direction,
    ) -> Option<usize> {
        let wanted = correct_label(label);
        instance.ends.iter().position(|end| {
            end.direction == direction
                && end
                    .label
                    .as_deref()
                    .is_some_and(|l| correct_label(l) == wanted)
        })
    }

    /// Detects a continuous bus connection: every bit of end `end` of
    /// `component` resolves to the same root bus, at consecutive ascending
    /// bit indices.
    pub fn continuous_range(&self, component: &NetlistComponent, end: usize) -> Option<BusRange> {
        let end = component.end(end)?;
        if end.width() < 2 {
            return None;
        }
        let mut range: Option<BusRange> = None;
        for (i, bit) in end.bits.iter().enumerate() {
            let root = self.root_of((*bit)?)?;
            if let Some(r) = range.as_mut() {
                if root.net != r.net || root.bit != r.lo + i as u32 {
                    return None;
                }
                r.hi = root.bit;
            } else {
                if !self.net(root.net)?.is_bus() {
                    return None;
                }
                range = Some(BusRange {
                    net: root.net,
                    lo: root.bit,
                    hi: root.bit,
                });
            }
        }
        range
    }
}
