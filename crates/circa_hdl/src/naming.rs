//! Synthetic signal names and the module-local signal declarations.
//!
//! Every name is a pure function of a stable upstream identifier (a net
//! index, a clock-tree index, a circuit name), so two passes over the same
//! netlist produce the same text.

use crate::dialect::Dialect;
use circa_common::correct_label;
use circa_netlist::{ConnectionPoint, NetId, Netlist};

/// Prefix of single-bit net signals.
pub const NET_NAME: &str = "s_logisimNet";
/// Prefix of root bus signals.
pub const BUS_NAME: &str = "s_logisimBus";
/// Prefix of clock-tree ports.
pub const CLOCK_TREE_NAME: &str = "logisimClockTree";
/// Aggregated input bubble port.
pub const LOCAL_INPUT_BUBBLE_BUS_NAME: &str = "logisimInputBubbles";
/// Aggregated output bubble port.
pub const LOCAL_OUTPUT_BUBBLE_BUS_NAME: &str = "logisimOutputBubbles";
/// Aggregated bidirectional bubble port.
pub const LOCAL_INOUT_BUBBLE_BUS_NAME: &str = "logisimInOutBubbles";
/// The free-running board clock.
pub const FPGA_CLOCK: &str = "fpgaGlobalClock";
/// Width of one clock tree.
pub const NR_OF_CLOCK_BITS: u32 = 5;
/// Bit of a clock tree that carries the derived clock.
pub const DERIVED_CLOCK_INDEX: u32 = 0;
/// Prefix of top-level signals bound to board resources.
pub const TOP_LEVEL_PREFIX: &str = "s_";
/// Prefix of board pins that are inverted externally.
pub const INVERTED_PREFIX: &str = "n_";
/// Suffix of the clock-gated variant of a definition.
pub const GATED_SUFFIX: &str = "_gated";
/// Directory of generated circuit definitions.
pub const CIRCUIT_DIRECTORY: &str = "circuit";

/// A module-local signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    /// The signal name.
    pub name: String,
    /// The signal width in bits.
    pub width: u32,
}

/// Name of the single-bit signal of net `id`.
pub fn net_name(id: NetId) -> String {
    format!("{NET_NAME}{id}")
}

/// Name of the root bus signal of net `id`.
pub fn bus_name(id: NetId) -> String {
    format!("{BUS_NAME}{id}")
}

/// Name of clock-tree port `index`.
pub fn clock_tree_name(index: u32) -> String {
    format!("{CLOCK_TREE_NAME}{index}")
}

/// HDL definition name of a circuit, or of its gated variant.
pub fn definition_name(circuit: &str, gated: bool) -> String {
    let mut name = correct_label(circuit);
    if gated {
        name.push_str(GATED_SUFFIX);
    }
    name
}

/// Declares every signal a module needs: one per single-bit net, then one
/// per root bus, each group in net order.
pub fn declare_signals(netlist: &Netlist) -> Vec<Signal> {
    let wires = netlist
        .nets
        .iter()
        .filter(|(_, net)| !net.is_bus())
        .map(|(id, _)| Signal {
            name: net_name(id),
            width: 1,
        });
    let buses = netlist
        .nets
        .iter()
        .filter(|(_, net)| net.is_bus() && net.is_root())
        .map(|(id, net)| Signal {
            name: bus_name(id),
            width: net.width,
        });
    wires.chain(buses).collect()
}

/// The signal text that carries one connection point: the single-bit net
/// name, or the addressed bit of the root bus the point resolves to.
/// Returns `None` if the point does not resolve.
pub fn signal_of(netlist: &Netlist, dialect: Dialect, point: ConnectionPoint) -> Option<String> {
    let root = netlist.root_of(point)?;
    let net = netlist.net(root.net)?;
    Some(if net.is_bus() {
        dialect.index(&bus_name(root.net), root.bit)
    } else {
        net_name(root.net)
    })
}
