//! The port interface of a generated circuit definition.

use crate::naming::{
    clock_tree_name, FPGA_CLOCK, LOCAL_INOUT_BUBBLE_BUS_NAME, LOCAL_INPUT_BUBBLE_BUS_NAME,
    LOCAL_OUTPUT_BUBBLE_BUS_NAME, NR_OF_CLOCK_BITS,
};
use circa_common::correct_label;
use circa_netlist::{Direction, Netlist, NetlistComponent};

/// One port of a generated definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    /// Port direction.
    pub direction: Direction,
    /// Port name.
    pub name: String,
    /// Width in bits. 0 marks a bubble port holding a single wire, which is
    /// declared without an index range.
    pub width: u32,
}

impl Port {
    /// Creates a port.
    pub fn new(direction: Direction, name: impl Into<String>, width: u32) -> Self {
        Self {
            direction,
            name: name.into(),
            width,
        }
    }
}

/// Width of a bubble port holding `count` bubbles.
pub fn bubble_width(count: u32) -> u32 {
    if count > 1 {
        count
    } else {
        0
    }
}

/// The port name and width of a circuit pin, or `None` for a pin with no
/// label or no end.
pub fn pin_port(pin: &NetlistComponent) -> Option<(String, u32)> {
    let end = pin.end(0)?;
    let name = correct_label(&pin.label);
    if name.is_empty() || end.width() == 0 {
        return None;
    }
    Some((name, end.width()))
}

/// Derives the ordered port list of a circuit definition.
///
/// The order is fixed: inout bubbles, clock trees, the global clock, input
/// bubbles, input pins, output bubbles, output pins and finally the named
/// bidirectional pins.
pub fn synthesize_ports(netlist: &Netlist) -> Vec<Port> {
    let mut ports = Vec::new();
    if netlist.inout_bubbles > 0 {
        ports.push(Port::new(
            Direction::InOut,
            LOCAL_INOUT_BUBBLE_BUS_NAME,
            bubble_width(netlist.inout_bubbles),
        ));
    }
    for tree in 0..netlist.clock_trees {
        ports.push(Port::new(
            Direction::Input,
            clock_tree_name(tree),
            NR_OF_CLOCK_BITS,
        ));
    }
    if netlist.requires_global_clock {
        ports.push(Port::new(Direction::Input, FPGA_CLOCK, 1));
    }
    if netlist.input_bubbles > 0 {
        ports.push(Port::new(
            Direction::Input,
            LOCAL_INPUT_BUBBLE_BUS_NAME,
            bubble_width(netlist.input_bubbles),
        ));
    }
    let pins = |list: &[NetlistComponent], direction: Direction| -> Vec<Port> {
        list.iter()
            .filter_map(pin_port)
            .map(|(name, width)| Port::new(direction, name, width))
            .collect()
    };
    ports.extend(pins(&netlist.inputs, Direction::Input));
    if netlist.output_bubbles > 0 {
        ports.push(Port::new(
            Direction::Output,
            LOCAL_OUTPUT_BUBBLE_BUS_NAME,
            bubble_width(netlist.output_bubbles),
        ));
    }
    ports.extend(pins(&netlist.outputs, Direction::Output));
    ports.extend(pins(&netlist.inouts, Direction::InOut));
    ports
}
