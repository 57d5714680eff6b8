//! Port maps binding the formal ports of a circuit definition to actual
//! signals, for an instance nested in another circuit or for the top-level
//! instance placed on a board.

use crate::context::GenContext;
use crate::error::GenerateError;
use crate::errors;
use crate::generator::instance_name;
use crate::naming::{
    clock_tree_name, definition_name, FPGA_CLOCK, INVERTED_PREFIX, LOCAL_INOUT_BUBBLE_BUS_NAME,
    LOCAL_INPUT_BUBBLE_BUS_NAME, LOCAL_OUTPUT_BUBBLE_BUS_NAME, TOP_LEVEL_PREFIX,
};
use crate::ports::pin_port;
use crate::wiring::net_map;
use circa_config::BoardConfig;
use circa_netlist::{BubbleRange, Direction, Netlist, NetlistComponent};
use std::collections::BTreeMap;

/// Formal port name to actual signal text, in a stable order.
pub type PortMap = BTreeMap<String, String>;

/// How a board resource binds one inout bubble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BubbleMapping {
    /// Unmapped, or intentionally left open.
    Open,
    /// Bound to a physical pin.
    Pin {
        /// HDL-visible name of the pin.
        hdl: String,
        /// The pin is active-low and needs external inversion.
        inverted: bool,
    },
}

/// The board resources a top-level design is placed on.
pub trait ResourceCatalog {
    /// Returns how the owning resource maps inout bubble `bubble`, or `None`
    /// if no resource owns it.
    fn inout_bubble(&self, bubble: u32) -> Option<BubbleMapping>;
}

impl ResourceCatalog for BoardConfig {
    fn inout_bubble(&self, bubble: u32) -> Option<BubbleMapping> {
        self.resources.iter().find_map(|resource| {
            let pin = resource.io_bubble_pin_id(bubble)?;
            if !resource.is_mapped(pin) || resource.is_open_mapped(pin) {
                return Some(BubbleMapping::Open);
            }
            Some(match resource.hdl_string(pin) {
                Some(hdl) => BubbleMapping::Pin {
                    hdl: hdl.to_string(),
                    inverted: resource.is_external_inverted(pin),
                },
                None => BubbleMapping::Open,
            })
        })
    }
}

fn map_bubbles(
    ctx: &GenContext<'_>,
    map: &mut PortMap,
    bus: &str,
    count: u32,
    range: Option<BubbleRange>,
    parent_count: u32,
) {
    if count > 0 {
        map.insert(
            bus.to_string(),
            ctx.dialect.bubble_slice(bus, range, parent_count),
        );
    }
}

/// Builds the port map of `instance`, an instance of the circuit whose
/// netlist is `child`, placed in the circuit whose netlist is `parent`.
///
/// Clock trees and the global clock pass through by name, bubble buses map
/// onto the instance's slice of the parent's bubble buses, and every pin
/// maps onto the parent's signals through the instance end carrying it.
pub fn nested_port_map(
    ctx: &GenContext<'_>,
    parent: &Netlist,
    instance: &NetlistComponent,
    child: &Netlist,
) -> Result<PortMap, GenerateError> {
    let mut map = PortMap::new();
    for tree in 0..child.clock_trees {
        let name = clock_tree_name(tree);
        map.insert(name.clone(), name);
    }
    if child.requires_global_clock {
        map.insert(FPGA_CLOCK.to_string(), FPGA_CLOCK.to_string());
    }
    let bubbles = instance.bubbles;
    map_bubbles(
        ctx,
        &mut map,
        LOCAL_INOUT_BUBBLE_BUS_NAME,
        child.inout_bubbles,
        bubbles.inout,
        parent.inout_bubbles,
    );
    map_bubbles(
        ctx,
        &mut map,
        LOCAL_INPUT_BUBBLE_BUS_NAME,
        child.input_bubbles,
        bubbles.input,
        parent.input_bubbles,
    );
    map_bubbles(
        ctx,
        &mut map,
        LOCAL_OUTPUT_BUBBLE_BUS_NAME,
        child.output_bubbles,
        bubbles.output,
        parent.output_bubbles,
    );

    let groups = [
        (&child.inputs, Direction::Input),
        (&child.outputs, Direction::Output),
        (&child.inouts, Direction::InOut),
    ];
    for (pins, direction) in groups {
        for pin in pins {
            let Some((name, _)) = pin_port(pin) else {
                continue;
            };
            let end = parent
                .end_index(instance, &name, direction)
                .ok_or_else(|| {
                    ctx.fatal(GenerateError::UnresolvedEndIndex {
                        instance: instance.label.clone(),
                        pin: name.clone(),
                    })
                })?;
            map.extend(net_map(ctx, parent, &name, instance, end)?);
        }
    }
    Ok(map)
}

fn top_level_signal(name: &str) -> String {
    format!("{TOP_LEVEL_PREFIX}{name}")
}

/// Builds the port map of the top-level instance of `netlist` against the
/// board resources in `catalog`.
///
/// Data pins, clock trees and the input and output bubble buses map onto
/// `s_`-prefixed board signals. Every inout bubble binds the pin of its
/// owning resource, `n_`-prefixed when externally inverted, or is left open.
/// A bubble no resource owns is reported and left open.
pub fn top_level_port_map(
    ctx: &GenContext<'_>,
    netlist: &Netlist,
    catalog: &dyn ResourceCatalog,
) -> PortMap {
    let dialect = ctx.dialect;
    let mut map = PortMap::new();
    for tree in 0..netlist.clock_trees {
        let name = clock_tree_name(tree);
        map.insert(name.clone(), top_level_signal(&name));
    }
    if netlist.requires_global_clock {
        map.insert(FPGA_CLOCK.to_string(), FPGA_CLOCK.to_string());
    }
    for (bus, count) in [
        (LOCAL_INPUT_BUBBLE_BUS_NAME, netlist.input_bubbles),
        (LOCAL_OUTPUT_BUBBLE_BUS_NAME, netlist.output_bubbles),
    ] {
        if count > 0 {
            map.insert(bus.to_string(), top_level_signal(bus));
        }
    }

    if netlist.inout_bubbles > 0 {
        let actuals: Vec<String> = (0..netlist.inout_bubbles)
            .map(|bubble| match catalog.inout_bubble(bubble) {
                Some(BubbleMapping::Pin { hdl, inverted: true }) => {
                    format!("{INVERTED_PREFIX}{hdl}")
                }
                Some(BubbleMapping::Pin { hdl, .. }) => hdl,
                Some(BubbleMapping::Open) => dialect.unconnected_bit().to_string(),
                None => {
                    ctx.report(errors::warn_unowned_bubble(bubble));
                    dialect.unconnected_bit().to_string()
                }
            })
            .collect();
        map.extend(dialect.bit_associations(LOCAL_INOUT_BUBBLE_BUS_NAME, &actuals));
    }

    for pins in [&netlist.inputs, &netlist.outputs, &netlist.inouts] {
        for (name, _) in pins.iter().filter_map(pin_port) {
            let actual = top_level_signal(&name);
            map.insert(name, actual);
        }
    }
    map
}

/// Renders the instantiation of the design's top circuit on the board
/// described by `catalog`. Returns an empty block if the design has no top
/// circuit.
pub fn top_level_instance(ctx: &GenContext<'_>, catalog: &dyn ResourceCatalog) -> Vec<String> {
    let Some(top) = ctx.design.top_circuit() else {
        return Vec::new();
    };
    let definition = definition_name(&top.name, false);
    let map = top_level_port_map(ctx, &top.netlist, catalog);
    ctx.dialect
        .render_instance(&definition, &instance_name(&definition, 1), &map)
}
