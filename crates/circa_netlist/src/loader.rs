//! Loading of JSON netlist documents with referential validation.

use crate::component::{ComponentKind, NetlistComponent};
use crate::design::{Circuit, Design};
use crate::error::NetlistError;
use crate::ids::CircuitId;
use crate::net::ConnectionPoint;
use std::collections::BTreeSet;
use std::path::Path;

/// Reads and validates a JSON netlist document from disk.
pub fn load_design(path: &Path) -> Result<Design, NetlistError> {
    let content = std::fs::read_to_string(path)?;
    load_design_from_str(&content)
}

/// Parses and validates a JSON netlist document.
pub fn load_design_from_str(content: &str) -> Result<Design, NetlistError> {
    let design: Design =
        serde_json::from_str(content).map_err(|e| NetlistError::Parse(e.to_string()))?;
    validate_design(&design)?;
    Ok(design)
}

/// Checks every cross reference of a design: the top circuit, sub-circuit
/// targets, net parents and all connection points.
pub fn validate_design(design: &Design) -> Result<(), NetlistError> {
    if design.top_circuit().is_none() {
        return Err(NetlistError::UnknownCircuit(design.top.as_raw()));
    }
    for circuit in design.circuits.values() {
        validate_circuit(design, circuit)?;
    }
    let mut done = BTreeSet::new();
    for (id, _) in design.circuits.iter() {
        check_acyclic(design, id, &mut Vec::new(), &mut done)?;
    }
    Ok(())
}

fn validate_circuit(design: &Design, circuit: &Circuit) -> Result<(), NetlistError> {
    let netlist = &circuit.netlist;
    let check_point = |point: &ConnectionPoint| -> Result<(), NetlistError> {
        let net = netlist.net(point.net).ok_or_else(|| NetlistError::UnknownNet {
            circuit: circuit.name.clone(),
            net: point.net.as_raw(),
        })?;
        if point.bit >= net.width {
            return Err(NetlistError::BitOutOfRange {
                circuit: circuit.name.clone(),
                net: point.net.as_raw(),
                bit: point.bit,
                width: net.width,
            });
        }
        Ok(())
    };

    for (id, net) in netlist.nets.iter() {
        if net.width == 0 {
            return Err(NetlistError::Misplaced {
                circuit: circuit.name.clone(),
                message: format!("net {id} has zero width"),
            });
        }
        if let Some(slice) = net.parent {
            let last = slice.offset.checked_add(net.width - 1).ok_or_else(|| {
                NetlistError::Misplaced {
                    circuit: circuit.name.clone(),
                    message: format!("net {id} views past the end of net {}", slice.net),
                }
            })?;
            check_point(&ConnectionPoint::new(slice.net, last))?;
        }
        for point in net.sources.iter().chain(&net.sinks).flatten() {
            check_point(point)?;
        }
    }

    let check_component = |comp: &NetlistComponent| -> Result<(), NetlistError> {
        for point in comp.ends.iter().flat_map(|e| e.bits.iter().flatten()) {
            check_point(point)?;
        }
        Ok(())
    };
    let misplaced = |comp: &NetlistComponent, list: &str| NetlistError::Misplaced {
        circuit: circuit.name.clone(),
        message: format!("component '{}' does not belong among the {list}", comp.label),
    };

    for comp in &netlist.components {
        if !matches!(comp.kind, ComponentKind::Primitive { .. }) {
            return Err(misplaced(comp, "primitive components"));
        }
        check_component(comp)?;
    }
    for comp in &netlist.subcircuits {
        match comp.kind {
            ComponentKind::Subcircuit { circuit: target, .. } => {
                if design.circuit(target).is_none() {
                    return Err(NetlistError::UnknownCircuit(target.as_raw()));
                }
            }
            _ => return Err(misplaced(comp, "sub-circuit instances")),
        }
        check_component(comp)?;
    }
    for pin in netlist.inputs.iter().chain(&netlist.outputs).chain(&netlist.inouts) {
        if pin.kind != ComponentKind::Pin {
            return Err(misplaced(pin, "pins"));
        }
        check_component(pin)?;
    }
    for clock in &netlist.clock_sources {
        check_component(&clock.component)?;
    }
    Ok(())
}

/// Depth-first cycle search. `done` holds circuits whose whole subtree is
/// already known to be acyclic, so each circuit is explored once.
fn check_acyclic(
    design: &Design,
    id: CircuitId,
    stack: &mut Vec<CircuitId>,
    done: &mut BTreeSet<CircuitId>,
) -> Result<(), NetlistError> {
    if done.contains(&id) {
        return Ok(());
    }
    let Some(circuit) = design.circuit(id) else {
        return Err(NetlistError::UnknownCircuit(id.as_raw()));
    };
    if stack.contains(&id) {
        return Err(NetlistError::CyclicHierarchy(circuit.name.clone()));
    }
    stack.push(id);
    for comp in &circuit.netlist.subcircuits {
        if let ComponentKind::Subcircuit { circuit: child, .. } = comp.kind {
            check_acyclic(design, child, stack, done)?;
        }
    }
    stack.pop();
    done.insert(id);
    Ok(())
}
