//! The generator of circuit definitions: sub-circuits and the top circuit.
//!
//! A module body is emitted in a fixed order, each section under a remark
//! header and only when it has statements: clock connections, forced-root
//! wiring, input pins, output pins, bidirectional pins, inlined components,
//! component instances and sub-circuit instances.

use crate::context::GenContext;
use crate::error::GenerateError;
use crate::errors;
use crate::format::{assignment, LineBuffer};
use crate::generator::{instance_name, HdlGenerator};
use crate::naming::{
    clock_tree_name, declare_signals, definition_name, signal_of, CIRCUIT_DIRECTORY,
    DERIVED_CLOCK_INDEX, FPGA_CLOCK,
};
use crate::port_map::nested_port_map;
use crate::ports::{pin_port, synthesize_ports};
use crate::wiring::{hdl_wiring, signal_map};
use circa_netlist::{Circuit, CircuitId, ComponentKind, Netlist, NetlistComponent};
use std::collections::BTreeSet;

/// Generates the definition of one circuit of the design.
pub struct CircuitGenerator<'c> {
    circuit: &'c Circuit,
}

impl<'c> CircuitGenerator<'c> {
    /// Creates the generator of `circuit`.
    pub fn new(circuit: &'c Circuit) -> Self {
        Self { circuit }
    }

    fn netlist(&self) -> &'c Netlist {
        &self.circuit.netlist
    }
}

/// Looks up the circuit a sub-circuit instance refers to.
pub(crate) fn instantiated_circuit<'d>(
    ctx: &GenContext<'d>,
    instance: &NetlistComponent,
) -> Result<Option<(CircuitId, &'d Circuit, bool)>, GenerateError> {
    let ComponentKind::Subcircuit { circuit, gated } = instance.kind else {
        return Ok(None);
    };
    let found = ctx.design.circuit(circuit).ok_or_else(|| {
        ctx.fatal(GenerateError::MissingCircuit {
            instance: instance.label.clone(),
            circuit: circuit.as_raw(),
        })
    })?;
    Ok(Some((circuit, found, gated)))
}

/// The statements connecting every clock source to its clock tree.
fn clock_connections(
    ctx: &GenContext<'_>,
    netlist: &Netlist,
) -> Result<Vec<String>, GenerateError> {
    let dialect = ctx.dialect;
    let mut lines = Vec::new();
    for source in &netlist.clock_sources {
        let clock = &source.component;
        let label = clock.label.as_str();
        let Some(end) = clock.end(0).filter(|end| end.is_connected()) else {
            ctx.report(errors::unconnected_clock(label, ctx.system_clock));
            continue;
        };
        let unresolved = || {
            ctx.fatal(GenerateError::UnresolvedClockNet {
                clock: label.to_string(),
            })
        };
        let point = end.bit(0).ok_or_else(unresolved)?;
        let net = signal_of(netlist, dialect, point).ok_or_else(unresolved)?;
        let tree = source
            .tree
            .filter(|tree| *tree < netlist.clock_trees)
            .ok_or_else(unresolved)?;
        let driver = if netlist.requires_global_clock {
            FPGA_CLOCK.to_string()
        } else {
            dialect.index(&clock_tree_name(tree), DERIVED_CLOCK_INDEX)
        };
        lines.push(assignment(dialect, &net, &driver));
    }
    Ok(lines)
}

/// Binds every circuit pin of `pins` to the module signals.
fn pin_bindings(
    ctx: &GenContext<'_>,
    netlist: &Netlist,
    pins: &[NetlistComponent],
) -> Result<Vec<String>, GenerateError> {
    let mut lines = Vec::new();
    for pin in pins {
        let Some((name, _)) = pin_port(pin) else {
            continue;
        };
        lines.extend(signal_map(ctx, netlist, &name, pin, 0)?);
    }
    Ok(lines)
}

fn section(ctx: &GenContext<'_>, body: &mut LineBuffer, title: &str, lines: Vec<String>) {
    if !lines.is_empty() {
        body.push_section(ctx.dialect, title);
        body.extend(lines);
    }
}

/// Builds the statements of a circuit's module body.
pub fn module_functionality(
    ctx: &GenContext<'_>,
    netlist: &Netlist,
) -> Result<Vec<String>, GenerateError> {
    let mut body = LineBuffer::new();
    section(
        ctx,
        &mut body,
        "Here all clock generator connections are defined",
        clock_connections(ctx, netlist)?,
    );
    section(ctx, &mut body, "Here all wiring is defined", hdl_wiring(ctx, netlist));
    section(
        ctx,
        &mut body,
        "Here all input connections are defined",
        pin_bindings(ctx, netlist, &netlist.inputs)?,
    );
    section(
        ctx,
        &mut body,
        "Here all output connections are defined",
        pin_bindings(ctx, netlist, &netlist.outputs)?,
    );
    section(
        ctx,
        &mut body,
        "Here all inout connections are defined",
        pin_bindings(ctx, netlist, &netlist.inouts)?,
    );

    let mut inlined = Vec::new();
    let mut normal = Vec::new();
    let (mut inlined_id, mut normal_id) = (1, 1);
    for component in &netlist.components {
        let resolved = ctx
            .registry
            .resolve(component)
            .ok_or_else(|| ctx.fatal(missing_generator(component)))?;
        let generator = &resolved.generator;
        if generator.is_only_inlined() {
            inlined.extend(generator.inlined_code(ctx, netlist, inlined_id, component, &resolved.name)?);
            inlined_id += 1;
        } else {
            normal.extend(generator.component_map(ctx, netlist, normal_id, component, &resolved.name)?);
            normal_id += 1;
        }
    }
    section(ctx, &mut body, "Here all in-lined components are defined", inlined);
    section(ctx, &mut body, "Here all normal components are defined", normal);

    let mut subcircuits = Vec::new();
    for (id, instance) in netlist.subcircuits.iter().enumerate() {
        let Some((_, circuit, gated)) = instantiated_circuit(ctx, instance)? else {
            continue;
        };
        let name = definition_name(&circuit.name, gated);
        subcircuits.extend(CircuitGenerator::new(circuit).component_map(
            ctx,
            netlist,
            id + 1,
            instance,
            &name,
        )?);
    }
    section(ctx, &mut body, "Here all sub-circuits are defined", subcircuits);
    body.push(String::new());
    Ok(body.into_lines())
}

/// The error for a primitive no registered generator covers.
pub(crate) fn missing_generator(component: &NetlistComponent) -> GenerateError {
    let factory = match &component.kind {
        ComponentKind::Primitive { factory, .. } => factory.clone(),
        ComponentKind::Subcircuit { .. } => "sub-circuit".to_string(),
        ComponentKind::Pin => "pin".to_string(),
    };
    GenerateError::MissingGenerator {
        component: component.label.clone(),
        factory,
    }
}

/// The component declarations a VHDL architecture of `netlist` needs, one
/// per distinct definition used.
fn component_declarations(
    ctx: &GenContext<'_>,
    netlist: &Netlist,
) -> Result<Vec<String>, GenerateError> {
    let mut declared = BTreeSet::new();
    let mut lines = Vec::new();
    for component in &netlist.components {
        let resolved = ctx
            .registry
            .resolve(component)
            .ok_or_else(|| ctx.fatal(missing_generator(component)))?;
        if resolved.generator.is_only_inlined() || !declared.insert(resolved.name.clone()) {
            continue;
        }
        lines.extend(resolved.generator.component_declaration(ctx, &resolved.name)?);
    }
    for instance in &netlist.subcircuits {
        let Some((_, circuit, gated)) = instantiated_circuit(ctx, instance)? else {
            continue;
        };
        let name = definition_name(&circuit.name, gated);
        if declared.insert(name.clone()) {
            lines.extend(CircuitGenerator::new(circuit).component_declaration(ctx, &name)?);
        }
    }
    Ok(lines)
}

impl HdlGenerator for CircuitGenerator<'_> {
    fn relative_directory(&self) -> &str {
        CIRCUIT_DIRECTORY
    }

    fn interface(&self, ctx: &GenContext<'_>, name: &str) -> Result<Vec<String>, GenerateError> {
        Ok(ctx.dialect.interface(name, &synthesize_ports(self.netlist())))
    }

    fn body(&self, ctx: &GenContext<'_>, name: &str) -> Result<Vec<String>, GenerateError> {
        let netlist = self.netlist();
        let components = component_declarations(ctx, netlist)?;
        let functionality = module_functionality(ctx, netlist)?;
        Ok(ctx
            .dialect
            .behavior(name, &components, &declare_signals(netlist), &functionality))
    }

    fn component_declaration(
        &self,
        ctx: &GenContext<'_>,
        name: &str,
    ) -> Result<Vec<String>, GenerateError> {
        Ok(ctx
            .dialect
            .component_declaration(name, &synthesize_ports(self.netlist())))
    }

    fn component_map(
        &self,
        ctx: &GenContext<'_>,
        netlist: &Netlist,
        id: usize,
        component: &NetlistComponent,
        name: &str,
    ) -> Result<Vec<String>, GenerateError> {
        let map = nested_port_map(ctx, netlist, component, self.netlist())?;
        Ok(ctx
            .dialect
            .render_instance(name, &instance_name(name, id), &map))
    }
}
