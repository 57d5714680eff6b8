//! Built-in primitive generators.
//!
//! Bitwise gates are only inlined: every instance becomes one assignment per
//! output bit in the enclosing module. End 0 of a gate is its output, the
//! remaining ends are its inputs.
//!
//! The 2:1 multiplexer is emitted as its own definition, one per width. Its
//! ends are, in order: `MuxOut`, `MuxIn_0`, `MuxIn_1` and `Sel`.

use crate::context::GenContext;
use crate::dialect::LogicOp;
use crate::error::GenerateError;
use crate::errors;
use crate::format::assignment;
use crate::generator::{instance_name, HdlGenerator};
use crate::naming::signal_of;
use crate::port_map::PortMap;
use crate::ports::Port;
use crate::registry::PrimitiveFactory;
use crate::wiring::net_map;
use circa_netlist::{AttrValue, Attributes, Direction, Netlist, NetlistComponent};

/// The bitwise gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateKind {
    /// N-input AND.
    And,
    /// N-input OR.
    Or,
    /// N-input XOR.
    Xor,
    /// N-input NAND.
    Nand,
    /// N-input NOR.
    Nor,
    /// N-input XNOR.
    Xnor,
    /// Inverter.
    Not,
    /// Buffer.
    Buffer,
}

impl GateKind {
    /// Every gate kind.
    pub const ALL: [GateKind; 8] = [
        GateKind::And,
        GateKind::Or,
        GateKind::Xor,
        GateKind::Nand,
        GateKind::Nor,
        GateKind::Xnor,
        GateKind::Not,
        GateKind::Buffer,
    ];

    /// The factory name components refer to.
    pub fn factory_name(self) -> &'static str {
        match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Xor => "XOR",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
            GateKind::Xnor => "XNOR",
            GateKind::Not => "NOT",
            GateKind::Buffer => "BUFFER",
        }
    }

    /// The operator and whether the result is negated.
    fn operation(self) -> (LogicOp, bool) {
        match self {
            GateKind::And | GateKind::Buffer => (LogicOp::And, false),
            GateKind::Or => (LogicOp::Or, false),
            GateKind::Xor => (LogicOp::Xor, false),
            GateKind::Nand | GateKind::Not => (LogicOp::And, true),
            GateKind::Nor => (LogicOp::Or, true),
            GateKind::Xnor => (LogicOp::Xor, true),
        }
    }

    fn is_unary(self) -> bool {
        matches!(self, GateKind::Not | GateKind::Buffer)
    }
}

/// Factory of one gate kind.
#[derive(Debug, Clone, Copy)]
pub struct GateFactory {
    kind: GateKind,
}

impl GateFactory {
    /// Creates the factory of `kind`.
    pub fn new(kind: GateKind) -> Self {
        Self { kind }
    }
}

impl PrimitiveFactory for GateFactory {
    fn hdl_name(&self, _attributes: &Attributes) -> String {
        format!("{}_GATE", self.kind.factory_name())
    }

    fn generator(&self, _attributes: &Attributes) -> Option<Box<dyn HdlGenerator>> {
        Some(Box::new(GateGenerator { kind: self.kind }))
    }
}

struct GateGenerator {
    kind: GateKind,
}

impl HdlGenerator for GateGenerator {
    fn relative_directory(&self) -> &str {
        "gates"
    }

    fn is_only_inlined(&self) -> bool {
        true
    }

    fn interface(&self, _ctx: &GenContext<'_>, _name: &str) -> Result<Vec<String>, GenerateError> {
        Ok(Vec::new())
    }

    fn body(&self, _ctx: &GenContext<'_>, _name: &str) -> Result<Vec<String>, GenerateError> {
        Ok(Vec::new())
    }

    fn component_declaration(
        &self,
        _ctx: &GenContext<'_>,
        _name: &str,
    ) -> Result<Vec<String>, GenerateError> {
        Ok(Vec::new())
    }

    fn component_map(
        &self,
        _ctx: &GenContext<'_>,
        _netlist: &Netlist,
        _id: usize,
        _component: &NetlistComponent,
        _name: &str,
    ) -> Result<Vec<String>, GenerateError> {
        Ok(Vec::new())
    }

    fn inlined_code(
        &self,
        ctx: &GenContext<'_>,
        netlist: &Netlist,
        id: usize,
        component: &NetlistComponent,
        name: &str,
    ) -> Result<Vec<String>, GenerateError> {
        let dialect = ctx.dialect;
        let required = if self.kind.is_unary() { 2 } else { 3 };
        if component.nr_of_ends() < required {
            return Err(ctx.fatal(GenerateError::EndIndexOutOfRange {
                component: component.label.clone(),
                index: required - 1,
                ends: component.nr_of_ends(),
            }));
        }
        let inputs = if self.kind.is_unary() {
            &component.ends[1..2]
        } else {
            &component.ends[1..]
        };
        let output = &component.ends[0];
        let instance = instance_name(name, id);
        let (op, negate) = self.kind.operation();

        let mut lines = Vec::new();
        for bit in 0..output.width() {
            // An output bit nobody reads needs no statement.
            let Some(destination) = output
                .bit(bit)
                .and_then(|point| signal_of(netlist, dialect, point))
            else {
                continue;
            };
            let operands: Vec<String> = inputs
                .iter()
                .enumerate()
                .map(|(k, end)| {
                    match end.bit(bit).and_then(|point| signal_of(netlist, dialect, point)) {
                        Some(signal) => signal,
                        None => {
                            let port = format!("{instance}.input{}", k + 1);
                            ctx.report(if output.width() == 1 {
                                errors::warn_unconnected_input(&port)
                            } else {
                                errors::warn_unconnected_bit(&port, bit)
                            });
                            dialect.zero_vector(1)
                        }
                    }
                })
                .collect();
            lines.push(assignment(
                dialect,
                &destination,
                &dialect.logic_expression(op, negate, &operands),
            ));
        }
        Ok(lines)
    }
}

/// Factory of the 2:1 multiplexer. The `width` attribute selects the data
/// width and defaults to 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiplexerFactory;

fn data_width(attributes: &Attributes) -> Option<u32> {
    match attributes.get("width") {
        None => Some(1),
        Some(AttrValue::Int(width)) => u32::try_from(*width).ok().filter(|w| *w > 0),
        Some(_) => None,
    }
}

impl PrimitiveFactory for MultiplexerFactory {
    fn hdl_name(&self, attributes: &Attributes) -> String {
        format!("Multiplexer_{}", data_width(attributes).unwrap_or(1))
    }

    fn generator(&self, attributes: &Attributes) -> Option<Box<dyn HdlGenerator>> {
        let width = data_width(attributes)?;
        Some(Box::new(Multiplexer { width }))
    }
}

const MUX_FORMALS: [&str; 4] = ["MuxOut", "MuxIn_0", "MuxIn_1", "Sel"];

struct Multiplexer {
    width: u32,
}

impl Multiplexer {
    fn ports(&self) -> Vec<Port> {
        vec![
            Port::new(Direction::Input, "Sel", 1),
            Port::new(Direction::Input, "MuxIn_0", self.width),
            Port::new(Direction::Input, "MuxIn_1", self.width),
            Port::new(Direction::Output, "MuxOut", self.width),
        ]
    }
}

impl HdlGenerator for Multiplexer {
    fn relative_directory(&self) -> &str {
        "plexers"
    }

    fn interface(&self, ctx: &GenContext<'_>, name: &str) -> Result<Vec<String>, GenerateError> {
        Ok(ctx.dialect.interface(name, &self.ports()))
    }

    fn body(&self, ctx: &GenContext<'_>, name: &str) -> Result<Vec<String>, GenerateError> {
        let dialect = ctx.dialect;
        let functionality = vec![
            dialect.select_assignment("MuxOut", "Sel", "MuxIn_0", "MuxIn_1"),
            String::new(),
        ];
        Ok(dialect.behavior(name, &[], &[], &functionality))
    }

    fn component_declaration(
        &self,
        ctx: &GenContext<'_>,
        name: &str,
    ) -> Result<Vec<String>, GenerateError> {
        Ok(ctx.dialect.component_declaration(name, &self.ports()))
    }

    fn component_map(
        &self,
        ctx: &GenContext<'_>,
        netlist: &Netlist,
        id: usize,
        component: &NetlistComponent,
        name: &str,
    ) -> Result<Vec<String>, GenerateError> {
        let mut map = PortMap::new();
        for (end, formal) in MUX_FORMALS.iter().enumerate() {
            map.extend(net_map(ctx, netlist, formal, component, end)?);
        }
        Ok(ctx
            .dialect
            .render_instance(name, &instance_name(name, id), &map))
    }
}
