//! The two output dialects and every piece of syntax that differs between
//! them.
//!
//! This is the only module that branches on the dialect. Everything else
//! asks a [`Dialect`] for tokens (brackets, range separator, assignment
//! keyword and operator, zero literals) or for a rendered fragment (port
//! lists, declarations, instantiations, remark blocks).

use crate::format::{pad, INDENT};
use crate::naming::Signal;
use crate::port_map::PortMap;
use crate::ports::Port;
use circa_config::HdlDialect;
use circa_netlist::{BubbleRange, Direction};

/// Width of generated remark blocks, indentation included.
pub const MAX_LINE_LENGTH: usize = 80;

/// Name of the VHDL architecture emitted for every entity.
pub const ARCHITECTURE_NAME: &str = "platformIndependent";

/// The HDL dialect of a generation run, chosen once before it starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// VHDL-93.
    #[default]
    Vhdl,
    /// Verilog-2001.
    Verilog,
}

impl From<HdlDialect> for Dialect {
    fn from(value: HdlDialect) -> Self {
        match value {
            HdlDialect::Vhdl => Dialect::Vhdl,
            HdlDialect::Verilog => Dialect::Verilog,
        }
    }
}

/// A bitwise operator used by inlined gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    /// Conjunction.
    And,
    /// Disjunction.
    Or,
    /// Exclusive or.
    Xor,
}

impl Dialect {
    /// Returns `true` for VHDL.
    pub fn is_vhdl(self) -> bool {
        self == Dialect::Vhdl
    }

    /// Returns `true` for Verilog.
    pub fn is_verilog(self) -> bool {
        self == Dialect::Verilog
    }

    /// Lowercase dialect name, also the output sub-directory.
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Vhdl => "vhdl",
            Dialect::Verilog => "verilog",
        }
    }

    /// Opening bracket of an index or range.
    pub fn bracket_open(self) -> &'static str {
        match self {
            Dialect::Vhdl => "(",
            Dialect::Verilog => "[",
        }
    }

    /// Closing bracket of an index or range.
    pub fn bracket_close(self) -> &'static str {
        match self {
            Dialect::Vhdl => ")",
            Dialect::Verilog => "]",
        }
    }

    /// Separator between the high and low bound of a range.
    pub fn vector_loop_id(self) -> &'static str {
        match self {
            Dialect::Vhdl => " DOWNTO ",
            Dialect::Verilog => ":",
        }
    }

    /// Keyword that starts a continuous assignment.
    pub fn assign_preamble(self) -> &'static str {
        match self {
            Dialect::Vhdl => "",
            Dialect::Verilog => "assign ",
        }
    }

    /// Assignment operator, surrounded by single spaces.
    pub fn assign_operator(self) -> &'static str {
        match self {
            Dialect::Vhdl => " <= ",
            Dialect::Verilog => " = ",
        }
    }

    /// The all-zero literal of the given width.
    pub fn zero_vector(self, width: u32) -> String {
        match self {
            Dialect::Vhdl if width <= 1 => "'0'".to_string(),
            Dialect::Vhdl => format!("\"{}\"", "0".repeat(width as usize)),
            Dialect::Verilog => format!("{}'d0", width.max(1)),
        }
    }

    /// Actual of an output port that is left unconnected as a whole.
    pub fn unconnected(self) -> &'static str {
        match self {
            Dialect::Vhdl => "OPEN",
            Dialect::Verilog => "",
        }
    }

    /// Actual of a single unconnected bit inside a per-bit association.
    pub fn unconnected_bit(self) -> &'static str {
        match self {
            Dialect::Vhdl => "OPEN",
            Dialect::Verilog => "1'bz",
        }
    }

    /// `name(bit)` or `name[bit]`.
    pub fn index(self, name: &str, bit: u32) -> String {
        format!("{name}{}{bit}{}", self.bracket_open(), self.bracket_close())
    }

    /// `name(hi DOWNTO lo)` or `name[hi:lo]`.
    pub fn range(self, name: &str, hi: u32, lo: u32) -> String {
        format!(
            "{name}{}{hi}{}{lo}{}",
            self.bracket_open(),
            self.vector_loop_id(),
            self.bracket_close()
        )
    }

    /// Selects the part of an enclosing bubble bus that belongs to one
    /// component. A bus declared as a single wire (`parent_count == 1`) is
    /// never indexed.
    pub fn bubble_slice(self, bus: &str, range: Option<BubbleRange>, parent_count: u32) -> String {
        match range {
            _ if parent_count <= 1 => bus.to_string(),
            Some(r) if r.start == r.end => self.index(bus, r.start),
            Some(r) => self.range(bus, r.end, r.start),
            None => bus.to_string(),
        }
    }

    /// Associations binding the formal `port` to the per-bit actuals `bits`
    /// (least significant first). VHDL associates every bit separately;
    /// Verilog concatenates the bits most significant first. A single bit
    /// binds the port directly.
    pub fn bit_associations(self, port: &str, bits: &[String]) -> Vec<(String, String)> {
        if bits.len() == 1 {
            return vec![(port.to_string(), bits[0].clone())];
        }
        match self {
            Dialect::Vhdl => bits
                .iter()
                .enumerate()
                .map(|(i, actual)| (self.index(port, i as u32), actual.clone()))
                .collect(),
            Dialect::Verilog => {
                let joined: Vec<&str> = bits.iter().rev().map(String::as_str).collect();
                vec![(port.to_string(), format!("{{{}}}", joined.join(",")))]
            }
        }
    }

    /// Renders a remark block of [`MAX_LINE_LENGTH`] columns, wrapping the
    /// text on word boundaries.
    pub fn remark_block(self, text: &str, indent: usize) -> Vec<String> {
        let lead = " ".repeat(indent);
        let inner = MAX_LINE_LENGTH.saturating_sub(indent + 6).max(10);
        let fill = MAX_LINE_LENGTH.saturating_sub(indent).max(2);
        let (top, bottom, open, close) = match self {
            Dialect::Vhdl => (
                "-".repeat(fill),
                "-".repeat(fill),
                "-- ",
                " --",
            ),
            Dialect::Verilog => (
                format!("/{}", "*".repeat(fill - 1)),
                format!("{}/", "*".repeat(fill - 1)),
                "** ",
                " **",
            ),
        };
        let mut lines = vec![format!("{lead}{top}")];
        for chunk in wrap(text, inner) {
            lines.push(format!("{lead}{open}{chunk:<inner$}{close}"));
        }
        lines.push(format!("{lead}{bottom}"));
        lines
    }

    fn direction_keyword(self, direction: Direction) -> &'static str {
        match (self, direction) {
            (Dialect::Vhdl, Direction::Input) => "IN",
            (Dialect::Vhdl, Direction::Output) => "OUT",
            (Dialect::Vhdl, Direction::InOut) => "INOUT",
            (Dialect::Verilog, Direction::Input) => "input",
            (Dialect::Verilog, Direction::Output) => "output",
            (Dialect::Verilog, Direction::InOut) => "inout",
        }
    }

    /// Type of a signal of `width` bits; width 0 and 1 are single wires.
    fn vhdl_type(width: u32) -> String {
        if width <= 1 {
            "std_logic".to_string()
        } else {
            format!("std_logic_vector( {} DOWNTO 0 )", width - 1)
        }
    }

    fn verilog_range(width: u32) -> String {
        if width <= 1 {
            String::new()
        } else {
            format!("[{}:0] ", width - 1)
        }
    }

    fn vhdl_port_clause(self, ports: &[Port], indent: usize) -> Vec<String> {
        if ports.is_empty() {
            return Vec::new();
        }
        let lead = " ".repeat(indent);
        let cont = " ".repeat(indent + "PORT ( ".len());
        ports
            .iter()
            .enumerate()
            .map(|(i, port)| {
                let prefix = if i == 0 {
                    format!("{lead}PORT ( ")
                } else {
                    cont.clone()
                };
                let end = if i + 1 == ports.len() { " );" } else { ";" };
                format!(
                    "{prefix}{} : {:<5} {}{end}",
                    pad(&port.name),
                    self.direction_keyword(port.direction),
                    Self::vhdl_type(port.width)
                )
            })
            .collect()
    }

    /// The interface text of a definition: the VHDL entity or the Verilog
    /// module header with its port declarations.
    pub fn interface(self, name: &str, ports: &[Port]) -> Vec<String> {
        let mut lines = Vec::new();
        match self {
            Dialect::Vhdl => {
                lines.push("LIBRARY ieee;".to_string());
                lines.push("USE ieee.std_logic_1164.all;".to_string());
                lines.push(String::new());
                lines.push(format!("ENTITY {name} IS"));
                lines.extend(self.vhdl_port_clause(ports, INDENT));
                lines.push(format!("END ENTITY {name};"));
            }
            Dialect::Verilog => {
                if ports.is_empty() {
                    lines.push(format!("module {name};"));
                } else {
                    let head = format!("module {name}( ");
                    let cont = " ".repeat(head.len());
                    for (i, port) in ports.iter().enumerate() {
                        let prefix = if i == 0 { head.clone() } else { cont.clone() };
                        let end = if i + 1 == ports.len() { " );" } else { "," };
                        lines.push(format!("{prefix}{}{end}", port.name));
                    }
                    lines.push(String::new());
                    for port in ports {
                        lines.push(format!(
                            "{}{:<6} {}{};",
                            " ".repeat(INDENT),
                            self.direction_keyword(port.direction),
                            Self::verilog_range(port.width),
                            port.name
                        ));
                    }
                }
            }
        }
        lines
    }

    /// A VHDL `COMPONENT` declaration; Verilog has none.
    pub fn component_declaration(self, name: &str, ports: &[Port]) -> Vec<String> {
        match self {
            Dialect::Vhdl => {
                let lead = " ".repeat(INDENT);
                let mut lines = vec![format!("{lead}COMPONENT {name}")];
                lines.extend(self.vhdl_port_clause(ports, INDENT * 2));
                lines.push(format!("{lead}END COMPONENT;"));
                lines.push(String::new());
                lines
            }
            Dialect::Verilog => Vec::new(),
        }
    }

    /// The body text of a definition: the VHDL architecture or the rest of
    /// the Verilog module after its header.
    pub fn behavior(
        self,
        name: &str,
        components: &[String],
        signals: &[Signal],
        functionality: &[String],
    ) -> Vec<String> {
        let lead = " ".repeat(INDENT);
        let mut lines = Vec::new();
        match self {
            Dialect::Vhdl => {
                lines.push(format!("ARCHITECTURE {ARCHITECTURE_NAME} OF {name} IS"));
                if !components.is_empty() {
                    lines.push(String::new());
                    lines.extend(self.remark_block("All used components are defined here", INDENT));
                    lines.extend(components.iter().cloned());
                }
                if !signals.is_empty() {
                    lines.push(String::new());
                    lines.extend(self.remark_block("All used signals are defined here", INDENT));
                    for signal in signals {
                        lines.push(format!(
                            "{lead}SIGNAL {} : {};",
                            pad(&signal.name),
                            Self::vhdl_type(signal.width)
                        ));
                    }
                }
                lines.push(String::new());
                lines.push("BEGIN".to_string());
                lines.extend(functionality.iter().cloned());
                lines.push(format!("END {ARCHITECTURE_NAME};"));
            }
            Dialect::Verilog => {
                if !signals.is_empty() {
                    lines.push(String::new());
                    lines.extend(self.remark_block("All used wires are defined here", INDENT));
                    for signal in signals {
                        lines.push(format!(
                            "{lead}wire {}{};",
                            Self::verilog_range(signal.width),
                            signal.name
                        ));
                    }
                }
                lines.extend(functionality.iter().cloned());
                lines.push("endmodule".to_string());
            }
        }
        lines
    }

    /// Renders the instantiation of `definition` named `instance`.
    pub fn render_instance(self, definition: &str, instance: &str, map: &PortMap) -> Vec<String> {
        let lead = " ".repeat(INDENT);
        let last = map.len().saturating_sub(1);
        match self {
            Dialect::Vhdl => {
                if map.is_empty() {
                    return vec![format!("{lead}{instance} : {definition};")];
                }
                let mut lines = vec![format!("{lead}{instance} : {definition}")];
                let head = format!("{lead}{lead}PORT MAP ( ");
                let cont = " ".repeat(head.len());
                for (i, (formal, actual)) in map.iter().enumerate() {
                    let prefix = if i == 0 { &head } else { &cont };
                    let end = if i == last { " );" } else { "," };
                    lines.push(format!("{prefix}{} => {actual}{end}", pad(formal)));
                }
                lines
            }
            Dialect::Verilog => {
                let head = format!("{lead}{definition} {instance} (");
                if map.is_empty() {
                    return vec![format!("{head});")];
                }
                let cont = " ".repeat(head.len());
                map.iter()
                    .enumerate()
                    .map(|(i, (formal, actual))| {
                        let prefix = if i == 0 { &head } else { &cont };
                        let end = if i == last { ");" } else { "," };
                        format!("{prefix}.{formal}({actual}){end}")
                    })
                    .collect()
            }
        }
    }

    /// A bitwise expression over `operands`, optionally negated. A single
    /// operand yields a buffer or an inverter.
    pub fn logic_expression(self, op: LogicOp, negate: bool, operands: &[String]) -> String {
        let token = match (self, op) {
            (Dialect::Vhdl, LogicOp::And) => " AND ",
            (Dialect::Vhdl, LogicOp::Or) => " OR ",
            (Dialect::Vhdl, LogicOp::Xor) => " XOR ",
            (Dialect::Verilog, LogicOp::And) => " & ",
            (Dialect::Verilog, LogicOp::Or) => " | ",
            (Dialect::Verilog, LogicOp::Xor) => " ^ ",
        };
        let expr = operands.join(token);
        if !negate {
            return expr;
        }
        match self {
            Dialect::Vhdl => format!("NOT({expr})"),
            Dialect::Verilog => format!("~({expr})"),
        }
    }

    /// A two-way selection: `destination` gets `when_high` while `select`
    /// is 1 and `when_low` otherwise.
    pub fn select_assignment(
        self,
        destination: &str,
        select: &str,
        when_low: &str,
        when_high: &str,
    ) -> String {
        let source = match self {
            Dialect::Vhdl => format!("{when_high} WHEN {select} = '1' ELSE {when_low}"),
            Dialect::Verilog => format!("({select}) ? {when_high} : {when_low}"),
        };
        crate::format::assignment(self, destination, &source)
    }

    /// File names and contents of one generated definition.
    pub fn module_files(
        self,
        name: &str,
        interface: &[String],
        body: &[String],
    ) -> Vec<(String, Vec<String>)> {
        match self {
            Dialect::Vhdl => vec![
                (format!("{name}_entity.vhd"), interface.to_vec()),
                (format!("{name}_behavior.vhd"), body.to_vec()),
            ],
            Dialect::Verilog => {
                let mut all = interface.to_vec();
                all.extend(body.iter().cloned());
                vec![(format!("{name}.v"), all)]
            }
        }
    }
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
