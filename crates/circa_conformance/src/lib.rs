//! Conformance test helpers for the Circa HDL generator.
//!
//! Provides builders for in-memory netlists and designs, and a pipeline
//! function that runs a whole generation into memory and returns structured
//! results for assertion in integration tests.

#![warn(missing_docs)]

use circa_config::ProjectConfig;
use circa_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use circa_hdl::{
    generate_design, Dialect, GenContext, GenerateError, GeneratedModule, GenerationSummary,
    GeneratorRegistry, MemorySink,
};
use circa_netlist::{
    AttrValue, Attributes, Circuit, CircuitId, ClockSource, ComponentEnd, ConnectionPoint, Design,
    Direction, Net, NetId, Netlist, NetlistComponent,
};

/// Creates a `ProjectConfig` with the given top circuit, followed by the
/// TOML text `extra` (e.g. a board resource catalog).
pub fn make_config(top: &str, extra: &str) -> ProjectConfig {
    let text = format!(
        r#"
[project]
name = "conformance_test"
top = "{top}"

{extra}
"#
    );
    circa_config::load_config_from_str(&text).expect("conformance config must parse")
}

/// A connection to bit `bit` of net `net`.
pub fn cp(net: NetId, bit: u32) -> Option<ConnectionPoint> {
    Some(ConnectionPoint::new(net, bit))
}

/// Connections to bits `lo..=hi` of net `net`, least significant first.
pub fn bits(net: NetId, lo: u32, hi: u32) -> Vec<Option<ConnectionPoint>> {
    (lo..=hi).map(|bit| cp(net, bit)).collect()
}

/// Builds the netlist of one circuit.
#[derive(Default)]
pub struct NetlistBuilder {
    netlist: Netlist,
}

impl NetlistBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single-bit net.
    pub fn wire(&mut self) -> NetId {
        self.netlist.nets.alloc(Net::new(1))
    }

    /// Adds a root bus.
    pub fn bus(&mut self, width: u32) -> NetId {
        self.netlist.nets.alloc(Net::new(width))
    }

    /// Adds a view of `width` bits of `parent`, starting at `offset`.
    pub fn view(&mut self, width: u32, parent: NetId, offset: u32) -> NetId {
        self.netlist.nets.alloc(Net::view(width, parent, offset))
    }

    /// Adds a forced-root view with per-bit drivers and loads.
    pub fn forced_root(
        &mut self,
        width: u32,
        parent: NetId,
        offset: u32,
        sources: Vec<Vec<ConnectionPoint>>,
        sinks: Vec<Vec<ConnectionPoint>>,
    ) -> NetId {
        let mut net = Net::view(width, parent, offset);
        net.forced_root = true;
        net.sources = sources;
        net.sinks = sinks;
        self.netlist.nets.alloc(net)
    }

    /// Adds an input pin.
    pub fn input(&mut self, label: &str, bits: Vec<Option<ConnectionPoint>>) -> &mut Self {
        self.netlist.inputs.push(NetlistComponent::pin(
            label,
            ComponentEnd::new(Direction::Output, bits),
        ));
        self
    }

    /// Adds an output pin.
    pub fn output(&mut self, label: &str, bits: Vec<Option<ConnectionPoint>>) -> &mut Self {
        self.netlist.outputs.push(NetlistComponent::pin(
            label,
            ComponentEnd::new(Direction::Input, bits),
        ));
        self
    }

    /// Adds a bidirectional pin.
    pub fn inout(&mut self, label: &str, bits: Vec<Option<ConnectionPoint>>) -> &mut Self {
        self.netlist.inouts.push(NetlistComponent::pin(
            label,
            ComponentEnd::new(Direction::InOut, bits),
        ));
        self
    }

    /// Adds a gate: end 0 is the output, then one end per input.
    pub fn gate(
        &mut self,
        factory: &str,
        label: &str,
        output: Vec<Option<ConnectionPoint>>,
        inputs: Vec<Vec<Option<ConnectionPoint>>>,
    ) -> &mut Self {
        let mut ends = vec![ComponentEnd::new(Direction::Output, output)];
        ends.extend(
            inputs
                .into_iter()
                .map(|bits| ComponentEnd::new(Direction::Input, bits)),
        );
        self.netlist.components.push(NetlistComponent::primitive(
            label,
            factory,
            Attributes::new(),
            ends,
        ));
        self
    }

    /// Adds a 2:1 multiplexer of the width of `output`.
    pub fn mux(
        &mut self,
        label: &str,
        output: Vec<Option<ConnectionPoint>>,
        in0: Vec<Option<ConnectionPoint>>,
        in1: Vec<Option<ConnectionPoint>>,
        sel: Option<ConnectionPoint>,
    ) -> &mut Self {
        let mut attributes = Attributes::new();
        attributes.insert("width".to_string(), AttrValue::Int(output.len() as i64));
        self.netlist.components.push(NetlistComponent::primitive(
            label,
            "Multiplexer",
            attributes,
            vec![
                ComponentEnd::new(Direction::Output, output),
                ComponentEnd::new(Direction::Input, in0),
                ComponentEnd::new(Direction::Input, in1),
                ComponentEnd::new(Direction::Input, vec![sel]),
            ],
        ));
        self
    }

    /// Adds an arbitrary primitive.
    pub fn primitive(&mut self, component: NetlistComponent) -> &mut Self {
        self.netlist.components.push(component);
        self
    }

    /// Adds an instance of `circuit`. `ends` are `(pin label, direction,
    /// bits)` as seen from the instance.
    pub fn instance(
        &mut self,
        label: &str,
        circuit: CircuitId,
        gated: bool,
        ends: Vec<(&str, Direction, Vec<Option<ConnectionPoint>>)>,
    ) -> &mut Self {
        let ends = ends
            .into_iter()
            .map(|(pin, direction, bits)| ComponentEnd::new(direction, bits).with_label(pin))
            .collect();
        self.netlist
            .subcircuits
            .push(NetlistComponent::subcircuit(label, circuit, gated, ends));
        self
    }

    /// Adds a clock source feeding clock tree `tree`.
    pub fn clock(
        &mut self,
        label: &str,
        output: Option<ConnectionPoint>,
        tree: Option<u32>,
    ) -> &mut Self {
        self.netlist.clock_sources.push(ClockSource {
            component: NetlistComponent::pin(
                label,
                ComponentEnd::new(Direction::Output, vec![output]),
            ),
            tree,
        });
        self
    }

    /// Sets the number of clock trees.
    pub fn clock_trees(&mut self, count: u32) -> &mut Self {
        self.netlist.clock_trees = count;
        self
    }

    /// Marks the circuit as needing the free-running board clock.
    pub fn global_clock(&mut self) -> &mut Self {
        self.netlist.requires_global_clock = true;
        self
    }

    /// Sets the bubble counts.
    pub fn bubbles(&mut self, input: u32, output: u32, inout: u32) -> &mut Self {
        self.netlist.input_bubbles = input;
        self.netlist.output_bubbles = output;
        self.netlist.inout_bubbles = inout;
        self
    }

    /// Returns the built netlist.
    pub fn build(&mut self) -> Netlist {
        std::mem::take(&mut self.netlist)
    }
}

/// Builds a design circuit by circuit, children first.
#[derive(Default)]
pub struct DesignBuilder {
    design: Design,
}

impl DesignBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a circuit.
    pub fn circuit(&mut self, name: &str, netlist: Netlist) -> CircuitId {
        self.design.add_circuit(Circuit::new(name, netlist))
    }

    /// Adds the top circuit and returns the finished design.
    pub fn top(mut self, name: &str, netlist: Netlist) -> Design {
        self.design.top = self.circuit(name, netlist);
        self.design
    }
}

/// Result of running a whole generation into memory.
pub struct GenerationResult {
    /// The outcome of the run.
    pub outcome: Result<GenerationSummary, GenerateError>,
    /// Modules received by the sink, in emission order.
    pub modules: Vec<GeneratedModule>,
    /// All diagnostics emitted during the run.
    pub diagnostics: Vec<Diagnostic>,
    /// Dialect of the run.
    pub dialect: Dialect,
}

impl GenerationResult {
    /// Names of the emitted modules, in emission order.
    pub fn names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name.as_str()).collect()
    }

    /// Looks up an emitted module by name.
    pub fn module(&self, name: &str) -> Option<&GeneratedModule> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Interface and body of module `name` joined into one text, as a
    /// Verilog file would hold them. Empty if no such module exists.
    pub fn text(&self, name: &str) -> String {
        self.module(name)
            .map(|m| {
                let mut lines = m.interface.clone();
                lines.extend(m.body.iter().cloned());
                lines.join("\n")
            })
            .unwrap_or_default()
    }

    /// Number of diagnostics of `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Diagnostics of `severity`.
    pub fn of(&self, severity: Severity) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }
}

/// Runs a generation of `design` with the built-in generators into memory.
pub fn run_generation(design: &Design, dialect: Dialect) -> GenerationResult {
    run_generation_with(design, dialect, &GeneratorRegistry::with_builtins())
}

/// Runs a generation of `design` with the generators of `registry`.
pub fn run_generation_with(
    design: &Design,
    dialect: Dialect,
    registry: &GeneratorRegistry,
) -> GenerationResult {
    let diagnostics = DiagnosticSink::new();
    let ctx = GenContext::new(dialect, design, registry, &diagnostics);
    let mut sink = MemorySink::new();
    let outcome = generate_design(&ctx, &mut sink);
    GenerationResult {
        outcome,
        modules: sink.into_modules(),
        diagnostics: diagnostics.take_all(),
        dialect,
    }
}
