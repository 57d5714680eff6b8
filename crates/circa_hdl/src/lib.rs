//! Structural HDL generation for hierarchical circuit designs.
//!
//! This crate turns a [`circa_netlist::Design`] into VHDL or Verilog text:
//! one definition per distinct circuit (and gated circuit variant) and per
//! distinct non-inlined primitive, each emitted exactly once into a
//! [`ModuleSink`]. Generation is depth-first over the instantiation tree
//! and aborts on the first fatal error.
//!
//! All literal syntax of the two dialects lives in [`Dialect`]; the other
//! modules build text only through it.

#![warn(missing_docs)]

pub mod circuit;
pub mod context;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod errors;
pub mod format;
pub mod generator;
pub mod naming;
pub mod port_map;
pub mod ports;
pub mod primitives;
pub mod registry;
pub mod sink;
pub mod wiring;

pub use circuit::CircuitGenerator;
pub use context::{GenContext, DEFAULT_SYSTEM_CLOCK};
pub use dialect::{Dialect, LogicOp};
pub use driver::{generate_design, GenerationSummary, ModuleSummary};
pub use error::{GenerateError, SinkError};
pub use generator::HdlGenerator;
pub use naming::{declare_signals, Signal};
pub use port_map::{
    nested_port_map, top_level_instance, top_level_port_map, BubbleMapping, PortMap,
    ResourceCatalog,
};
pub use ports::{synthesize_ports, Port};
pub use registry::{GeneratorRegistry, PrimitiveFactory, ResolvedPrimitive};
pub use sink::{FsSink, GeneratedModule, MemorySink, ModuleSink};
