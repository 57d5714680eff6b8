//! The netlist model consumed by the Circa HDL generator.
//!
//! A [`Design`] is a set of named [`Circuit`] definitions, each owning a
//! [`Netlist`]: its nets (single wires and buses), the primitive and
//! sub-circuit components placed in it, its pins, clock sources and board
//! I/O bubble counts. Connectivity has already been analysed upstream; this
//! crate only stores it and answers the queries the generator needs
//! (root-net resolution, end lookup by pin label, contiguous-bus detection).
//!
//! Designs are exchanged as JSON and loaded with [`load_design`].

#![warn(missing_docs)]

pub mod arena;
pub mod component;
pub mod design;
pub mod error;
pub mod ids;
pub mod loader;
pub mod net;
pub mod netlist;

pub use arena::{Arena, ArenaId};
pub use component::{
    AttrValue, Attributes, BubbleRange, BubbleRanges, ClockSource, ComponentEnd, ComponentKind,
    Direction, NetlistComponent,
};
pub use design::{Circuit, Design};
pub use error::NetlistError;
pub use ids::{CircuitId, NetId};
pub use loader::{load_design, load_design_from_str};
pub use net::{ConnectionPoint, Net, NetSlice};
pub use netlist::{BusRange, Netlist};
