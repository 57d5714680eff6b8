//! Assignment statements between component ends and module-local signals.
//!
//! Three entry points cover the wiring of a module body:
//!
//! - [`hdl_wiring`] connects every forced-root net to the nets it aliases.
//! - [`signal_map`] binds one end of a component (a circuit pin) to its
//!   signals with assignment statements.
//! - [`net_map`] computes the actuals of one end for a port-map association.
//!
//! The end-level functions share one classification: single bit, fully
//! unconnected bus, continuous bus, or a per-bit mix.

use crate::context::GenContext;
use crate::error::GenerateError;
use crate::errors;
use crate::format::{assignment, LineBuffer};
use crate::naming::{bus_name, net_name, signal_of};
use circa_netlist::{ComponentEnd, Direction, Netlist, NetlistComponent};

/// Emits the wiring of every forced-root net: per bit, one statement per
/// recorded driver (driving the forced-root signal) and one per recorded
/// load (driven by it). Identical statements are emitted once.
pub fn hdl_wiring(ctx: &GenContext<'_>, netlist: &Netlist) -> Vec<String> {
    let dialect = ctx.dialect;
    let mut lines = LineBuffer::new();
    for (id, net) in netlist.nets.iter().filter(|(_, n)| n.forced_root) {
        for bit in 0..net.width {
            let this = if net.is_bus() {
                dialect.index(&bus_name(id), bit)
            } else {
                net_name(id)
            };
            for source in net.sources(bit) {
                if let Some(driver) = signal_of(netlist, dialect, *source) {
                    lines.push_unique(assignment(dialect, &this, &driver));
                }
            }
            for sink in net.sinks(bit) {
                if let Some(load) = signal_of(netlist, dialect, *sink) {
                    lines.push_unique(assignment(dialect, &load, &this));
                }
            }
        }
    }
    lines.into_lines()
}

/// How the bits of one end reach the module's signals.
enum EndConnection {
    /// A single-bit end, with its signal if connected.
    Single(Option<String>),
    /// A bus end with no connected bit.
    Unconnected,
    /// A bus end mapped in order onto one range of a root bus.
    Continuous(String),
    /// Anything else: the signal of each bit, least significant first.
    PerBit(Vec<Option<String>>),
}

fn lookup_end<'c>(
    ctx: &GenContext<'_>,
    component: &'c NetlistComponent,
    end_index: usize,
) -> Result<&'c ComponentEnd, GenerateError> {
    component.end(end_index).ok_or_else(|| {
        ctx.fatal(GenerateError::EndIndexOutOfRange {
            component: component.label.clone(),
            index: end_index,
            ends: component.nr_of_ends(),
        })
    })
}

fn classify(
    ctx: &GenContext<'_>,
    netlist: &Netlist,
    component: &NetlistComponent,
    end_index: usize,
    end: &ComponentEnd,
) -> EndConnection {
    let dialect = ctx.dialect;
    let bits: Vec<Option<String>> = end
        .bits
        .iter()
        .map(|bit| bit.and_then(|point| signal_of(netlist, dialect, point)))
        .collect();
    if bits.len() == 1 {
        return EndConnection::Single(bits.into_iter().next().flatten());
    }
    if bits.iter().all(Option::is_none) {
        return EndConnection::Unconnected;
    }
    if let Some(range) = netlist.continuous_range(component, end_index) {
        return EndConnection::Continuous(dialect.range(&bus_name(range.net), range.hi, range.lo));
    }
    EndConnection::PerBit(bits)
}

/// Nothing drives an end the component itself drives, so leaving such an
/// end unconnected is legal.
fn may_float(end: &ComponentEnd) -> bool {
    end.direction != Direction::Input
}

/// Binds end `end_index` of `component` to the module signals with
/// assignment statements, using `port` as the name on the component side.
///
/// Unconnected inputs are tied to the zero literal and reported as severe
/// warnings; unconnected outputs produce no statement.
pub fn signal_map(
    ctx: &GenContext<'_>,
    netlist: &Netlist,
    port: &str,
    component: &NetlistComponent,
    end_index: usize,
) -> Result<Vec<String>, GenerateError> {
    let dialect = ctx.dialect;
    let end = lookup_end(ctx, component, end_index)?;
    if end.width() == 0 {
        return Ok(Vec::new());
    }
    let output = may_float(end);
    // Outputs drive the module signal; inputs read it.
    let bind = |port_side: &str, signal: &str| {
        if output {
            assignment(dialect, signal, port_side)
        } else {
            assignment(dialect, port_side, signal)
        }
    };

    let lines = match classify(ctx, netlist, component, end_index, end) {
        EndConnection::Single(Some(signal)) => vec![bind(port, &signal)],
        EndConnection::Single(None) | EndConnection::Unconnected if output => Vec::new(),
        EndConnection::Single(None) => {
            ctx.report(errors::warn_unconnected_input(port));
            vec![assignment(dialect, port, &dialect.zero_vector(1))]
        }
        EndConnection::Unconnected => {
            ctx.report(errors::warn_unconnected_bus(port));
            vec![assignment(dialect, port, &dialect.zero_vector(end.width()))]
        }
        EndConnection::Continuous(range) => vec![bind(port, &range)],
        EndConnection::PerBit(bits) => {
            let mut lines = Vec::with_capacity(bits.len());
            for (bit, signal) in bits.into_iter().enumerate() {
                let bit = bit as u32;
                let port_bit = dialect.index(port, bit);
                match signal {
                    Some(signal) => lines.push(bind(&port_bit, &signal)),
                    None if output => {}
                    None => {
                        ctx.report(errors::warn_unconnected_bit(port, bit));
                        lines.push(assignment(dialect, &port_bit, &dialect.zero_vector(1)));
                    }
                }
            }
            lines
        }
    };
    Ok(lines)
}

/// Computes the port-map associations of end `end_index` of `component`
/// for the formal port `formal`.
///
/// Unconnected outputs are left open; unconnected inputs are tied to the
/// zero literal and reported as severe warnings.
pub fn net_map(
    ctx: &GenContext<'_>,
    netlist: &Netlist,
    formal: &str,
    component: &NetlistComponent,
    end_index: usize,
) -> Result<Vec<(String, String)>, GenerateError> {
    let dialect = ctx.dialect;
    let end = lookup_end(ctx, component, end_index)?;
    let output = may_float(end);
    let entry = |actual: String| vec![(formal.to_string(), actual)];

    let map = match classify(ctx, netlist, component, end_index, end) {
        EndConnection::Single(Some(signal)) => entry(signal),
        EndConnection::Single(None) | EndConnection::Unconnected if output => {
            entry(dialect.unconnected().to_string())
        }
        EndConnection::Single(None) => {
            ctx.report(errors::warn_unconnected_input(formal));
            entry(dialect.zero_vector(1))
        }
        EndConnection::Unconnected => {
            ctx.report(errors::warn_unconnected_bus(formal));
            entry(dialect.zero_vector(end.width()))
        }
        EndConnection::Continuous(range) => entry(range),
        EndConnection::PerBit(bits) => {
            let actuals: Vec<String> = bits
                .into_iter()
                .enumerate()
                .map(|(bit, signal)| match signal {
                    Some(signal) => signal,
                    // A `1'bz` inside an output concatenation is not a legal
                    // Verilog-2001 lvalue; common synthesis tools accept it.
                    None if output => dialect.unconnected_bit().to_string(),
                    None => {
                        ctx.report(errors::warn_unconnected_bit(formal, bit as u32));
                        dialect.zero_vector(1)
                    }
                })
                .collect();
            dialect.bit_associations(formal, &actuals)
        }
    };
    Ok(map)
}
