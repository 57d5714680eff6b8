//! Error types for netlist loading and validation.

/// Errors that can occur when loading or validating a netlist document.
#[derive(Debug, thiserror::Error)]
pub enum NetlistError {
    /// An I/O error occurred while reading the netlist file.
    #[error("failed to read netlist: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON content could not be parsed.
    #[error("failed to parse netlist: {0}")]
    Parse(String),

    /// A connection point or net view refers to a net that does not exist.
    #[error("circuit '{circuit}': reference to unknown net {net}")]
    UnknownNet {
        /// Name of the circuit containing the bad reference.
        circuit: String,
        /// The raw net index that was referenced.
        net: u32,
    },

    /// A connection point or net view addresses a bit outside its net.
    #[error("circuit '{circuit}': bit {bit} is out of range for net {net} of width {width}")]
    BitOutOfRange {
        /// Name of the circuit containing the bad reference.
        circuit: String,
        /// The raw net index.
        net: u32,
        /// The addressed bit.
        bit: u32,
        /// The width of the addressed net.
        width: u32,
    },

    /// A sub-circuit instance or the design top refers to a missing circuit.
    #[error("reference to unknown circuit {0}")]
    UnknownCircuit(u32),

    /// A circuit instantiates itself, directly or through other circuits.
    #[error("circuit '{0}' instantiates itself")]
    CyclicHierarchy(String),

    /// A component is listed in the wrong category (e.g. a sub-circuit
    /// instance among the primitive components).
    #[error("circuit '{circuit}': {message}")]
    Misplaced {
        /// Name of the circuit.
        circuit: String,
        /// What is wrong.
        message: String,
    },
}
