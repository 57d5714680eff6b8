//! A complete design: named circuit definitions and the top circuit.

use crate::arena::Arena;
use crate::ids::CircuitId;
use crate::netlist::Netlist;
use serde::{Deserialize, Serialize};

/// A named circuit definition and its netlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    /// The circuit name, used to derive the HDL definition name.
    pub name: String,
    /// Connectivity of the circuit.
    #[serde(default)]
    pub netlist: Netlist,
}

impl Circuit {
    /// Creates a circuit definition.
    pub fn new(name: impl Into<String>, netlist: Netlist) -> Self {
        Self {
            name: name.into(),
            netlist,
        }
    }
}

/// All circuit definitions of a design.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Design {
    /// Circuit definitions, indexed by [`CircuitId`].
    pub circuits: Arena<CircuitId, Circuit>,
    /// The top-level circuit.
    pub top: CircuitId,
}

impl Design {
    /// Creates an empty design.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a circuit definition and returns its ID.
    pub fn add_circuit(&mut self, circuit: Circuit) -> CircuitId {
        self.circuits.alloc(circuit)
    }

    /// Returns the circuit with the given ID.
    pub fn circuit(&self, id: CircuitId) -> Option<&Circuit> {
        self.circuits.try_get(id)
    }

    /// Returns the top-level circuit.
    pub fn top_circuit(&self) -> Option<&Circuit> {
        self.circuit(self.top)
    }

    /// Finds a circuit by name.
    pub fn find(&self, name: &str) -> Option<CircuitId> {
        self.circuits
            .iter()
            .find(|(_, c)| c.name == name)
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_by_name() {
        let mut design = Design::new();
        let main = design.add_circuit(Circuit::new("main", Netlist::new()));
        let alu = design.add_circuit(Circuit::new("alu", Netlist::new()));
        assert_eq!(design.find("alu"), Some(alu));
        assert_eq!(design.find("main"), Some(main));
        assert_eq!(design.find("missing"), None);
        assert_eq!(design.top_circuit().map(|c| c.name.as_str()), Some("main"));
    }

    #[test]
    fn unknown_circuit_is_none() {
        let design = Design::new();
        assert!(design.circuit(CircuitId::from_raw(0)).is_none());
        assert!(design.top_circuit().is_none());
    }
}
