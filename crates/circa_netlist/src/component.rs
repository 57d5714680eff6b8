//! Placed components: primitives, sub-circuit instances, pins and clocks.

use crate::ids::CircuitId;
use crate::net::ConnectionPoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Direction of a component end, seen from the component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The component reads the connected nets.
    Input,
    /// The component drives the connected nets.
    Output,
    /// Bidirectional.
    InOut,
}

/// One end (port) of a placed component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEnd {
    /// Direction of the end.
    pub direction: Direction,
    /// Pin label, set on the ends of sub-circuit instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Connection of each bit; `None` for an unconnected bit. The length
    /// of this list is the width of the end.
    pub bits: Vec<Option<ConnectionPoint>>,
}

impl ComponentEnd {
    /// Creates an unlabeled end with the given bit connections.
    pub fn new(direction: Direction, bits: Vec<Option<ConnectionPoint>>) -> Self {
        Self {
            direction,
            label: None,
            bits,
        }
    }

    /// Creates an unlabeled end of `width` unconnected bits.
    pub fn unconnected(direction: Direction, width: u32) -> Self {
        Self::new(direction, vec![None; width as usize])
    }

    /// Sets the pin label of this end.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Bit width of the end.
    pub fn width(&self) -> u32 {
        self.bits.len() as u32
    }

    /// Returns `true` if the component drives this end.
    pub fn is_output(&self) -> bool {
        self.direction == Direction::Output
    }

    /// Returns `true` if at least one bit is connected.
    pub fn is_connected(&self) -> bool {
        self.bits.iter().any(Option::is_some)
    }

    /// Returns the connection of `bit`, if any.
    pub fn bit(&self, bit: u32) -> Option<ConnectionPoint> {
        self.bits.get(bit as usize).copied().flatten()
    }
}

/// An inclusive range of bubble indices inside the enclosing module's
/// bubble bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BubbleRange {
    /// Lowest index.
    pub start: u32,
    /// Highest index.
    pub end: u32,
}

impl BubbleRange {
    /// Number of bubbles in the range.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start) + 1
    }

    /// Always `false`: an inclusive range holds at least one bubble.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// The bubble ranges a component contributes to its enclosing module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BubbleRanges {
    /// Range in the input bubble bus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<BubbleRange>,
    /// Range in the output bubble bus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<BubbleRange>,
    /// Range in the inout bubble bus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inout: Option<BubbleRange>,
}

/// A primitive attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// An integer attribute (widths, input counts).
    Int(i64),
    /// A boolean attribute.
    Bool(bool),
    /// A free-form text attribute.
    Text(String),
}

/// Attributes of a primitive, keyed by name. Sorted so that definition
/// names derived from them are stable.
pub type Attributes = BTreeMap<String, AttrValue>;

/// What a placed component is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// A circuit pin or clock source; its end is the pin's connection.
    #[default]
    Pin,
    /// A primitive handled by a registered generator.
    Primitive {
        /// Name of the generator factory (e.g. `"AND"`).
        factory: String,
        /// Factory attributes.
        #[serde(default)]
        attributes: Attributes,
    },
    /// An instance of another circuit of the design.
    Subcircuit {
        /// The instantiated circuit.
        circuit: CircuitId,
        /// Selects the clock-gated variant of the definition.
        #[serde(default)]
        gated: bool,
    },
}

/// A placed occurrence of a primitive, a sub-circuit, a pin or a clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetlistComponent {
    /// The user label.
    #[serde(default)]
    pub label: String,
    /// What this component is.
    #[serde(default)]
    pub kind: ComponentKind,
    /// Ordered ends (ports).
    #[serde(default)]
    pub ends: Vec<ComponentEnd>,
    /// Bubble ranges contributed to the enclosing module.
    #[serde(default)]
    pub bubbles: BubbleRanges,
}

impl NetlistComponent {
    /// Creates a pin component with a single end.
    pub fn pin(label: impl Into<String>, end: ComponentEnd) -> Self {
        Self {
            label: label.into(),
            kind: ComponentKind::Pin,
            ends: vec![end],
            bubbles: BubbleRanges::default(),
        }
    }

    /// Creates a primitive component.
    pub fn primitive(
        label: impl Into<String>,
        factory: impl Into<String>,
        attributes: Attributes,
        ends: Vec<ComponentEnd>,
    ) -> Self {
        Self {
            label: label.into(),
            kind: ComponentKind::Primitive {
                factory: factory.into(),
                attributes,
            },
            ends,
            bubbles: BubbleRanges::default(),
        }
    }

    /// Creates a sub-circuit instance.
    pub fn subcircuit(
        label: impl Into<String>,
        circuit: CircuitId,
        gated: bool,
        ends: Vec<ComponentEnd>,
    ) -> Self {
        Self {
            label: label.into(),
            kind: ComponentKind::Subcircuit { circuit, gated },
            ends,
            bubbles: BubbleRanges::default(),
        }
    }

    /// Returns end `index`, or `None` if out of range.
    pub fn end(&self, index: usize) -> Option<&ComponentEnd> {
        self.ends.get(index)
    }

    /// Number of ends.
    pub fn nr_of_ends(&self) -> usize {
        self.ends.len()
    }

    /// Returns `true` if end `index` exists and has a connected bit.
    pub fn is_end_connected(&self, index: usize) -> bool {
        self.end(index).is_some_and(ComponentEnd::is_connected)
    }

    /// Returns `true` for a sub-circuit instance of the gated variant.
    pub fn is_gated_instance(&self) -> bool {
        matches!(self.kind, ComponentKind::Subcircuit { gated: true, .. })
    }

    /// Returns an integer attribute of a primitive.
    pub fn int_attribute(&self, name: &str) -> Option<i64> {
        match &self.kind {
            ComponentKind::Primitive { attributes, .. } => match attributes.get(name) {
                Some(AttrValue::Int(v)) => Some(*v),
                _ => None,
            },
            _ => None,
        }
    }
}

/// A clock source placed in a circuit, with the clock tree it feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSource {
    /// The clock component; its end 0 is the clock output.
    pub component: NetlistComponent,
    /// Index of the clock tree, or `None` if it could not be resolved.
    #[serde(default)]
    pub tree: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::NetId;

    fn cp(net: u32, bit: u32) -> Option<ConnectionPoint> {
        Some(ConnectionPoint::new(NetId::from_raw(net), bit))
    }

    #[test]
    fn end_queries() {
        let end = ComponentEnd::new(Direction::Input, vec![cp(0, 0), None]);
        assert_eq!(end.width(), 2);
        assert!(end.is_connected());
        assert!(!end.is_output());
        assert_eq!(end.bit(1), None);
        assert_eq!(end.bit(5), None);
        assert!(!ComponentEnd::unconnected(Direction::Output, 4).is_connected());
    }

    #[test]
    fn component_end_lookup() {
        let comp = NetlistComponent::primitive(
            "g1",
            "AND",
            Attributes::new(),
            vec![
                ComponentEnd::new(Direction::Output, vec![cp(0, 0)]),
                ComponentEnd::unconnected(Direction::Input, 1),
            ],
        );
        assert_eq!(comp.nr_of_ends(), 2);
        assert!(comp.is_end_connected(0));
        assert!(!comp.is_end_connected(1));
        assert!(!comp.is_end_connected(2));
        assert!(!comp.is_gated_instance());
    }

    #[test]
    fn bubble_range_len() {
        assert_eq!(BubbleRange { start: 3, end: 3 }.len(), 1);
        assert_eq!(BubbleRange { start: 2, end: 5 }.len(), 4);
    }

    #[test]
    fn kind_json_shape() {
        let json = r#"{ "label": "u1", "kind": { "subcircuit": { "circuit": 2, "gated": true } } }"#;
        let comp: NetlistComponent = serde_json::from_str(json).unwrap();
        assert!(comp.is_gated_instance());
        assert!(comp.ends.is_empty());

        let json = r#"{ "kind": { "primitive": { "factory": "Multiplexer", "attributes": { "width": 4 } } } }"#;
        let comp: NetlistComponent = serde_json::from_str(json).unwrap();
        assert_eq!(comp.int_attribute("width"), Some(4));

        let pin: NetlistComponent = serde_json::from_str(r#"{ "label": "a", "kind": "pin" }"#).unwrap();
        assert_eq!(pin.kind, ComponentKind::Pin);
    }
}
