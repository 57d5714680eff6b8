//! Lookup of primitive generators by factory name.

use crate::generator::HdlGenerator;
use crate::primitives::{GateFactory, GateKind, MultiplexerFactory};
use circa_netlist::{Attributes, ComponentKind, NetlistComponent};
use std::collections::HashMap;

/// Produces the generator of one primitive kind.
pub trait PrimitiveFactory {
    /// The HDL definition name of a primitive with these attributes.
    /// Primitives sharing a name share one definition.
    fn hdl_name(&self, attributes: &Attributes) -> String;

    /// The generator for a primitive with these attributes, or `None` if the
    /// attributes describe nothing this factory can generate.
    fn generator(&self, attributes: &Attributes) -> Option<Box<dyn HdlGenerator>>;
}

/// A primitive resolved to its definition name and generator.
pub struct ResolvedPrimitive {
    /// HDL definition name.
    pub name: String,
    /// The generator of the definition.
    pub generator: Box<dyn HdlGenerator>,
}

/// Registered primitive factories, keyed by factory name.
#[derive(Default)]
pub struct GeneratorRegistry {
    factories: HashMap<String, Box<dyn PrimitiveFactory>>,
}

impl GeneratorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in gates and the multiplexer.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for kind in GateKind::ALL {
            registry.register(kind.factory_name(), GateFactory::new(kind));
        }
        registry.register("Multiplexer", MultiplexerFactory);
        registry
    }

    /// Registers `factory` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, factory: impl PrimitiveFactory + 'static) {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Returns `true` if a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Resolves a primitive component to its definition name and generator.
    /// Returns `None` for components that are not primitives, or whose
    /// factory is missing or rejects the attributes.
    pub fn resolve(&self, component: &NetlistComponent) -> Option<ResolvedPrimitive> {
        let ComponentKind::Primitive {
            factory,
            attributes,
        } = &component.kind
        else {
            return None;
        };
        let factory = self.factories.get(factory)?;
        Some(ResolvedPrimitive {
            name: factory.hdl_name(attributes),
            generator: factory.generator(attributes)?,
        })
    }
}
