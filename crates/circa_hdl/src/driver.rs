//! The depth-first generation of a whole design.
//!
//! Every distinct definition is emitted exactly once: the primitives a
//! circuit uses come first, then its sub-circuits (children before their
//! parent), then the circuit itself. A set of handled definition names is
//! threaded through the whole run. The first fatal error aborts it.

use crate::circuit::{instantiated_circuit, missing_generator, CircuitGenerator};
use crate::context::GenContext;
use crate::error::GenerateError;
use crate::generator::HdlGenerator;
use crate::naming::definition_name;
use crate::sink::{GeneratedModule, ModuleSink};
use circa_common::correct_label;
use circa_netlist::CircuitId;
use serde::Serialize;
use std::collections::BTreeSet;

/// One emitted definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    /// Definition name.
    pub name: String,
    /// Directory below the dialect root.
    pub relative_directory: String,
    /// Hex content hash of the emitted text.
    pub content_hash: String,
    /// Number of emitted lines.
    pub lines: usize,
}

/// The outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    /// Definition name of the top circuit.
    pub top: String,
    /// HDL dialect name.
    pub dialect: String,
    /// Emitted definitions, in emission order.
    pub modules: Vec<ModuleSummary>,
}

struct Run<'s> {
    sink: &'s mut dyn ModuleSink,
    handled: BTreeSet<String>,
    hierarchy: Vec<String>,
    modules: Vec<ModuleSummary>,
}

impl Run<'_> {
    fn scope(&self) -> String {
        self.hierarchy.join("/")
    }

    fn emit(
        &mut self,
        ctx: &GenContext<'_>,
        name: &str,
        generator: &dyn HdlGenerator,
    ) -> Result<(), GenerateError> {
        let module = GeneratedModule::new(
            name,
            generator.relative_directory(),
            generator.interface(ctx, name)?,
            generator.body(ctx, name)?,
        );
        self.sink
            .write_module(&module, ctx.dialect)
            .map_err(|e| ctx.fatal(GenerateError::Sink(e)))?;
        self.modules.push(ModuleSummary {
            name: module.name.clone(),
            relative_directory: module.relative_directory.clone(),
            content_hash: module.content_hash.to_string(),
            lines: module.interface.len() + module.body.len(),
        });
        Ok(())
    }

    fn circuit(
        &mut self,
        root: &GenContext<'_>,
        id: CircuitId,
        gated: bool,
    ) -> Result<(), GenerateError> {
        let ctx = root.at_scope(self.scope());
        let circuit = root.design.circuit(id).ok_or_else(|| {
            ctx.fatal(GenerateError::MissingCircuit {
                instance: self.hierarchy.last().cloned().unwrap_or_default(),
                circuit: id.as_raw(),
            })
        })?;
        let netlist = &circuit.netlist;

        for component in &netlist.components {
            let resolved = root
                .registry
                .resolve(component)
                .ok_or_else(|| ctx.fatal(missing_generator(component)))?;
            if self.handled.contains(&resolved.name) {
                continue;
            }
            if !resolved.generator.is_only_inlined() {
                self.emit(&ctx, &resolved.name, resolved.generator.as_ref())?;
            }
            self.handled.insert(resolved.name);
        }

        for instance in &netlist.subcircuits {
            let Some((child_id, child, child_gated)) = instantiated_circuit(&ctx, instance)? else {
                continue;
            };
            let name = definition_name(&child.name, child_gated);
            if self.handled.contains(&name) {
                continue;
            }
            let segment = if instance.label.is_empty() {
                name.clone()
            } else {
                correct_label(&instance.label)
            };
            self.hierarchy.push(segment);
            let result = self.circuit(root, child_id, child_gated);
            self.hierarchy.pop();
            result?;
            self.handled.insert(name);
        }

        let name = definition_name(&circuit.name, gated);
        if !self.handled.contains(&name) {
            self.emit(&ctx, &name, &CircuitGenerator::new(circuit))?;
            self.handled.insert(name);
        }
        Ok(())
    }
}

/// Generates every definition reachable from the design's top circuit into
/// `sink`.
///
/// On the first fatal error the run stops and the error is returned; it has
/// already been reported to the context's diagnostic sink.
pub fn generate_design(
    ctx: &GenContext<'_>,
    sink: &mut dyn ModuleSink,
) -> Result<GenerationSummary, GenerateError> {
    let design = ctx.design;
    let top = design.top_circuit().ok_or_else(|| {
        ctx.fatal(GenerateError::MissingCircuit {
            instance: String::new(),
            circuit: design.top.as_raw(),
        })
    })?;
    let mut run = Run {
        sink,
        handled: BTreeSet::new(),
        hierarchy: vec![correct_label(&top.name)],
        modules: Vec::new(),
    };
    run.circuit(ctx, design.top, false)?;
    Ok(GenerationSummary {
        top: definition_name(&top.name, false),
        dialect: ctx.dialect.name().to_string(),
        modules: run.modules,
    })
}
