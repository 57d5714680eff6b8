//! Shared, read-only state of a generation run.
//!
//! [`GenContext`] carries the design, the generator registry, the dialect
//! and the diagnostic sink, plus the hierarchy scope used to attribute
//! diagnostics. A nested context is derived for every level of the
//! instantiation tree.

use crate::dialect::Dialect;
use crate::error::GenerateError;
use crate::registry::GeneratorRegistry;
use circa_diagnostics::{Diagnostic, DiagnosticSink};
use circa_netlist::Design;

/// Label of the system clock when none is configured.
pub const DEFAULT_SYSTEM_CLOCK: &str = "sysclk";

/// Read-only state threaded through a generation run.
#[derive(Clone)]
pub struct GenContext<'a> {
    /// The output dialect.
    pub dialect: Dialect,
    /// The design being generated.
    pub design: &'a Design,
    /// Generators for primitive components.
    pub registry: &'a GeneratorRegistry,
    /// The diagnostic sink.
    pub diagnostics: &'a DiagnosticSink,
    /// Label of the designated system clock.
    pub system_clock: &'a str,
    scope: String,
}

impl<'a> GenContext<'a> {
    /// Creates a context at the root of the hierarchy.
    pub fn new(
        dialect: Dialect,
        design: &'a Design,
        registry: &'a GeneratorRegistry,
        diagnostics: &'a DiagnosticSink,
    ) -> Self {
        Self {
            dialect,
            design,
            registry,
            diagnostics,
            system_clock: DEFAULT_SYSTEM_CLOCK,
            scope: String::new(),
        }
    }

    /// Sets the label of the designated system clock.
    pub fn with_system_clock(mut self, label: &'a str) -> Self {
        self.system_clock = label;
        self
    }

    /// Derives a context for the hierarchy level `scope`.
    pub fn at_scope(&self, scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            ..self.clone()
        }
    }

    /// The hierarchy path diagnostics are attributed to.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Emits a diagnostic attributed to the current scope.
    pub fn report(&self, diag: Diagnostic) {
        self.diagnostics.emit(diag.with_scope(self.scope.clone()));
    }

    /// Emits the error diagnostic of a fatal condition and hands the error
    /// back for propagation.
    pub fn fatal(&self, err: GenerateError) -> GenerateError {
        self.report(Diagnostic::error(err.code(), err.to_string()));
        err
    }
}
