//! Diagnostic codes and helper functions for generation errors and warnings.
//!
//! Error codes `E301`--`E306` cover fatal generation failures. Warning codes
//! `W301`--`W303` cover recoverable problems, `W301` and `W303` as severe
//! warnings because the generated design is logically incomplete. `I301`
//! reports the expected case of an unconnected system clock.

use circa_diagnostics::{Category, Diagnostic, DiagnosticCode};

/// No generator registered for a referenced definition.
pub const E301: DiagnosticCode = DiagnosticCode::new(Category::Error, 301);

/// Clock net of a clock source cannot be resolved.
pub const E302: DiagnosticCode = DiagnosticCode::new(Category::Error, 302);

/// End index of a sub-circuit pin cannot be resolved.
pub const E303: DiagnosticCode = DiagnosticCode::new(Category::Error, 303);

/// End index out of range on a component.
pub const E304: DiagnosticCode = DiagnosticCode::new(Category::Error, 304);

/// Sub-circuit definition missing from the design.
pub const E305: DiagnosticCode = DiagnosticCode::new(Category::Error, 305);

/// Module sink failed to write a generated module.
pub const E306: DiagnosticCode = DiagnosticCode::new(Category::Error, 306);

/// Unconnected input tied to ground.
pub const W301: DiagnosticCode = DiagnosticCode::new(Category::Warning, 301);

/// Clock source left unconnected.
pub const W302: DiagnosticCode = DiagnosticCode::new(Category::Warning, 302);

/// Top-level inout bubble without an owning board resource.
pub const W303: DiagnosticCode = DiagnosticCode::new(Category::Warning, 303);

/// The designated system clock left unconnected.
pub const I301: DiagnosticCode = DiagnosticCode::new(Category::Info, 301);

/// Creates a severe warning for an unconnected single-bit input.
pub fn warn_unconnected_input(port: &str) -> Diagnostic {
    Diagnostic::severe_warning(
        W301,
        format!("found an unconnected input `{port}`, tied the pin to ground"),
    )
}

/// Creates a severe warning for a completely unconnected input bus.
pub fn warn_unconnected_bus(port: &str) -> Diagnostic {
    Diagnostic::severe_warning(
        W301,
        format!("found an unconnected input bus `{port}`, tied all bits to ground"),
    )
}

/// Creates a severe warning for one unconnected bit of an input bus.
pub fn warn_unconnected_bit(port: &str, bit: u32) -> Diagnostic {
    Diagnostic::severe_warning(
        W301,
        format!("found an unconnected bit {bit} on input bus `{port}`, tied it to ground"),
    )
}

/// Creates the report for a clock source with no connection. The designated
/// system clock only yields a note.
pub fn unconnected_clock(label: &str, system_clock: &str) -> Diagnostic {
    let message = format!("clock component found with no connection, skipping `{label}`");
    if label == system_clock {
        Diagnostic::note(I301, message)
    } else {
        Diagnostic::warning(W302, message)
            .with_help("connect the clock output or remove the clock component")
    }
}

/// Creates a severe warning for an inout bubble no board resource owns.
pub fn warn_unowned_bubble(bubble: u32) -> Diagnostic {
    Diagnostic::severe_warning(
        W303,
        format!("inout bubble {bubble} is not owned by any board resource, left open"),
    )
    .with_help("add a `[[board.resources]]` entry covering this bubble in circa.toml")
}
