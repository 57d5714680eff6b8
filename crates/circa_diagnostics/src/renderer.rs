//! Diagnostic rendering backends for human-readable output.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// severe warning[W301]: unconnected input `b` tied to ground
///   --> main/alu
///    = note: ...
///    = help: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, severity: Severity, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        let code = match severity {
            Severity::Note => "36",
            Severity::Warning => "33",
            Severity::SevereWarning => "35",
            Severity::Error => "31",
        };
        format!("\x1b[1;{code}m{text}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();

        let header = format!("{}[{}]", diag.severity, diag.code);
        out.push_str(&format!(
            "{}: {}\n",
            self.paint(diag.severity, &header),
            diag.message
        ));

        if !diag.scope.is_empty() {
            out.push_str(&format!("  --> {}\n", diag.scope));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }

        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};

    #[test]
    fn render_error_with_scope() {
        let code = DiagnosticCode::new(Category::Error, 303);
        let diag = Diagnostic::error(code, "cannot find end index of pin `carry`")
            .with_scope("main/adder_1");

        let output = TerminalRenderer::new(false).render(&diag);

        assert!(output.contains("error[E303]: cannot find end index of pin `carry`"));
        assert!(output.contains("--> main/adder_1"));
    }

    #[test]
    fn render_warning_with_notes() {
        let code = DiagnosticCode::new(Category::Warning, 302);
        let diag = Diagnostic::warning(code, "clock component found with no connection")
            .with_note("clock `clk2` is skipped")
            .with_help("connect the clock output or delete the component");

        let output = TerminalRenderer::new(false).render(&diag);

        assert!(output.contains("warning[W302]: clock component found with no connection"));
        assert!(!output.contains("-->"));
        assert!(output.contains("= note: clock `clk2` is skipped"));
        assert!(output.contains("= help: connect the clock output or delete the component"));
    }

    #[test]
    fn render_with_color_wraps_header() {
        let code = DiagnosticCode::new(Category::Warning, 301);
        let diag = Diagnostic::severe_warning(code, "tied to ground");
        let output = TerminalRenderer::new(true).render(&diag);
        assert!(output.starts_with("\x1b[1;35msevere warning[W301]\x1b[0m"));
    }
}
