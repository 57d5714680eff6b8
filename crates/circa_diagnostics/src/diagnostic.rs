//! Structured diagnostic messages with severity, codes, scope, and notes.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message raised while generating HDL.
///
/// Each diagnostic includes:
/// - A severity level and unique diagnostic code
/// - A primary message
/// - The hierarchy scope (instance path) it was raised in, if any
/// - Optional notes and help text
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The unique code identifying the type of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// The hierarchy path (`top/u1/u2`) the diagnostic belongs to; empty at
    /// the top level.
    pub scope: String,
    /// Explanatory footnotes (e.g., "note: ...").
    pub notes: Vec<String>,
    /// Actionable suggestions (e.g., "help: ...").
    pub help: Vec<String>,
}

impl Diagnostic {
    /// Creates a diagnostic with an explicit severity.
    pub fn new(severity: Severity, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            scope: String::new(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates a new error diagnostic with the given code and message.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    /// Creates a new severe-warning diagnostic with the given code and message.
    pub fn severe_warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::SevereWarning, code, message)
    }

    /// Creates a new warning diagnostic with the given code and message.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    /// Creates a new informational diagnostic with the given code and message.
    pub fn note(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Note, code, message)
    }

    /// Sets the hierarchy scope of this diagnostic.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn create_error() {
        let code = DiagnosticCode::new(Category::Error, 301);
        let diag = Diagnostic::error(code, "no generator for `RAM`");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "no generator for `RAM`");
        assert_eq!(format!("{}", diag.code), "E301");
        assert!(diag.scope.is_empty());
    }

    #[test]
    fn create_severe_warning() {
        let code = DiagnosticCode::new(Category::Warning, 301);
        let diag = Diagnostic::severe_warning(code, "input tied to ground");
        assert_eq!(diag.severity, Severity::SevereWarning);
    }

    #[test]
    fn builder_methods() {
        let code = DiagnosticCode::new(Category::Warning, 302);
        let diag = Diagnostic::warning(code, "clock source unconnected")
            .with_scope("main/alu")
            .with_note("the clock tree is left unused")
            .with_help("connect the clock or remove it");
        assert_eq!(diag.scope, "main/alu");
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let code = DiagnosticCode::new(Category::Info, 301);
        let diag = Diagnostic::note(code, "system clock unconnected").with_scope("main");
        let json = serde_json::to_string(&diag).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back.severity, Severity::Note);
        assert_eq!(back.scope, "main");
    }
}
