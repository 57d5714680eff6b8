//! Error types of a generation run.

use crate::errors;
use circa_diagnostics::DiagnosticCode;
use std::path::PathBuf;

/// A fatal condition that aborts the whole generation run.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A referenced primitive has no registered generator.
    #[error("cannot find the HDL generator for component `{component}` ({factory})")]
    MissingGenerator {
        /// Label of the component.
        component: String,
        /// Factory name the component asked for.
        factory: String,
    },

    /// A connected clock source has no resolvable clock net.
    #[error("cannot find the clock net of clock source `{clock}`")]
    UnresolvedClockNet {
        /// Label of the clock source.
        clock: String,
    },

    /// A pin of a sub-circuit has no matching end on its instance.
    #[error("could not find the end index of pin `{pin}` on sub-circuit instance `{instance}`")]
    UnresolvedEndIndex {
        /// Label of the instance.
        instance: String,
        /// The sanitised pin label.
        pin: String,
    },

    /// An end index beyond the component's ends was requested.
    #[error("component `{component}` has no end {index} (it has {ends})")]
    EndIndexOutOfRange {
        /// Label of the component.
        component: String,
        /// The requested end index.
        index: usize,
        /// The number of ends of the component.
        ends: usize,
    },

    /// A sub-circuit instance refers to a circuit missing from the design.
    #[error("sub-circuit instance `{instance}` refers to unknown circuit {circuit}")]
    MissingCircuit {
        /// Label of the instance, empty for the design top.
        instance: String,
        /// The raw circuit ID.
        circuit: u32,
    },

    /// The module sink failed.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl GenerateError {
    /// The diagnostic code reported for this error.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            GenerateError::MissingGenerator { .. } => errors::E301,
            GenerateError::UnresolvedClockNet { .. } => errors::E302,
            GenerateError::UnresolvedEndIndex { .. } => errors::E303,
            GenerateError::EndIndexOutOfRange { .. } => errors::E304,
            GenerateError::MissingCircuit { .. } => errors::E305,
            GenerateError::Sink(_) => errors::E306,
        }
    }
}

/// Errors of a [`ModuleSink`](crate::sink::ModuleSink).
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Writing a file or creating its directory failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A definition was written twice in one run.
    #[error("module `{0}` was already written")]
    Duplicate(String),
}
