//! Line formatting shared by every emitter: the aligned assignment statement
//! and a line buffer with de-duplication and remark blocks.

use crate::dialect::Dialect;

/// Column the destination of an assignment is padded to before the
/// assignment operator. Emitted text depends on this exact value.
pub const SIGNAL_ALIGNMENT_SIZE: usize = 35;

/// Indentation of statements inside a module body.
pub const INDENT: usize = 3;

/// Pads `text` with spaces up to [`SIGNAL_ALIGNMENT_SIZE`] columns. Longer
/// text is returned unchanged.
pub fn pad(text: &str) -> String {
    format!("{text:<width$}", width = SIGNAL_ALIGNMENT_SIZE)
}

/// Renders one aligned assignment statement:
/// `indent + preamble + pad(destination) + operator + source + ";"`.
pub fn assignment(dialect: Dialect, destination: &str, source: &str) -> String {
    format!(
        "{}{}{}{}{};",
        " ".repeat(INDENT),
        dialect.assign_preamble(),
        pad(destination),
        dialect.assign_operator(),
        source
    )
}

/// An ordered buffer of output lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Appends a line unless an identical line is already present.
    pub fn push_unique(&mut self, line: impl Into<String>) {
        let line = line.into();
        if !self.lines.contains(&line) {
            self.lines.push(line);
        }
    }

    /// Appends all lines of `other`.
    pub fn extend<I, S>(&mut self, other: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(other.into_iter().map(Into::into));
    }

    /// Appends an empty line followed by a dialect remark block, the header
    /// that opens every non-empty body section.
    pub fn push_section(&mut self, dialect: Dialect, title: &str) {
        self.lines.push(String::new());
        self.lines.extend(dialect.remark_block(title, INDENT));
    }

    /// Returns `true` if the buffer holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Borrowed view of the lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the buffer, returning its lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
