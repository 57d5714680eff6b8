//! Destinations for generated modules.

use crate::dialect::Dialect;
use crate::error::SinkError;
use circa_common::ContentHash;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// The text of one generated definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Definition name.
    pub name: String,
    /// Directory below the dialect root.
    pub relative_directory: String,
    /// Interface text (VHDL entity, Verilog module header).
    pub interface: Vec<String>,
    /// Body text (VHDL architecture, rest of the Verilog module).
    pub body: Vec<String>,
    /// Hash of interface and body.
    pub content_hash: ContentHash,
}

impl GeneratedModule {
    /// Creates a module, hashing its text.
    pub fn new(
        name: impl Into<String>,
        relative_directory: impl Into<String>,
        interface: Vec<String>,
        body: Vec<String>,
    ) -> Self {
        let mut all = interface.clone();
        all.extend(body.iter().cloned());
        Self {
            name: name.into(),
            relative_directory: relative_directory.into(),
            content_hash: ContentHash::from_lines(&all),
            interface,
            body,
        }
    }

    /// File names and contents of this module in `dialect`.
    pub fn files(&self, dialect: Dialect) -> Vec<(String, Vec<String>)> {
        dialect.module_files(&self.name, &self.interface, &self.body)
    }
}

/// Receives every generated definition exactly once.
pub trait ModuleSink {
    /// Stores one generated module.
    fn write_module(&mut self, module: &GeneratedModule, dialect: Dialect) -> Result<(), SinkError>;
}

/// Writes modules below a root directory, as
/// `<root>/<dialect>/<relative directory>/<file>`.
#[derive(Debug)]
pub struct FsSink {
    root: PathBuf,
    written: Vec<PathBuf>,
}

impl FsSink {
    /// Creates a sink writing below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Vec::new(),
        }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every file written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ModuleSink for FsSink {
    fn write_module(&mut self, module: &GeneratedModule, dialect: Dialect) -> Result<(), SinkError> {
        let dir = self
            .root
            .join(dialect.name())
            .join(&module.relative_directory);
        std::fs::create_dir_all(&dir).map_err(|source| SinkError::Io {
            path: dir.clone(),
            source,
        })?;
        for (file, lines) in module.files(dialect) {
            let path = dir.join(file);
            let mut content = lines.join("\n");
            content.push('\n');
            std::fs::write(&path, content).map_err(|source| SinkError::Io {
                path: path.clone(),
                source,
            })?;
            self.written.push(path);
        }
        Ok(())
    }
}

/// Keeps modules in memory, in emission order. A definition written twice
/// is rejected.
#[derive(Debug, Default)]
pub struct MemorySink {
    modules: Vec<GeneratedModule>,
    names: BTreeSet<String>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The modules received, in emission order.
    pub fn modules(&self) -> &[GeneratedModule] {
        &self.modules
    }

    /// Looks up a module by definition name.
    pub fn get(&self, name: &str) -> Option<&GeneratedModule> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Names of the modules received, in emission order.
    pub fn names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name.as_str()).collect()
    }

    /// Consumes the sink, returning its modules.
    pub fn into_modules(self) -> Vec<GeneratedModule> {
        self.modules
    }
}

impl ModuleSink for MemorySink {
    fn write_module(&mut self, module: &GeneratedModule, _dialect: Dialect) -> Result<(), SinkError> {
        if !self.names.insert(module.name.clone()) {
            return Err(SinkError::Duplicate(module.name.clone()));
        }
        self.modules.push(module.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(name: &str) -> GeneratedModule {
        GeneratedModule::new(
            name,
            "circuit",
            vec![format!("module {name};")],
            vec!["endmodule".to_string()],
        )
    }

    #[test]
    fn hash_covers_interface_and_body() {
        let a = module("a");
        assert_eq!(a.content_hash, ContentHash::from_lines(&["module a;", "endmodule"]));
        assert_ne!(a.content_hash, module("b").content_hash);
    }

    #[test]
    fn memory_sink_rejects_duplicates() {
        let mut sink = MemorySink::new();
        sink.write_module(&module("a"), Dialect::Verilog).unwrap();
        sink.write_module(&module("b"), Dialect::Verilog).unwrap();
        let err = sink.write_module(&module("a"), Dialect::Verilog).unwrap_err();
        assert!(matches!(err, SinkError::Duplicate(ref n) if n == "a"));
        assert_eq!(sink.names(), ["a", "b"]);
        assert!(sink.get("b").is_some());
    }

    #[test]
    fn fs_sink_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FsSink::new(dir.path());
        sink.write_module(&module("adder"), Dialect::Verilog).unwrap();
        let path = dir.path().join("verilog").join("circuit").join("adder.v");
        assert_eq!(sink.written(), [path.clone()]);
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "module adder;\nendmodule\n"
        );

        let vhdl = GeneratedModule::new("adder", "circuit", vec!["ENTITY".into()], vec!["ARCH".into()]);
        sink.write_module(&vhdl, Dialect::Vhdl).unwrap();
        let base = dir.path().join("vhdl").join("circuit");
        assert!(base.join("adder_entity.vhd").is_file());
        assert_eq!(
            std::fs::read_to_string(base.join("adder_behavior.vhd")).unwrap(),
            "ARCH\n"
        );
    }
}
