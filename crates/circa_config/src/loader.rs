//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// File name of the project configuration inside a project directory.
pub const CONFIG_FILE: &str = "circa.toml";

/// Loads and validates a `circa.toml` configuration from a project directory.
///
/// Reads `<project_dir>/circa.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `circa.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and the board catalog is consistent.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    if config.project.top.is_empty() {
        return Err(ConfigError::MissingField("project.top".to_string()));
    }
    if config.hdl.output_dir.is_empty() {
        return Err(ConfigError::MissingField("hdl.output_dir".to_string()));
    }

    let resources = &config.board.resources;
    let mut ranges = Vec::with_capacity(resources.len());
    for resource in resources {
        let range = resource.bubble_range().ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "board resource '{}' extends past the last inout bubble",
                resource.name
            ))
        })?;
        ranges.push(range);
        if let Some(pin) = resource
            .pins
            .iter()
            .position(|p| p.open && p.hdl.is_some())
        {
            return Err(ConfigError::ValidationError(format!(
                "pin {pin} of board resource '{}' is both open and mapped",
                resource.name
            )));
        }
    }
    for (i, (a, ra)) in resources.iter().zip(&ranges).enumerate() {
        for (b, rb) in resources[i + 1..].iter().zip(&ranges[i + 1..]) {
            if ra.start < rb.end && rb.start < ra.end {
                return Err(ConfigError::ValidationError(format!(
                    "board resources '{}' and '{}' own overlapping inout bubbles",
                    a.name, b.name
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HdlDialect;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
[project]
name = "blinky"
top = "main"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.name, "blinky");
        assert_eq!(config.project.top, "main");
        assert_eq!(config.project.netlist, "netlist.json");
    }

    #[test]
    fn default_values() {
        let toml = r#"
[project]
name = "test"
top = "main"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.hdl.dialect, HdlDialect::Vhdl);
        assert_eq!(config.hdl.output_dir, "hdl");
        assert_eq!(config.hdl.system_clock, "sysclk");
        assert!(config.board.resources.is_empty());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[project]
name = "blinky"
top = "main"
netlist = "build/design.json"
description = "LED blinker"

[hdl]
dialect = "verilog"
output_dir = "out"
system_clock = "clk50"

[[board.resources]]
name = "GPIO"
bubble_start = 0
pins = [ { hdl = "gpio_0" }, { open = true }, { hdl = "gpio_2", inverted = true }, {} ]

[[board.resources]]
name = "PMOD"
bubble_start = 4
pins = [ { hdl = "pmod_0" } ]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.netlist, "build/design.json");
        assert_eq!(config.hdl.dialect, HdlDialect::Verilog);
        assert_eq!(config.hdl.output_dir, "out");
        assert_eq!(config.hdl.system_clock, "clk50");
        assert_eq!(config.board.resources.len(), 2);
        let gpio = &config.board.resources[0];
        assert_eq!(gpio.pins.len(), 4);
        assert!(gpio.is_open_mapped(1));
        assert!(gpio.is_external_inverted(2));
        assert!(!gpio.is_mapped(3));
    }

    #[test]
    fn missing_name_errors() {
        let toml = r#"
[project]
name = ""
top = "main"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn missing_top_errors() {
        let toml = r#"
[project]
name = "test"
top = ""
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn unknown_dialect_errors() {
        let toml = r#"
[project]
name = "test"
top = "main"

[hdl]
dialect = "systemc"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn overlapping_resources_rejected() {
        let toml = r#"
[project]
name = "test"
top = "main"

[[board.resources]]
name = "A"
bubble_start = 0
pins = [ {}, {} ]

[[board.resources]]
name = "B"
bubble_start = 1
pins = [ {} ]
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn bubble_range_past_index_space_rejected() {
        let toml = r#"
[project]
name = "test"
top = "main"

[[board.resources]]
name = "A"
bubble_start = 4294967294
pins = [ {}, {}, {} ]
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref m) if m.contains("'A'")));
    }

    #[test]
    fn open_and_mapped_pin_rejected() {
        let toml = r#"
[project]
name = "test"
top = "main"

[[board.resources]]
name = "A"
pins = [ { hdl = "x", open = true } ]
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let toml = "this is not valid toml {{{}}}";
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_project_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[project]\nname = \"disk\"\ntop = \"main\"\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.project.name, "disk");
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
