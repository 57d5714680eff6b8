//! Parsing and validation of `circa.toml` project configuration files.
//!
//! This crate reads the project configuration file and produces a strongly-typed
//! [`ProjectConfig`] holding the top circuit, the HDL dialect and output
//! settings, and the optional board resource catalog used to bind top-level
//! bidirectional bubbles to physical pins.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE};
pub use types::*;
