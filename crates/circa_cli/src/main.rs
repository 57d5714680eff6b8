//! Circa CLI: structural HDL generation for hierarchical circuit designs.
//!
//! Provides `circa generate` to write the VHDL or Verilog of a project's
//! design and `circa inspect` to print the interface and signals of one
//! circuit.

#![warn(missing_docs)]

mod generate;
mod inspect;
mod pipeline;

use std::io::IsTerminal;
use std::process;

use circa_hdl::Dialect;
use clap::{Parser, Subcommand, ValueEnum};

/// Circa: circuit netlists to structural HDL.
#[derive(Parser, Debug)]
#[command(name = "circa", version, about = "Circa HDL Generator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `circa.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the HDL of the project's design.
    Generate(GenerateArgs),
    /// Print the ports and signals of a circuit.
    Inspect(InspectArgs),
}

/// Arguments for the `circa generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// HDL dialect, overriding `hdl.dialect`.
    #[arg(short, long, value_enum)]
    pub dialect: Option<HdlLanguage>,

    /// Output directory, overriding `hdl.output_dir`.
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `circa inspect` subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Circuit to inspect (default: the top circuit).
    #[arg(long)]
    pub circuit: Option<String>,

    /// HDL dialect, overriding `hdl.dialect`.
    #[arg(short, long, value_enum)]
    pub dialect: Option<HdlLanguage>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// HDL dialect selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HdlLanguage {
    /// VHDL.
    Vhdl,
    /// Verilog.
    Verilog,
}

impl From<HdlLanguage> for Dialect {
    fn from(language: HdlLanguage) -> Self {
        match language {
            HdlLanguage::Vhdl => Dialect::Vhdl,
            HdlLanguage::Verilog => Dialect::Verilog,
        }
    }
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Generate(ref args) => generate::run(args, &global),
        Command::Inspect(ref args) => inspect::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_generate_default() {
        let cli = Cli::parse_from(["circa", "generate"]);
        match cli.command {
            Command::Generate(ref args) => {
                assert!(args.dialect.is_none());
                assert!(args.output_dir.is_none());
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Generate command"),
        }
    }

    #[test]
    fn parse_generate_with_args() {
        let cli = Cli::parse_from([
            "circa",
            "generate",
            "--dialect",
            "verilog",
            "--output-dir",
            "out",
            "--format",
            "json",
        ]);
        match cli.command {
            Command::Generate(ref args) => {
                assert_eq!(args.dialect, Some(HdlLanguage::Verilog));
                assert_eq!(args.output_dir.as_deref(), Some("out"));
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Generate command"),
        }
    }

    #[test]
    fn parse_inspect_circuit() {
        let cli = Cli::parse_from(["circa", "inspect", "--circuit", "alu", "-d", "vhdl"]);
        match cli.command {
            Command::Inspect(ref args) => {
                assert_eq!(args.circuit.as_deref(), Some("alu"));
                assert_eq!(args.dialect, Some(HdlLanguage::Vhdl));
            }
            _ => panic!("expected Inspect command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from([
            "circa",
            "--quiet",
            "--color",
            "never",
            "--config",
            "/path/to/circa.toml",
            "generate",
        ]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.config.as_deref(), Some("/path/to/circa.toml"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["circa", "inspect", "--verbose", "--color", "always"]);
        assert!(cli.verbose);
        assert_eq!(cli.color, ColorChoice::Always);
    }

    #[test]
    fn language_maps_to_dialect() {
        assert_eq!(Dialect::from(HdlLanguage::Vhdl), Dialect::Vhdl);
        assert_eq!(Dialect::from(HdlLanguage::Verilog), Dialect::Verilog);
    }
}
