//! `circa generate`: the HDL generation pipeline.
//!
//! 1. Find the project root and load `circa.toml` and the netlist design
//! 2. Resolve dialect and output directory (CLI flags win over the config)
//! 3. Generate every definition into the output directory
//! 4. Render diagnostics and the summary

use circa_diagnostics::{Diagnostic, DiagnosticSink};
use circa_hdl::{generate_design, Dialect, FsSink, GenContext, GenerationSummary, GeneratorRegistry};
use serde::Serialize;

use crate::pipeline::{load_project, render_diagnostics, resolve_project_root, result_line};
use crate::{GenerateArgs, GlobalArgs, ReportFormat};

/// The JSON report of a run.
#[derive(Serialize)]
struct Report<'a> {
    summary: Option<&'a GenerationSummary>,
    diagnostics: &'a [Diagnostic],
}

/// Runs the `circa generate` command.
///
/// Returns exit code 0 if generation succeeded, 1 if it was aborted.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let project = load_project(&project_dir)?;
    let config = &project.config;

    let dialect = args
        .dialect
        .map(Dialect::from)
        .unwrap_or_else(|| config.hdl.dialect.into());
    let output_dir = project
        .dir
        .join(args.output_dir.as_deref().unwrap_or(&config.hdl.output_dir));

    if !global.quiet {
        eprintln!("   Generating {} ({})", config.project.top, dialect.name());
    }

    let registry = GeneratorRegistry::with_builtins();
    let sink = DiagnosticSink::new();
    let ctx = GenContext::new(dialect, &project.design, &registry, &sink)
        .with_system_clock(&config.hdl.system_clock);
    let mut files = FsSink::new(&output_dir);
    let outcome = generate_design(&ctx, &mut files);
    let diagnostics = sink.diagnostics();

    match args.format {
        ReportFormat::Text => {
            render_diagnostics(&diagnostics, global.color);
            if let Ok(summary) = &outcome {
                if !global.quiet {
                    if global.verbose {
                        for module in &summary.modules {
                            eprintln!(
                                "     Emitted {}/{} [{}]",
                                module.relative_directory, module.name, module.content_hash
                            );
                        }
                    }
                    eprintln!(
                        "     Wrote {} module(s) to {}",
                        summary.modules.len(),
                        output_dir.display()
                    );
                }
            }
            if !global.quiet {
                eprintln!("{}", result_line(&diagnostics));
            }
        }
        ReportFormat::Json => {
            let report = Report {
                summary: outcome.as_ref().ok(),
                diagnostics: &diagnostics,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(if outcome.is_ok() { 0 } else { 1 })
}
