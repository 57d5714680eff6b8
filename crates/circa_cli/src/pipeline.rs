//! Shared pipeline helpers for CLI commands.
//!
//! Project root resolution, loading of the configuration and the netlist
//! design, and diagnostic rendering.

use std::path::{Path, PathBuf};

use circa_config::{ProjectConfig, CONFIG_FILE};
use circa_diagnostics::{Diagnostic, DiagnosticRenderer, Severity, TerminalRenderer};
use circa_netlist::Design;

use crate::GlobalArgs;

/// A loaded project: its directory, configuration and design.
pub struct Project {
    /// The project directory.
    pub dir: PathBuf,
    /// The parsed `circa.toml`.
    pub config: ProjectConfig,
    /// The netlist design, with `top` set to the configured top circuit.
    pub design: Design,
}

/// Walks up from `start` looking for the nearest directory containing `circa.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file → parent dir, dir → itself).
/// Otherwise walks up from the current directory looking for `circa.toml`.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match global.config {
        Some(ref config_path) => {
            let p = PathBuf::from(config_path);
            if p.is_file() {
                Ok(p.parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from(".")))
            } else {
                Ok(p)
            }
        }
        None => find_project_root(&std::env::current_dir()?),
    }
}

/// Loads the configuration and the design of the project in `dir`, and
/// selects the configured top circuit.
pub fn load_project(dir: &Path) -> Result<Project, Box<dyn std::error::Error>> {
    let config = circa_config::load_config(dir)?;
    let netlist_path = dir.join(&config.project.netlist);
    let mut design = circa_netlist::load_design(&netlist_path)?;
    design.top = design.find(&config.project.top).ok_or_else(|| {
        format!(
            "top circuit `{}` not found in {}",
            config.project.top,
            netlist_path.display()
        )
    })?;
    Ok(Project {
        dir: dir.to_path_buf(),
        config,
        design,
    })
}

/// Renders diagnostics to stderr in rustc style.
pub fn render_diagnostics(diagnostics: &[Diagnostic], color: bool) {
    let renderer = TerminalRenderer::new(color);
    for diag in diagnostics {
        eprintln!("{}", renderer.render(diag));
    }
}

/// Formats the `Result:` summary line of a run.
pub fn result_line(diagnostics: &[Diagnostic]) -> String {
    let count = |severity: Severity| diagnostics.iter().filter(|d| d.severity == severity).count();
    format!(
        "   Result: {} error(s), {} severe warning(s), {} warning(s)",
        count(Severity::Error),
        count(Severity::SevereWarning),
        count(Severity::Warning)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use circa_diagnostics::{Category, DiagnosticCode};

    const CONFIG: &str = r#"
[project]
name = "demo"
top = "main"
netlist = "design.json"
"#;

    const DESIGN: &str = r#"{
  "circuits": [
    { "name": "leaf", "netlist": {} },
    { "name": "main", "netlist": {} }
  ],
  "top": 0
}"#;

    fn project_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), CONFIG).unwrap();
        std::fs::write(dir.path().join("design.json"), DESIGN).unwrap();
        dir
    }

    #[test]
    fn finds_root_from_subdirectory() {
        let dir = project_dir();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_project_root(&nested).unwrap(), dir.path());
    }

    #[test]
    fn config_flag_selects_root() {
        let dir = project_dir();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(dir.path().join(CONFIG_FILE).display().to_string()),
        };
        assert_eq!(resolve_project_root(&global).unwrap(), dir.path());
    }

    #[test]
    fn load_selects_configured_top() {
        let dir = project_dir();
        let project = load_project(dir.path()).unwrap();
        assert_eq!(project.config.project.name, "demo");
        assert_eq!(project.design.top_circuit().unwrap().name, "main");
    }

    #[test]
    fn unknown_top_is_an_error() {
        let dir = project_dir();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            CONFIG.replace("top = \"main\"", "top = \"cpu\""),
        )
        .unwrap();
        let err = load_project(dir.path()).err().unwrap();
        assert!(err.to_string().contains("`cpu`"));
    }

    #[test]
    fn result_line_counts() {
        let code = DiagnosticCode::new(Category::Warning, 301);
        let diags = vec![
            Diagnostic::severe_warning(code, "a"),
            Diagnostic::severe_warning(code, "b"),
            Diagnostic::warning(code, "c"),
        ];
        assert_eq!(
            result_line(&diags),
            "   Result: 0 error(s), 2 severe warning(s), 1 warning(s)"
        );
    }
}
