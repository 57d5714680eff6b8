//! `circa inspect`: prints the synthesised interface and the declared
//! signals of one circuit, and for the top circuit its instantiation on the
//! configured board.

use circa_diagnostics::DiagnosticSink;
use circa_hdl::{
    declare_signals, synthesize_ports, top_level_instance, Dialect, GenContext, GeneratorRegistry,
};
use circa_netlist::Direction;

use crate::pipeline::{load_project, render_diagnostics, resolve_project_root};
use crate::{GlobalArgs, InspectArgs};

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Input => "input",
        Direction::Output => "output",
        Direction::InOut => "inout",
    }
}

/// Runs the `circa inspect` command.
pub fn run(args: &InspectArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let project = load_project(&project_dir)?;
    let design = &project.design;

    let id = match args.circuit.as_deref() {
        Some(name) => design
            .find(name)
            .ok_or_else(|| format!("circuit `{name}` not found in the design"))?,
        None => design.top,
    };
    let circuit = design
        .circuit(id)
        .ok_or_else(|| format!("circuit {id} not found in the design"))?;
    let netlist = &circuit.netlist;

    println!("circuit {}", circuit.name);
    println!("ports:");
    for port in synthesize_ports(netlist) {
        println!(
            "  {:<6} {:<35} {}",
            direction_name(port.direction),
            port.name,
            port.width
        );
    }
    println!("signals:");
    for signal in declare_signals(netlist) {
        println!("  {:<42} {}", signal.name, signal.width);
    }

    if id == design.top {
        let dialect = args
            .dialect
            .map(Dialect::from)
            .unwrap_or_else(|| project.config.hdl.dialect.into());
        let registry = GeneratorRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        let ctx = GenContext::new(dialect, design, &registry, &sink);
        println!("top-level instance ({}):", dialect.name());
        for line in top_level_instance(&ctx, &project.config.board) {
            println!("{line}");
        }
        if !global.quiet {
            render_diagnostics(&sink.diagnostics(), global.color);
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use circa_config::CONFIG_FILE;

    const CONFIG: &str = r#"
[project]
name = "demo"
top = "main"

[[board.resources]]
name = "GPIO"
pins = [ { hdl = "gpio_0" } ]
"#;

    const NETLIST: &str = r#"{
  "top": 1,
  "circuits": [
    { "name": "leaf", "netlist": { "inout_bubbles": 1 } },
    { "name": "main", "netlist": {
        "nets": [ { "width": 1 } ],
        "inout_bubbles": 1,
        "inputs": [
          { "label": "a", "ends": [ { "direction": "output", "bits": [ { "net": 0, "bit": 0 } ] } ] }
        ],
        "subcircuits": [
          { "label": "u1", "kind": { "subcircuit": { "circuit": 0 } },
            "bubbles": { "inout": { "start": 0, "end": 0 } } }
        ]
    } }
  ]
}"#;

    fn project() -> (tempfile::TempDir, GlobalArgs) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), CONFIG).unwrap();
        std::fs::write(dir.path().join("netlist.json"), NETLIST).unwrap();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(dir.path().display().to_string()),
        };
        (dir, global)
    }

    #[test]
    fn inspects_top_and_named_circuit() {
        let (_dir, global) = project();
        let top = InspectArgs {
            circuit: None,
            dialect: Some(crate::HdlLanguage::Verilog),
        };
        assert_eq!(run(&top, &global).unwrap(), 0);

        let leaf = InspectArgs {
            circuit: Some("leaf".to_string()),
            dialect: None,
        };
        assert_eq!(run(&leaf, &global).unwrap(), 0);
    }

    #[test]
    fn unknown_circuit_is_an_error() {
        let (_dir, global) = project();
        let args = InspectArgs {
            circuit: Some("cpu".to_string()),
            dialect: None,
        };
        let err = run(&args, &global).err().unwrap();
        assert!(err.to_string().contains("`cpu`"));
    }
}
