//! End-to-end tests from a JSON netlist document to generated text.

use circa_conformance::run_generation;
use circa_diagnostics::Severity;
use circa_hdl::format::pad;
use circa_hdl::Dialect;
use circa_netlist::{load_design_from_str, Design};

const GATED_MUX: &str = include_str!("fixtures/gated_mux.json");

fn design() -> Design {
    load_design_from_str(GATED_MUX).unwrap()
}

#[test]
fn loads_fixture() {
    let design = design();
    assert_eq!(design.top_circuit().unwrap().name, "main");
    assert_eq!(design.circuits.len(), 2);
}

#[test]
fn vhdl_from_json() {
    let result = run_generation(&design(), Dialect::Vhdl);
    assert!(result.outcome.is_ok());
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.names(), ["Multiplexer_4", "leaf_gated", "main"]);

    let leaf = result.text("leaf_gated");
    assert!(leaf.contains("ENTITY leaf_gated IS"));
    assert!(leaf.contains(&format!("   {} <= logisimClockTree0(0);", pad("s_logisimNet4"))));
    assert!(leaf.contains(&format!("   {} <= d0;", pad("s_logisimBus0(3 DOWNTO 0)"))));
    assert!(leaf.contains("   Multiplexer_4_1 : Multiplexer_4"));
    assert!(leaf.contains("   COMPONENT Multiplexer_4"));

    let main = result.text("main");
    assert!(main.contains("   COMPONENT leaf_gated"));
    assert!(main.contains("   leaf_gated_1 : leaf_gated"));
    assert!(main.contains(&format!(
        "      PORT MAP ( {} => s_logisimBus0(3 DOWNTO 0),",
        pad("d0")
    )));
    assert!(main.contains(&format!("{} => s_logisimBus0(7 DOWNTO 4),", pad("d1"))));
    assert!(main.contains(&format!("{} => logisimClockTree0,", pad("logisimClockTree0"))));
    assert!(main.contains(&format!("{} => s_logisimNet1,", pad("s"))));
    assert!(main.contains(&format!("{} => s_logisimBus2(3 DOWNTO 0) );", pad("y"))));
    assert!(main.contains(&format!("   {} <= s_logisimBus2(3 DOWNTO 0);", pad("result"))));
}

#[test]
fn verilog_from_json() {
    let result = run_generation(&design(), Dialect::Verilog);
    assert!(result.outcome.is_ok());
    assert_eq!(result.count(Severity::Error), 0);

    let mux = result.text("Multiplexer_4");
    assert!(mux.starts_with("module Multiplexer_4( Sel,"));
    assert!(mux.contains("(Sel) ? MuxIn_1 : MuxIn_0;"));

    let main = result.text("main");
    assert!(main.contains("   leaf_gated leaf_gated_1 (.d0(s_logisimBus0[3:0]),"));
    assert!(main.contains(".d1(s_logisimBus0[7:4]),"));
    assert!(main.contains(".y(s_logisimBus2[3:0]));"));
    assert!(main.contains("   wire [7:0] s_logisimBus0;"));
    assert!(!main.contains("s_logisimBus3"));
}

#[test]
fn serialized_design_generates_the_same_text() {
    let original = design();
    let json = serde_json::to_string_pretty(&original).unwrap();
    let reloaded = load_design_from_str(&json).unwrap();

    for dialect in [Dialect::Vhdl, Dialect::Verilog] {
        let a = run_generation(&original, dialect);
        let b = run_generation(&reloaded, dialect);
        assert_eq!(a.modules, b.modules);
    }
}

#[test]
fn cyclic_hierarchy_rejected() {
    let text = GATED_MUX.replace(
        r#"{ "subcircuit": { "circuit": 0, "gated": true } }"#,
        r#"{ "subcircuit": { "circuit": 1, "gated": true } }"#,
    );
    assert_ne!(text, GATED_MUX);
    assert!(load_design_from_str(&text).is_err());
}
