//! Tests for how component ends reach module signals: continuous bus
//! ranges, per-bit associations, forced-root wiring and the policy for
//! unconnected ends.

use circa_conformance::{bits, cp, run_generation, DesignBuilder, NetlistBuilder};
use circa_diagnostics::Severity;
use circa_hdl::format::pad;
use circa_hdl::Dialect;
use circa_netlist::{ConnectionPoint, Direction, Netlist, NetId};

/// A circuit with a single input `x` of `width` bits and no body.
fn sink_of(width: u32) -> Netlist {
    let mut nb = NetlistBuilder::new();
    let x = if width > 1 { nb.bus(width) } else { nb.wire() };
    nb.input("x", bits(x, 0, width - 1));
    nb.build()
}

fn position(lines: &[&str], needle: &str) -> usize {
    lines
        .iter()
        .position(|l| l.contains(needle))
        .unwrap_or_else(|| panic!("`{needle}` not found"))
}

#[test]
fn continuous_bus_is_one_range_statement() {
    let db = DesignBuilder::new();
    let mut nb = NetlistBuilder::new();
    let d = nb.bus(8);
    nb.input("d", bits(d, 0, 7));
    let design = db.top("top", nb.build());

    let vhdl = run_generation(&design, Dialect::Vhdl);
    let text = vhdl.text("top");
    assert!(text.contains(&format!("   {} <= d;", pad("s_logisimBus0(7 DOWNTO 0)"))));
    assert!(!text.contains("s_logisimBus0(3)"));

    let verilog = run_generation(&design, Dialect::Verilog);
    assert!(verilog
        .text("top")
        .contains(&format!("   assign {} = d;", pad("s_logisimBus0[7:0]"))));
}

#[test]
fn instance_slice_maps_to_range() {
    let mut db = DesignBuilder::new();
    let child = db.circuit("nibble", sink_of(4));
    let mut nb = NetlistBuilder::new();
    let bus = nb.bus(8);
    let middle = nb.view(4, bus, 2);
    nb.input("d", bits(bus, 0, 7)).instance(
        "u1",
        child,
        false,
        vec![("x", Direction::Input, bits(middle, 0, 3))],
    );
    let design = db.top("top", nb.build());

    let vhdl = run_generation(&design, Dialect::Vhdl);
    assert!(vhdl.outcome.is_ok());
    assert!(vhdl
        .text("top")
        .contains(&format!("PORT MAP ( {} => s_logisimBus0(5 DOWNTO 2) );", pad("x"))));
    // Views are not declared; only the root bus is.
    assert!(!vhdl.text("top").contains("s_logisimBus1"));

    let verilog = run_generation(&design, Dialect::Verilog);
    assert!(verilog
        .text("top")
        .contains("   nibble nibble_1 (.x(s_logisimBus0[5:2]));"));
}

#[test]
fn scattered_bits_map_per_bit() {
    let mut db = DesignBuilder::new();
    let child = db.circuit("triple", sink_of(3));
    let mut nb = NetlistBuilder::new();
    let bus = nb.bus(8);
    let w = nb.wire();
    nb.input("d", bits(bus, 0, 7)).input("w", vec![cp(w, 0)]).instance(
        "u1",
        child,
        false,
        vec![(
            "x",
            Direction::Input,
            vec![cp(bus, 0), cp(w, 0), cp(bus, 5)],
        )],
    );
    let design = db.top("top", nb.build());

    let vhdl = run_generation(&design, Dialect::Vhdl);
    let text = vhdl.text("top");
    assert!(text.contains(&format!("{} => s_logisimBus0(0),", pad("x(0)"))));
    assert!(text.contains(&format!("{} => s_logisimNet1,", pad("x(1)"))));
    assert!(text.contains(&format!("{} => s_logisimBus0(5) );", pad("x(2)"))));

    let verilog = run_generation(&design, Dialect::Verilog);
    assert!(verilog
        .text("top")
        .contains(".x({s_logisimBus0[5],s_logisimNet1,s_logisimBus0[0]})"));
}

#[test]
fn forced_root_wiring_section() {
    let db = DesignBuilder::new();
    let mut nb = NetlistBuilder::new();
    let bus = nb.bus(8);
    let a = nb.wire();
    let b = nb.wire();
    let at = |net: NetId| ConnectionPoint::new(net, 0);
    nb.forced_root(2, bus, 6, vec![vec![at(a)], Vec::new()], vec![Vec::new(), vec![at(b)]]);
    nb.input("a", vec![cp(a, 0)]).output("b", vec![cp(b, 0)]);
    let design = db.top("top", nb.build());

    let result = run_generation(&design, Dialect::Vhdl);
    assert!(result.outcome.is_ok());
    let text = result.text("top");
    let lines: Vec<&str> = text.lines().collect();
    let drive = format!("   {} <= s_logisimNet1;", pad("s_logisimBus3(0)"));
    let load = format!("   {} <= s_logisimBus3(1);", pad("s_logisimNet2"));
    let wiring = position(&lines, "Here all wiring is defined");
    let inputs = position(&lines, "Here all input connections are defined");
    assert!(wiring < position(&lines, &drive));
    assert!(position(&lines, &drive) < inputs);
    assert!(wiring < position(&lines, &load));
    assert!(position(&lines, &load) < inputs);
    assert!(text.contains(&format!("   SIGNAL {} : std_logic_vector( 1 DOWNTO 0 );", pad("s_logisimBus3"))));
}

#[test]
fn no_wiring_section_without_forced_roots() {
    let db = DesignBuilder::new();
    let mut nb = NetlistBuilder::new();
    let a = nb.wire();
    nb.input("a", vec![cp(a, 0)]).output("q", vec![cp(a, 0)]);
    let design = db.top("top", nb.build());

    let result = run_generation(&design, Dialect::Verilog);
    let text = result.text("top");
    assert!(!text.contains("Here all wiring is defined"));
    assert!(text.contains("Here all input connections are defined"));
    assert!(text.contains("Here all output connections are defined"));
    assert!(!text.contains("Here all sub-circuits are defined"));
}

#[test]
fn unconnected_inputs_tied_to_zero() {
    let mut db = DesignBuilder::new();
    let mut nb = NetlistBuilder::new();
    let x = nb.wire();
    let y = nb.wire();
    let w = nb.bus(4);
    let q = nb.wire();
    nb.input("x", vec![cp(x, 0)])
        .input("y", vec![cp(y, 0)])
        .input("w", bits(w, 0, 3))
        .output("q", vec![cp(q, 0)]);
    let child = db.circuit("child", nb.build());

    let mut nb = NetlistBuilder::new();
    let a = nb.wire();
    nb.input("a", vec![cp(a, 0)])
        .input("spare", vec![None])
        .instance(
            "u1",
            child,
            false,
            vec![
                ("x", Direction::Input, vec![cp(a, 0)]),
                ("y", Direction::Input, vec![None]),
                ("w", Direction::Input, vec![None; 4]),
                ("q", Direction::Output, vec![None]),
            ],
        );
    let design = db.top("top", nb.build());

    let vhdl = run_generation(&design, Dialect::Vhdl);
    assert!(vhdl.outcome.is_ok());
    assert_eq!(vhdl.count(Severity::SevereWarning), 2);
    assert!(vhdl.of(Severity::SevereWarning).iter().all(|d| d.code.to_string() == "W301"));
    let text = vhdl.text("top");
    assert!(text.contains(&format!("{} => '0' );", pad("y"))));
    assert!(text.contains(&format!("{} => \"0000\",", pad("w"))));
    assert!(text.contains(&format!("{} => OPEN,", pad("q"))));
    // An unconnected circuit input drives nothing.
    assert!(!text.contains("spare;"));

    let verilog = run_generation(&design, Dialect::Verilog);
    let text = verilog.text("top");
    assert!(text.contains(".y(1'd0)"));
    assert!(text.contains(".w(4'd0)"));
    assert!(text.contains(".q(),"));
}

#[test]
fn unconnected_gate_input_warns_with_instance_port() {
    let db = DesignBuilder::new();
    let mut nb = NetlistBuilder::new();
    let a = nb.wire();
    let q = nb.wire();
    nb.input("a", vec![cp(a, 0)])
        .output("q", vec![cp(q, 0)])
        .gate("AND", "g1", vec![cp(q, 0)], vec![vec![cp(a, 0)], vec![None]]);
    let design = db.top("top", nb.build());

    let result = run_generation(&design, Dialect::Verilog);
    assert!(result.outcome.is_ok());
    let warnings = result.of(Severity::SevereWarning);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("`AND_GATE_1.input2`"));
    assert_eq!(warnings[0].scope, "top");
    assert!(result
        .text("top")
        .contains(&format!("   assign {} = s_logisimNet0 & 1'd0;", pad("s_logisimNet1"))));
}

#[test]
fn unconnected_output_pin_reads_zero() {
    let db = DesignBuilder::new();
    let mut nb = NetlistBuilder::new();
    nb.output("q", vec![None]);
    let design = db.top("top", nb.build());

    let result = run_generation(&design, Dialect::Vhdl);
    assert!(result.outcome.is_ok());
    assert_eq!(result.count(Severity::SevereWarning), 1);
    assert!(result.text("top").contains(&format!("   {} <= '0';", pad("q"))));
}
