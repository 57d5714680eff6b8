//! Configuration types deserialized from `circa.toml`.

use serde::Deserialize;

/// The top-level project configuration parsed from `circa.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Core project metadata (name, top circuit, netlist file).
    pub project: ProjectMeta,
    /// HDL output settings.
    #[serde(default)]
    pub hdl: HdlConfig,
    /// Board resource catalog for top-level bidirectional bubbles.
    #[serde(default)]
    pub board: BoardConfig,
}

/// Core project metadata required in every `circa.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
    /// Name of the top-level circuit in the netlist.
    pub top: String,
    /// Path to the JSON netlist, relative to the project directory.
    #[serde(default = "default_netlist")]
    pub netlist: String,
    /// A brief description of the project.
    #[serde(default)]
    pub description: String,
}

fn default_netlist() -> String {
    "netlist.json".to_string()
}

/// Which HDL dialect to emit. Selected once, before a generation run.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HdlDialect {
    /// VHDL-93 entity/architecture pairs (default).
    #[default]
    Vhdl,
    /// Verilog-2001 modules.
    Verilog,
}

/// HDL generation settings.
#[derive(Debug, Deserialize)]
pub struct HdlConfig {
    /// The dialect to generate.
    #[serde(default)]
    pub dialect: HdlDialect,
    /// Output directory, relative to the project directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Label of the designated system clock; leaving it unconnected is only
    /// reported as a note.
    #[serde(default = "default_system_clock")]
    pub system_clock: String,
}

impl Default for HdlConfig {
    fn default() -> Self {
        Self {
            dialect: HdlDialect::default(),
            output_dir: default_output_dir(),
            system_clock: default_system_clock(),
        }
    }
}

fn default_output_dir() -> String {
    "hdl".to_string()
}

fn default_system_clock() -> String {
    "sysclk".to_string()
}

/// The board resource catalog: which physical resource owns each
/// bidirectional bubble of the top-level design.
#[derive(Debug, Default, Deserialize)]
pub struct BoardConfig {
    /// Mapped board resources.
    #[serde(default)]
    pub resources: Vec<BoardResource>,
}

/// One board resource (e.g. a GPIO header) owning a contiguous range of
/// inout bubbles.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardResource {
    /// Resource name, used in diagnostics.
    pub name: String,
    /// First inout bubble index owned by this resource.
    #[serde(default)]
    pub bubble_start: u32,
    /// One entry per owned bubble, in bubble order.
    #[serde(default)]
    pub pins: Vec<PinMapping>,
}

/// How one pin of a board resource is mapped.
///
/// An entry with neither `hdl` nor `open` is an unmapped pin.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PinMapping {
    /// The HDL-visible name of the physical pin.
    #[serde(default)]
    pub hdl: Option<String>,
    /// The pin is intentionally left open.
    #[serde(default)]
    pub open: bool,
    /// The pin is active-low on the board and needs external inversion.
    #[serde(default)]
    pub inverted: bool,
}

impl BoardResource {
    /// Returns the local pin index that carries the given inout bubble, or
    /// `None` if this resource does not own it.
    pub fn io_bubble_pin_id(&self, bubble: u32) -> Option<usize> {
        let offset = bubble.checked_sub(self.bubble_start)? as usize;
        (offset < self.pins.len()).then_some(offset)
    }

    /// Returns `true` if the pin is mapped to a physical resource or marked open.
    pub fn is_mapped(&self, pin: usize) -> bool {
        self.pins
            .get(pin)
            .is_some_and(|p| p.hdl.is_some() || p.open)
    }

    /// Returns `true` if the pin is intentionally left open.
    pub fn is_open_mapped(&self, pin: usize) -> bool {
        self.pins.get(pin).is_some_and(|p| p.open)
    }

    /// Returns `true` if the pin needs external inversion.
    pub fn is_external_inverted(&self, pin: usize) -> bool {
        self.pins.get(pin).is_some_and(|p| p.inverted)
    }

    /// Returns the HDL-visible name of the pin, if mapped.
    pub fn hdl_string(&self, pin: usize) -> Option<&str> {
        self.pins.get(pin).and_then(|p| p.hdl.as_deref())
    }

    /// Returns the half-open bubble range owned by this resource, or `None`
    /// if it does not fit in the bubble index space.
    pub fn bubble_range(&self) -> Option<std::ops::Range<u32>> {
        let len = u32::try_from(self.pins.len()).ok()?;
        Some(self.bubble_start..self.bubble_start.checked_add(len)?)
    }
}
