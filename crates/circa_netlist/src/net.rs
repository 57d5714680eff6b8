//! Nets, buses, and the connection points that reference them.

use crate::ids::NetId;
use serde::{Deserialize, Serialize};

/// A reference to one bit of a net.
///
/// Connection points are referenced, never owned: component ends and the
/// per-bit driver/load lists of nets hold them by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConnectionPoint {
    /// The net this point belongs to.
    pub net: NetId,
    /// The bit index within that net.
    pub bit: u32,
}

impl ConnectionPoint {
    /// Creates a connection point on `bit` of `net`.
    pub fn new(net: NetId, bit: u32) -> Self {
        Self { net, bit }
    }
}

/// Where a non-root net lives inside its parent: bit `i` of the child is
/// bit `offset + i` of `net`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetSlice {
    /// The parent net.
    pub net: NetId,
    /// Bit offset of the child inside the parent.
    #[serde(default)]
    pub offset: u32,
}

/// A single electrical signal group of one or more bits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Net {
    /// Bit width, at least 1.
    pub width: u32,
    /// The net this one is a view over, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NetSlice>,
    /// Set on views that still need explicit wiring statements.
    #[serde(default)]
    pub forced_root: bool,
    /// Drivers of each bit (indexed by bit).
    #[serde(default)]
    pub sources: Vec<Vec<ConnectionPoint>>,
    /// Loads of each bit (indexed by bit).
    #[serde(default)]
    pub sinks: Vec<Vec<ConnectionPoint>>,
}

impl Net {
    /// Creates an independent root net of the given width.
    pub fn new(width: u32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Creates a view of `width` bits over `parent`, starting at `offset`.
    pub fn view(width: u32, parent: NetId, offset: u32) -> Self {
        Self {
            width,
            parent: Some(NetSlice {
                net: parent,
                offset,
            }),
            ..Default::default()
        }
    }

    /// Returns `true` if the net is wider than one bit.
    pub fn is_bus(&self) -> bool {
        self.width > 1
    }

    /// Returns `true` if the net gets its own declared signal.
    pub fn is_root(&self) -> bool {
        self.parent.is_none() || self.forced_root
    }

    /// Returns the recorded drivers of `bit` (empty when none).
    pub fn sources(&self, bit: u32) -> &[ConnectionPoint] {
        self.sources
            .get(bit as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the recorded loads of `bit` (empty when none).
    pub fn sinks(&self, bit: u32) -> &[ConnectionPoint] {
        self.sinks.get(bit as usize).map(Vec::as_slice).unwrap_or(&[])
    }
}
