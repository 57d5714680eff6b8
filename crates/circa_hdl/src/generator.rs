//! The capability every definition generator provides.

use crate::context::GenContext;
use crate::error::GenerateError;
use circa_netlist::{Netlist, NetlistComponent};

/// Produces the HDL text of one kind of definition: a circuit or a
/// primitive.
///
/// A generator either emits a separate definition (interface and body) that
/// its instances instantiate, or is *only inlined*: its instances are folded
/// directly into the body of the enclosing module.
pub trait HdlGenerator {
    /// Directory, relative to the dialect root, the definition is written to.
    fn relative_directory(&self) -> &str;

    /// Returns `true` if instances are folded into the enclosing module and
    /// no definition is emitted.
    fn is_only_inlined(&self) -> bool {
        false
    }

    /// The interface text of the definition `name`.
    fn interface(&self, ctx: &GenContext<'_>, name: &str) -> Result<Vec<String>, GenerateError>;

    /// The body text of the definition `name`.
    fn body(&self, ctx: &GenContext<'_>, name: &str) -> Result<Vec<String>, GenerateError>;

    /// The component declaration an enclosing VHDL architecture needs.
    fn component_declaration(
        &self,
        ctx: &GenContext<'_>,
        name: &str,
    ) -> Result<Vec<String>, GenerateError>;

    /// The instantiation of `component`, the `id`-th instance of definition
    /// `name` in the module whose netlist is `netlist`.
    fn component_map(
        &self,
        ctx: &GenContext<'_>,
        netlist: &Netlist,
        id: usize,
        component: &NetlistComponent,
        name: &str,
    ) -> Result<Vec<String>, GenerateError>;

    /// The statements an inlined instance contributes to the enclosing body.
    fn inlined_code(
        &self,
        _ctx: &GenContext<'_>,
        _netlist: &Netlist,
        _id: usize,
        _component: &NetlistComponent,
        _name: &str,
    ) -> Result<Vec<String>, GenerateError> {
        Ok(Vec::new())
    }
}

/// Name of the `id`-th instance of definition `name` in a module.
pub fn instance_name(name: &str, id: usize) -> String {
    format!("{name}_{id}")
}
