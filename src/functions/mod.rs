//! The built-in command registry.
//!
//! Each submodule registers one family of commands. Handlers receive the
//! parser and the command token and parse their own arguments, so a command's
//! whole grammar lives next to the atom it builds.

pub mod accent;
pub mod color;
pub mod delimsizing;
pub mod enclose;
pub mod font;
pub mod genfrac;
pub mod kern;
pub mod newcommand;
pub mod op;
pub mod overunder;
pub mod phantom;
pub mod raisebox;
pub mod rule;
pub mod sqrt;
pub mod styling;
pub mod text;
pub mod transform;

use crate::atom::Atom;
use crate::namespace::KeyMap;
use crate::parser::Parser;
use crate::types::{ParseError, Token};

/// Parses a command's arguments and builds its atom.
pub type FunctionHandler = fn(&mut Parser<'_>, &Token) -> Result<Atom, ParseError>;

/// Registry entry for one command name.
#[derive(Clone, Copy)]
pub struct FunctionSpec {
    pub handler: FunctionHandler,
}

/// One registration: several names sharing a handler.
pub struct FunctionDefSpec {
    /// Command names without the leading backslash.
    pub names: &'static [&'static str],
    pub handler: FunctionHandler,
}

/// The command registry type held by `MathContext`.
pub type Functions = KeyMap<String, FunctionSpec>;

pub(crate) fn define_function(registry: &mut Functions, spec: &FunctionDefSpec) {
    for name in spec.names {
        registry.insert(
            (*name).to_owned(),
            FunctionSpec {
                handler: spec.handler,
            },
        );
    }
}

/// Register every built-in command family.
#[must_use]
pub fn create_functions() -> Functions {
    let mut registry = Functions::default();
    accent::define(&mut registry);
    color::define(&mut registry);
    delimsizing::define(&mut registry);
    enclose::define(&mut registry);
    font::define(&mut registry);
    genfrac::define(&mut registry);
    kern::define(&mut registry);
    newcommand::define(&mut registry);
    op::define(&mut registry);
    overunder::define(&mut registry);
    phantom::define(&mut registry);
    raisebox::define(&mut registry);
    rule::define(&mut registry);
    sqrt::define(&mut registry);
    styling::define(&mut registry);
    text::define(&mut registry);
    transform::define(&mut registry);
    registry
}
