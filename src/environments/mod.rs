//! `\begin{...}` environments.

pub mod array;

pub use array::{ArrayAtom, ArrayBuilder, ColumnAlign};

use crate::atom::Atom;
use crate::namespace::KeyMap;
use crate::parser::Parser;
use crate::types::ParseError;

/// Parses an environment body after `\begin{name}` up to and including the
/// matching `\end{name}`.
pub type EnvHandler = fn(&mut Parser<'_>, &str) -> Result<Atom, ParseError>;

/// The environment registry type held by `MathContext`.
pub type Environments = KeyMap<String, EnvHandler>;

/// Register every built-in environment.
#[must_use]
pub fn create_environments() -> Environments {
    let mut registry = Environments::default();
    array::define(&mut registry);
    registry
}
