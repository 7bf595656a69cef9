//! Explicit horizontal spacing.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::Atom;
use crate::parser::Parser;
use crate::types::{ParseError, Token};
use crate::units::{Dimension, Unit};

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &["kern", "mkern", "hspace", "mskip"],
        handler: kern_handler,
    });
    define_function(registry, &FunctionDefSpec {
        names: &[",", ":", ";", "!", " "],
        handler: space_handler,
    });
}

fn kern_handler(parser: &mut Parser<'_>, _func: &Token) -> Result<Atom, ParseError> {
    let size = parser.parse_size_arg()?;
    Ok(Atom::Kern(size))
}

/// The fixed spacing control symbols, in mu.
fn space_handler(_parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let mu = match func.text.as_str() {
        "\\," => 3.0,
        "\\:" => 4.0,
        "\\;" => 5.0,
        "\\!" => -3.0,
        // "\ ": an ordinary interword space, one third of a quad.
        _ => 6.0,
    };
    Ok(Atom::Kern(Dimension::new(mu, Unit::Mu)))
}
