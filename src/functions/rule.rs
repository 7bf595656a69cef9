//! `\rule[shift]{width}{height}`.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::Atom;
use crate::parser::Parser;
use crate::types::{ParseError, Token};
use crate::units::Dimension;

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &["rule"],
        handler: rule_handler,
    });
}

fn rule_handler(parser: &mut Parser<'_>, _func: &Token) -> Result<Atom, ParseError> {
    let shift = match parser.parse_raw_optional_group()? {
        Some(text) => Some(Dimension::parse(&text)?),
        None => None,
    };
    let width = parser.parse_size_arg()?;
    let height = parser.parse_size_arg()?;
    Ok(Atom::Rule {
        shift,
        width,
        height,
    })
}
