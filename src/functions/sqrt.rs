//! Radicals.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::Atom;
use crate::parser::Parser;
use crate::types::{ParseError, Token};

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &["sqrt"],
        handler: sqrt_handler,
    });
}

fn sqrt_handler(parser: &mut Parser<'_>, _func: &Token) -> Result<Atom, ParseError> {
    let degree = parser.parse_optional_arg()?;
    let body = parser.parse_arg()?;
    Ok(Atom::Radical {
        degree: degree.map(Box::new),
        body: Box::new(body),
    })
}
