//! `\raisebox{dy}{body}`.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::Atom;
use crate::parser::Parser;
use crate::types::{ParseError, Token};

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &["raisebox"],
        handler: raisebox_handler,
    });
}

fn raisebox_handler(parser: &mut Parser<'_>, _func: &Token) -> Result<Atom, ParseError> {
    let dy = parser.parse_size_arg()?;
    let body = parser.parse_arg()?;
    Ok(Atom::Raise {
        body: Box::new(body),
        dy,
    })
}
