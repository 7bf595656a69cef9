//! Phantom boxes: space without ink.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::Atom;
use crate::parser::Parser;
use crate::types::{ParseError, Token};

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &["phantom", "hphantom", "vphantom"],
        handler: phantom_handler,
    });
}

fn phantom_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let (width, height) = match func.text.as_str() {
        "\\hphantom" => (true, false),
        "\\vphantom" => (false, true),
        _ => (true, true),
    };
    let body = parser.parse_arg()?;
    Ok(Atom::Phantom {
        body: Box::new(body),
        width,
        height,
    })
}
