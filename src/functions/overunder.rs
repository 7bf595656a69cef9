//! Material stacked over or under a base, and horizontal lines.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::Atom;
use crate::parser::Parser;
use crate::types::{ParseError, Token};

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &["overset", "underset"],
        handler: set_handler,
    });
    define_function(registry, &FunctionDefSpec {
        names: &["overline", "underline"],
        handler: line_handler,
    });
}

/// `\overset{annotation}{base}`. The annotation comes first, matching LaTeX.
fn set_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let annotation = Box::new(parser.parse_arg()?);
    let base = Box::new(parser.parse_arg()?);
    let over = func.text == "\\overset";
    Ok(Atom::OverUnder {
        base,
        over: over.then_some(annotation.clone()),
        under: (!over).then_some(annotation),
    })
}

fn line_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let body = Box::new(parser.parse_arg()?);
    Ok(Atom::Line {
        body,
        over: func.text == "\\overline",
    })
}
