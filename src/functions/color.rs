//! Color commands.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::Atom;
use crate::parser::Parser;
use crate::types::{parse_color, ParseError, ParseErrorKind, Token};

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &["textcolor"],
        handler: textcolor_handler,
    });
    define_function(registry, &FunctionDefSpec {
        names: &["color"],
        handler: color_handler,
    });
}

fn parse_color_arg(parser: &mut Parser<'_>, func: &Token) -> Result<crate::types::Color, ParseError> {
    let text = parser.parse_raw_group()?;
    parse_color(text.trim()).ok_or_else(|| {
        ParseError::with_token(
            ParseErrorKind::InvalidColor {
                color: text.trim().to_owned(),
            },
            func,
        )
    })
}

/// `\textcolor{color}{body}`: scoped to the argument.
fn textcolor_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let color = parse_color_arg(parser, func)?;
    let body = parser.parse_arg()?;
    Ok(Atom::Color {
        color,
        body: vec![body],
    })
}

/// `\color{color}`: applies to the rest of the enclosing group.
fn color_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let color = parse_color_arg(parser, func)?;
    let body = parser.parse_expression(None)?;
    Ok(Atom::Color { color, body })
}
