//! Geometric transforms of finished subtrees.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::{Atom, Transform};
use crate::parser::Parser;
use crate::types::{ParseError, ParseErrorKind, Token};

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &["scalebox"],
        handler: scalebox_handler,
    });
    define_function(registry, &FunctionDefSpec {
        names: &["rotatebox"],
        handler: rotatebox_handler,
    });
    define_function(registry, &FunctionDefSpec {
        names: &["reflectbox"],
        handler: reflectbox_handler,
    });
}

fn parse_number(text: &str, func: &Token) -> Result<f64, ParseError> {
    text.trim().parse().map_err(|_| {
        ParseError::with_token(
            ParseErrorKind::InvalidSize {
                size: text.trim().to_owned(),
            },
            func,
        )
    })
}

/// `\scalebox{x}[y]{body}`; `y` defaults to `x`.
fn scalebox_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let x = parse_number(&parser.parse_raw_group()?, func)?;
    let y = match parser.parse_raw_optional_group()? {
        Some(text) => parse_number(&text, func)?,
        None => x,
    };
    let body = parser.parse_arg()?;
    Ok(Atom::Transformed {
        body: Box::new(body),
        transform: Transform::Scale { x, y },
    })
}

fn rotatebox_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let degrees = parse_number(&parser.parse_raw_group()?, func)?;
    let body = parser.parse_arg()?;
    Ok(Atom::Transformed {
        body: Box::new(body),
        transform: Transform::Rotate { degrees },
    })
}

fn reflectbox_handler(parser: &mut Parser<'_>, _func: &Token) -> Result<Atom, ParseError> {
    let body = parser.parse_arg()?;
    Ok(Atom::Transformed {
        body: Box::new(body),
        transform: Transform::Reflect,
    })
}
