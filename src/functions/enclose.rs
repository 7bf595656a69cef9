//! Frames and strike-throughs.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::{Atom, Notation};
use crate::parser::Parser;
use crate::types::{ParseError, ParseErrorKind, Token};

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &[
            "boxed", "fbox", "doublebox", "ovalbox",
            "cancel", "bcancel", "xcancel", "sout",
        ],
        handler: enclose_handler,
    });
}

fn enclose_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let notation = match func.text.as_str() {
        "\\boxed" | "\\fbox" => Notation::Frame,
        "\\doublebox" => Notation::DoubleFrame,
        "\\ovalbox" => Notation::RoundedFrame,
        "\\cancel" => Notation::StrikeUp,
        "\\bcancel" => Notation::StrikeDown,
        "\\xcancel" => Notation::StrikeCross,
        "\\sout" => Notation::StrikeHorizontal,
        _ => {
            return Err(ParseError::with_token(
                ParseErrorKind::UndefinedControlSequence {
                    name: func.text.clone(),
                },
                func,
            ));
        }
    };
    let body = parser.parse_arg()?;
    Ok(Atom::Enclose {
        body: Box::new(body),
        notation,
    })
}
