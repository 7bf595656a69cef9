//! Accent commands.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::Atom;
use crate::parser::Parser;
use crate::types::{ParseError, ParseErrorKind, Token};
use phf::phf_map;

/// Accent glyph and whether it stretches to the base width.
static ACCENTS: phf::Map<&'static str, (char, bool)> = phf_map! {
    "hat" => ('\u{2c6}', false),
    "widehat" => ('\u{2c6}', true),
    "tilde" => ('\u{2dc}', false),
    "widetilde" => ('\u{2dc}', true),
    "bar" => ('\u{af}', false),
    "vec" => ('\u{20d7}', false),
    "dot" => ('\u{2d9}', false),
    "ddot" => ('\u{a8}', false),
    "acute" => ('\u{b4}', false),
    "grave" => ('\u{60}', false),
    "check" => ('\u{2c7}', false),
    "widecheck" => ('\u{2c7}', true),
    "breve" => ('\u{2d8}', false),
    "mathring" => ('\u{2da}', false),
};

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &[
            "hat", "widehat", "tilde", "widetilde", "bar", "vec", "dot", "ddot",
            "acute", "grave", "check", "widecheck", "breve", "mathring",
        ],
        handler: accent_handler,
    });
}

fn accent_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let name = func.text.trim_start_matches('\\');
    let Some(&(accent, stretchy)) = ACCENTS.get(name) else {
        return Err(ParseError::with_token(
            ParseErrorKind::UnknownAccent {
                accent: func.text.clone(),
            },
            func,
        ));
    };
    let base = parser.parse_arg()?;
    Ok(Atom::Accent {
        accent,
        base: Box::new(base),
        stretchy,
    })
}
