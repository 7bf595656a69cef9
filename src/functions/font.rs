//! Math font switches.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::Atom;
use crate::font_metrics::FontStyle;
use crate::parser::Parser;
use crate::types::{ParseError, ParseErrorKind, Token};
use phf::phf_map;

static FONTS: phf::Map<&'static str, FontStyle> = phf_map! {
    "mathrm" => FontStyle::Roman,
    "mathit" => FontStyle::Italic,
    "mathnormal" => FontStyle::Italic,
    "mathbf" => FontStyle::Bold,
    "boldsymbol" => FontStyle::BoldItalic,
    "mathsf" => FontStyle::SansSerif,
    "mathtt" => FontStyle::Typewriter,
    "mathcal" => FontStyle::Calligraphic,
    "mathbb" => FontStyle::Blackboard,
    "mathfrak" => FontStyle::Fraktur,
};

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &[
            "mathrm", "mathit", "mathnormal", "mathbf", "boldsymbol",
            "mathsf", "mathtt", "mathcal", "mathbb", "mathfrak",
        ],
        handler: font_handler,
    });
}

fn font_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let name = func.text.trim_start_matches('\\');
    let Some(&font_style) = FONTS.get(name) else {
        return Err(ParseError::with_token(
            ParseErrorKind::UndefinedControlSequence {
                name: func.text.clone(),
            },
            func,
        ));
    };
    let body = parser.parse_arg()?;
    Ok(Atom::Font {
        font_style,
        body: Box::new(body),
    })
}
