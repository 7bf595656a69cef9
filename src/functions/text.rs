//! Plain-text runs inside math.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::Atom;
use crate::font_metrics::FontStyle;
use crate::parser::Parser;
use crate::types::{ParseError, Token};

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &["text", "textrm", "mbox", "textit", "textbf", "textsf", "texttt"],
        handler: text_handler,
    });
}

/// The argument is captured verbatim and handed to the host's text shaper.
fn text_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let font_style = match func.text.as_str() {
        "\\textit" => FontStyle::Italic,
        "\\textbf" => FontStyle::Bold,
        "\\textsf" => FontStyle::SansSerif,
        "\\texttt" => FontStyle::Typewriter,
        _ => FontStyle::Roman,
    };
    let text = parser.parse_raw_group()?;
    Ok(Atom::Text { text, font_style })
}
