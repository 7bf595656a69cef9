//! Style switches: `\displaystyle` and friends.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::Atom;
use crate::parser::Parser;
use crate::style::Style;
use crate::types::{ParseError, ParseErrorKind, Token};

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &["displaystyle", "textstyle", "scriptstyle", "scriptscriptstyle"],
        handler: styling_handler,
    });
}

/// A style switch applies to the remainder of the enclosing group.
fn styling_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let style = match func.text.as_str() {
        "\\displaystyle" => Style::DISPLAY,
        "\\textstyle" => Style::TEXT,
        "\\scriptstyle" => Style::SCRIPT,
        "\\scriptscriptstyle" => Style::SCRIPTSCRIPT,
        _ => {
            return Err(ParseError::with_token(
                ParseErrorKind::UndefinedControlSequence {
                    name: func.text.clone(),
                },
                func,
            ));
        }
    };
    let body = parser.parse_expression(None)?;
    Ok(Atom::Styling { style, body })
}
