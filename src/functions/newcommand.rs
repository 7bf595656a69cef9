//! User macro definition: `\newcommand` and friends.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::Atom;
use crate::macros::{count_args, MacroContextInterface, MacroDefinition, MacroExpansion};
use crate::parser::Parser;
use crate::types::{ParseError, ParseErrorKind, Token};

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &["newcommand", "renewcommand", "providecommand"],
        handler: newcommand_handler,
    });
}

/// `\newcommand{\name}[n]{body}`. Everything is read unexpanded straight
/// from the gullet so an existing definition of the name cannot fire while
/// it is being redefined.
fn newcommand_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let gullet = parser.gullet_mut();
    gullet.consume_spaces()?;

    let first = gullet.pop_token()?;
    let name_token = if first.text == "{" {
        gullet.consume_spaces()?;
        let inner = gullet.pop_token()?;
        gullet.consume_spaces()?;
        let close = gullet.pop_token()?;
        if close.text != "}" {
            return Err(ParseError::with_token(
                ParseErrorKind::ExpectedToken {
                    expected: "}".to_owned(),
                    found: close.text.clone(),
                },
                &close,
            ));
        }
        inner
    } else {
        first
    };
    let Some(name) = name_token.text.strip_prefix('\\').map(str::to_owned) else {
        return Err(ParseError::with_token(
            ParseErrorKind::ExpectedToken {
                expected: "control sequence".to_owned(),
                found: name_token.text.clone(),
            },
            &name_token,
        ));
    };

    // Optional declared arity.
    let mut declared_args: Option<usize> = None;
    if gullet.future()?.text == "[" {
        gullet.pop_token()?;
        let mut digits = String::new();
        loop {
            let token = gullet.pop_token()?;
            match token.text.as_str() {
                "]" => break,
                text if text.len() == 1 && text.as_bytes()[0].is_ascii_digit() => {
                    digits.push_str(text);
                }
                text => {
                    return Err(ParseError::with_token(
                        ParseErrorKind::InvalidMacroArgumentNumber {
                            value: text.to_owned(),
                        },
                        &token,
                    ));
                }
            }
        }
        declared_args = Some(digits.parse().map_err(|_| {
            ParseError::new(ParseErrorKind::InvalidMacroArgumentNumber { value: digits })
        })?);
    }

    let tokens = gullet.consume_arg()?;
    let num_args = declared_args.unwrap_or_else(|| {
        let body: String = tokens.iter().map(|t| t.text.as_str()).collect();
        count_args(&body)
    });

    let exists = gullet.is_defined(&name_token.text);
    match func.text.as_str() {
        "\\newcommand" if exists => {
            return Err(ParseError::with_token(
                ParseErrorKind::MacroRedefinition { name: name.clone() },
                &name_token,
            ));
        }
        "\\renewcommand" if !exists => {
            return Err(ParseError::with_token(
                ParseErrorKind::RenewUndefined { name: name.clone() },
                &name_token,
            ));
        }
        "\\providecommand" if exists => return Ok(Atom::empty()),
        _ => {}
    }

    gullet.macros_mut().set(
        &name,
        Some(MacroDefinition::Expansion(MacroExpansion {
            tokens,
            num_args,
        })),
        true,
    );
    Ok(Atom::empty())
}
