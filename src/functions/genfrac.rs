//! Fractions and binomials.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::Atom;
use crate::parser::Parser;
use crate::style::Style;
use crate::types::{ParseError, ParseErrorKind, Token};
use crate::units::Dimension;

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &["frac", "dfrac", "tfrac", "binom", "cfrac"],
        handler: frac_handler,
    });
    define_function(registry, &FunctionDefSpec {
        names: &["genfrac"],
        handler: genfrac_handler,
    });
}

fn frac_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let numerator = Box::new(parser.parse_arg()?);
    let denominator = Box::new(parser.parse_arg()?);
    let (bar_thickness, left_delim, right_delim, style, continued) = match func.text.as_str() {
        "\\dfrac" => (None, None, None, Some(Style::DISPLAY), false),
        "\\tfrac" => (None, None, None, Some(Style::TEXT), false),
        "\\binom" => (Some(Dimension::ZERO), Some('('), Some(')'), None, false),
        "\\cfrac" => (None, None, None, Some(Style::DISPLAY), true),
        _ => (None, None, None, None, false),
    };
    Ok(Atom::Fraction {
        numerator,
        denominator,
        bar_thickness,
        left_delim,
        right_delim,
        style,
        continued,
    })
}

/// `\genfrac{left}{right}{thickness}{style}{num}{den}`; empty groups fall
/// back to the defaults.
fn genfrac_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let left_delim = delim_from_group(parser, func)?;
    let right_delim = delim_from_group(parser, func)?;
    let thickness = parser.parse_raw_group()?;
    let bar_thickness = if thickness.trim().is_empty() {
        None
    } else {
        Some(Dimension::parse(&thickness)?)
    };
    let style_text = parser.parse_raw_group()?;
    let style = match style_text.trim() {
        "" => None,
        "0" => Some(Style::DISPLAY),
        "1" => Some(Style::TEXT),
        "2" => Some(Style::SCRIPT),
        "3" => Some(Style::SCRIPTSCRIPT),
        other => {
            return Err(ParseError::with_token(
                ParseErrorKind::InvalidSize {
                    size: other.to_owned(),
                },
                func,
            ));
        }
    };
    let numerator = Box::new(parser.parse_arg()?);
    let denominator = Box::new(parser.parse_arg()?);
    Ok(Atom::Fraction {
        numerator,
        denominator,
        bar_thickness,
        left_delim,
        right_delim,
        style,
        continued: false,
    })
}

fn delim_from_group(parser: &mut Parser<'_>, func: &Token) -> Result<Option<char>, ParseError> {
    let text = parser.parse_raw_group()?;
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "." {
        return Ok(None);
    }
    let resolved = match trimmed.strip_prefix('\\') {
        Some(name) => parser.ctx.symbols().command(name).map(|s| s.character),
        None => {
            let mut chars = trimmed.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(ch),
                _ => None,
            }
        }
    };
    resolved.map(Some).ok_or_else(|| {
        ParseError::with_token(
            ParseErrorKind::InvalidDelimiter {
                delimiter: trimmed.to_owned(),
                function: func.text.clone(),
            },
            func,
        )
    })
}
