//! Large operators and named functions.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::{Atom, Limits};
use crate::parser::Parser;
use crate::types::{ParseError, ParseErrorKind, Token};
use phf::phf_map;

/// Glyph-based big operators; the flag says whether limits go above and
/// below by default in display style.
static BIG_OPS: phf::Map<&'static str, (char, bool)> = phf_map! {
    "sum" => ('\u{2211}', true),
    "prod" => ('\u{220f}', true),
    "coprod" => ('\u{2210}', true),
    "bigcap" => ('\u{22c2}', true),
    "bigcup" => ('\u{22c3}', true),
    "bigsqcup" => ('\u{2a06}', true),
    "bigwedge" => ('\u{22c0}', true),
    "bigvee" => ('\u{22c1}', true),
    "bigoplus" => ('\u{2a01}', true),
    "bigotimes" => ('\u{2a02}', true),
    "bigodot" => ('\u{2a00}', true),
    "biguplus" => ('\u{2a04}', true),
    "int" => ('\u{222b}', false),
    "iint" => ('\u{222c}', false),
    "iiint" => ('\u{222d}', false),
    "oint" => ('\u{222e}', false),
    "smallint" => ('\u{222b}', false),
};

/// Upright function names; the flag marks limit-taking operators.
static NAMED_OPS: phf::Map<&'static str, bool> = phf_map! {
    "sin" => false, "cos" => false, "tan" => false, "cot" => false,
    "sec" => false, "csc" => false,
    "arcsin" => false, "arccos" => false, "arctan" => false,
    "sinh" => false, "cosh" => false, "tanh" => false, "coth" => false,
    "log" => false, "ln" => false, "lg" => false, "exp" => false,
    "arg" => false, "deg" => false, "dim" => false, "hom" => false,
    "ker" => false, "Pr" => false,
    "det" => true, "gcd" => true, "lim" => true,
    "max" => true, "min" => true, "sup" => true, "inf" => true,
};

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &[
            "sum", "prod", "coprod", "bigcap", "bigcup", "bigsqcup",
            "bigwedge", "bigvee", "bigoplus", "bigotimes", "bigodot",
            "biguplus", "int", "iint", "iiint", "oint", "smallint",
        ],
        handler: big_op_handler,
    });
    define_function(registry, &FunctionDefSpec {
        names: &[
            "sin", "cos", "tan", "cot", "sec", "csc",
            "arcsin", "arccos", "arctan",
            "sinh", "cosh", "tanh", "coth",
            "log", "ln", "lg", "exp", "arg", "deg", "dim", "hom",
            "ker", "Pr", "det", "gcd", "lim", "max", "min", "sup", "inf",
        ],
        handler: named_op_handler,
    });
    define_function(registry, &FunctionDefSpec {
        names: &["limsup", "liminf"],
        handler: limvariant_handler,
    });
    define_function(registry, &FunctionDefSpec {
        names: &["operatorname"],
        handler: operatorname_handler,
    });
}

fn big_op_handler(_parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let name = func.text.trim_start_matches('\\');
    let Some(&(symbol, takes_limits)) = BIG_OPS.get(name) else {
        return Err(unknown(func));
    };
    Ok(Atom::Op {
        symbol: Some(symbol),
        name: None,
        limits: if takes_limits { Limits::Default } else { Limits::Never },
    })
}

fn named_op_handler(_parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let name = func.text.trim_start_matches('\\');
    let Some(&takes_limits) = NAMED_OPS.get(name) else {
        return Err(unknown(func));
    };
    Ok(Atom::Op {
        symbol: None,
        name: Some(name.to_owned()),
        limits: if takes_limits { Limits::Default } else { Limits::Never },
    })
}

fn limvariant_handler(_parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let name = match func.text.as_str() {
        "\\limsup" => "lim sup",
        _ => "lim inf",
    };
    Ok(Atom::Op {
        symbol: None,
        name: Some(name.to_owned()),
        limits: Limits::Default,
    })
}

/// `\operatorname{...}`: an upright named operator from raw text.
fn operatorname_handler(parser: &mut Parser<'_>, _func: &Token) -> Result<Atom, ParseError> {
    let name = parser.parse_raw_group()?;
    Ok(Atom::Op {
        symbol: None,
        name: Some(name),
        limits: Limits::Never,
    })
}

fn unknown(func: &Token) -> ParseError {
    ParseError::with_token(
        ParseErrorKind::UndefinedControlSequence {
            name: func.text.clone(),
        },
        func,
    )
}
