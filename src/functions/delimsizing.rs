//! Explicitly sized delimiters: `\big` through `\Biggr`.

use super::{define_function, FunctionDefSpec, Functions};
use crate::atom::{Atom, AtomType};
use crate::parser::Parser;
use crate::types::{ParseError, ParseErrorKind, Token};
use phf::phf_map;

/// Size step and spacing category per command.
static SIZED: phf::Map<&'static str, (u8, AtomType)> = phf_map! {
    "big" => (1, AtomType::Ord),
    "Big" => (2, AtomType::Ord),
    "bigg" => (3, AtomType::Ord),
    "Bigg" => (4, AtomType::Ord),
    "bigl" => (1, AtomType::Open),
    "Bigl" => (2, AtomType::Open),
    "biggl" => (3, AtomType::Open),
    "Biggl" => (4, AtomType::Open),
    "bigr" => (1, AtomType::Close),
    "Bigr" => (2, AtomType::Close),
    "biggr" => (3, AtomType::Close),
    "Biggr" => (4, AtomType::Close),
    "bigm" => (1, AtomType::Rel),
    "Bigm" => (2, AtomType::Rel),
    "biggm" => (3, AtomType::Rel),
    "Biggm" => (4, AtomType::Rel),
};

pub fn define(registry: &mut Functions) {
    define_function(registry, &FunctionDefSpec {
        names: &[
            "big", "Big", "bigg", "Bigg",
            "bigl", "Bigl", "biggl", "Biggl",
            "bigr", "Bigr", "biggr", "Biggr",
            "bigm", "Bigm", "biggm", "Biggm",
        ],
        handler: sized_handler,
    });
}

fn sized_handler(parser: &mut Parser<'_>, func: &Token) -> Result<Atom, ParseError> {
    let name = func.text.trim_start_matches('\\');
    let Some(&(size, atom_type)) = SIZED.get(name) else {
        return Err(ParseError::with_token(
            ParseErrorKind::UndefinedControlSequence {
                name: func.text.clone(),
            },
            func,
        ));
    };
    let delimiter = parser.parse_delimiter(&func.text)?.ok_or_else(|| {
        ParseError::with_token(
            ParseErrorKind::InvalidDelimiter {
                delimiter: ".".to_owned(),
                function: func.text.clone(),
            },
            func,
        )
    })?;
    Ok(Atom::SizedDelim {
        delimiter,
        size,
        atom_type,
    })
}
