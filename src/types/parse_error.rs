//! The error type surfaced by parsing and layout.
//!
//! Every failure in the pipeline, from an unmatched brace to a glyph missing
//! from the host font, is reported as a [`ParseError`] carrying a categorised
//! [`ParseErrorKind`] plus the position of the offending input where known.
//! Errors always unwind the whole `parse_and_layout` call; nothing here is
//! fatal to the process.

use crate::types::SourceLocation;
use core::fmt;
use thiserror::Error;

/// Error reported to the caller when parsing or layout fails.
#[derive(Debug, Error)]
#[error("mathbox error: {kind}{context}")]
pub struct ParseError {
    /// Categorised reason for the failure.
    #[source]
    pub kind: Box<ParseErrorKind>,
    /// Start byte offset of the offending input, if known.
    pub position: Option<usize>,
    /// Length in bytes of the offending input, if known.
    pub length: Option<usize>,
    context: ErrorContext,
}

impl ParseError {
    /// Create an error with no location context.
    pub fn new<T: Into<ParseErrorKind>>(kind: T) -> Self {
        Self {
            kind: Box::new(kind.into()),
            position: None,
            length: None,
            context: ErrorContext::None,
        }
    }

    /// Attach a raw byte position and length.
    #[must_use]
    pub fn at(mut self, position: usize, length: usize) -> Self {
        self.position = Some(position);
        self.length = Some(length);
        self
    }

    /// Create an error pointing at the location of `token`.
    pub fn with_token<T: Into<ParseErrorKind>>(
        kind: T,
        token: &dyn ErrorLocationProvider,
    ) -> Self {
        let mut position = None;
        let mut length = None;
        let context = token
            .loc()
            .filter(|loc| loc.start <= loc.end)
            .map_or(ErrorContext::None, |loc| {
                position = Some(loc.start);
                length = Some(loc.end - loc.start);
                ErrorContext::Location(loc.clone())
            });
        Self {
            kind: Box::new(kind.into()),
            position,
            length,
            context,
        }
    }
}

/// The specific reason for a [`ParseError`].
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    // --- parse errors ---
    #[error("{0}")]
    Message(&'static str),
    #[error("Expected '{expected}', got '{found}'")]
    ExpectedToken { expected: String, found: String },
    #[error("Unexpected character: '{character}'")]
    UnexpectedCharacter { character: String },
    #[error("Undefined control sequence: {name}")]
    UndefinedControlSequence { name: String },
    #[error("Unmatched '{{' in formula")]
    UnmatchedOpenGroup,
    #[error("Extra '}}' with no matching '{{'")]
    UnmatchedCloseGroup,
    #[error("{func} expected {expected} argument(s), found {found}")]
    WrongArgumentCount {
        func: String,
        expected: usize,
        found: usize,
    },
    #[error("Unexpected end of input in a macro argument, expected '{expected}'")]
    UnexpectedEndOfMacroArgument { expected: String },
    #[error("Invalid argument number: {value}")]
    InvalidMacroArgumentNumber { value: String },
    #[error("Too many expansions: infinite loop or raise Settings::max_expand")]
    TooManyExpansions,
    #[error(r"\newcommand{{{name}}} attempting to redefine {name}; use \renewcommand")]
    MacroRedefinition { name: String },
    #[error(r"\renewcommand{{{name}}} when {name} does not yet exist; use \newcommand")]
    RenewUndefined { name: String },
    #[error("Invalid unit: '{unit}'")]
    InvalidUnit { unit: String },
    #[error("Invalid size: '{size}'")]
    InvalidSize { size: String },
    #[error("Invalid delimiter: '{delimiter}' after '{function}'")]
    InvalidDelimiter {
        delimiter: String,
        function: String,
    },
    #[error(r"Missing \right for \left")]
    MissingRight,
    #[error(r"\middle without preceding \left")]
    UnexpectedMiddle,
    #[error("No such environment: {name}")]
    NoSuchEnvironment { name: String },
    #[error(r"Mismatched: \begin{{{begin}}} ended by \end{{{end}}}")]
    MismatchedEnvironment { begin: String, end: String },
    #[error("Invalid matrix: {reason}")]
    InvalidMatrix { reason: String },
    #[error("Unknown column alignment: '{alignment}'")]
    UnknownColumnAlignment { alignment: String },
    #[error("Invalid color: '{color}'")]
    InvalidColor { color: String },
    #[error("Unknown accent: '{accent}'")]
    UnknownAccent { accent: String },
    #[error("Double superscript")]
    DoubleSuperscript,
    #[error("Double subscript")]
    DoubleSubscript,
    #[error(r"\limits must follow a math operator")]
    LimitsWithoutOperator,
    #[error("Only one infix operator is allowed per group")]
    MultipleInfixOperators,

    // --- resource errors ---
    #[error("Symbol '{symbol}' not found in font '{font}'")]
    SymbolNotFound { symbol: String, font: String },
    #[error("No delimiter mapping for '{delimiter}'")]
    DelimiterNotFound { delimiter: String },

    // --- state errors ---
    #[error("Empty formula")]
    EmptyFormula,
    #[error("Invalid internal state: {detail}")]
    InvalidState { detail: String },
}

impl From<&'static str> for ParseErrorKind {
    fn from(message: &'static str) -> Self {
        Self::Message(message)
    }
}

#[derive(Debug)]
enum ErrorContext {
    None,
    Location(SourceLocation),
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Location(loc) => {
                let input = &loc.input;
                if loc.start == input.len() {
                    write!(f, " at end of input: ")?;
                } else {
                    write!(f, " at position {}: ", loc.start + 1)?;
                }

                let mut prefix_start = loc.start.saturating_sub(15);
                prefix_start = char_boundary(input, prefix_start, false);
                if prefix_start > 0 {
                    write!(f, "\u{2026}")?;
                }
                write!(f, "{}", &input[prefix_start..loc.start])?;
                for c in input[loc.start..loc.end].chars() {
                    // combining low line underlines the offending span
                    write!(f, "{c}\u{0332}")?;
                }
                let mut suffix_end = (loc.end + 15).min(input.len());
                suffix_end = char_boundary(input, suffix_end, true);
                write!(f, "{}", &input[loc.end..suffix_end])?;
                if suffix_end < input.len() {
                    write!(f, "\u{2026}")?;
                }
                Ok(())
            }
        }
    }
}

const fn char_boundary(input: &str, mut index: usize, forward: bool) -> usize {
    if forward {
        while index < input.len() && !input.is_char_boundary(index) {
            index += 1;
        }
    } else {
        while index > 0 && !input.is_char_boundary(index) {
            index -= 1;
        }
    }
    index
}

/// Anything that can point at a span of the input for error reporting.
pub trait ErrorLocationProvider {
    /// The source location, if one is known.
    fn loc(&self) -> Option<&SourceLocation>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Token;
    use alloc::sync::Arc;

    #[test]
    fn plain_error_has_no_position() {
        let err = ParseError::new("bad input");
        assert!(matches!(*err.kind, ParseErrorKind::Message("bad input")));
        assert_eq!(err.position, None);
        assert!(err.to_string().contains("bad input"));
    }

    #[test]
    fn token_error_reports_position_and_excerpt() {
        let input: Arc<str> = Arc::from("a + \\frob{x}");
        let loc = SourceLocation::new(Arc::clone(&input), 4, 9);
        let token = Token::new("\\frob".to_owned(), Some(loc));
        let err = ParseError::with_token(
            ParseErrorKind::UndefinedControlSequence {
                name: "\\frob".to_owned(),
            },
            &token,
        );
        assert_eq!(err.position, Some(4));
        assert_eq!(err.length, Some(5));
        let rendered = err.to_string();
        assert!(rendered.contains("Undefined control sequence"));
        assert!(rendered.contains("at position 5"));
    }
}
