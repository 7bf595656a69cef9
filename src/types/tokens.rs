use crate::types::{ErrorLocationProvider, SourceLocation};

/// One lexed unit: a single character, a control word (`\frac`), a control
/// symbol (`\,`), a space, or the synthetic `EOF` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Raw text as it appeared in the input, backslash included for commands.
    pub text: String,
    /// Where the token came from, for error reporting.
    pub loc: Option<SourceLocation>,
    /// Suppresses macro expansion of this token when set.
    pub noexpand: bool,
}

impl Token {
    /// Create a token with the given text and optional location.
    #[must_use]
    pub const fn new(text: String, loc: Option<SourceLocation>) -> Self {
        Self {
            text,
            loc,
            noexpand: false,
        }
    }

    /// Create a token from a static string with no location.
    #[must_use]
    pub fn from_static(text: &'static str) -> Self {
        Self::new(text.to_owned(), None)
    }

    /// A token spanning from this token to `end`, carrying `text`.
    #[must_use]
    pub fn range(self, end: Self, text: String) -> Self {
        let loc = SourceLocation::range(self.loc, end.loc);
        Self::new(text, loc)
    }
}

impl ErrorLocationProvider for Token {
    fn loc(&self) -> Option<&SourceLocation> {
        self.loc.as_ref()
    }
}

impl ErrorLocationProvider for Option<Token> {
    fn loc(&self) -> Option<&SourceLocation> {
        self.as_ref()?.loc.as_ref()
    }
}
