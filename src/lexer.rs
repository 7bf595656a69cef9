//! Tokenizer for the TeX-flavored input language.
//!
//! Emits control words (`\frac`), control symbols (`\%`), collapsed
//! whitespace and single characters. Comments run from `%` to end of line
//! and produce nothing. The end of input is the sentinel token `"EOF"`.

use crate::types::{ParseError, ParseErrorKind, SourceLocation, Token};
use alloc::sync::Arc;

/// Text of the end-of-input sentinel token.
pub const EOF_TOKEN: &str = "EOF";

pub struct Lexer {
    input: Arc<str>,
    pos: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: Arc::from(input),
            pos: 0,
        }
    }

    /// The full input, shared with the tokens' source locations.
    #[must_use]
    pub fn input(&self) -> &Arc<str> {
        &self.input
    }

    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn token(&self, text: impl Into<String>, start: usize) -> Token {
        Token::new(
            text.into(),
            Some(SourceLocation::new(self.input.clone(), start, self.pos)),
        )
    }

    /// Produce the next token.
    pub fn lex(&mut self) -> Result<Token, ParseError> {
        loop {
            let start = self.pos;
            let mut chars = self.rest().chars();
            let Some(ch) = chars.next() else {
                return Ok(self.token(EOF_TOKEN, start));
            };
            match ch {
                '%' => {
                    // Comment to end of line.
                    match self.rest().find('\n') {
                        Some(offset) => self.pos += offset + 1,
                        None => self.pos = self.input.len(),
                    }
                }
                c if c.is_whitespace() => {
                    while let Some(c) = self.rest().chars().next() {
                        if !c.is_whitespace() {
                            break;
                        }
                        self.pos += c.len_utf8();
                    }
                    return Ok(self.token(" ", start));
                }
                // Active character: an unbreakable space.
                '~' => {
                    self.pos += 1;
                    return Ok(self.token(" ", start));
                }
                '\\' => {
                    self.pos += 1;
                    let mut word_len = 0;
                    for c in self.rest().chars() {
                        if c.is_ascii_alphabetic() {
                            word_len += c.len_utf8();
                        } else {
                            break;
                        }
                    }
                    if word_len > 0 {
                        self.pos += word_len;
                        let text = self.input[start..self.pos].to_owned();
                        // TeX eats whitespace after a control word.
                        while let Some(c) = self.rest().chars().next() {
                            if !c.is_whitespace() {
                                break;
                            }
                            self.pos += c.len_utf8();
                        }
                        return Ok(self.token(text, start));
                    }
                    match self.rest().chars().next() {
                        Some(symbol) => {
                            self.pos += symbol.len_utf8();
                            let text = self.input[start..self.pos].to_owned();
                            return Ok(self.token(text, start));
                        }
                        None => {
                            return Err(ParseError::new(ParseErrorKind::UnexpectedCharacter {
                                character: "\\".to_owned(),
                            })
                            .at(start, 1));
                        }
                    }
                }
                c => {
                    self.pos += c.len_utf8();
                    return Ok(self.token(c.to_string(), start));
                }
            }
        }
    }
}
