//! Recursive-descent parser from expanded tokens to the atom tree.

use crate::atom::{Atom, AtomType, Limits};
use crate::lexer::EOF_TOKEN;
use crate::macro_expander::MacroExpander;
use crate::macros::MacroContextInterface;
use crate::symbols::SymbolSpec;
use crate::types::{Mode, ParseError, ParseErrorKind, Settings, Token};
use crate::units::Dimension;
use crate::MathContext;
use phf::{phf_set, Set};

/// Tokens that end the current expression without being consumed.
static END_OF_EXPRESSION: Set<&'static str> = phf_set! {
    "}", "\\endgroup", "\\end", "\\right", "&", "\\\\", "\\cr",
};

/// Infix fraction commands handled at expression level.
static INFIX_COMMANDS: Set<&'static str> = phf_set! {
    "\\over", "\\choose", "\\atop",
};

/// Characters accepted after `\left`, `\right`, `\middle` and the sized
/// delimiter commands.
static DELIMITER_CHARS: Set<char> = phf_set! {
    '(', ')', '[', ']', '{', '}', '/', '\\',
    '|', '\u{2223}', '\u{2225}',
    '\u{27e8}', '\u{27e9}', '\u{2308}', '\u{2309}', '\u{230a}', '\u{230b}',
    '\u{2191}', '\u{2193}', '\u{2195}', '\u{21d1}', '\u{21d3}', '\u{21d5}',
    '\u{221a}',
};

pub struct Parser<'a> {
    pub ctx: &'a MathContext,
    pub settings: &'a Settings,
    gullet: MacroExpander<'a>,
    next_token: Option<Token>,
    leftright_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(ctx: &'a MathContext, input: &str, settings: &'a Settings) -> Self {
        Self {
            ctx,
            settings,
            gullet: MacroExpander::new(ctx, input, settings, Mode::Math),
            next_token: None,
            leftright_depth: 0,
        }
    }

    /// Parse the whole input into an atom list.
    pub fn parse(mut self) -> Result<Vec<Atom>, ParseError> {
        self.gullet.begin_group();
        let body = self.parse_expression(None)?;
        let token = self.fetch()?;
        if token.text != EOF_TOKEN {
            let found = token.text.clone();
            let kind = match found.as_str() {
                "}" => ParseErrorKind::UnmatchedCloseGroup,
                _ => ParseErrorKind::ExpectedToken {
                    expected: EOF_TOKEN.to_owned(),
                    found,
                },
            };
            return Err(ParseError::with_token(kind, token));
        }
        self.gullet.end_group()?;
        self.gullet.export_macros(self.settings)?;
        Ok(body)
    }

    // ---- token plumbing ----

    /// The next fully expanded token, without consuming it.
    pub fn fetch(&mut self) -> Result<&Token, ParseError> {
        if self.next_token.is_none() {
            self.next_token = Some(self.gullet.expand_next_token()?);
        }
        self.next_token.as_ref().ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidState {
                detail: "lookahead vanished".to_owned(),
            })
        })
    }

    /// Consume the lookahead token.
    pub fn consume(&mut self) -> Option<Token> {
        self.next_token.take()
    }

    /// Consume the lookahead, which must be `text`.
    pub fn expect(&mut self, text: &str) -> Result<Token, ParseError> {
        let token = self.fetch()?;
        if token.text != text {
            let kind = ParseErrorKind::ExpectedToken {
                expected: text.to_owned(),
                found: token.text.clone(),
            };
            return Err(ParseError::with_token(kind, token));
        }
        self.consume().ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidState {
                detail: "expected token not buffered".to_owned(),
            })
        })
    }

    fn consume_spaces(&mut self) -> Result<(), ParseError> {
        while self.fetch()?.text == " " {
            self.consume();
        }
        Ok(())
    }

    /// Read one raw, unexpanded token. Only valid while no lookahead is
    /// buffered.
    fn pop_raw(&mut self) -> Result<Token, ParseError> {
        if let Some(token) = self.next_token.take() {
            return Ok(token);
        }
        self.gullet.pop_token()
    }

    // ---- expressions ----

    /// Parse atoms until an end-of-expression token, `end`, or EOF.
    pub fn parse_expression(&mut self, end: Option<&str>) -> Result<Vec<Atom>, ParseError> {
        let mut body: Vec<Atom> = Vec::new();
        let mut infix: Option<(usize, String, Token)> = None;
        loop {
            self.consume_spaces()?;
            let token = self.fetch()?;
            let text = token.text.clone();
            if text == EOF_TOKEN
                || END_OF_EXPRESSION.contains(text.as_str())
                || end == Some(text.as_str())
            {
                break;
            }
            if INFIX_COMMANDS.contains(text.as_str()) {
                if infix.is_some() {
                    return Err(ParseError::with_token(
                        ParseErrorKind::MultipleInfixOperators,
                        token,
                    ));
                }
                let token = token.clone();
                self.consume();
                infix = Some((body.len(), text, token));
                continue;
            }
            let Some(atom) = self.parse_atom()? else {
                break;
            };
            body.push(atom);
        }
        match infix {
            Some((split, name, _token)) => Ok(vec![build_infix(body, split, &name)]),
            None => Ok(body),
        }
    }

    /// One atom with any attached scripts, primes and limit modifiers.
    fn parse_atom(&mut self) -> Result<Option<Atom>, ParseError> {
        let mut base = self.parse_base()?;
        let mut sup: Option<Atom> = None;
        let mut sub: Option<Atom> = None;
        let mut primes: Vec<Atom> = Vec::new();
        loop {
            self.consume_spaces()?;
            let token = self.fetch()?.clone();
            match token.text.as_str() {
                "^" => {
                    if sup.is_some() {
                        return Err(ParseError::with_token(
                            ParseErrorKind::DoubleSuperscript,
                            &token,
                        ));
                    }
                    self.consume();
                    sup = Some(self.parse_arg()?);
                }
                "_" => {
                    if sub.is_some() {
                        return Err(ParseError::with_token(
                            ParseErrorKind::DoubleSubscript,
                            &token,
                        ));
                    }
                    self.consume();
                    sub = Some(self.parse_arg()?);
                }
                "'" => {
                    if sup.is_some() {
                        return Err(ParseError::with_token(
                            ParseErrorKind::DoubleSuperscript,
                            &token,
                        ));
                    }
                    self.consume();
                    primes.push(Atom::Symbol {
                        character: '\u{2032}',
                        atom_type: AtomType::Ord,
                    });
                }
                "\\limits" | "\\nolimits" => {
                    let always = token.text == "\\limits";
                    match base {
                        Some(Atom::Op { ref mut limits, .. }) => {
                            *limits = if always { Limits::Always } else { Limits::Never };
                            self.consume();
                        }
                        _ => {
                            return Err(ParseError::with_token(
                                ParseErrorKind::LimitsWithoutOperator,
                                &token,
                            ));
                        }
                    }
                }
                _ => break,
            }
        }
        if !primes.is_empty() {
            // An explicit superscript after primes joins them: x'^2.
            let mut row = primes;
            if let Some(explicit) = sup {
                row.push(explicit);
            }
            sup = Some(if row.len() == 1 {
                row.swap_remove(0)
            } else {
                Atom::Row(row)
            });
        }
        if sup.is_none() && sub.is_none() {
            return Ok(base);
        }
        Ok(Some(Atom::Scripts {
            base: base.map(Box::new),
            sup: sup.map(Box::new),
            sub: sub.map(Box::new),
        }))
    }

    /// A script-less base atom: group, command or bare symbol.
    fn parse_base(&mut self) -> Result<Option<Atom>, ParseError> {
        self.consume_spaces()?;
        let token = self.fetch()?.clone();
        match token.text.as_str() {
            EOF_TOKEN | "^" | "_" | "'" => Ok(None),
            "{" | "\\begingroup" => {
                let closer = if token.text == "{" { "}" } else { "\\endgroup" };
                self.consume();
                self.gullet.begin_group();
                let body = self.parse_expression(None)?;
                let end = self.fetch()?;
                if end.text != closer {
                    return Err(ParseError::with_token(
                        ParseErrorKind::UnmatchedOpenGroup,
                        &token,
                    ));
                }
                self.consume();
                self.gullet.end_group()?;
                Ok(Some(Atom::Row(body)))
            }
            "\\left" => self.parse_left_right().map(Some),
            "\\middle" => {
                if self.leftright_depth == 0 {
                    return Err(ParseError::with_token(
                        ParseErrorKind::UnexpectedMiddle,
                        &token,
                    ));
                }
                self.consume();
                let delim = self.parse_delimiter("\\middle")?.ok_or_else(|| {
                    ParseError::with_token(
                        ParseErrorKind::InvalidDelimiter {
                            delimiter: ".".to_owned(),
                            function: "\\middle".to_owned(),
                        },
                        &token,
                    )
                })?;
                Ok(Some(Atom::Middle(delim)))
            }
            "\\begin" => {
                self.consume();
                let name = self.parse_raw_group()?;
                let Some(handler) = self.ctx.environment(&name) else {
                    return Err(ParseError::with_token(
                        ParseErrorKind::NoSuchEnvironment { name },
                        &token,
                    ));
                };
                handler(self, &name).map(Some)
            }
            text if text.starts_with('\\') => {
                let name = &text[1..];
                if let Some(spec) = self.ctx.function(name) {
                    self.consume();
                    return (spec.handler)(self, &token).map(Some);
                }
                if let Some(SymbolSpec {
                    character,
                    atom_type,
                }) = self.ctx.symbols().command(name)
                {
                    self.consume();
                    return Ok(Some(Atom::Symbol {
                        character,
                        atom_type,
                    }));
                }
                Err(ParseError::with_token(
                    ParseErrorKind::UndefinedControlSequence { name: text.to_owned() },
                    &token,
                ))
            }
            text => {
                let mut chars = text.chars();
                let (Some(ch), None) = (chars.next(), chars.next()) else {
                    return Err(ParseError::with_token(
                        ParseErrorKind::UnexpectedCharacter {
                            character: text.to_owned(),
                        },
                        &token,
                    ));
                };
                if let Some(SymbolSpec {
                    character,
                    atom_type,
                }) = self.ctx.symbols().character(ch)
                {
                    self.consume();
                    return Ok(Some(Atom::Symbol {
                        character,
                        atom_type,
                    }));
                }
                if ch.is_alphanumeric() {
                    self.consume();
                    return Ok(Some(Atom::Symbol {
                        character: ch,
                        atom_type: AtomType::Ord,
                    }));
                }
                Err(ParseError::with_token(
                    ParseErrorKind::UnexpectedCharacter {
                        character: text.to_owned(),
                    },
                    &token,
                ))
            }
        }
    }

    fn parse_left_right(&mut self) -> Result<Atom, ParseError> {
        self.consume();
        let left = self.parse_delimiter("\\left")?;
        self.leftright_depth += 1;
        let body = self.parse_expression(None)?;
        self.leftright_depth -= 1;
        let token = self.fetch()?;
        if token.text != "\\right" {
            return Err(ParseError::with_token(ParseErrorKind::MissingRight, token));
        }
        self.consume();
        let right = self.parse_delimiter("\\right")?;
        Ok(Atom::LeftRight { left, right, body })
    }

    // ---- argument helpers for function handlers ----

    /// One function argument: a braced group or a single base atom.
    pub fn parse_arg(&mut self) -> Result<Atom, ParseError> {
        self.consume_spaces()?;
        let token = self.fetch()?;
        if token.text == EOF_TOKEN {
            return Err(ParseError::with_token(
                ParseErrorKind::UnexpectedEndOfMacroArgument {
                    expected: "argument".to_owned(),
                },
                token,
            ));
        }
        self.parse_base()?.ok_or_else(|| {
            ParseError::new(ParseErrorKind::UnexpectedEndOfMacroArgument {
                expected: "argument".to_owned(),
            })
        })
    }

    /// A `[...]` optional argument, parsed as math.
    pub fn parse_optional_arg(&mut self) -> Result<Option<Atom>, ParseError> {
        self.consume_spaces()?;
        if self.fetch()?.text != "[" {
            return Ok(None);
        }
        self.consume();
        let body = self.parse_expression(Some("]"))?;
        self.expect("]")?;
        Ok(Some(Atom::Row(body)))
    }

    /// A braced group captured as raw text, without macro expansion.
    pub fn parse_raw_group(&mut self) -> Result<String, ParseError> {
        self.consume_spaces()?;
        let open = self.fetch()?;
        if open.text != "{" {
            let kind = ParseErrorKind::ExpectedToken {
                expected: "{".to_owned(),
                found: open.text.clone(),
            };
            return Err(ParseError::with_token(kind, open));
        }
        self.consume();
        let mut depth = 1usize;
        let mut text = String::new();
        loop {
            let token = self.pop_raw()?;
            match token.text.as_str() {
                "{" => depth += 1,
                "}" => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(text);
                    }
                }
                EOF_TOKEN => {
                    return Err(ParseError::with_token(
                        ParseErrorKind::UnmatchedOpenGroup,
                        &token,
                    ));
                }
                _ => {}
            }
            text.push_str(&token.text);
        }
    }

    /// A `[...]` optional argument captured as raw text.
    pub fn parse_raw_optional_group(&mut self) -> Result<Option<String>, ParseError> {
        self.consume_spaces()?;
        if self.fetch()?.text != "[" {
            return Ok(None);
        }
        self.consume();
        let mut text = String::new();
        loop {
            let token = self.pop_raw()?;
            match token.text.as_str() {
                "]" => return Ok(Some(text)),
                EOF_TOKEN => {
                    return Err(ParseError::with_token(
                        ParseErrorKind::ExpectedToken {
                            expected: "]".to_owned(),
                            found: EOF_TOKEN.to_owned(),
                        },
                        &token,
                    ));
                }
                _ => text.push_str(&token.text),
            }
        }
    }

    /// A size argument: either braced (`{2pt}`) or bare (`2pt`).
    pub fn parse_size_arg(&mut self) -> Result<Dimension, ParseError> {
        self.consume_spaces()?;
        if self.fetch()?.text == "{" {
            let text = self.parse_raw_group()?;
            return Dimension::parse(&text);
        }
        // Bare form: digits, sign and dot, then up to two unit letters.
        let mut text = String::new();
        loop {
            let token = self.fetch()?;
            let piece = token.text.as_str();
            let accept = match piece {
                "+" | "-" | "." => text.chars().all(|c| !c.is_ascii_alphabetic()),
                _ => {
                    piece.len() == 1
                        && (piece.as_bytes()[0].is_ascii_digit()
                            || (piece.as_bytes()[0].is_ascii_alphabetic()
                                && text
                                    .chars()
                                    .filter(|c| c.is_ascii_alphabetic())
                                    .count()
                                    < 2))
                }
            };
            if !accept {
                break;
            }
            text.push_str(piece);
            self.consume();
            if text.chars().filter(|c| c.is_ascii_alphabetic()).count() == 2 {
                break;
            }
        }
        Dimension::parse(&text)
    }

    /// A delimiter argument; `.` selects no delimiter.
    pub fn parse_delimiter(&mut self, func: &str) -> Result<Option<char>, ParseError> {
        self.consume_spaces()?;
        let token = self.fetch()?.clone();
        let resolved = match token.text.as_str() {
            "." => {
                self.consume();
                return Ok(None);
            }
            text if text.starts_with('\\') => self
                .ctx
                .symbols()
                .command(&text[1..])
                .map(|spec| spec.character),
            text => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(
                        self.ctx
                            .symbols()
                            .character(ch)
                            .map_or(ch, |spec| spec.character),
                    ),
                    _ => None,
                }
            }
        };
        match resolved.filter(|ch| DELIMITER_CHARS.contains(ch)) {
            Some(ch) => {
                self.consume();
                Ok(Some(ch))
            }
            None => Err(ParseError::with_token(
                ParseErrorKind::InvalidDelimiter {
                    delimiter: token.text.clone(),
                    function: func.to_owned(),
                },
                &token,
            )),
        }
    }

    /// The session macro table, for `\newcommand` handlers.
    pub fn gullet_mut(&mut self) -> &mut MacroExpander<'a> {
        &mut self.gullet
    }
}

/// Split `body` at an infix command and build the fraction it denotes.
fn build_infix(mut body: Vec<Atom>, split: usize, name: &str) -> Atom {
    let den = body.split_off(split);
    let numerator = Box::new(Atom::Row(body));
    let denominator = Box::new(Atom::Row(den));
    let (bar_thickness, left_delim, right_delim) = match name {
        "\\choose" => (Some(Dimension::ZERO), Some('('), Some(')')),
        "\\atop" => (Some(Dimension::ZERO), None, None),
        _ => (None, None, None),
    };
    Atom::Fraction {
        numerator,
        denominator,
        bar_thickness,
        left_delim,
        right_delim,
        style: None,
        continued: false,
    }
}
