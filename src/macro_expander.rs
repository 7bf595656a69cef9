//! Macro expansion between the lexer and the parser.
//!
//! Keeps a stack of pushed-back tokens over the lexer and expands macros on
//! demand. Expansion is counted against `Settings::max_expand` so a
//! self-referential definition fails instead of looping.

use crate::lexer::{Lexer, EOF_TOKEN};
use crate::macros::{
    count_args, MacroContextInterface, MacroDefinition, MacroExpansion,
};
use crate::namespace::{Mapping, Namespace};
use crate::types::{Mode, ParseError, ParseErrorKind, Settings, Token};
use crate::MathContext;
use alloc::sync::Arc;

/// Strip the leading backslash of a control sequence.
fn control_sequence(text: &str) -> Option<&str> {
    text.strip_prefix('\\')
}

pub struct MacroExpander<'a> {
    lexer: Lexer,
    macros: Namespace<MacroDefinition>,
    stack: Vec<Token>,
    mode: Mode,
    expansion_count: usize,
    max_expand: usize,
    ctx: &'a MathContext,
}

impl<'a> MacroExpander<'a> {
    pub fn new(ctx: &'a MathContext, input: &str, settings: &Settings, mode: Mode) -> Self {
        let globals = settings.macros.borrow().clone();
        Self {
            lexer: Lexer::new(input),
            macros: Namespace::new(ctx.builtin_macros().clone(), globals),
            stack: Vec::new(),
            mode,
            expansion_count: 0,
            max_expand: settings.max_expand,
            ctx,
        }
    }

    /// The shared input string, for source locations.
    #[must_use]
    pub fn input(&self) -> &Arc<str> {
        self.lexer.input()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Snapshot of the session macro table, written back to `Settings` when
    /// parsing finishes so definitions persist across formulas.
    pub fn export_macros(&mut self, settings: &Settings) -> Result<(), ParseError> {
        self.macros.end_groups()?;
        let mut out = Mapping::default();
        // Only names the session actually defined are exported.
        for (name, def) in self.session_macros() {
            out.insert(name, def);
        }
        *settings.macros.borrow_mut() = out;
        Ok(())
    }

    fn session_macros(&self) -> impl Iterator<Item = (String, MacroDefinition)> + '_ {
        self.macros.session_entries()
    }

    pub fn begin_group(&mut self) {
        self.macros.begin_group();
    }

    pub fn end_group(&mut self) -> Result<(), ParseError> {
        self.macros.end_group()
    }

    /// Peek at the next unexpanded token.
    pub fn future(&mut self) -> Result<&Token, ParseError> {
        if self.stack.is_empty() {
            let token = self.lexer.lex()?;
            self.stack.push(token);
        }
        Ok(self.stack.last().ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidState {
                detail: "token stack empty after refill".to_owned(),
            })
        })?)
    }

    fn count_expansion(&mut self, amount: usize) -> Result<(), ParseError> {
        self.expansion_count += amount;
        if self.expansion_count > self.max_expand {
            return Err(ParseError::new(ParseErrorKind::TooManyExpansions));
        }
        Ok(())
    }

    /// Is there a macro expansion for `name` (with backslash)?
    fn is_expandable(&self, text: &str) -> bool {
        control_sequence(text).is_some_and(|name| self.macros.has(name))
    }

    /// Resolve a macro definition down to a tokenized expansion, running
    /// function-backed macros as needed.
    fn get_expansion(&mut self, name: &str) -> Result<Option<MacroExpansion>, ParseError> {
        let Some(definition) = self.macros.get(name).cloned() else {
            return Ok(None);
        };
        self.resolve(definition).map(Some)
    }

    fn resolve(&mut self, definition: MacroDefinition) -> Result<MacroExpansion, ParseError> {
        match definition {
            MacroDefinition::StaticStr(body) => Ok(tokenize_body(body)),
            MacroDefinition::Text(body) => Ok(tokenize_body(&body)),
            MacroDefinition::Expansion(expansion) => Ok(expansion),
            MacroDefinition::Function(func) => {
                let produced = func(self)?;
                self.resolve(produced)
            }
        }
    }

    /// Expand the next token in place once. Returns whether an expansion
    /// happened; with `expandable_only` a non-expandable token is left
    /// alone, otherwise it counts as "expanded into itself".
    pub fn expand_once_inner(&mut self, expandable_only: bool) -> Result<bool, ParseError> {
        self.future()?;
        let top = self.stack.last().cloned().ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidState {
                detail: "expand_once on empty stack".to_owned(),
            })
        })?;
        if top.noexpand || !self.is_expandable(&top.text) {
            return Ok(!expandable_only);
        }
        self.stack.pop();
        self.count_expansion(1)?;
        let name = control_sequence(&top.text).unwrap_or(&top.text).to_owned();
        let Some(expansion) = self.get_expansion(&name)? else {
            self.stack.push(top);
            return Ok(false);
        };
        let mut tokens = expansion.tokens;
        if expansion.num_args > 0 {
            let args = self.consume_args(&top, expansion.num_args)?;
            tokens = substitute_args(tokens, &args);
        }
        self.count_expansion(tokens.len())?;
        // Bodies are stored in reading order; the stack wants them reversed.
        self.stack.extend(tokens.into_iter().rev());
        Ok(true)
    }

    /// Fully expand and return the next token.
    pub fn expand_next_token(&mut self) -> Result<Token, ParseError> {
        loop {
            if !self.expand_once_inner(true)? {
                let token = self.stack.pop().ok_or_else(|| {
                    ParseError::new(ParseErrorKind::InvalidState {
                        detail: "expanded token vanished".to_owned(),
                    })
                })?;
                return Ok(token);
            }
        }
    }

    /// Discard space tokens waiting on the stack.
    pub fn consume_spaces(&mut self) -> Result<(), ParseError> {
        while self.future()?.text == " " {
            self.stack.pop();
        }
        Ok(())
    }

    fn consume_args(
        &mut self,
        macro_token: &Token,
        num_args: usize,
    ) -> Result<Vec<Vec<Token>>, ParseError> {
        let mut args = Vec::with_capacity(num_args);
        for i in 0..num_args {
            self.consume_spaces()?;
            let arg = self.consume_arg().map_err(|err| {
                if matches!(*err.kind, ParseErrorKind::UnexpectedEndOfMacroArgument { .. }) {
                    ParseError::with_token(
                        ParseErrorKind::WrongArgumentCount {
                            func: macro_token.text.clone(),
                            expected: num_args,
                            found: i,
                        },
                        macro_token,
                    )
                } else {
                    err
                }
            })?;
            args.push(arg);
        }
        Ok(args)
    }
}

impl MacroContextInterface for MacroExpander<'_> {
    fn mode(&self) -> Mode {
        self.mode
    }

    fn pop_token(&mut self) -> Result<Token, ParseError> {
        self.future()?;
        Ok(self.stack.pop().unwrap_or_else(|| Token::from_static(EOF_TOKEN)))
    }

    fn push_token(&mut self, token: Token) {
        self.stack.push(token);
    }

    fn push_tokens(&mut self, tokens: Vec<Token>) {
        self.stack.extend(tokens.into_iter().rev());
    }

    fn expand_once(&mut self, expandable_only: bool) -> Result<(), ParseError> {
        self.expand_once_inner(expandable_only)?;
        Ok(())
    }

    fn consume_arg(&mut self) -> Result<Vec<Token>, ParseError> {
        let first = self.pop_token()?;
        if first.text == EOF_TOKEN {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedEndOfMacroArgument {
                    expected: "argument".to_owned(),
                },
            ));
        }
        if first.text != "{" {
            return Ok(vec![first]);
        }
        let mut depth = 1usize;
        let mut tokens = Vec::new();
        loop {
            let token = self.pop_token()?;
            match token.text.as_str() {
                "{" => depth += 1,
                "}" => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(tokens);
                    }
                }
                EOF_TOKEN => {
                    return Err(ParseError::with_token(
                        ParseErrorKind::UnexpectedEndOfMacroArgument {
                            expected: "}".to_owned(),
                        },
                        &token,
                    ));
                }
                _ => {}
            }
            tokens.push(token);
        }
    }

    fn is_defined(&self, text: &str) -> bool {
        match control_sequence(text) {
            Some(name) => {
                self.macros.has(name)
                    || self.ctx.has_function(name)
                    || self.ctx.symbols().command(name).is_some()
            }
            None => true,
        }
    }

    fn macros_mut(&mut self) -> &mut Namespace<MacroDefinition> {
        &mut self.macros
    }
}

/// Tokenize a macro body and count its arguments.
fn tokenize_body(body: &str) -> MacroExpansion {
    let num_args = count_args(body);
    let mut lexer = Lexer::new(body);
    let mut tokens = Vec::new();
    loop {
        match lexer.lex() {
            Ok(token) if token.text == EOF_TOKEN => break,
            Ok(token) => tokens.push(token),
            // A body that fails to lex expands to what lexed so far; the
            // parser reports the real error with better context.
            Err(_) => break,
        }
    }
    MacroExpansion { tokens, num_args }
}

/// Replace `#n` references in `tokens` with the consumed arguments.
fn substitute_args(tokens: Vec<Token>, args: &[Vec<Token>]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();
    while let Some(token) = iter.next() {
        if token.text != "#" {
            out.push(token);
            continue;
        }
        match iter.peek().map(|t| t.text.as_str()) {
            Some("#") => {
                iter.next();
                out.push(token);
            }
            Some(digit) if digit.len() == 1 && digit.as_bytes()[0].is_ascii_digit() => {
                let index = (digit.as_bytes()[0] - b'0') as usize;
                iter.next();
                if let Some(arg) = index.checked_sub(1).and_then(|i| args.get(i)) {
                    out.extend(arg.iter().cloned());
                }
            }
            _ => out.push(token),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_metrics::FixedFontBackend;

    fn context() -> MathContext {
        MathContext::new(Box::new(FixedFontBackend::default()))
    }

    fn expand_all(ctx: &MathContext, settings: &Settings, input: &str) -> Vec<String> {
        let mut expander = MacroExpander::new(ctx, input, settings, Mode::Math);
        let mut out = Vec::new();
        loop {
            let token = expander.expand_next_token().unwrap();
            if token.text == EOF_TOKEN {
                return out;
            }
            out.push(token.text);
        }
    }

    #[test]
    fn tokenized_body_keeps_reading_order() {
        let body = tokenize_body("a\\frac bc");
        let texts: Vec<&str> = body.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "\\frac", "b", "c"]);
        assert_eq!(body.num_args, 0);
    }

    #[test]
    fn builtin_replacement_text_expands() {
        let ctx = context();
        let settings = Settings::default();
        assert_eq!(
            expand_all(&ctx, &settings, "\\qquad"),
            ["\\kern", "2", "e", "m"]
        );
    }

    #[test]
    fn arguments_substitute_positionally() {
        let ctx = context();
        let settings = Settings::default();
        settings.macros.borrow_mut().insert(
            "swap".to_owned(),
            MacroDefinition::Text("#2#1".to_owned()),
        );
        assert_eq!(expand_all(&ctx, &settings, "\\swap{a}{b}"), ["b", "a"]);
        assert_eq!(expand_all(&ctx, &settings, "\\swap ab"), ["b", "a"]);
    }

    #[test]
    fn expansion_limit_catches_loops() {
        let ctx = context();
        let settings = Settings::builder().max_expand(50).build();
        settings.macros.borrow_mut().insert(
            "loop".to_owned(),
            MacroDefinition::Text("\\loop".to_owned()),
        );
        let mut expander = MacroExpander::new(&ctx, "\\loop", &settings, Mode::Math);
        let err = expander.expand_next_token().unwrap_err();
        assert!(matches!(*err.kind, ParseErrorKind::TooManyExpansions));
    }

    #[test]
    fn noexpand_shields_one_token() {
        let ctx = context();
        let settings = Settings::default();
        settings.macros.borrow_mut().insert(
            "x".to_owned(),
            MacroDefinition::Text("y".to_owned()),
        );
        let mut expander = MacroExpander::new(&ctx, "\\noexpand\\x", &settings, Mode::Math);
        let token = expander.expand_next_token().unwrap();
        assert_eq!(token.text, "\\x");
        assert!(token.noexpand);
    }

    #[test]
    fn missing_argument_reports_arity() {
        let ctx = context();
        let settings = Settings::default();
        settings.macros.borrow_mut().insert(
            "two".to_owned(),
            MacroDefinition::Text("#1#2".to_owned()),
        );
        let mut expander = MacroExpander::new(&ctx, "\\two{a}", &settings, Mode::Math);
        let err = expander.expand_next_token().unwrap_err();
        assert!(matches!(
            *err.kind,
            ParseErrorKind::WrongArgumentCount { expected: 2, found: 1, .. }
        ));
    }
}
