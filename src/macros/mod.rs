//! Macro definitions and the interface expansion code sees.

pub mod builtins;

pub use builtins::BUILTIN_MACROS;

use crate::namespace::Namespace;
use crate::types::{Mode, ParseError, Token};

/// A function-backed macro: runs against the expander and returns what the
/// name expands to.
pub type MacroFn = fn(&mut dyn MacroContextInterface) -> Result<MacroDefinition, ParseError>;

/// A pre-tokenized macro body.
///
/// Tokens are stored in reading order; the expander reverses them when it
/// pushes them onto its stack. `num_args` is the highest `#n` the body
/// references.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroExpansion {
    pub tokens: Vec<Token>,
    pub num_args: usize,
}

/// The forms a macro definition may take.
#[derive(Debug, Clone)]
pub enum MacroDefinition {
    /// Replacement text baked into the binary; may reference `#1`..`#9`.
    StaticStr(&'static str),
    /// Owned replacement text, from `\newcommand`.
    Text(String),
    /// An already tokenized expansion.
    Expansion(MacroExpansion),
    /// Computed at expansion time.
    Function(MacroFn),
}

impl PartialEq for MacroDefinition {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::StaticStr(a), Self::StaticStr(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Expansion(a), Self::Expansion(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => core::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}

/// Count the arguments a replacement text consumes: the highest `#n`
/// referenced, with `##` escaping a literal `#`.
#[must_use]
pub fn count_args(body: &str) -> usize {
    let mut max = 0;
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '#' {
            continue;
        }
        match chars.next() {
            Some('#') => {}
            Some(d @ '1'..='9') => {
                let n = d as usize - '0' as usize;
                max = max.max(n);
            }
            _ => {}
        }
    }
    max
}

/// What function-backed macros may do to the expansion state.
///
/// Implemented by the expander; a trait so builtin macro functions stay
/// decoupled from its internals.
pub trait MacroContextInterface {
    /// Current parsing mode.
    fn mode(&self) -> Mode;

    /// Remove and return the next unexpanded token.
    fn pop_token(&mut self) -> Result<Token, ParseError>;

    /// Push a token back; it is consumed next.
    fn push_token(&mut self, token: Token);

    /// Push tokens back in body order.
    fn push_tokens(&mut self, tokens: Vec<Token>);

    /// Expand the next token in place once.
    fn expand_once(&mut self, expandable_only: bool) -> Result<(), ParseError>;

    /// Consume one macro argument: a balanced group or a single token.
    fn consume_arg(&mut self) -> Result<Vec<Token>, ParseError>;

    /// Whether a control sequence has any definition (macro or symbol or
    /// function).
    fn is_defined(&self, name: &str) -> bool;

    /// The session macro table.
    fn macros_mut(&mut self) -> &mut Namespace<MacroDefinition>;
}
