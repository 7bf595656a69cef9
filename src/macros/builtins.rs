//! Built-in macros, keyed by control-sequence name without the backslash.

use super::{MacroContextInterface, MacroDefinition, MacroExpansion};
use crate::types::ParseError;
use phf::phf_map;

fn noexpand(ctx: &mut dyn MacroContextInterface) -> Result<MacroDefinition, ParseError> {
    // The token right after \noexpand is shielded from one expansion pass.
    let mut token = ctx.pop_token()?;
    if ctx.is_defined(&token.text) {
        token.noexpand = true;
    }
    Ok(MacroDefinition::Expansion(MacroExpansion {
        tokens: vec![token],
        num_args: 0,
    }))
}

fn expandafter(ctx: &mut dyn MacroContextInterface) -> Result<MacroDefinition, ParseError> {
    let saved = ctx.pop_token()?;
    ctx.expand_once(true)?;
    ctx.push_token(saved);
    Ok(MacroDefinition::Expansion(MacroExpansion {
        tokens: Vec::new(),
        num_args: 0,
    }))
}

/// Replacement-text and function macros available in every session.
pub static BUILTIN_MACROS: phf::Map<&'static str, MacroDefinition> = phf_map! {
    "relax" => MacroDefinition::StaticStr(""),
    "noexpand" => MacroDefinition::Function(noexpand),
    "expandafter" => MacroDefinition::Function(expandafter),

    "bmod" => MacroDefinition::StaticStr("\\;\\operatorname{mod}\\;"),
    "pmod" => MacroDefinition::StaticStr("\\;(\\operatorname{mod}\\;#1)"),
    "dbinom" => MacroDefinition::StaticStr("{\\displaystyle\\binom{#1}{#2}}"),
    "tbinom" => MacroDefinition::StaticStr("{\\textstyle\\binom{#1}{#2}}"),
    "stackrel" => MacroDefinition::StaticStr("\\overset{#1}{#2}"),

    "quad" => MacroDefinition::StaticStr("\\kern1em"),
    "qquad" => MacroDefinition::StaticStr("\\kern2em"),
    "thinspace" => MacroDefinition::StaticStr("\\,"),
    "medspace" => MacroDefinition::StaticStr("\\:"),
    "thickspace" => MacroDefinition::StaticStr("\\;"),
    "negthinspace" => MacroDefinition::StaticStr("\\!"),
    "enspace" => MacroDefinition::StaticStr("\\kern.5em"),

    "dotsb" => MacroDefinition::StaticStr("\\cdots"),
    "dotsc" => MacroDefinition::StaticStr("\\ldots"),
    "dotsi" => MacroDefinition::StaticStr("\\cdots"),
    "dotsm" => MacroDefinition::StaticStr("\\cdots"),
    "dotso" => MacroDefinition::StaticStr("\\ldots"),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macros::count_args;

    #[test]
    fn string_macros_declare_consistent_arities() {
        let MacroDefinition::StaticStr(pmod) = BUILTIN_MACROS["pmod"] else {
            panic!("pmod should be replacement text");
        };
        assert_eq!(count_args(pmod), 1);
        let MacroDefinition::StaticStr(dbinom) = BUILTIN_MACROS["dbinom"] else {
            panic!("dbinom should be replacement text");
        };
        assert_eq!(count_args(dbinom), 2);
    }

    #[test]
    fn names_are_stored_without_backslash() {
        assert!(BUILTIN_MACROS.contains_key("quad"));
        assert!(!BUILTIN_MACROS.contains_key("\\quad"));
    }
}
