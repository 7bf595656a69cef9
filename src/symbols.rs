//! The built-in symbol registry.
//!
//! Maps control sequences (`\alpha`, `\leq`, `\sum`) and bare characters
//! (`+`, `=`, `(`) to the character actually typeset and its spacing
//! category. Populated once when a [`crate::MathContext`] is built.

use crate::atom::AtomType;
use crate::namespace::KeyMap;

/// What a symbol command resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolSpec {
    /// The replacement character to typeset.
    pub character: char,
    /// Spacing category.
    pub atom_type: AtomType,
}

/// Registry of symbol commands and special characters.
#[derive(Debug, Default, Clone)]
pub struct Symbols {
    commands: KeyMap<String, SymbolSpec>,
    characters: KeyMap<char, SymbolSpec>,
}

impl Symbols {
    /// Look up a control sequence, without its leading backslash.
    #[must_use]
    pub fn command(&self, name: &str) -> Option<SymbolSpec> {
        self.commands.get(name).copied()
    }

    /// Look up a bare character.
    ///
    /// Letters and digits are not in the table; the parser typesets them
    /// directly as ordinary atoms.
    #[must_use]
    pub fn character(&self, ch: char) -> Option<SymbolSpec> {
        self.characters.get(&ch).copied()
    }

    fn define(&mut self, name: &str, character: char, atom_type: AtomType) {
        self.commands.insert(
            name.to_owned(),
            SymbolSpec {
                character,
                atom_type,
            },
        );
    }

    fn define_char(&mut self, source: char, character: char, atom_type: AtomType) {
        self.characters.insert(
            source,
            SymbolSpec {
                character,
                atom_type,
            },
        );
    }
}

/// Build the full built-in symbol table.
#[must_use]
pub fn create_symbols() -> Symbols {
    let mut s = Symbols::default();

    // Bare characters with non-ordinary spacing.
    s.define_char('+', '+', AtomType::Bin);
    s.define_char('-', '\u{2212}', AtomType::Bin);
    s.define_char('*', '\u{2217}', AtomType::Bin);
    s.define_char('=', '=', AtomType::Rel);
    s.define_char('<', '<', AtomType::Rel);
    s.define_char('>', '>', AtomType::Rel);
    s.define_char(':', ':', AtomType::Rel);
    s.define_char(',', ',', AtomType::Punct);
    s.define_char(';', ';', AtomType::Punct);
    s.define_char('(', '(', AtomType::Open);
    s.define_char('[', '[', AtomType::Open);
    s.define_char(')', ')', AtomType::Close);
    s.define_char(']', ']', AtomType::Close);
    s.define_char('!', '!', AtomType::Close);
    s.define_char('?', '?', AtomType::Close);
    s.define_char('/', '/', AtomType::Ord);
    s.define_char('|', '\u{2223}', AtomType::Ord);
    s.define_char('.', '.', AtomType::Ord);

    // Lowercase Greek.
    s.define("alpha", '\u{3b1}', AtomType::Ord);
    s.define("beta", '\u{3b2}', AtomType::Ord);
    s.define("gamma", '\u{3b3}', AtomType::Ord);
    s.define("delta", '\u{3b4}', AtomType::Ord);
    s.define("epsilon", '\u{3f5}', AtomType::Ord);
    s.define("varepsilon", '\u{3b5}', AtomType::Ord);
    s.define("zeta", '\u{3b6}', AtomType::Ord);
    s.define("eta", '\u{3b7}', AtomType::Ord);
    s.define("theta", '\u{3b8}', AtomType::Ord);
    s.define("vartheta", '\u{3d1}', AtomType::Ord);
    s.define("iota", '\u{3b9}', AtomType::Ord);
    s.define("kappa", '\u{3ba}', AtomType::Ord);
    s.define("lambda", '\u{3bb}', AtomType::Ord);
    s.define("mu", '\u{3bc}', AtomType::Ord);
    s.define("nu", '\u{3bd}', AtomType::Ord);
    s.define("xi", '\u{3be}', AtomType::Ord);
    s.define("omicron", '\u{3bf}', AtomType::Ord);
    s.define("pi", '\u{3c0}', AtomType::Ord);
    s.define("varpi", '\u{3d6}', AtomType::Ord);
    s.define("rho", '\u{3c1}', AtomType::Ord);
    s.define("varrho", '\u{3f1}', AtomType::Ord);
    s.define("sigma", '\u{3c3}', AtomType::Ord);
    s.define("varsigma", '\u{3c2}', AtomType::Ord);
    s.define("tau", '\u{3c4}', AtomType::Ord);
    s.define("upsilon", '\u{3c5}', AtomType::Ord);
    s.define("phi", '\u{3d5}', AtomType::Ord);
    s.define("varphi", '\u{3c6}', AtomType::Ord);
    s.define("chi", '\u{3c7}', AtomType::Ord);
    s.define("psi", '\u{3c8}', AtomType::Ord);
    s.define("omega", '\u{3c9}', AtomType::Ord);

    // Uppercase Greek.
    s.define("Gamma", '\u{393}', AtomType::Ord);
    s.define("Delta", '\u{394}', AtomType::Ord);
    s.define("Theta", '\u{398}', AtomType::Ord);
    s.define("Lambda", '\u{39b}', AtomType::Ord);
    s.define("Xi", '\u{39e}', AtomType::Ord);
    s.define("Pi", '\u{3a0}', AtomType::Ord);
    s.define("Sigma", '\u{3a3}', AtomType::Ord);
    s.define("Upsilon", '\u{3a5}', AtomType::Ord);
    s.define("Phi", '\u{3a6}', AtomType::Ord);
    s.define("Psi", '\u{3a8}', AtomType::Ord);
    s.define("Omega", '\u{3a9}', AtomType::Ord);

    // Binary operators.
    s.define("pm", '\u{b1}', AtomType::Bin);
    s.define("mp", '\u{2213}', AtomType::Bin);
    s.define("times", '\u{d7}', AtomType::Bin);
    s.define("div", '\u{f7}', AtomType::Bin);
    s.define("cdot", '\u{22c5}', AtomType::Bin);
    s.define("ast", '\u{2217}', AtomType::Bin);
    s.define("star", '\u{22c6}', AtomType::Bin);
    s.define("circ", '\u{2218}', AtomType::Bin);
    s.define("bullet", '\u{2219}', AtomType::Bin);
    s.define("cap", '\u{2229}', AtomType::Bin);
    s.define("cup", '\u{222a}', AtomType::Bin);
    s.define("sqcap", '\u{2293}', AtomType::Bin);
    s.define("sqcup", '\u{2294}', AtomType::Bin);
    s.define("wedge", '\u{2227}', AtomType::Bin);
    s.define("vee", '\u{2228}', AtomType::Bin);
    s.define("land", '\u{2227}', AtomType::Bin);
    s.define("lor", '\u{2228}', AtomType::Bin);
    s.define("oplus", '\u{2295}', AtomType::Bin);
    s.define("ominus", '\u{2296}', AtomType::Bin);
    s.define("otimes", '\u{2297}', AtomType::Bin);
    s.define("oslash", '\u{2298}', AtomType::Bin);
    s.define("odot", '\u{2299}', AtomType::Bin);
    s.define("setminus", '\u{2216}', AtomType::Bin);
    s.define("amalg", '\u{2a3f}', AtomType::Bin);
    s.define("dagger", '\u{2020}', AtomType::Bin);
    s.define("ddagger", '\u{2021}', AtomType::Bin);

    // Relations.
    s.define("leq", '\u{2264}', AtomType::Rel);
    s.define("le", '\u{2264}', AtomType::Rel);
    s.define("geq", '\u{2265}', AtomType::Rel);
    s.define("ge", '\u{2265}', AtomType::Rel);
    s.define("neq", '\u{2260}', AtomType::Rel);
    s.define("ne", '\u{2260}', AtomType::Rel);
    s.define("ll", '\u{226a}', AtomType::Rel);
    s.define("gg", '\u{226b}', AtomType::Rel);
    s.define("prec", '\u{227a}', AtomType::Rel);
    s.define("succ", '\u{227b}', AtomType::Rel);
    s.define("preceq", '\u{2aaf}', AtomType::Rel);
    s.define("succeq", '\u{2ab0}', AtomType::Rel);
    s.define("equiv", '\u{2261}', AtomType::Rel);
    s.define("sim", '\u{223c}', AtomType::Rel);
    s.define("simeq", '\u{2243}', AtomType::Rel);
    s.define("approx", '\u{2248}', AtomType::Rel);
    s.define("cong", '\u{2245}', AtomType::Rel);
    s.define("propto", '\u{221d}', AtomType::Rel);
    s.define("subset", '\u{2282}', AtomType::Rel);
    s.define("supset", '\u{2283}', AtomType::Rel);
    s.define("subseteq", '\u{2286}', AtomType::Rel);
    s.define("supseteq", '\u{2287}', AtomType::Rel);
    s.define("in", '\u{2208}', AtomType::Rel);
    s.define("ni", '\u{220b}', AtomType::Rel);
    s.define("notin", '\u{2209}', AtomType::Rel);
    s.define("perp", '\u{22a5}', AtomType::Rel);
    s.define("parallel", '\u{2225}', AtomType::Rel);
    s.define("mid", '\u{2223}', AtomType::Rel);
    s.define("vdash", '\u{22a2}', AtomType::Rel);
    s.define("dashv", '\u{22a3}', AtomType::Rel);
    s.define("models", '\u{22a8}', AtomType::Rel);
    s.define("asymp", '\u{224d}', AtomType::Rel);
    s.define("bowtie", '\u{22c8}', AtomType::Rel);
    s.define("doteq", '\u{2250}', AtomType::Rel);

    // Arrows.
    s.define("leftarrow", '\u{2190}', AtomType::Rel);
    s.define("gets", '\u{2190}', AtomType::Rel);
    s.define("rightarrow", '\u{2192}', AtomType::Rel);
    s.define("to", '\u{2192}', AtomType::Rel);
    s.define("leftrightarrow", '\u{2194}', AtomType::Rel);
    s.define("Leftarrow", '\u{21d0}', AtomType::Rel);
    s.define("Rightarrow", '\u{21d2}', AtomType::Rel);
    s.define("Leftrightarrow", '\u{21d4}', AtomType::Rel);
    s.define("uparrow", '\u{2191}', AtomType::Rel);
    s.define("downarrow", '\u{2193}', AtomType::Rel);
    s.define("updownarrow", '\u{2195}', AtomType::Rel);
    s.define("Uparrow", '\u{21d1}', AtomType::Rel);
    s.define("Downarrow", '\u{21d3}', AtomType::Rel);
    s.define("mapsto", '\u{21a6}', AtomType::Rel);
    s.define("longmapsto", '\u{27fc}', AtomType::Rel);
    s.define("longrightarrow", '\u{27f6}', AtomType::Rel);
    s.define("longleftarrow", '\u{27f5}', AtomType::Rel);
    s.define("longleftrightarrow", '\u{27f7}', AtomType::Rel);
    s.define("Longrightarrow", '\u{27f9}', AtomType::Rel);
    s.define("Longleftarrow", '\u{27f8}', AtomType::Rel);
    s.define("implies", '\u{27f9}', AtomType::Rel);
    s.define("iff", '\u{27fa}', AtomType::Rel);
    s.define("hookrightarrow", '\u{21aa}', AtomType::Rel);
    s.define("hookleftarrow", '\u{21a9}', AtomType::Rel);
    s.define("nearrow", '\u{2197}', AtomType::Rel);
    s.define("searrow", '\u{2198}', AtomType::Rel);
    s.define("swarrow", '\u{2199}', AtomType::Rel);
    s.define("nwarrow", '\u{2196}', AtomType::Rel);

    // Ordinary symbols.
    s.define("infty", '\u{221e}', AtomType::Ord);
    s.define("partial", '\u{2202}', AtomType::Ord);
    s.define("nabla", '\u{2207}', AtomType::Ord);
    s.define("hbar", '\u{210f}', AtomType::Ord);
    s.define("ell", '\u{2113}', AtomType::Ord);
    s.define("Re", '\u{211c}', AtomType::Ord);
    s.define("Im", '\u{2111}', AtomType::Ord);
    s.define("aleph", '\u{2135}', AtomType::Ord);
    s.define("wp", '\u{2118}', AtomType::Ord);
    s.define("forall", '\u{2200}', AtomType::Ord);
    s.define("exists", '\u{2203}', AtomType::Ord);
    s.define("nexists", '\u{2204}', AtomType::Ord);
    s.define("neg", '\u{ac}', AtomType::Ord);
    s.define("lnot", '\u{ac}', AtomType::Ord);
    s.define("emptyset", '\u{2205}', AtomType::Ord);
    s.define("varnothing", '\u{2205}', AtomType::Ord);
    s.define("angle", '\u{2220}', AtomType::Ord);
    s.define("triangle", '\u{25b3}', AtomType::Ord);
    s.define("top", '\u{22a4}', AtomType::Ord);
    s.define("bot", '\u{22a5}', AtomType::Ord);
    s.define("prime", '\u{2032}', AtomType::Ord);
    s.define("ldots", '\u{2026}', AtomType::Inner);
    s.define("dots", '\u{2026}', AtomType::Inner);
    s.define("cdots", '\u{22ef}', AtomType::Inner);
    s.define("vdots", '\u{22ee}', AtomType::Ord);
    s.define("ddots", '\u{22f1}', AtomType::Inner);
    s.define("surd", '\u{221a}', AtomType::Ord);
    s.define("flat", '\u{266d}', AtomType::Ord);
    s.define("natural", '\u{266e}', AtomType::Ord);
    s.define("sharp", '\u{266f}', AtomType::Ord);
    s.define("clubsuit", '\u{2663}', AtomType::Ord);
    s.define("diamondsuit", '\u{2662}', AtomType::Ord);
    s.define("heartsuit", '\u{2661}', AtomType::Ord);
    s.define("spadesuit", '\u{2660}', AtomType::Ord);

    // Delimiters usable bare.
    s.define("langle", '\u{27e8}', AtomType::Open);
    s.define("rangle", '\u{27e9}', AtomType::Close);
    s.define("lceil", '\u{2308}', AtomType::Open);
    s.define("rceil", '\u{2309}', AtomType::Close);
    s.define("lfloor", '\u{230a}', AtomType::Open);
    s.define("rfloor", '\u{230b}', AtomType::Close);
    s.define("lbrace", '{', AtomType::Open);
    s.define("rbrace", '}', AtomType::Close);
    s.define("lbrack", '[', AtomType::Open);
    s.define("rbrack", ']', AtomType::Close);
    s.define("vert", '\u{2223}', AtomType::Ord);
    s.define("Vert", '\u{2225}', AtomType::Ord);
    s.define("|", '\u{2225}', AtomType::Ord);
    s.define("backslash", '\\', AtomType::Ord);

    // Escaped characters.
    s.define("{", '{', AtomType::Open);
    s.define("}", '}', AtomType::Close);
    s.define("%", '%', AtomType::Ord);
    s.define("$", '$', AtomType::Ord);
    s.define("#", '#', AtomType::Ord);
    s.define("&", '&', AtomType::Ord);
    s.define("_", '_', AtomType::Ord);

    // Punctuation.
    s.define("colon", ':', AtomType::Punct);
    s.define("cdotp", '\u{22c5}', AtomType::Punct);
    s.define("ldotp", '.', AtomType::Punct);

    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_resolve() {
        let symbols = create_symbols();
        let alpha = symbols.command("alpha").unwrap();
        assert_eq!(alpha.character, '\u{3b1}');
        assert_eq!(alpha.atom_type, AtomType::Ord);
        let leq = symbols.command("leq").unwrap();
        assert_eq!(leq.atom_type, AtomType::Rel);
        assert!(symbols.command("nosuchsymbol").is_none());
    }

    #[test]
    fn ascii_minus_becomes_real_minus() {
        let symbols = create_symbols();
        let minus = symbols.character('-').unwrap();
        assert_eq!(minus.character, '\u{2212}');
        assert_eq!(minus.atom_type, AtomType::Bin);
        // Letters are handled outside the table.
        assert!(symbols.character('x').is_none());
    }

    #[test]
    fn aliases_agree() {
        let symbols = create_symbols();
        assert_eq!(symbols.command("le"), symbols.command("leq"));
        assert_eq!(symbols.command("to"), symbols.command("rightarrow"));
    }
}
