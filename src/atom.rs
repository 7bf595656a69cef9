//! The parsed formula tree.
//!
//! Parsing produces a list of [`Atom`]s; every construct the engine knows is
//! one of the closed set of variants here. Atoms are immutable once built and
//! carry no measurements; layout turns them into boxes.

use crate::font_metrics::FontStyle;
use crate::style::Style;
use crate::types::Color;
use crate::units::Dimension;
use strum::Display;

/// TeX spacing category of an atom, driving inter-atom glue selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AtomType {
    /// Ordinary symbol (letters, digits).
    Ord,
    /// Large operator (`\sum`, `\int`).
    Op,
    /// Binary operator (`+`, `\times`).
    Bin,
    /// Relation (`=`, `<`, `\leq`).
    Rel,
    /// Opening delimiter.
    Open,
    /// Closing delimiter.
    Close,
    /// Punctuation (`,`, `;`).
    Punct,
    /// Inner subtree (fractions, `\left...\right` groups).
    Inner,
}

impl AtomType {
    /// Index into the glue table rows/columns.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Placement of limits on a large operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limits {
    /// Above/below in display style, scripts otherwise.
    Default,
    /// Always above/below.
    Always,
    /// Always as scripts.
    Never,
}

/// Which frame or strike `\boxed`/`\cancel`-family commands draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    Frame,
    DoubleFrame,
    RoundedFrame,
    StrikeUp,
    StrikeDown,
    StrikeHorizontal,
    StrikeCross,
}

/// A geometric transform applied to a finished subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Scale { x: f64, y: f64 },
    Rotate { degrees: f64 },
    Reflect,
}

/// One node of the parsed formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// A single glyph-bearing symbol with its spacing category.
    Symbol {
        character: char,
        atom_type: AtomType,
    },
    /// A braced group or other atom sequence treated as a unit.
    Row(Vec<Atom>),
    /// A large operator, by glyph or by upright name (`\lim`, `\sin`).
    Op {
        symbol: Option<char>,
        name: Option<String>,
        limits: Limits,
    },
    /// Base with optional superscript and subscript.
    Scripts {
        base: Option<Box<Atom>>,
        sup: Option<Box<Atom>>,
        sub: Option<Box<Atom>>,
    },
    /// Generalized fraction: `\frac`, `\binom`, `\over`, `\choose`, ...
    Fraction {
        numerator: Box<Atom>,
        denominator: Box<Atom>,
        /// `None` selects the default rule thickness; zero draws no bar.
        bar_thickness: Option<Dimension>,
        left_delim: Option<char>,
        right_delim: Option<char>,
        /// Forced style (`\dfrac`, `\tfrac`), otherwise derived.
        style: Option<Style>,
        /// `\cfrac`: numerator stays at text size.
        continued: bool,
    },
    /// `\sqrt[degree]{body}`.
    Radical {
        degree: Option<Box<Atom>>,
        body: Box<Atom>,
    },
    /// A diacritic over its base.
    Accent {
        accent: char,
        base: Box<Atom>,
        stretchy: bool,
    },
    /// `\overset`/`\underset`/`\stackrel` material around a base.
    OverUnder {
        base: Box<Atom>,
        over: Option<Box<Atom>>,
        under: Option<Box<Atom>>,
    },
    /// `\overline` / `\underline`.
    Line {
        body: Box<Atom>,
        over: bool,
    },
    /// A `\left...\right` group; `Middle` atoms may appear in the body.
    LeftRight {
        left: Option<char>,
        right: Option<char>,
        body: Vec<Atom>,
    },
    /// `\middle` inside a `\left...\right` group.
    Middle(char),
    /// An explicitly sized delimiter (`\big(` .. `\Biggr]`).
    SizedDelim {
        delimiter: char,
        /// 1 through 4, `\big` through `\Bigg`.
        size: u8,
        atom_type: AtomType,
    },
    /// Color change scoped to a subtree.
    Color {
        color: Color,
        body: Vec<Atom>,
    },
    /// Style switch (`\displaystyle` ...) scoped to the rest of the group.
    Styling {
        style: Style,
        body: Vec<Atom>,
    },
    /// Font switch (`\mathbf` ...) applied to an argument.
    Font {
        font_style: FontStyle,
        body: Box<Atom>,
    },
    /// A plain-text run from `\text{...}`.
    Text {
        text: String,
        font_style: FontStyle,
    },
    /// Fixed horizontal space (`\kern`, `\,`, `\quad`).
    Kern(Dimension),
    /// `\rule[shift]{width}{height}`.
    Rule {
        shift: Option<Dimension>,
        width: Dimension,
        height: Dimension,
    },
    /// Occupies space without painting; `width`/`height` select which
    /// dimensions survive (`\phantom` keeps both).
    Phantom {
        body: Box<Atom>,
        width: bool,
        height: bool,
    },
    /// `\raisebox{dy}{...}`.
    Raise {
        body: Box<Atom>,
        dy: Dimension,
    },
    /// A framed or struck-through subtree.
    Enclose {
        body: Box<Atom>,
        notation: Notation,
    },
    /// `\scalebox`/`\rotatebox`/`\reflectbox`.
    Transformed {
        body: Box<Atom>,
        transform: Transform,
    },
    /// A finalized array-like environment.
    Array(crate::environments::ArrayAtom),
}

impl Atom {
    /// An empty group.
    #[must_use]
    pub fn empty() -> Self {
        Self::Row(Vec::new())
    }

    /// The spacing category of this atom, or `None` for nodes transparent
    /// to spacing (kerns, rules, phantom-free wrappers with empty bodies).
    #[must_use]
    pub fn atom_type(&self) -> Option<AtomType> {
        match self {
            Self::Symbol { atom_type, .. } | Self::SizedDelim { atom_type, .. } => {
                Some(*atom_type)
            }
            Self::Op { .. } => Some(AtomType::Op),
            Self::Fraction { .. } | Self::LeftRight { .. } => Some(AtomType::Inner),
            Self::Radical { .. }
            | Self::Accent { .. }
            | Self::OverUnder { .. }
            | Self::Line { .. }
            | Self::Text { .. }
            | Self::Rule { .. }
            | Self::Enclose { .. }
            | Self::Transformed { .. }
            | Self::Array(_) => Some(AtomType::Ord),
            Self::Middle(_) => Some(AtomType::Rel),
            Self::Scripts { base, .. } => match base {
                Some(base) => base.atom_type().or(Some(AtomType::Ord)),
                None => Some(AtomType::Ord),
            },
            Self::Row(body) | Self::Color { body, .. } | Self::Styling { body, .. } => {
                body.first_atom_type()
            }
            Self::Font { body, .. }
            | Self::Phantom { body, .. }
            | Self::Raise { body, .. } => body.atom_type(),
            Self::Kern(_) => None,
        }
    }

    /// Like [`Atom::atom_type`] but looking through to the last constituent,
    /// for glue selection on the left of a following atom.
    #[must_use]
    pub fn last_atom_type(&self) -> Option<AtomType> {
        match self {
            Self::Row(body) | Self::Color { body, .. } | Self::Styling { body, .. } => {
                body.last_atom_type()
            }
            Self::Scripts { base, .. } => match base {
                Some(base) => base.last_atom_type().or(Some(AtomType::Ord)),
                None => Some(AtomType::Ord),
            },
            Self::Font { body, .. }
            | Self::Phantom { body, .. }
            | Self::Raise { body, .. } => body.last_atom_type(),
            _ => self.atom_type(),
        }
    }
}

/// Lookthrough helpers on atom sequences.
pub trait AtomListExt {
    /// Spacing category of the first spacing-relevant atom.
    fn first_atom_type(&self) -> Option<AtomType>;
    /// Spacing category of the last spacing-relevant atom.
    fn last_atom_type(&self) -> Option<AtomType>;
}

impl AtomListExt for [Atom] {
    fn first_atom_type(&self) -> Option<AtomType> {
        self.iter().find_map(Atom::atom_type)
    }

    fn last_atom_type(&self) -> Option<AtomType> {
        self.iter().rev().find_map(Atom::last_atom_type)
    }
}
