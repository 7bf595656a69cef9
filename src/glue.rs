//! Inter-atom glue, after the table on page 181 of The TeXbook.
//!
//! The amount of space between two adjacent atoms depends only on their
//! spacing categories and the current style. Each table entry picks one of
//! four glue kinds (none, thin, medium, thick), with the medium and thick
//! entries suppressed in script and scriptscript styles where the TeXbook
//! parenthesizes them.

use crate::atom::AtomType;
use crate::environment::Environment;
use crate::style::Style;

/// A stretchable space, in mu (1/18 of the current quad).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glue {
    pub space: f64,
    pub stretch: f64,
    pub shrink: f64,
}

impl Glue {
    pub const NONE: Self = Self::new(0.0, 0.0, 0.0);
    pub const THIN: Self = Self::new(3.0, 0.0, 0.0);
    pub const MEDIUM: Self = Self::new(4.0, 4.0, 2.0);
    pub const THICK: Self = Self::new(5.0, 0.0, 5.0);

    const fn new(space: f64, stretch: f64, shrink: f64) -> Self {
        Self {
            space,
            stretch,
            shrink,
        }
    }

    /// The glue kind for the indexed table entry.
    const fn kind(index: u8) -> Self {
        match index {
            1 => Self::THIN,
            2 => Self::MEDIUM,
            3 => Self::THICK,
            _ => Self::NONE,
        }
    }

    /// Natural width in points for the given environment.
    #[must_use]
    pub fn space_pt(&self, env: &Environment<'_>) -> f64 {
        env.mu_to_pt(self.space)
    }
}

/// Table rows and columns are ordered Ord, Op, Bin, Rel, Open, Close,
/// Punct, Inner. Each entry holds [full, tight]: the kind in display/text
/// styles and the kind once parenthesized entries drop out in script
/// styles. The `*` cases from the TeXbook cannot arise after binary
/// demotion and are zero here.
#[rustfmt::skip]
static GLUE_TABLE: [[[u8; 2]; 8]; 8] = [
    [[0,0],[1,1],[2,0],[3,0],[0,0],[0,0],[0,0],[1,0]],
    [[1,1],[1,1],[0,0],[3,0],[0,0],[0,0],[0,0],[1,0]],
    [[2,0],[2,0],[0,0],[0,0],[2,0],[0,0],[0,0],[2,0]],
    [[3,0],[3,0],[0,0],[0,0],[3,0],[0,0],[0,0],[3,0]],
    [[0,0],[0,0],[0,0],[0,0],[0,0],[0,0],[0,0],[0,0]],
    [[0,0],[1,1],[2,0],[3,0],[0,0],[0,0],[0,0],[1,0]],
    [[1,0],[1,0],[0,0],[1,0],[1,0],[1,0],[1,0],[1,0]],
    [[1,0],[1,1],[2,0],[3,0],[1,0],[0,0],[1,0],[1,0]],
];

/// The glue between a `left` atom and a `right` atom in `style`.
///
/// Total over all inputs; identical inputs always give identical glue.
#[must_use]
pub fn between(left: AtomType, right: AtomType, style: Style) -> Glue {
    let column = usize::from(style.is_tight());
    let entry = GLUE_TABLE[left.index()][right.index()][column];
    Glue::kind(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_metrics::FixedFontBackend;
    use crate::types::Color;

    const ALL_TYPES: [AtomType; 8] = [
        AtomType::Ord,
        AtomType::Op,
        AtomType::Bin,
        AtomType::Rel,
        AtomType::Open,
        AtomType::Close,
        AtomType::Punct,
        AtomType::Inner,
    ];

    #[test]
    fn total_and_nonnegative_over_the_whole_domain() {
        for left in ALL_TYPES {
            for right in ALL_TYPES {
                for style in [
                    Style::DISPLAY,
                    Style::TEXT,
                    Style::SCRIPT,
                    Style::SCRIPTSCRIPT,
                ] {
                    let glue = between(left, right, style);
                    assert!(glue.space >= 0.0);
                    assert!(glue.stretch >= 0.0);
                    assert!(glue.shrink >= 0.0);
                    assert_eq!(glue, between(left, right, style));
                }
            }
        }
    }

    #[test]
    fn classic_entries() {
        // x + y: Ord-Bin and Bin-Ord get medium space in text style.
        assert_eq!(between(AtomType::Ord, AtomType::Bin, Style::TEXT), Glue::MEDIUM);
        assert_eq!(between(AtomType::Bin, AtomType::Ord, Style::TEXT), Glue::MEDIUM);
        // x = y: thick space around relations.
        assert_eq!(between(AtomType::Ord, AtomType::Rel, Style::DISPLAY), Glue::THICK);
        // f(x): no space after an opening delimiter.
        assert_eq!(between(AtomType::Open, AtomType::Ord, Style::TEXT), Glue::NONE);
    }

    #[test]
    fn parenthesized_entries_drop_in_script_styles() {
        assert_eq!(between(AtomType::Ord, AtomType::Bin, Style::SCRIPT), Glue::NONE);
        assert_eq!(
            between(AtomType::Ord, AtomType::Rel, Style::SCRIPTSCRIPT),
            Glue::NONE
        );
        // Thin Ord-Op space survives everywhere.
        assert_eq!(between(AtomType::Ord, AtomType::Op, Style::SCRIPT), Glue::THIN);
    }

    #[test]
    fn space_scales_with_quad() {
        let backend = FixedFontBackend::default();
        let env = Environment::new(&backend, Style::TEXT, 18.0, Color::BLACK);
        let thin = between(AtomType::Ord, AtomType::Op, Style::TEXT);
        // 3 mu at quad = 18 pt is exactly 3 pt.
        assert!((thin.space_pt(&env) - 3.0).abs() < 1e-9);
    }
}
