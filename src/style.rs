//! The four TeX styles and their cramped variants.
//!
//! A style determines the size ratio applied to glyphs, which glue table row
//! applies, and how sub-formulas (scripts, fraction parts) shrink. Cramped
//! styles place superscripts lower; they arise under subscripts, inside
//! radicals and in fraction denominators.

/// One of the eight TeX styles: display, text, script and scriptscript, each
/// in a normal and a cramped variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    id: u8,
}

const D: u8 = 0;
const DC: u8 = 1;
const T: u8 = 2;
const TC: u8 = 3;
const S: u8 = 4;
const SC: u8 = 5;
const SS: u8 = 6;
const SSC: u8 = 7;

// Transition tables, indexed by style id.
const SUP: [u8; 8] = [S, SC, S, SC, SS, SSC, SS, SSC];
const SUB: [u8; 8] = [SC, SC, SC, SC, SSC, SSC, SSC, SSC];
const FRAC_NUM: [u8; 8] = [T, TC, S, SC, SS, SSC, SS, SSC];
const FRAC_DEN: [u8; 8] = [TC, TC, SC, SC, SSC, SSC, SSC, SSC];
const CRAMP: [u8; 8] = [DC, DC, TC, TC, SC, SC, SSC, SSC];
const TO_TEXT: [u8; 8] = [D, DC, T, TC, T, TC, T, TC];

/// Glyph scale applied at each size level, relative to text size.
const SIZE_MULTIPLIERS: [f64; 4] = [1.0, 1.0, 0.7, 0.5];

impl Style {
    /// `\displaystyle`.
    pub const DISPLAY: Self = Self { id: D };
    /// `\textstyle`.
    pub const TEXT: Self = Self { id: T };
    /// `\scriptstyle`.
    pub const SCRIPT: Self = Self { id: S };
    /// `\scriptscriptstyle`.
    pub const SCRIPTSCRIPT: Self = Self { id: SS };

    /// Size level: 0 display, 1 text, 2 script, 3 scriptscript. Shared by
    /// the cramped variant.
    #[must_use]
    pub const fn size(self) -> usize {
        (self.id / 2) as usize
    }

    /// Whether this is a cramped variant.
    #[must_use]
    pub const fn is_cramped(self) -> bool {
        self.id % 2 == 1
    }

    /// Style of a superscript on a base in this style. Never cramped unless
    /// this style already is.
    #[must_use]
    pub const fn sup(self) -> Self {
        Self {
            id: SUP[self.id as usize],
        }
    }

    /// Style of a subscript on a base in this style. Always cramped.
    #[must_use]
    pub const fn sub(self) -> Self {
        Self {
            id: SUB[self.id as usize],
        }
    }

    /// Style of a fraction numerator in this style.
    #[must_use]
    pub const fn frac_num(self) -> Self {
        Self {
            id: FRAC_NUM[self.id as usize],
        }
    }

    /// Style of a fraction denominator in this style.
    #[must_use]
    pub const fn frac_den(self) -> Self {
        Self {
            id: FRAC_DEN[self.id as usize],
        }
    }

    /// The cramped variant of this style; idempotent.
    #[must_use]
    pub const fn cramp(self) -> Self {
        Self {
            id: CRAMP[self.id as usize],
        }
    }

    /// At least text style: script and scriptscript map back to text.
    #[must_use]
    pub const fn text(self) -> Self {
        Self {
            id: TO_TEXT[self.id as usize],
        }
    }

    /// Script and scriptscript styles use the tight glue table.
    #[must_use]
    pub const fn is_tight(self) -> bool {
        self.size() >= 2
    }

    /// Glyph scale for this style relative to text size.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        SIZE_MULTIPLIERS[self.size()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_transitions() {
        assert_eq!(Style::DISPLAY.sup(), Style::SCRIPT);
        assert_eq!(Style::TEXT.sup(), Style::SCRIPT);
        assert_eq!(Style::SCRIPT.sup(), Style::SCRIPTSCRIPT);
        assert_eq!(Style::SCRIPTSCRIPT.sup(), Style::SCRIPTSCRIPT);
        assert!(Style::DISPLAY.sub().is_cramped());
        assert_eq!(Style::DISPLAY.sub().size(), Style::SCRIPT.size());
    }

    #[test]
    fn fraction_transitions() {
        assert_eq!(Style::DISPLAY.frac_num(), Style::TEXT);
        assert_eq!(Style::DISPLAY.frac_den(), Style::TEXT.cramp());
        assert_eq!(Style::TEXT.frac_num(), Style::SCRIPT);
        assert_eq!(Style::SCRIPT.frac_den().size(), 3);
    }

    #[test]
    fn cramp_is_idempotent() {
        for style in [Style::DISPLAY, Style::TEXT, Style::SCRIPT, Style::SCRIPTSCRIPT] {
            assert!(style.cramp().is_cramped());
            assert_eq!(style.cramp(), style.cramp().cramp());
            assert_eq!(style.cramp().size(), style.size());
        }
    }

    #[test]
    fn text_lowers_scripts() {
        assert_eq!(Style::SCRIPT.text(), Style::TEXT);
        assert_eq!(Style::SCRIPTSCRIPT.cramp().text(), Style::TEXT.cramp());
        assert_eq!(Style::DISPLAY.text(), Style::DISPLAY);
    }

    #[test]
    fn multipliers_shrink() {
        assert_eq!(Style::DISPLAY.multiplier(), 1.0);
        assert_eq!(Style::SCRIPT.multiplier(), 0.7);
        assert_eq!(Style::SCRIPTSCRIPT.multiplier(), 0.5);
    }

    #[test]
    fn tightness() {
        assert!(!Style::TEXT.is_tight());
        assert!(Style::SCRIPT.is_tight());
        assert!(Style::SCRIPTSCRIPT.cramp().is_tight());
    }
}
