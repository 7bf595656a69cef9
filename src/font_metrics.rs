//! The font-metrics boundary between the engine and its host.
//!
//! The engine never reads font files. Everything it needs to measure glyphs
//! comes through the [`FontBackend`] trait: per-glyph dimensions, pair
//! kerning, sized/extensible delimiter lookup and the TeX font-dimension
//! parameters ([`FontConstants`]). Plain text runs (inside `\text{...}`) are
//! shaped through the separate [`TextShaper`] collaborator so the engine can
//! treat them as opaque measured rectangles.
//!
//! All metrics are expressed in em units at a nominal size of 1.0; layout
//! scales them by the environment's effective point size.

use crate::types::{ParseError, ParseErrorKind};
use bon::bon;
use strum::Display;

/// Font selection for a glyph, combining family and face the way the
/// original engine's font-style flags do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FontStyle {
    /// Math italic, the default for letters in math mode.
    Italic,
    /// Upright roman, used by `\mathrm` and digits.
    Roman,
    /// Bold roman, `\mathbf`.
    Bold,
    /// Bold italic, `\boldsymbol`.
    BoldItalic,
    /// Sans serif, `\mathsf`.
    SansSerif,
    /// Monospace, `\mathtt`.
    Typewriter,
    /// Calligraphic, `\mathcal`.
    Calligraphic,
    /// Blackboard bold, `\mathbb`.
    Blackboard,
    /// Fraktur, `\mathfrak`.
    Fraktur,
}

/// Measurements for one glyph, in em at nominal size 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Glyph identifier in the host font, passed back in draw commands.
    pub glyph_id: u32,
    /// The character this glyph renders.
    pub character: char,
    /// Font style the glyph was resolved in.
    pub style: FontStyle,
    /// Advance width.
    pub width: f64,
    /// Extent above the baseline.
    pub height: f64,
    /// Extent below the baseline.
    pub depth: f64,
    /// Italic correction, added after the glyph in some contexts.
    pub italic: f64,
    /// Accent skew: horizontal offset for accents centered on this glyph.
    pub skew: f64,
}

#[bon]
impl GlyphMetrics {
    /// Construct metrics; italic correction and skew default to zero.
    #[builder]
    pub fn new(
        glyph_id: u32,
        character: char,
        style: FontStyle,
        width: f64,
        height: f64,
        depth: f64,
        italic: Option<f64>,
        skew: Option<f64>,
    ) -> Self {
        Self {
            glyph_id,
            character,
            style,
            width,
            height,
            depth,
            italic: italic.unwrap_or(0.0),
            skew: skew.unwrap_or(0.0),
        }
    }
}

/// One piece of an extensible delimiter assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPart {
    /// The piece itself.
    pub metrics: GlyphMetrics,
    /// Whether this piece may be repeated to fill the required extent.
    pub repeats: bool,
}

/// Result of a delimiter lookup: either a single pre-sized variant glyph or
/// a vertical assembly of parts.
#[derive(Debug, Clone, PartialEq)]
pub enum Extensible {
    /// A single glyph tall enough for the request.
    Variant(GlyphMetrics),
    /// Stacked parts, bottom to top; repeatable parts fill remaining space.
    Parts(Vec<GlyphPart>),
}

/// Endianness of any binary metrics blob the backend consumes, so hosts
/// crossing a serialization boundary can interpret shared buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

impl ByteOrder {
    /// The byte order of the running target.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }
}

/// The TeX font-dimension parameters (the "sigmas"), in em.
///
/// These drive script shifts, fraction placement and radical clearances.
/// The default values are the Computer Modern `cmsy10`/`cmex10` set that
/// plain TeX ships with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontConstants {
    pub x_height: f64,
    pub quad: f64,
    pub axis_height: f64,
    pub default_rule_thickness: f64,
    pub num1: f64,
    pub num2: f64,
    pub num3: f64,
    pub denom1: f64,
    pub denom2: f64,
    pub sup1: f64,
    pub sup2: f64,
    pub sup3: f64,
    pub sub1: f64,
    pub sub2: f64,
    pub sup_drop: f64,
    pub sub_drop: f64,
    pub delim1: f64,
    pub delim2: f64,
    pub big_op_spacing1: f64,
    pub big_op_spacing2: f64,
    pub big_op_spacing3: f64,
    pub big_op_spacing4: f64,
    pub big_op_spacing5: f64,
}

#[allow(missing_docs)]
impl FontConstants {
    /// Computer Modern values at text size.
    pub const CMSY: Self = Self {
        x_height: 0.431,
        quad: 1.0,
        axis_height: 0.25,
        default_rule_thickness: 0.04,
        num1: 0.677,
        num2: 0.394,
        num3: 0.444,
        denom1: 0.686,
        denom2: 0.345,
        sup1: 0.413,
        sup2: 0.363,
        sup3: 0.289,
        sub1: 0.15,
        sub2: 0.247,
        sup_drop: 0.386,
        sub_drop: 0.05,
        delim1: 2.39,
        delim2: 1.01,
        big_op_spacing1: 0.111,
        big_op_spacing2: 0.166,
        big_op_spacing3: 0.2,
        big_op_spacing4: 0.6,
        big_op_spacing5: 0.1,
    };
}

impl Default for FontConstants {
    fn default() -> Self {
        Self::CMSY
    }
}

/// Provider of glyph measurements, supplied by the host.
///
/// A backend may be shared across many parse calls; the engine performs no
/// locking around lookups, so hosts that mutate the backend (adding fonts at
/// runtime) must serialize those mutations against in-flight layout.
pub trait FontBackend {
    /// Metrics for `ch` in the given font style.
    ///
    /// Fails with [`ParseErrorKind::SymbolNotFound`] when the glyph is absent
    /// from the selected font and every configured fallback.
    fn glyph(&self, ch: char, style: FontStyle) -> Result<GlyphMetrics, ParseError>;

    /// Kerning adjustment between two adjacent glyphs, in em.
    fn kern(&self, _left: char, _right: char, _style: FontStyle) -> f64 {
        0.0
    }

    /// A delimiter for `ch` whose total extent (height + depth) is at least
    /// `min_total` em, as a larger variant or an extensible assembly.
    ///
    /// Fails with [`ParseErrorKind::DelimiterNotFound`] when the font has no
    /// stretchy form of `ch`.
    fn delimiter(&self, ch: char, style: FontStyle, min_total: f64)
        -> Result<Extensible, ParseError>;

    /// TeX font-dimension parameters for a style size level (0-3).
    fn constants(&self, style_size: usize) -> &FontConstants;

    /// Whether the style resolves to a font with math tables.
    fn is_math_font(&self, style: FontStyle) -> bool {
        matches!(style, FontStyle::Italic | FontStyle::BoldItalic)
    }

    /// Byte order of any binary metrics blob behind this backend.
    fn byte_order(&self) -> ByteOrder {
        ByteOrder::native()
    }
}

/// Handle to a shaped plain-text run owned by the host.
pub type LayoutId = u32;

/// Measured bounds of a shaped text run, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBounds {
    /// Total advance width.
    pub width: f64,
    /// Total height of the run.
    pub height: f64,
    /// Distance from the top of the run to the baseline.
    pub ascent: f64,
}

/// Shaping collaborator for plain (non-math) text runs.
pub trait TextShaper {
    /// Shape `text` at `size` points and return a handle to the layout.
    fn create_layout(&self, text: &str, size: f64, style: FontStyle) -> LayoutId;
    /// Measured bounds of a previously created layout.
    fn bounds(&self, layout: LayoutId) -> TextBounds;
    /// Release a layout handle.
    fn release(&self, layout: LayoutId);
}

/// A constant-metrics backend: every glyph is a fixed-proportion rectangle.
///
/// Useful for headless measurement and for tests, where real font data would
/// only add noise. Ascenders, descenders and delimiter growth follow crude
/// Computer Modern proportions.
#[derive(Debug, Clone, Default)]
pub struct FixedFontBackend {
    constants: FontConstants,
}

impl FixedFontBackend {
    const ASCENDER: f64 = 0.68;
    const DESCENDER: f64 = 0.19;

    fn metrics_for(ch: char, style: FontStyle) -> GlyphMetrics {
        let (height, depth) = match ch {
            'a'..='z' => {
                let depth = if matches!(ch, 'g' | 'j' | 'p' | 'q' | 'y') {
                    Self::DESCENDER
                } else {
                    0.0
                };
                let height = if matches!(ch, 'b' | 'd' | 'f' | 'h' | 'k' | 'l' | 't') {
                    Self::ASCENDER
                } else {
                    0.431
                };
                (height, depth)
            }
            '(' | ')' | '[' | ']' | '{' | '}' | '|' | '/' => (0.75, 0.25),
            '\u{221a}' => (0.8, 0.2),
            _ => (Self::ASCENDER, 0.0),
        };
        GlyphMetrics {
            glyph_id: ch as u32,
            character: ch,
            style,
            width: 0.5,
            height,
            depth,
            italic: 0.0,
            skew: 0.0,
        }
    }
}

impl FontBackend for FixedFontBackend {
    fn glyph(&self, ch: char, style: FontStyle) -> Result<GlyphMetrics, ParseError> {
        Ok(Self::metrics_for(ch, style))
    }

    fn delimiter(
        &self,
        ch: char,
        style: FontStyle,
        min_total: f64,
    ) -> Result<Extensible, ParseError> {
        if ch == '\u{0}' {
            return Err(ParseError::new(ParseErrorKind::DelimiterNotFound {
                delimiter: ch.to_string(),
            }));
        }
        let base = Self::metrics_for(ch, style);
        let total = (base.height + base.depth).max(min_total);
        // Grow around the axis like a real variant glyph would.
        let axis = self.constants.axis_height;
        Ok(Extensible::Variant(GlyphMetrics {
            height: total / 2.0 + axis,
            depth: total / 2.0 - axis,
            ..base
        }))
    }

    fn constants(&self, _style_size: usize) -> &FontConstants {
        &self.constants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_backend_is_deterministic() {
        let backend = FixedFontBackend::default();
        let a = backend.glyph('a', FontStyle::Italic).unwrap();
        let b = backend.glyph('a', FontStyle::Italic).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.width, 0.5);
        assert!(backend.glyph('p', FontStyle::Italic).unwrap().depth > 0.0);
    }

    #[test]
    fn fixed_backend_delimiters_meet_request() {
        let backend = FixedFontBackend::default();
        let Extensible::Variant(glyph) =
            backend.delimiter('(', FontStyle::Roman, 3.0).unwrap()
        else {
            panic!("expected a variant");
        };
        assert!(glyph.height + glyph.depth >= 3.0);
    }

    #[test]
    fn byte_order_default_is_native() {
        let backend = FixedFontBackend::default();
        assert_eq!(backend.byte_order(), ByteOrder::native());
    }
}
