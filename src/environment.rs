//! The immutable layout environment threaded through box construction.
//!
//! An [`Environment`] bundles everything a subtree needs to measure itself:
//! the current TeX style, the base point size, the active color and font
//! style, and a handle to the host's font backend. Derivation methods return
//! modified copies, so a child subtree can change style without affecting
//! its siblings.

use crate::font_metrics::{FontBackend, FontConstants, FontStyle};
use crate::style::Style;
use crate::types::Color;

/// Layout state for one subtree.
#[derive(Clone, Copy)]
pub struct Environment<'f> {
    /// Current TeX style.
    pub style: Style,
    /// Base text size in points, before style scaling.
    pub text_size: f64,
    /// Color applied to glyphs and rules produced in this environment.
    pub color: Color,
    /// Current font style for symbol lookup.
    pub font_style: FontStyle,
    backend: &'f dyn FontBackend,
}

impl<'f> Environment<'f> {
    /// The root environment for a formula.
    pub fn new(backend: &'f dyn FontBackend, style: Style, text_size: f64, color: Color) -> Self {
        Self {
            style,
            text_size,
            color,
            font_style: FontStyle::Italic,
            backend,
        }
    }

    /// The font backend measurements come from.
    #[must_use]
    pub fn backend(&self) -> &'f dyn FontBackend {
        self.backend
    }

    /// Font-dimension parameters for the current style size.
    #[must_use]
    pub fn constants(&self) -> &'f FontConstants {
        self.backend.constants(self.style.size())
    }

    /// Effective point size: base size scaled by the style multiplier.
    #[must_use]
    pub fn scaled_size(&self) -> f64 {
        self.text_size * self.style.multiplier()
    }

    /// Convert a value in em (at the current effective size) to points.
    #[must_use]
    pub fn em_to_pt(&self, em: f64) -> f64 {
        em * self.scaled_size()
    }

    /// One math unit in points: 1/18 of the current quad.
    #[must_use]
    pub fn mu_to_pt(&self, mu: f64) -> f64 {
        self.em_to_pt(mu * self.constants().quad / 18.0)
    }

    /// A copy in the given style.
    #[must_use]
    pub fn having_style(&self, style: Style) -> Self {
        Self { style, ..*self }
    }

    /// A copy in the cramped variant of the current style.
    #[must_use]
    pub fn having_cramped_style(&self) -> Self {
        self.having_style(self.style.cramp())
    }

    /// A copy with a different color.
    #[must_use]
    pub fn with_color(&self, color: Color) -> Self {
        Self { color, ..*self }
    }

    /// A copy with a different font style.
    #[must_use]
    pub fn with_font_style(&self, font_style: FontStyle) -> Self {
        Self { font_style, ..*self }
    }

}

impl core::fmt::Debug for Environment<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Environment")
            .field("style", &self.style)
            .field("text_size", &self.text_size)
            .field("color", &self.color)
            .field("font_style", &self.font_style)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_metrics::FixedFontBackend;

    #[test]
    fn scaled_size_follows_style() {
        let backend = FixedFontBackend::default();
        let env = Environment::new(&backend, Style::TEXT, 20.0, Color::BLACK);
        assert_eq!(env.scaled_size(), 20.0);
        assert_eq!(env.having_style(Style::SCRIPT).scaled_size(), 14.0);
        assert_eq!(env.having_style(Style::SCRIPTSCRIPT).scaled_size(), 10.0);
    }

    #[test]
    fn derivations_do_not_leak() {
        let backend = FixedFontBackend::default();
        let env = Environment::new(&backend, Style::DISPLAY, 20.0, Color::BLACK);
        let cramped = env.having_cramped_style();
        assert!(cramped.style.is_cramped());
        assert!(!env.style.is_cramped());
    }

    #[test]
    fn mu_is_an_eighteenth_of_quad() {
        let backend = FixedFontBackend::default();
        let env = Environment::new(&backend, Style::TEXT, 18.0, Color::BLACK);
        // quad = 1.0 em, so 18 mu = 1 em = 18 pt here.
        assert!((env.mu_to_pt(18.0) - 18.0).abs() < 1e-9);
        assert!((env.mu_to_pt(3.0) - 3.0).abs() < 1e-9);
    }
}
