//! Per-call configuration for parsing and layout.

use crate::macros::MacroDefinition;
use crate::namespace::Mapping;
use crate::types::Color;
use bon::bon;
use core::cell::RefCell;

/// Configuration for one `parse_and_layout` call.
///
/// `macros` is the session-scoped user macro registry: `\newcommand`
/// definitions land here and survive for as long as the same `Settings` value
/// is reused, so a host can parse several formulas against one set of user
/// macros. Built-in macros live in a separate immutable table and are never
/// written through this.
#[derive(Debug)]
pub struct Settings {
    /// Available layout width in points. Must be positive.
    pub width: f64,
    /// Font size for text-style rendering, in points.
    pub text_size: f64,
    /// Extra space between wrapped lines, in points.
    pub line_spacing: f64,
    /// Foreground color applied to the whole formula.
    pub color: Color,
    /// Pad the finished layout out to `width` when it comes up short.
    pub fill_width: bool,
    /// Start in display style rather than text style.
    pub display_mode: bool,
    /// Upper bound on macro expansions, guarding against `\def` loops.
    pub max_expand: usize,
    /// Session-scoped user macro registry.
    pub macros: RefCell<Mapping<MacroDefinition>>,
}

#[bon]
impl Settings {
    /// Build a `Settings` value; unspecified fields take the defaults
    /// below.
    #[builder]
    pub fn new(
        width: Option<f64>,
        text_size: Option<f64>,
        line_spacing: Option<f64>,
        color: Option<Color>,
        fill_width: Option<bool>,
        display_mode: Option<bool>,
        max_expand: Option<usize>,
    ) -> Self {
        Self {
            width: width.unwrap_or(f64::MAX),
            text_size: text_size.unwrap_or(20.0),
            line_spacing: line_spacing.unwrap_or(0.0),
            color: color.unwrap_or(Color::BLACK),
            fill_width: fill_width.unwrap_or(false),
            display_mode: display_mode.unwrap_or(true),
            max_expand: max_expand.unwrap_or(1000),
            macros: RefCell::new(Mapping::default()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.text_size, 20.0);
        assert_eq!(settings.color, Color::BLACK);
        assert!(settings.display_mode);
        assert_eq!(settings.max_expand, 1000);
        assert!(settings.macros.borrow().is_empty());
    }

    #[test]
    fn builder_overrides() {
        let settings = Settings::builder()
            .width(320.0)
            .text_size(14.0)
            .display_mode(false)
            .build();
        assert_eq!(settings.width, 320.0);
        assert_eq!(settings.text_size, 14.0);
        assert!(!settings.display_mode);
    }
}
