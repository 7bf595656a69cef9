//! Shared helpers for atom-to-box construction.

use crate::boxes::{HBox, HChild, MathBox};
use crate::environment::Environment;
use crate::font_metrics::FontStyle;
use crate::types::ParseError;
use crate::units::{Dimension, Unit};
use crate::MathContext;

/// Font style a bare symbol resolves in: letters take the environment's
/// style, everything else (digits, operators, delimiters) sets upright.
pub fn symbol_style(env: &Environment<'_>, ch: char) -> FontStyle {
    if env.font_style == FontStyle::Italic && !ch.is_alphabetic() {
        FontStyle::Roman
    } else {
        env.font_style
    }
}

/// A single glyph on the baseline at the environment's size.
pub fn glyph_box(env: &Environment<'_>, ch: char) -> Result<MathBox, ParseError> {
    let glyph = env.backend().glyph(ch, symbol_style(env, ch))?;
    Ok(MathBox::Glyph {
        glyph,
        size: env.scaled_size(),
    })
}

/// The default fraction-bar and overline thickness, in points.
pub fn rule_thickness(env: &Environment<'_>) -> f64 {
    env.em_to_pt(env.constants().default_rule_thickness)
}

/// Height of the math axis above the baseline, in points.
pub fn axis_height(env: &Environment<'_>) -> f64 {
    env.em_to_pt(env.constants().axis_height)
}

/// Raise `content` so its vertical center sits on the math axis.
pub fn center_on_axis(env: &Environment<'_>, content: MathBox) -> HChild {
    let shift = axis_height(env) - (content.height() - content.depth()) / 2.0;
    HChild::raised(shift, content)
}

/// A run of plain text: shaped by the host when a shaper is installed,
/// otherwise measured glyph by glyph.
pub fn text_box(
    ctx: &MathContext,
    env: &Environment<'_>,
    text: &str,
    style: FontStyle,
) -> Result<MathBox, ParseError> {
    let size = env.scaled_size();
    if let Some(shaper) = ctx.shaper() {
        let layout = shaper.create_layout(text, size, style);
        let bounds = shaper.bounds(layout);
        return Ok(MathBox::Text {
            layout,
            width: bounds.width,
            height: bounds.ascent,
            depth: bounds.height - bounds.ascent,
            size,
            style,
        });
    }
    let space = Dimension::new(1.0 / 3.0, Unit::Em).to_points(env);
    let mut children = Vec::new();
    for ch in text.chars() {
        if ch == ' ' {
            children.push(HChild::plain(MathBox::Kern { width: space }));
            continue;
        }
        let glyph = env.backend().glyph(ch, style)?;
        children.push(HChild::plain(MathBox::Glyph { glyph, size }));
    }
    Ok(MathBox::HBox(HBox::new(children)))
}
