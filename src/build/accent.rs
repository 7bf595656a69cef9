//! Accents over a base, Appendix G rule 12.

use crate::atom::Atom;
use crate::boxes::{MathBox, VBox, VChild};
use crate::build::{common, create_box};
use crate::environment::Environment;
use crate::types::ParseError;
use crate::MathContext;

pub fn build_accent(
    ctx: &MathContext,
    env: &Environment<'_>,
    accent: char,
    base: &Atom,
    stretchy: bool,
) -> Result<MathBox, ParseError> {
    let base_env = env.having_cramped_style();
    let base_box = create_box(ctx, &base_env, base)?;

    // Skew slides the accent toward a slanted character's visual center.
    let skew = match &base_box {
        MathBox::Glyph { glyph, size } => glyph.skew * size,
        _ => 0.0,
    };

    let mut accent_box = common::glyph_box(env, accent)?;
    if stretchy && accent_box.width() < base_box.width() {
        let factor = base_box.width() / accent_box.width();
        accent_box = accent_box.scaled(factor, 1.0);
    }

    // The accent drops until it clears the base by at most an x-height.
    let clearance = base_box
        .height()
        .min(env.em_to_pt(env.constants().x_height));
    let gap = -clearance - accent_box.depth();
    let dx = skew + (base_box.width() - accent_box.width()) / 2.0;
    let depth = base_box.depth();
    Ok(MathBox::VBox(VBox::new(
        vec![
            VChild::at(dx.max(0.0), accent_box),
            VChild::plain(MathBox::Kern { width: gap }),
            VChild::plain(base_box),
        ],
        depth,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::AtomType;
    use crate::environment::Environment;
    use crate::font_metrics::FixedFontBackend;
    use crate::style::Style;
    use crate::types::Color;

    fn symbol(character: char) -> Atom {
        Atom::Symbol {
            character,
            atom_type: AtomType::Ord,
        }
    }

    #[test]
    fn accent_raises_the_box() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let env = Environment::new(&backend, Style::TEXT, 20.0, Color::BLACK);
        let base = symbol('a');
        let plain = create_box(&ctx, &env, &base).unwrap();
        let accented = build_accent(&ctx, &env, '\u{02C6}', &base, false).unwrap();
        assert!(accented.height() >= plain.height());
        assert_eq!(accented.depth(), plain.depth());
    }

    #[test]
    fn stretchy_accent_spans_a_wide_base() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let env = Environment::new(&backend, Style::TEXT, 20.0, Color::BLACK);
        let wide = Atom::Row(vec![symbol('a'), symbol('b'), symbol('c')]);
        let accented = build_accent(&ctx, &env, '\u{2192}', &wide, true).unwrap();
        let base = create_box(&ctx, &env, &wide).unwrap();
        let MathBox::VBox(stack) = accented else {
            panic!("expected a vertical stack");
        };
        assert!(stack.children[0].content.width() >= base.width() - 1e-9);
    }
}
