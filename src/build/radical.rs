//! Square roots and nth roots, Appendix G rule 11.

use crate::atom::Atom;
use crate::boxes::{HBox, HChild, MathBox, VBox, VChild};
use crate::build::{common, create_box, delimiter};
use crate::environment::Environment;
use crate::style::Style;
use crate::types::ParseError;
use crate::MathContext;

const SURD: char = '\u{221A}';

pub fn build_radical(
    ctx: &MathContext,
    env: &Environment<'_>,
    degree: Option<&Atom>,
    body: &Atom,
) -> Result<MathBox, ParseError> {
    let inner_env = env.having_cramped_style();
    let inner = create_box(ctx, &inner_env, body)?;

    let theta = common::rule_thickness(env);
    // Clearance between the radicand and the overbar.
    let phi = if env.style.size() == 0 {
        env.em_to_pt(env.constants().x_height)
    } else {
        theta
    };
    let mut psi = theta + phi / 4.0;

    let needed = inner.height() + inner.depth() + psi + theta;
    let surd = delimiter::make_delimiter(env, SURD, needed)?;
    // A taller-than-needed surd splits the excess into extra clearance.
    let excess = (surd.height() + surd.depth()) - needed;
    if excess > 0.0 {
        psi += excess / 2.0;
    }

    let rule_top = inner.height() + psi + theta;
    let width = inner.width();
    let inner_depth = inner.depth();
    // Stacked so the radicand keeps its own baseline.
    let radicand = MathBox::VBox(VBox::new(
        vec![
            VChild::plain(MathBox::Rule {
                width,
                height: theta,
                depth: 0.0,
            }),
            VChild::plain(MathBox::Kern { width: psi }),
            VChild::plain(inner),
        ],
        inner_depth,
    ));

    let surd_shift = rule_top - surd.height();
    let surd_depth = surd.depth() - surd_shift;

    let mut children = Vec::with_capacity(3);
    if let Some(degree) = degree {
        let degree_env = env.having_style(Style::SCRIPTSCRIPT);
        let degree_box = create_box(ctx, &degree_env, degree)?;
        let raise = 0.6 * (rule_top - surd_depth);
        children.push(HChild::raised(raise, degree_box));
        children.push(HChild::plain(MathBox::Kern {
            width: env.em_to_pt(0.08),
        }));
    }
    children.push(HChild::raised(surd_shift, surd));
    children.push(HChild::plain(radicand));
    Ok(MathBox::HBox(HBox::new(children)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::AtomType;
    use crate::font_metrics::FixedFontBackend;
    use crate::types::Color;

    fn symbol(character: char) -> Atom {
        Atom::Symbol {
            character,
            atom_type: AtomType::Ord,
        }
    }

    #[test]
    fn radical_covers_its_body() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let env = Environment::new(&backend, Style::TEXT, 20.0, Color::BLACK);
        let body = symbol('x');
        let plain = create_box(&ctx, &env, &body).unwrap();
        let root = build_radical(&ctx, &env, None, &body).unwrap();
        assert!(root.height() > plain.height());
        assert!(root.width() > plain.width());
    }

    #[test]
    fn degree_widens_the_root() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let env = Environment::new(&backend, Style::TEXT, 20.0, Color::BLACK);
        let body = symbol('x');
        let degree = symbol('3');
        let plain = build_radical(&ctx, &env, None, &body).unwrap();
        let cubed = build_radical(&ctx, &env, Some(&degree), &body).unwrap();
        assert!(cubed.width() > plain.width());
    }

    #[test]
    fn display_clearance_exceeds_text_clearance() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let body = symbol('x');
        let display_env = Environment::new(&backend, Style::DISPLAY, 20.0, Color::BLACK);
        let text_env = Environment::new(&backend, Style::TEXT, 20.0, Color::BLACK);
        let display = build_radical(&ctx, &display_env, None, &body).unwrap();
        let text = build_radical(&ctx, &text_env, None, &body).unwrap();
        assert!(display.height() >= text.height());
    }
}
