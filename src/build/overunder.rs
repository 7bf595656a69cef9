//! Material stacked above or below a base: `\overline`/`\underline`,
//! `\overset`/`\underset`, and display limits on large operators.

use crate::atom::Atom;
use crate::boxes::{MathBox, VBox, VChild};
use crate::build::{common, create_box};
use crate::environment::Environment;
use crate::types::ParseError;
use crate::MathContext;

/// `\overline{...}` / `\underline{...}`: a rule 3 thicknesses away from a
/// cramped body, with one thickness of air past the rule.
pub fn build_line(
    ctx: &MathContext,
    env: &Environment<'_>,
    body: &Atom,
    over: bool,
) -> Result<MathBox, ParseError> {
    let inner = create_box(ctx, &env.having_cramped_style(), body)?;
    let theta = common::rule_thickness(env);
    let gap = 3.0 * theta;
    let width = inner.width();
    let rule = MathBox::Rule {
        width,
        height: theta,
        depth: 0.0,
    };
    let inner_depth = inner.depth();
    if over {
        Ok(MathBox::VBox(VBox::new(
            vec![
                VChild::plain(MathBox::Kern { width: theta }),
                VChild::plain(rule),
                VChild::plain(MathBox::Kern { width: gap }),
                VChild::plain(inner),
            ],
            inner_depth,
        )))
    } else {
        let depth = inner_depth + gap + 2.0 * theta;
        Ok(MathBox::VBox(VBox::new(
            vec![
                VChild::plain(inner),
                VChild::plain(MathBox::Kern { width: gap }),
                VChild::plain(rule),
                VChild::plain(MathBox::Kern { width: theta }),
            ],
            depth,
        )))
    }
}

/// `\overset`/`\underset`: annotations in script style around a base.
pub fn build_over_under(
    ctx: &MathContext,
    env: &Environment<'_>,
    base: &Atom,
    over: Option<&Atom>,
    under: Option<&Atom>,
) -> Result<MathBox, ParseError> {
    let base_box = create_box(ctx, env, base)?;
    let over_box = match over {
        Some(atom) => Some(create_box(ctx, &env.having_style(env.style.sup()), atom)?),
        None => None,
    };
    let under_box = match under {
        Some(atom) => Some(create_box(ctx, &env.having_style(env.style.sub()), atom)?),
        None => None,
    };
    Ok(stack_around(env, base_box, over_box, under_box))
}

/// Scripts rendered as limits above and below a large operator.
pub fn build_limits(
    ctx: &MathContext,
    env: &Environment<'_>,
    op: MathBox,
    sup: Option<&Atom>,
    sub: Option<&Atom>,
) -> Result<MathBox, ParseError> {
    let over = match sup {
        Some(atom) => Some(create_box(ctx, &env.having_style(env.style.sup()), atom)?),
        None => None,
    };
    let under = match sub {
        Some(atom) => Some(create_box(ctx, &env.having_style(env.style.sub()), atom)?),
        None => None,
    };
    Ok(stack_around(env, op, over, under))
}

/// Center `over` and `under` on `base` with the big-op spacing parameters.
fn stack_around(
    env: &Environment<'_>,
    base: MathBox,
    over: Option<MathBox>,
    under: Option<MathBox>,
) -> MathBox {
    if over.is_none() && under.is_none() {
        return base;
    }
    let constants = env.constants();
    let above_min = env.em_to_pt(constants.big_op_spacing1);
    let below_min = env.em_to_pt(constants.big_op_spacing2);
    let above_target = env.em_to_pt(constants.big_op_spacing3);
    let below_target = env.em_to_pt(constants.big_op_spacing4);
    let padding = env.em_to_pt(constants.big_op_spacing5);

    let width = base
        .width()
        .max(over.as_ref().map_or(0.0, MathBox::width))
        .max(under.as_ref().map_or(0.0, MathBox::width));
    let center = |content: MathBox| {
        let dx = (width - content.width()) / 2.0;
        VChild::at(dx, content)
    };

    let base_depth = base.depth();
    let mut below_extent = 0.0;
    let mut children = Vec::with_capacity(7);
    if let Some(over) = over {
        let gap = above_min.max(above_target - over.depth());
        children.push(VChild::plain(MathBox::Kern { width: padding }));
        children.push(center(over));
        children.push(VChild::plain(MathBox::Kern { width: gap }));
    }
    children.push(center(base));
    if let Some(under) = under {
        let gap = below_min.max(below_target - under.height());
        below_extent = gap + under.height() + under.depth() + padding;
        children.push(VChild::plain(MathBox::Kern { width: gap }));
        children.push(center(under));
        children.push(VChild::plain(MathBox::Kern { width: padding }));
    }
    MathBox::VBox(VBox::new(children, base_depth + below_extent))
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

    fn env(backend: &FixedFontBackend) -> Environment<'_> {
        Environment::new(backend, Style::TEXT, 20.0, Color::BLACK)
    }

    #[test]
    fn overline_keeps_the_baseline() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let env = env(&backend);
        let body = symbol('x');
        let plain = create_box(&ctx, &env, &body).unwrap();
        let lined = build_line(&ctx, &env, &body, true).unwrap();
        assert!(lined.height() > plain.height());
        assert_eq!(lined.depth(), plain.depth());
    }

    #[test]
    fn underline_deepens_the_box() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let env = env(&backend);
        let body = symbol('x');
        let plain = create_box(&ctx, &env, &body).unwrap();
        let lined = build_line(&ctx, &env, &body, false).unwrap();
        assert!(lined.depth() > plain.depth());
        assert_eq!(lined.height(), plain.height());
    }

    #[test]
    fn overset_centers_on_the_wider_part() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let env = env(&backend);
        let base = symbol('=');
        let over = Atom::Row(vec![symbol('d'), symbol('e'), symbol('f')]);
        let stacked = build_over_under(&ctx, &env, &base, Some(&over), None).unwrap();
        let over_alone = create_box(&ctx, &env.having_style(env.style.sup()), &over).unwrap();
        assert!(stacked.width() >= over_alone.width());
    }

    #[test]
    fn limits_extend_both_directions() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let env = env(&backend);
        let op = create_box(&ctx, &env, &symbol('\u{2211}')).unwrap();
        let sup = symbol('n');
        let sub = symbol('k');
        let plain_total = op.height() + op.depth();
        let limited = build_limits(&ctx, &env, op, Some(&sup), Some(&sub)).unwrap();
        assert!(limited.height() + limited.depth() > plain_total);
    }
}
