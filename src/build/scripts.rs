//! Superscript and subscript placement, Appendix G rules 18a-f, and the
//! large-operator boxes scripts attach to.

use crate::atom::{Atom, Limits};
use crate::boxes::{HBox, HChild, MathBox, VBox, VChild};
use crate::build::{common, create_box, overunder};
use crate::environment::Environment;
use crate::font_metrics::{Extensible, FontStyle};
use crate::types::ParseError;
use crate::MathContext;

/// Extra kern after a script column.
const SCRIPT_SPACE_EM: f64 = 0.05;

/// A large operator: a symbol centered on the axis (with the display-size
/// variant when the font carries one) or an upright named function.
pub fn build_op(
    ctx: &MathContext,
    env: &Environment<'_>,
    symbol: Option<char>,
    name: Option<&str>,
) -> Result<MathBox, ParseError> {
    let Some(ch) = symbol else {
        return common::text_box(ctx, env, name.unwrap_or_default(), FontStyle::Roman);
    };
    let mut content = common::glyph_box(env, ch)?;
    if env.style.size() == 0 {
        // Display style asks the font for the next larger variant.
        let target = (content.height() + content.depth()) * 1.4 / env.scaled_size();
        let style = common::symbol_style(env, ch);
        if let Ok(Extensible::Variant(glyph)) = env.backend().delimiter(ch, style, target) {
            content = MathBox::Glyph {
                glyph,
                size: env.scaled_size(),
            };
        }
    }
    Ok(MathBox::HBox(HBox::new(vec![common::center_on_axis(
        env, content,
    )])))
}

/// Attach superscript and subscript material to a base.
pub fn build_scripts(
    ctx: &MathContext,
    env: &Environment<'_>,
    base: Option<&Atom>,
    sup: Option<&Atom>,
    sub: Option<&Atom>,
) -> Result<MathBox, ParseError> {
    if let Some(op @ Atom::Op { limits, .. }) = base {
        let over_under = match limits {
            Limits::Always => true,
            Limits::Never => false,
            Limits::Default => env.style.size() == 0,
        };
        if over_under {
            let op_box = create_box(ctx, env, op)?;
            return overunder::build_limits(ctx, env, op_box, sup, sub);
        }
    }

    let base_box = match base {
        Some(atom) => create_box(ctx, env, atom)?,
        None => MathBox::empty(),
    };
    // Italic correction carries a superscript past a slanted base.
    let italic = match &base_box {
        MathBox::Glyph { glyph, size } => glyph.italic * size,
        _ => 0.0,
    };
    // 18a: a lone character starts its scripts on the baseline.
    let simple_base = matches!(base, Some(Atom::Symbol { .. }) | None);

    let constants = env.constants();
    let sup_env = env.having_style(env.style.sup());
    let sub_env = env.having_style(env.style.sub());
    let (mut shift_up, mut shift_down) = if simple_base {
        (0.0, 0.0)
    } else {
        (
            base_box.height() - sup_env.em_to_pt(constants.sup_drop),
            base_box.depth() + sub_env.em_to_pt(constants.sub_drop),
        )
    };

    let sup_box = match sup {
        Some(atom) => Some(create_box(ctx, &sup_env, atom)?),
        None => None,
    };
    let sub_box = match sub {
        Some(atom) => Some(create_box(ctx, &sub_env, atom)?),
        None => None,
    };

    let theta = common::rule_thickness(env);
    let x_height = env.em_to_pt(constants.x_height);
    let script_space = env.em_to_pt(SCRIPT_SPACE_EM);
    let min_sup = if env.style.size() == 0 {
        constants.sup1
    } else if env.style.is_cramped() {
        constants.sup3
    } else {
        constants.sup2
    };
    let min_sup = env.em_to_pt(min_sup);

    let column = match (sup_box, sub_box) {
        (Some(sup_box), None) => {
            // 18c
            shift_up = shift_up
                .max(min_sup)
                .max(sup_box.depth() + x_height / 4.0);
            MathBox::HBox(HBox::new(vec![HChild::raised(shift_up, sup_box)]))
        }
        (None, Some(sub_box)) => {
            // 18b
            shift_down = shift_down
                .max(env.em_to_pt(constants.sub1))
                .max(sub_box.height() - 0.8 * x_height);
            MathBox::HBox(HBox::new(vec![HChild::raised(-shift_down, sub_box)]))
        }
        (Some(sup_box), Some(sub_box)) => {
            // 18d-f
            shift_up = shift_up
                .max(min_sup)
                .max(sup_box.depth() + x_height / 4.0);
            shift_down = shift_down.max(env.em_to_pt(constants.sub2));
            let gap = (shift_up - sup_box.depth()) - (sub_box.height() - shift_down);
            if gap < 4.0 * theta {
                shift_down += 4.0 * theta - gap;
            }
            let psi = 0.8 * x_height - (shift_up - sup_box.depth());
            if psi > 0.0 {
                shift_up += psi;
                shift_down -= psi;
            }
            let gap = (shift_up - sup_box.depth()) - (sub_box.height() - shift_down);
            let depth = shift_down + sub_box.depth();
            MathBox::VBox(VBox::new(
                vec![
                    VChild::at(italic, sup_box),
                    VChild::plain(MathBox::Kern { width: gap }),
                    VChild::plain(sub_box),
                ],
                depth,
            ))
        }
        (None, None) => return Ok(base_box),
    };

    let mut children = vec![HChild::plain(base_box)];
    if italic != 0.0 && !matches!(column, MathBox::VBox(_)) && sup.is_some() {
        children.push(HChild::plain(MathBox::Kern { width: italic }));
    }
    children.push(HChild::plain(column));
    children.push(HChild::plain(MathBox::Kern {
        width: script_space,
    }));
    Ok(MathBox::HBox(HBox::new(children)))
}
