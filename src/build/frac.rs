//! Generalized fractions, Appendix G rule 15.

use crate::atom::Atom;
use crate::boxes::{HBox, HChild, MathBox, VBox, VChild};
use crate::build::{common, create_box, delimiter};
use crate::environment::Environment;
use crate::style::Style;
use crate::types::ParseError;
use crate::units::Dimension;
use crate::MathContext;

/// The fields of a fraction atom, borrowed for construction.
pub struct FractionParts<'a> {
    pub numerator: &'a Atom,
    pub denominator: &'a Atom,
    pub bar_thickness: Option<Dimension>,
    pub left_delim: Option<char>,
    pub right_delim: Option<char>,
    pub style: Option<Style>,
    pub continued: bool,
}

pub fn build_fraction(
    ctx: &MathContext,
    env: &Environment<'_>,
    parts: FractionParts<'_>,
) -> Result<MathBox, ParseError> {
    let env = match parts.style {
        Some(style) => env.having_style(style),
        None => *env,
    };
    let display = env.style.size() == 0;

    let mut num_style = env.style.frac_num();
    if parts.continued {
        // Continued fractions keep their numerators readable.
        num_style = num_style.text();
    }
    let num_env = env.having_style(num_style);
    let den_env = env.having_style(env.style.frac_den());
    let num = create_box(ctx, &num_env, parts.numerator)?;
    let den = create_box(ctx, &den_env, parts.denominator)?;

    let default_theta = common::rule_thickness(&env);
    let theta = match parts.bar_thickness {
        Some(thickness) => thickness.to_points(&env),
        None => default_theta,
    };
    let axis = common::axis_height(&env);
    let constants = env.constants();

    // 15a/15b: starting shifts for numerator and denominator.
    let mut num_shift = if display {
        env.em_to_pt(constants.num1)
    } else if theta != 0.0 {
        env.em_to_pt(constants.num2)
    } else {
        env.em_to_pt(constants.num3)
    };
    let mut den_shift = if display {
        env.em_to_pt(constants.denom1)
    } else {
        env.em_to_pt(constants.denom2)
    };

    let width = num.width().max(den.width());
    let body = if theta == 0.0 {
        // 15c: no bar; keep a minimum gap, widening symmetrically.
        let clearance = if display {
            7.0 * default_theta
        } else {
            3.0 * default_theta
        };
        let gap = (num_shift - num.depth()) - (den.height() - den_shift);
        if gap < clearance {
            let bump = (clearance - gap) / 2.0;
            num_shift += bump;
            den_shift += bump;
        }
        let gap = (num_shift - num.depth()) - (den.height() - den_shift);
        let depth = den_shift + den.depth();
        MathBox::VBox(VBox::new(
            vec![
                VChild::at((width - num.width()) / 2.0, num),
                VChild::plain(MathBox::Kern { width: gap }),
                VChild::at((width - den.width()) / 2.0, den),
            ],
            depth,
        ))
    } else {
        // 15d/15e: the bar sits centered on the axis; each part clears it.
        let clearance = if display {
            3.0 * default_theta
        } else {
            default_theta
        };
        let bar_top = axis + theta / 2.0;
        let bar_bottom = axis - theta / 2.0;
        let num_gap = (num_shift - num.depth()) - bar_top;
        if num_gap < clearance {
            num_shift += clearance - num_gap;
        }
        let den_gap = bar_bottom - (den.height() - den_shift);
        if den_gap < clearance {
            den_shift += clearance - den_gap;
        }
        let num_gap = (num_shift - num.depth()) - bar_top;
        let den_gap = bar_bottom - (den.height() - den_shift);
        let depth = den_shift + den.depth();
        MathBox::VBox(VBox::new(
            vec![
                VChild::at((width - num.width()) / 2.0, num),
                VChild::plain(MathBox::Kern { width: num_gap }),
                VChild::plain(MathBox::Rule {
                    width,
                    height: theta,
                    depth: 0.0,
                }),
                VChild::plain(MathBox::Kern { width: den_gap }),
                VChild::at((width - den.width()) / 2.0, den),
            ],
            depth,
        ))
    };

    if parts.left_delim.is_none() && parts.right_delim.is_none() {
        return Ok(body);
    }

    // \binom and \genfrac delimiters at the rule-15 sizes.
    let target = if display {
        env.em_to_pt(constants.delim1)
    } else {
        env.em_to_pt(constants.delim2)
    };
    let mut children = Vec::with_capacity(3);
    if let Some(left) = parts.left_delim {
        children.push(delimiter::axis_delimiter(&env, left, target)?);
    }
    children.push(HChild::plain(body));
    if let Some(right) = parts.right_delim {
        children.push(delimiter::axis_delimiter(&env, right, target)?);
    }
    Ok(MathBox::HBox(HBox::new(children)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::AtomType;
    use crate::font_metrics::FixedFontBackend;
    use crate::types::Color;
    use crate::units::Unit;

    fn parts<'a>(num: &'a Atom, den: &'a Atom) -> FractionParts<'a> {
        FractionParts {
            numerator: num,
            denominator: den,
            bar_thickness: None,
            left_delim: None,
            right_delim: None,
            style: None,
            continued: false,
        }
    }

    fn symbol(character: char) -> Atom {
        Atom::Symbol {
            character,
            atom_type: AtomType::Ord,
        }
    }

    #[test]
    fn numerator_sits_above_denominator() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let env = Environment::new(&backend, Style::DISPLAY, 20.0, Color::BLACK);
        let num = symbol('1');
        let den = symbol('2');
        let frac = build_fraction(&ctx, &env, parts(&num, &den)).unwrap();
        let plain = create_box(&ctx, &env, &num).unwrap();
        assert!(frac.height() > plain.height());
        assert!(frac.depth() > plain.depth());
    }

    #[test]
    fn display_fraction_is_taller_than_text() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let num = symbol('1');
        let den = symbol('2');
        let display_env = Environment::new(&backend, Style::DISPLAY, 20.0, Color::BLACK);
        let text_env = Environment::new(&backend, Style::TEXT, 20.0, Color::BLACK);
        let display = build_fraction(&ctx, &display_env, parts(&num, &den)).unwrap();
        let text = build_fraction(&ctx, &text_env, parts(&num, &den)).unwrap();
        assert!(display.height() + display.depth() > text.height() + text.depth());
    }

    #[test]
    fn zero_thickness_draws_no_rule() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let env = Environment::new(&backend, Style::TEXT, 20.0, Color::BLACK);
        let num = symbol('n');
        let den = symbol('k');
        let mut p = parts(&num, &den);
        p.bar_thickness = Some(Dimension::new(0.0, Unit::Pt));
        let barless = build_fraction(&ctx, &env, p).unwrap();
        let MathBox::VBox(stack) = barless else {
            panic!("expected a vertical stack");
        };
        assert!(stack
            .children
            .iter()
            .all(|child| !matches!(child.content, MathBox::Rule { .. })));
    }

    #[test]
    fn delimiters_wrap_the_stack() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let env = Environment::new(&backend, Style::TEXT, 20.0, Color::BLACK);
        let num = symbol('n');
        let den = symbol('k');
        let mut p = parts(&num, &den);
        p.left_delim = Some('(');
        p.right_delim = Some(')');
        p.bar_thickness = Some(Dimension::ZERO);
        let binom = build_fraction(&ctx, &env, p).unwrap();
        let mut q = parts(&num, &den);
        q.bar_thickness = Some(Dimension::ZERO);
        let bare = build_fraction(&ctx, &env, q).unwrap();
        assert!(binom.width() > bare.width());
    }
}
