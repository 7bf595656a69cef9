//! Translation from the parsed atom tree to measured boxes.
//!
//! Every atom kind has one construction routine; `create_box` dispatches
//! and the submodules hold the vertical-material algorithms (scripts,
//! fractions, radicals, big delimiters, arrays).

pub mod accent;
pub mod common;
pub mod delimiter;
pub mod frac;
pub mod matrix;
pub mod overunder;
pub mod radical;
pub mod row;
pub mod scripts;

use crate::atom::{Atom, Transform};
use crate::boxes::{FramedBox, HBox, HChild, MathBox};
use crate::environment::Environment;
use crate::types::ParseError;
use crate::units::{Dimension, Unit};
use crate::MathContext;

/// Padding between enclosed content and its frame.
const FRAME_PADDING_EM: f64 = 0.1;

/// Lay out a top-level atom list in the given environment.
pub fn build_formula(
    ctx: &MathContext,
    env: &Environment<'_>,
    atoms: &[Atom],
) -> Result<MathBox, ParseError> {
    row::build_row(ctx, env, atoms)
}

/// Build the box for a single atom.
pub fn create_box(
    ctx: &MathContext,
    env: &Environment<'_>,
    atom: &Atom,
) -> Result<MathBox, ParseError> {
    match atom {
        Atom::Symbol { character, .. } => common::glyph_box(env, *character),
        Atom::Row(atoms) => row::build_row(ctx, env, atoms),
        Atom::Op { symbol, name, .. } => scripts::build_op(ctx, env, *symbol, name.as_deref()),
        Atom::Scripts { base, sup, sub } => {
            scripts::build_scripts(ctx, env, base.as_deref(), sup.as_deref(), sub.as_deref())
        }
        Atom::Fraction {
            numerator,
            denominator,
            bar_thickness,
            left_delim,
            right_delim,
            style,
            continued,
        } => frac::build_fraction(
            ctx,
            env,
            frac::FractionParts {
                numerator,
                denominator,
                bar_thickness: *bar_thickness,
                left_delim: *left_delim,
                right_delim: *right_delim,
                style: *style,
                continued: *continued,
            },
        ),
        Atom::Radical { degree, body } => {
            radical::build_radical(ctx, env, degree.as_deref(), body)
        }
        Atom::Accent {
            accent,
            base,
            stretchy,
        } => accent::build_accent(ctx, env, *accent, base, *stretchy),
        Atom::OverUnder { base, over, under } => {
            overunder::build_over_under(ctx, env, base, over.as_deref(), under.as_deref())
        }
        Atom::Line { body, over } => overunder::build_line(ctx, env, body, *over),
        Atom::LeftRight { left, right, body } => {
            delimiter::build_left_right(ctx, env, *left, *right, body)
        }
        Atom::Middle(delim) => common::glyph_box(env, *delim),
        Atom::SizedDelim {
            delimiter, size, ..
        } => delimiter::build_sized(env, *delimiter, *size),
        Atom::Color { color, body } => {
            let inner = env.with_color(*color);
            Ok(MathBox::Colored {
                color: *color,
                child: Box::new(row::build_row(ctx, &inner, body)?),
            })
        }
        Atom::Styling { style, body } => {
            let inner = env.having_style(*style);
            row::build_row(ctx, &inner, body)
        }
        Atom::Font { font_style, body } => {
            let inner = env.with_font_style(*font_style);
            create_box(ctx, &inner, body)
        }
        Atom::Text { text, font_style } => common::text_box(ctx, env, text, *font_style),
        Atom::Kern(size) => Ok(MathBox::Kern {
            width: size.to_points(env),
        }),
        Atom::Rule {
            shift,
            width,
            height,
        } => {
            let rule = MathBox::Rule {
                width: width.to_points(env),
                height: height.to_points(env),
                depth: 0.0,
            };
            match shift.map(|s| s.to_points(env)) {
                None => Ok(rule),
                Some(shift) if shift == 0.0 => Ok(rule),
                Some(shift) => Ok(MathBox::HBox(HBox::new(vec![HChild::raised(
                    shift, rule,
                )]))),
            }
        }
        Atom::Phantom {
            body,
            width,
            height,
        } => {
            let inner = create_box(ctx, env, body)?;
            Ok(inner.to_phantom(*width, *height))
        }
        Atom::Raise { body, dy } => {
            let inner = create_box(ctx, env, body)?;
            let dy = dy.to_points(env);
            Ok(MathBox::HBox(HBox::new(vec![HChild::raised(dy, inner)])))
        }
        Atom::Enclose { body, notation } => {
            let child = create_box(ctx, env, body)?;
            Ok(MathBox::Framed(FramedBox {
                child: Box::new(child),
                notation: *notation,
                rule: common::rule_thickness(env),
                padding: Dimension::new(FRAME_PADDING_EM, Unit::Em).to_points(env),
            }))
        }
        Atom::Transformed { body, transform } => {
            let inner = create_box(ctx, env, body)?;
            Ok(match *transform {
                Transform::Scale { x, y } => inner.scaled(x, y),
                Transform::Rotate { degrees } => inner.rotated(degrees),
                Transform::Reflect => MathBox::Reflected {
                    child: Box::new(inner),
                },
            })
        }
        Atom::Array(array) => matrix::build_array(ctx, env, array),
    }
}
