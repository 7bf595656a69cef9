//! Stretchy and explicitly sized delimiters.

use crate::atom::Atom;
use crate::boxes::{HBox, HChild, MathBox, VBox, VChild};
use crate::build::{common, row};
use crate::environment::Environment;
use crate::font_metrics::Extensible;
use crate::types::ParseError;
use crate::units::{Dimension, Unit};
use crate::MathContext;

/// Heights the `\big` family reaches for, in em.
const SIZED_TOTALS_EM: [f64; 4] = [1.2, 1.8, 2.4, 3.0];

/// Fraction of the content extent a `\left`/`\right` pair must cover.
const COVER_FRACTION: f64 = 0.901;

/// Space a `.` null delimiter still occupies, in em.
const NULL_DELIMITER_EM: f64 = 0.12;

/// A delimiter glyph or assembly at least `min_total` points tall.
pub fn make_delimiter(
    env: &Environment<'_>,
    delim: char,
    min_total: f64,
) -> Result<MathBox, ParseError> {
    let size = env.scaled_size();
    let style = common::symbol_style(env, delim);
    let found = env.backend().delimiter(delim, style, min_total / size)?;
    match found {
        Extensible::Variant(glyph) => Ok(MathBox::Glyph { glyph, size }),
        Extensible::Parts(parts) => Ok(assemble_parts(&parts, size, min_total)),
    }
}

/// Stack assembly pieces bottom to top, repeating fillers until the
/// requested extent is covered.
fn assemble_parts(
    parts: &[crate::font_metrics::GlyphPart],
    size: f64,
    min_total: f64,
) -> MathBox {
    let extent = |part: &crate::font_metrics::GlyphPart| {
        (part.metrics.height + part.metrics.depth) * size
    };
    let fixed: f64 = parts
        .iter()
        .filter(|part| !part.repeats)
        .map(extent)
        .sum();
    let fill: f64 = parts.iter().filter(|part| part.repeats).map(extent).sum();
    let mut copies = 1usize;
    if fill > 0.0 {
        while fixed + fill * copies as f64 + f64::EPSILON < min_total {
            copies += 1;
        }
    }
    // Render order is top to bottom.
    let mut children = Vec::new();
    let mut total = 0.0;
    for part in parts.iter().rev() {
        let repeat = if part.repeats { copies } else { 1 };
        for _ in 0..repeat {
            total += extent(part);
            children.push(VChild::plain(MathBox::Glyph {
                glyph: part.metrics,
                size,
            }));
        }
    }
    // Centered about the origin; callers place the result on the axis.
    MathBox::VBox(VBox::new(children, total / 2.0))
}

/// A delimiter of at least `min_total` points, centered on the math axis.
pub fn axis_delimiter(
    env: &Environment<'_>,
    delim: char,
    min_total: f64,
) -> Result<HChild, ParseError> {
    let boxed = make_delimiter(env, delim, min_total)?;
    Ok(common::center_on_axis(env, boxed))
}

/// `\big` through `\Bigg`, sizes 1 through 4.
pub fn build_sized(
    env: &Environment<'_>,
    delim: char,
    size: u8,
) -> Result<MathBox, ParseError> {
    let index = usize::from(size.clamp(1, 4)) - 1;
    let target = env.em_to_pt(SIZED_TOTALS_EM[index]);
    let child = axis_delimiter(env, delim, target)?;
    Ok(MathBox::HBox(HBox::new(vec![child])))
}

/// A `\left...\right` group, with any `\middle` delimiters inside matched
/// to the same height.
pub fn build_left_right(
    ctx: &MathContext,
    env: &Environment<'_>,
    left: Option<char>,
    right: Option<char>,
    body: &[Atom],
) -> Result<MathBox, ParseError> {
    // Segments between \middle delimiters space independently.
    let mut segments: Vec<MathBox> = Vec::new();
    let mut middles: Vec<char> = Vec::new();
    let mut start = 0;
    for (index, atom) in body.iter().enumerate() {
        if let Atom::Middle(delim) = atom {
            segments.push(row::build_row(ctx, env, &body[start..index])?);
            middles.push(*delim);
            start = index + 1;
        }
    }
    segments.push(row::build_row(ctx, env, &body[start..])?);

    let axis = common::axis_height(env);
    let mut above: f64 = 0.0;
    let mut below: f64 = 0.0;
    for segment in &segments {
        above = above.max(segment.height() - axis);
        below = below.max(segment.depth() + axis);
    }
    let target = 2.0 * COVER_FRACTION * above.max(below);

    let null_space = Dimension::new(NULL_DELIMITER_EM, Unit::Em).to_points(env);
    let delim_child = |delim: Option<char>| -> Result<HChild, ParseError> {
        match delim {
            Some(ch) => axis_delimiter(env, ch, target),
            None => Ok(HChild::plain(MathBox::Kern { width: null_space })),
        }
    };

    let mut children = Vec::with_capacity(segments.len() * 2 + 1);
    children.push(delim_child(left)?);
    let mut middles = middles.into_iter();
    for segment in segments {
        children.push(HChild::plain(segment));
        if let Some(delim) = middles.next() {
            children.push(axis_delimiter(env, delim, target)?);
        }
    }
    children.push(delim_child(right)?);
    Ok(MathBox::HBox(HBox::new(children)))
}
