//! Array and matrix layout: a column-measuring pass, then row stacking
//! centered on the math axis.

use crate::boxes::{HBox, HChild, MathBox, VBox, VChild};
use crate::build::{common, delimiter, row};
use crate::environment::Environment;
use crate::environments::{ArrayAtom, ColumnAlign};
use crate::types::ParseError;
use crate::units::{Dimension, Unit};
use crate::MathContext;

/// Space between adjacent columns.
const COLUMN_GAP_EM: f64 = 1.0;
/// Minimum baseline-to-baseline distance between rows.
const BASELINE_SKIP_EM: f64 = 1.2;
/// Minimum clear space between a row's depth and the next row's height.
const LINE_SKIP_EM: f64 = 0.2;

pub fn build_array(
    ctx: &MathContext,
    env: &Environment<'_>,
    array: &ArrayAtom,
) -> Result<MathBox, ParseError> {
    // Cells are set in text style regardless of the outer style.
    let cell_env = env.having_style(env.style.text());
    let columns = array.num_columns();

    let mut cells: Vec<Vec<MathBox>> = Vec::with_capacity(array.rows.len());
    let mut column_widths = vec![0.0f64; columns];
    let mut row_heights = Vec::with_capacity(array.rows.len());
    let mut row_depths = Vec::with_capacity(array.rows.len());
    for source_row in &array.rows {
        let mut built = Vec::with_capacity(columns);
        let mut height = 0.0f64;
        let mut depth = 0.0f64;
        for (column, cell) in source_row.iter().enumerate() {
            let boxed = row::build_row(ctx, &cell_env, cell)?;
            column_widths[column] = column_widths[column].max(boxed.width());
            height = height.max(boxed.height());
            depth = depth.max(boxed.depth());
            built.push(boxed);
        }
        cells.push(built);
        row_heights.push(height);
        row_depths.push(depth);
    }

    let column_gap = Dimension::new(COLUMN_GAP_EM, Unit::Em).to_points(&cell_env);
    let baseline_skip = Dimension::new(BASELINE_SKIP_EM, Unit::Em).to_points(&cell_env);
    let line_skip = Dimension::new(LINE_SKIP_EM, Unit::Em).to_points(&cell_env);

    let mut children = Vec::with_capacity(cells.len() * 2);
    let mut total = 0.0;
    for (index, row_cells) in cells.into_iter().enumerate() {
        if index > 0 {
            // Keep baselines at least a skip apart, never letting rows touch.
            let natural = row_depths[index - 1] + row_heights[index] + line_skip;
            let gap = baseline_skip.max(natural) - row_depths[index - 1] - row_heights[index];
            children.push(VChild::plain(MathBox::Kern { width: gap }));
            total += gap;
        }
        let row_box = assemble_row(array, &column_widths, column_gap, row_cells);
        total += row_box.height() + row_box.depth();
        children.push(VChild::plain(row_box));
    }

    // The whole grid centers on the math axis.
    let axis = common::axis_height(env);
    let depth = total / 2.0 - axis;
    let grid = MathBox::VBox(VBox::new(children, depth));

    if array.left_delim.is_none() && array.right_delim.is_none() {
        return Ok(grid);
    }
    let target = 2.0 * (grid.height() - axis).max(grid.depth() + axis);
    let mut wrapped = Vec::with_capacity(3);
    if let Some(left) = array.left_delim {
        wrapped.push(delimiter::axis_delimiter(env, left, target)?);
    }
    wrapped.push(HChild::plain(grid));
    if let Some(right) = array.right_delim {
        wrapped.push(delimiter::axis_delimiter(env, right, target)?);
    }
    Ok(MathBox::HBox(HBox::new(wrapped)))
}

/// One grid row: cells padded to their column widths and aligned.
fn assemble_row(
    array: &ArrayAtom,
    column_widths: &[f64],
    column_gap: f64,
    cells: Vec<MathBox>,
) -> MathBox {
    let mut children = Vec::with_capacity(cells.len() * 2);
    for (column, cell) in cells.into_iter().enumerate() {
        if column > 0 {
            children.push(HChild::plain(MathBox::Kern { width: column_gap }));
        }
        let slack = column_widths[column] - cell.width();
        let before = match array.alignment(column) {
            ColumnAlign::Left => 0.0,
            ColumnAlign::Center => slack / 2.0,
            ColumnAlign::Right => slack,
        };
        if before > 0.0 {
            children.push(HChild::plain(MathBox::Kern { width: before }));
        }
        let after = slack - before;
        children.push(HChild::plain(cell));
        if after > 0.0 {
            children.push(HChild::plain(MathBox::Kern { width: after }));
        }
    }
    MathBox::HBox(HBox::new(children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::{Atom, AtomType};
    use crate::environments::ArrayBuilder;
    use crate::font_metrics::FixedFontBackend;
    use crate::style::Style;
    use crate::types::Color;

    fn symbol(character: char) -> Atom {
        Atom::Symbol {
            character,
            atom_type: AtomType::Ord,
        }
    }

    fn two_by_two(left: Option<char>, right: Option<char>) -> ArrayAtom {
        let mut builder = ArrayBuilder::default();
        builder.push_cell(vec![symbol('a')]);
        builder.push_cell(vec![symbol('b')]);
        builder.end_row();
        builder.push_cell(vec![symbol('c')]);
        builder.push_cell(vec![symbol('d')]);
        builder.end_row();
        builder.finish(Vec::new(), left, right)
    }

    #[test]
    fn grid_centers_on_the_axis() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let env = Environment::new(&backend, Style::TEXT, 20.0, Color::BLACK);
        let grid = build_array(&ctx, &env, &two_by_two(None, None)).unwrap();
        let axis = common::axis_height(&env);
        let center = (grid.height() - grid.depth()) / 2.0;
        assert!((center - axis).abs() < 1e-9);
    }

    #[test]
    fn columns_share_a_width() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let env = Environment::new(&backend, Style::TEXT, 20.0, Color::BLACK);
        let mut builder = ArrayBuilder::default();
        builder.push_cell(vec![symbol('a'), symbol('b'), symbol('c')]);
        builder.end_row();
        builder.push_cell(vec![symbol('x')]);
        builder.end_row();
        let array = builder.finish(Vec::new(), None, None);
        let grid = build_array(&ctx, &env, &array).unwrap();
        let MathBox::VBox(stack) = grid else {
            panic!("expected a vertical stack");
        };
        let widths: Vec<f64> = stack
            .children
            .iter()
            .filter(|child| !matches!(child.content, MathBox::Kern { .. }))
            .map(|child| child.content.width())
            .collect();
        assert_eq!(widths.len(), 2);
        assert!((widths[0] - widths[1]).abs() < 1e-9);
    }

    #[test]
    fn delimiters_cover_the_grid() {
        let ctx = MathContext::new(Box::new(FixedFontBackend::default()));
        let backend = FixedFontBackend::default();
        let env = Environment::new(&backend, Style::TEXT, 20.0, Color::BLACK);
        let wrapped = build_array(&ctx, &env, &two_by_two(Some('('), Some(')'))).unwrap();
        let bare = build_array(&ctx, &env, &two_by_two(None, None)).unwrap();
        assert!(wrapped.height() + wrapped.depth() >= bare.height() + bare.depth());
        assert!(wrapped.width() > bare.width());
    }
}
