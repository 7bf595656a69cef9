//! Measured boxes, the output of layout.
//!
//! Every box knows its width, its height above the baseline and its depth
//! below it. Composite boxes own their children outright and are never
//! mutated after construction; the renderer only walks them.

use crate::atom::Notation;
use crate::font_metrics::{FontStyle, GlyphMetrics, LayoutId};
use crate::types::Color;

/// One positioned child of an [`HBox`]: `shift` raises it above the
/// baseline (negative lowers).
#[derive(Debug, Clone, PartialEq)]
pub struct HChild {
    pub shift: f64,
    pub content: MathBox,
}

impl HChild {
    pub fn plain(content: MathBox) -> Self {
        Self {
            shift: 0.0,
            content,
        }
    }

    pub fn raised(shift: f64, content: MathBox) -> Self {
        Self { shift, content }
    }
}

/// Horizontal list; width is the sum of child widths.
#[derive(Debug, Clone, PartialEq)]
pub struct HBox {
    pub children: Vec<HChild>,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl HBox {
    pub fn new(children: Vec<HChild>) -> Self {
        let mut width = 0.0;
        let mut height: f64 = 0.0;
        let mut depth: f64 = 0.0;
        for child in &children {
            width += child.content.width();
            height = height.max(child.content.height() + child.shift);
            depth = depth.max(child.content.depth() - child.shift);
        }
        Self {
            children,
            width,
            height,
            depth,
        }
    }

    pub fn from_boxes(boxes: Vec<MathBox>) -> Self {
        Self::new(boxes.into_iter().map(HChild::plain).collect())
    }
}

/// One stacked child of a [`VBox`], offset `dx` from the left edge.
#[derive(Debug, Clone, PartialEq)]
pub struct VChild {
    pub dx: f64,
    pub content: MathBox,
}

impl VChild {
    pub fn plain(content: MathBox) -> Self {
        Self { dx: 0.0, content }
    }

    pub fn at(dx: f64, content: MathBox) -> Self {
        Self { dx, content }
    }
}

/// Vertical stack, top to bottom. `depth` picks where the baseline falls;
/// kern boxes inside a vertical list act along the stack axis.
#[derive(Debug, Clone, PartialEq)]
pub struct VBox {
    pub children: Vec<VChild>,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl VBox {
    /// Stack children with the given depth below the baseline.
    pub fn new(children: Vec<VChild>, depth: f64) -> Self {
        let mut width: f64 = 0.0;
        let mut total = 0.0;
        for child in &children {
            width = width.max(child.dx + child.content.width());
            total += child.content.vertical_extent();
        }
        Self {
            children,
            width,
            height: total - depth,
            depth,
        }
    }
}

/// A stroked or struck decoration around a child box.
#[derive(Debug, Clone, PartialEq)]
pub struct FramedBox {
    pub child: Box<MathBox>,
    pub notation: Notation,
    /// Stroke width in points.
    pub rule: f64,
    /// Space between the child and the frame, in points.
    pub padding: f64,
}

/// A measured, renderable node.
#[derive(Debug, Clone, PartialEq)]
pub enum MathBox {
    /// A single glyph sitting on the baseline.
    Glyph {
        glyph: GlyphMetrics,
        /// Point size the em-metrics are scaled by.
        size: f64,
    },
    /// A host-shaped text run.
    Text {
        layout: LayoutId,
        width: f64,
        height: f64,
        depth: f64,
        size: f64,
        style: FontStyle,
    },
    /// A filled rectangle from `depth` below to `height` above the baseline.
    Rule {
        width: f64,
        height: f64,
        depth: f64,
    },
    /// Stretchable space at natural width.
    Glue {
        width: f64,
        stretch: f64,
        shrink: f64,
    },
    /// Fixed space; vertical when inside a `VBox`.
    Kern { width: f64 },
    HBox(HBox),
    VBox(VBox),
    /// Color override for a subtree.
    Colored { color: Color, child: Box<MathBox> },
    Scaled {
        x: f64,
        y: f64,
        child: Box<MathBox>,
        width: f64,
        height: f64,
        depth: f64,
    },
    Rotated {
        degrees: f64,
        child: Box<MathBox>,
        width: f64,
        height: f64,
        depth: f64,
        /// Offset of the rotated child's origin inside the new bounds.
        shift_x: f64,
        shift_y: f64,
    },
    Reflected { child: Box<MathBox> },
    Framed(FramedBox),
    /// Blank space with the dimensions of an elided subtree.
    Phantom {
        width: f64,
        height: f64,
        depth: f64,
    },
}

impl MathBox {
    /// An empty, dimensionless box.
    pub fn empty() -> Self {
        Self::Kern { width: 0.0 }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        match self {
            Self::Glyph { glyph, size, .. } => glyph.width * size,
            Self::Text { width, .. }
            | Self::Rule { width, .. }
            | Self::Glue { width, .. }
            | Self::Kern { width }
            | Self::Scaled { width, .. }
            | Self::Rotated { width, .. }
            | Self::Phantom { width, .. } => *width,
            Self::HBox(hbox) => hbox.width,
            Self::VBox(vbox) => vbox.width,
            Self::Colored { child, .. } | Self::Reflected { child } => child.width(),
            Self::Framed(framed) => {
                child_frame_extra(framed).mul_add(2.0, framed.child.width())
            }
        }
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        match self {
            Self::Glyph { glyph, size, .. } => glyph.height * size,
            Self::Text { height, .. }
            | Self::Rule { height, .. }
            | Self::Scaled { height, .. }
            | Self::Rotated { height, .. }
            | Self::Phantom { height, .. } => *height,
            Self::Glue { .. } | Self::Kern { .. } => 0.0,
            Self::HBox(hbox) => hbox.height,
            Self::VBox(vbox) => vbox.height,
            Self::Colored { child, .. } | Self::Reflected { child } => child.height(),
            Self::Framed(framed) => child_frame_extra(framed) + framed.child.height(),
        }
    }

    #[must_use]
    pub fn depth(&self) -> f64 {
        match self {
            Self::Glyph { glyph, size, .. } => glyph.depth * size,
            Self::Text { depth, .. }
            | Self::Rule { depth, .. }
            | Self::Scaled { depth, .. }
            | Self::Rotated { depth, .. }
            | Self::Phantom { depth, .. } => *depth,
            Self::Glue { .. } | Self::Kern { .. } => 0.0,
            Self::HBox(hbox) => hbox.depth,
            Self::VBox(vbox) => vbox.depth,
            Self::Colored { child, .. } | Self::Reflected { child } => child.depth(),
            Self::Framed(framed) => child_frame_extra(framed) + framed.child.depth(),
        }
    }

    /// Height plus depth; for kerns inside vertical lists this is the
    /// advance along the stack.
    #[must_use]
    pub fn vertical_extent(&self) -> f64 {
        match self {
            Self::Kern { width } => *width,
            other => other.height() + other.depth(),
        }
    }

    /// A blank box with this box's dimensions, optionally flattened.
    #[must_use]
    pub fn to_phantom(&self, keep_width: bool, keep_height: bool) -> Self {
        Self::Phantom {
            width: if keep_width { self.width() } else { 0.0 },
            height: if keep_height { self.height() } else { 0.0 },
            depth: if keep_height { self.depth() } else { 0.0 },
        }
    }

    /// Wrap in a scale transform, recomputing bounds.
    #[must_use]
    pub fn scaled(self, x: f64, y: f64) -> Self {
        let width = self.width() * x.abs();
        let height = self.height() * y.abs();
        let depth = self.depth() * y.abs();
        Self::Scaled {
            x,
            y,
            width,
            height,
            depth,
            child: Box::new(self),
        }
    }

    /// Wrap in a rotation about the box center, recomputing the axis-aligned
    /// bounds.
    #[must_use]
    pub fn rotated(self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let w = self.width();
        let h = self.height() + self.depth();
        let new_w = w * cos.abs() + h * sin.abs();
        let new_h = w * sin.abs() + h * cos.abs();
        // Center of the original box, relative to its left-baseline origin.
        let cx = w / 2.0;
        let cy = (self.height() - self.depth()) / 2.0;
        Self::Rotated {
            degrees,
            width: new_w,
            height: new_h / 2.0 + cy,
            depth: new_h / 2.0 - cy,
            shift_x: new_w / 2.0 - cx,
            shift_y: 0.0,
            child: Box::new(self),
        }
    }
}

pub(crate) fn child_frame_extra(framed: &FramedBox) -> f64 {
    let doubled = matches!(framed.notation, Notation::DoubleFrame);
    match framed.notation {
        Notation::Frame | Notation::RoundedFrame | Notation::DoubleFrame => {
            let strokes = if doubled { 3.0 } else { 1.0 };
            framed.padding + strokes * framed.rule
        }
        // Strikes draw inside the child's own bounds.
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(width: f64, height: f64, depth: f64) -> MathBox {
        MathBox::Rule {
            width,
            height,
            depth,
        }
    }

    #[test]
    fn hbox_accumulates_width_and_extremes() {
        let hbox = HBox::from_boxes(vec![
            rule(2.0, 5.0, 1.0),
            MathBox::Kern { width: 3.0 },
            rule(4.0, 2.0, 6.0),
        ]);
        assert_eq!(hbox.width, 9.0);
        assert_eq!(hbox.height, 5.0);
        assert_eq!(hbox.depth, 6.0);
    }

    #[test]
    fn hbox_shift_moves_extremes() {
        let hbox = HBox::new(vec![HChild::raised(2.0, rule(1.0, 3.0, 1.0))]);
        assert_eq!(hbox.height, 5.0);
        assert_eq!(hbox.depth, -1.0);
    }

    #[test]
    fn vbox_splits_total_at_the_baseline() {
        let vbox = VBox::new(
            vec![
                VChild::plain(rule(4.0, 2.0, 0.0)),
                VChild::plain(MathBox::Kern { width: 1.0 }),
                VChild::plain(rule(3.0, 3.0, 1.0)),
            ],
            2.5,
        );
        assert_eq!(vbox.width, 4.0);
        assert!((vbox.height - 4.5).abs() < 1e-9);
        assert_eq!(vbox.depth, 2.5);
    }

    #[test]
    fn rotation_by_right_angle_swaps_extents() {
        let rotated = rule(4.0, 1.0, 1.0).rotated(90.0);
        assert!((rotated.width() - 2.0).abs() < 1e-9);
        assert!((rotated.height() + rotated.depth() - 4.0).abs() < 1e-9);
    }
}
