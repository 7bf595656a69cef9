//! Flattening a box tree into a replayable paint-command stream.
//!
//! Coordinates are in points with the origin at the formula's top-left
//! corner and y growing downward. A [`Render`] owns the stream and replays
//! it against any [`DrawingSurface`], so one layout can be painted many
//! times or serialized for another process to draw.

use crate::atom::Notation;
use crate::boxes::{child_frame_extra, FramedBox, MathBox};
use crate::font_metrics::{FontStyle, LayoutId};
use crate::types::Color;

/// An affine step applied around a subtree of commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Clockwise, in degrees, about the translated origin.
    pub rotate_degrees: f64,
}

impl Transform2D {
    /// Pure translation.
    #[must_use]
    pub const fn translation(dx: f64, dy: f64) -> Self {
        Self {
            translate_x: dx,
            translate_y: dy,
            scale_x: 1.0,
            scale_y: 1.0,
            rotate_degrees: 0.0,
        }
    }
}

/// One drawing operation. The stream is self-contained: replaying the same
/// commands against the same surface paints the same picture.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Foreground for every following fill and stroke.
    SetColor(Color),
    /// A glyph positioned by its baseline origin.
    DrawGlyph {
        glyph_id: u32,
        character: char,
        style: FontStyle,
        x: f64,
        y: f64,
        size: f64,
    },
    /// A host-shaped text run positioned by its top-left corner.
    DrawTextLayout { layout: LayoutId, x: f64, y: f64 },
    /// A filled rectangle positioned by its top-left corner.
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// A stroked rectangle outline.
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        thickness: f64,
        rounded: bool,
    },
    /// A stroked line segment.
    StrokeLine {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        thickness: f64,
    },
    /// Push a transform applying to every command up to the matching pop.
    BeginTransform(Transform2D),
    EndTransform,
}

/// The surface half of the paint boundary: a renderer implements these and
/// receives the stream in order.
pub trait DrawingSurface {
    fn set_color(&mut self, color: Color);
    fn draw_glyph(
        &mut self,
        glyph_id: u32,
        character: char,
        style: FontStyle,
        x: f64,
        y: f64,
        size: f64,
    );
    fn draw_text_layout(&mut self, layout: LayoutId, x: f64, y: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        thickness: f64,
        rounded: bool,
    );
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, thickness: f64);
    fn begin_transform(&mut self, transform: Transform2D);
    fn end_transform(&mut self);
}

/// A laid-out formula: its metrics and the command stream that paints it.
#[derive(Debug, Clone, PartialEq)]
pub struct Render {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    commands: Vec<RenderCommand>,
}

impl Render {
    /// Flatten a finished box tree, starting from `color`.
    #[must_use]
    pub fn new(root: &MathBox, color: Color) -> Self {
        let mut walker = Walker {
            commands: vec![RenderCommand::SetColor(color)],
            color,
        };
        walker.walk(root, 0.0, root.height());
        Self {
            width: root.width(),
            height: root.height(),
            depth: root.depth(),
            commands: walker.commands,
        }
    }

    /// The recorded commands, in paint order.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Replay onto a surface with the formula's top-left corner at (x, y).
    pub fn draw(&self, surface: &mut dyn DrawingSurface, x: f64, y: f64) {
        surface.begin_transform(Transform2D::translation(x, y));
        for command in &self.commands {
            match *command {
                RenderCommand::SetColor(color) => surface.set_color(color),
                RenderCommand::DrawGlyph {
                    glyph_id,
                    character,
                    style,
                    x,
                    y,
                    size,
                } => surface.draw_glyph(glyph_id, character, style, x, y, size),
                RenderCommand::DrawTextLayout { layout, x, y } => {
                    surface.draw_text_layout(layout, x, y);
                }
                RenderCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                } => surface.fill_rect(x, y, width, height),
                RenderCommand::StrokeRect {
                    x,
                    y,
                    width,
                    height,
                    thickness,
                    rounded,
                } => surface.stroke_rect(x, y, width, height, thickness, rounded),
                RenderCommand::StrokeLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    thickness,
                } => surface.stroke_line(x1, y1, x2, y2, thickness),
                RenderCommand::BeginTransform(transform) => surface.begin_transform(transform),
                RenderCommand::EndTransform => surface.end_transform(),
            }
        }
        surface.end_transform();
    }
}

struct Walker {
    commands: Vec<RenderCommand>,
    color: Color,
}

impl Walker {
    fn set_color(&mut self, color: Color) {
        if color != self.color {
            self.color = color;
            self.commands.push(RenderCommand::SetColor(color));
        }
    }

    /// Emit commands for `node` with its baseline origin at (x, y).
    fn walk(&mut self, node: &MathBox, x: f64, y: f64) {
        match node {
            MathBox::Glyph { glyph, size } => {
                self.commands.push(RenderCommand::DrawGlyph {
                    glyph_id: glyph.glyph_id,
                    character: glyph.character,
                    style: glyph.style,
                    x,
                    y,
                    size: *size,
                });
            }
            MathBox::Text { layout, height, .. } => {
                self.commands.push(RenderCommand::DrawTextLayout {
                    layout: *layout,
                    x,
                    y: y - height,
                });
            }
            MathBox::Rule {
                width,
                height,
                depth,
            } => {
                self.commands.push(RenderCommand::FillRect {
                    x,
                    y: y - height,
                    width: *width,
                    height: height + depth,
                });
            }
            MathBox::Glue { .. } | MathBox::Kern { .. } | MathBox::Phantom { .. } => {}
            MathBox::HBox(hbox) => {
                let mut pen = x;
                for child in &hbox.children {
                    self.walk(&child.content, pen, y - child.shift);
                    pen += child.content.width();
                }
            }
            MathBox::VBox(vbox) => {
                let mut pen = y - vbox.height;
                for child in &vbox.children {
                    if let MathBox::Kern { width } = child.content {
                        pen += width;
                        continue;
                    }
                    let baseline = pen + child.content.height();
                    self.walk(&child.content, x + child.dx, baseline);
                    pen = baseline + child.content.depth();
                }
            }
            MathBox::Colored { color, child } => {
                let saved = self.color;
                self.set_color(*color);
                self.walk(child, x, y);
                self.set_color(saved);
            }
            MathBox::Scaled {
                x: sx, y: sy, child, ..
            } => {
                self.commands.push(RenderCommand::BeginTransform(Transform2D {
                    translate_x: x,
                    translate_y: y,
                    scale_x: *sx,
                    scale_y: *sy,
                    rotate_degrees: 0.0,
                }));
                self.walk(child, 0.0, 0.0);
                self.commands.push(RenderCommand::EndTransform);
            }
            MathBox::Rotated {
                degrees,
                child,
                width,
                height,
                depth,
                ..
            } => {
                // Rotate about the center of the new bounds; the child is
                // drawn with its own center at the origin.
                let center_x = x + width / 2.0;
                let center_y = y - (height - depth) / 2.0;
                self.commands.push(RenderCommand::BeginTransform(Transform2D {
                    translate_x: center_x,
                    translate_y: center_y,
                    scale_x: 1.0,
                    scale_y: 1.0,
                    rotate_degrees: *degrees,
                }));
                let child_x = -child.width() / 2.0;
                let child_y = (child.height() - child.depth()) / 2.0;
                self.walk(child, child_x, child_y);
                self.commands.push(RenderCommand::EndTransform);
            }
            MathBox::Reflected { child } => {
                self.commands.push(RenderCommand::BeginTransform(Transform2D {
                    translate_x: x + child.width(),
                    translate_y: y,
                    scale_x: -1.0,
                    scale_y: 1.0,
                    rotate_degrees: 0.0,
                }));
                self.walk(child, 0.0, 0.0);
                self.commands.push(RenderCommand::EndTransform);
            }
            MathBox::Framed(framed) => self.walk_framed(framed, x, y),
        }
    }

    fn walk_framed(&mut self, framed: &FramedBox, x: f64, y: f64) {
        let extra = child_frame_extra(framed);
        let width = framed.child.width() + 2.0 * extra;
        let top = y - framed.child.height() - extra;
        let bottom = y + framed.child.depth() + extra;
        self.walk(&framed.child, x + extra, y);
        match framed.notation {
            Notation::Frame | Notation::RoundedFrame => {
                self.commands.push(RenderCommand::StrokeRect {
                    x,
                    y: top,
                    width,
                    height: bottom - top,
                    thickness: framed.rule,
                    rounded: matches!(framed.notation, Notation::RoundedFrame),
                });
            }
            Notation::DoubleFrame => {
                let inset = 2.0 * framed.rule;
                self.commands.push(RenderCommand::StrokeRect {
                    x,
                    y: top,
                    width,
                    height: bottom - top,
                    thickness: framed.rule,
                    rounded: false,
                });
                self.commands.push(RenderCommand::StrokeRect {
                    x: x + inset,
                    y: top + inset,
                    width: width - 2.0 * inset,
                    height: bottom - top - 2.0 * inset,
                    thickness: framed.rule,
                    rounded: false,
                });
            }
            Notation::StrikeUp => {
                self.commands.push(RenderCommand::StrokeLine {
                    x1: x,
                    y1: bottom,
                    x2: x + width,
                    y2: top,
                    thickness: framed.rule,
                });
            }
            Notation::StrikeDown => {
                self.commands.push(RenderCommand::StrokeLine {
                    x1: x,
                    y1: top,
                    x2: x + width,
                    y2: bottom,
                    thickness: framed.rule,
                });
            }
            Notation::StrikeHorizontal => {
                let middle = (top + bottom) / 2.0;
                self.commands.push(RenderCommand::StrokeLine {
                    x1: x,
                    y1: middle,
                    x2: x + width,
                    y2: middle,
                    thickness: framed.rule,
                });
            }
            Notation::StrikeCross => {
                self.commands.push(RenderCommand::StrokeLine {
                    x1: x,
                    y1: bottom,
                    x2: x + width,
                    y2: top,
                    thickness: framed.rule,
                });
                self.commands.push(RenderCommand::StrokeLine {
                    x1: x,
                    y1: top,
                    x2: x + width,
                    y2: bottom,
                    thickness: framed.rule,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::{HBox, HChild};
    use crate::font_metrics::GlyphMetrics;

    /// `width_em` at size 10, so a width of 0.5 measures 5 points.
    fn glyph_box(ch: char, width_em: f64) -> MathBox {
        MathBox::Glyph {
            glyph: GlyphMetrics::builder()
                .glyph_id(ch as u32)
                .character(ch)
                .style(FontStyle::Italic)
                .width(width_em)
                .height(0.7)
                .depth(0.2)
                .build(),
            size: 10.0,
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        log: Vec<String>,
    }

    impl DrawingSurface for RecordingSurface {
        fn set_color(&mut self, color: Color) {
            self.log.push(format!("color {:08x}", color.0));
        }
        fn draw_glyph(
            &mut self,
            _glyph_id: u32,
            character: char,
            _style: FontStyle,
            x: f64,
            y: f64,
            _size: f64,
        ) {
            self.log.push(format!("glyph {character} {x:.1} {y:.1}"));
        }
        fn draw_text_layout(&mut self, layout: LayoutId, x: f64, y: f64) {
            self.log.push(format!("text {layout} {x:.1} {y:.1}"));
        }
        fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
            self.log
                .push(format!("rect {x:.1} {y:.1} {width:.1} {height:.1}"));
        }
        fn stroke_rect(
            &mut self,
            _x: f64,
            _y: f64,
            _width: f64,
            _height: f64,
            _thickness: f64,
            _rounded: bool,
        ) {
            self.log.push("stroke-rect".to_owned());
        }
        fn stroke_line(&mut self, _x1: f64, _y1: f64, _x2: f64, _y2: f64, _thickness: f64) {
            self.log.push("stroke-line".to_owned());
        }
        fn begin_transform(&mut self, transform: Transform2D) {
            self.log.push(format!(
                "push {:.1} {:.1}",
                transform.translate_x, transform.translate_y
            ));
        }
        fn end_transform(&mut self) {
            self.log.push("pop".to_owned());
        }
    }

    #[test]
    fn glyphs_advance_left_to_right() {
        let root = MathBox::HBox(HBox::new(vec![
            HChild::plain(glyph_box('a', 0.5)),
            HChild::plain(glyph_box('b', 0.5)),
        ]));
        let render = Render::new(&root, Color::BLACK);
        let mut surface = RecordingSurface::default();
        render.draw(&mut surface, 0.0, 0.0);
        let glyphs: Vec<&String> = surface
            .log
            .iter()
            .filter(|line| line.starts_with("glyph"))
            .collect();
        assert_eq!(glyphs, ["glyph a 0.0 7.0", "glyph b 5.0 7.0"]);
    }

    #[test]
    fn replay_is_deterministic() {
        let root = MathBox::HBox(HBox::new(vec![
            HChild::plain(glyph_box('x', 0.5)),
            HChild::raised(2.0, glyph_box('y', 0.5)),
        ]));
        let render = Render::new(&root, Color::BLACK);
        let mut first = RecordingSurface::default();
        let mut second = RecordingSurface::default();
        render.draw(&mut first, 3.0, 4.0);
        render.draw(&mut second, 3.0, 4.0);
        assert_eq!(first.log, second.log);
    }

    #[test]
    fn nested_color_restores_on_exit() {
        let red = Color::rgb(255, 0, 0);
        let inner = MathBox::Colored {
            color: red,
            child: Box::new(glyph_box('r', 0.5)),
        };
        let root = MathBox::HBox(HBox::new(vec![
            HChild::plain(glyph_box('a', 0.5)),
            HChild::plain(inner),
            HChild::plain(glyph_box('b', 0.5)),
        ]));
        let render = Render::new(&root, Color::BLACK);
        let colors: Vec<&RenderCommand> = render
            .commands()
            .iter()
            .filter(|command| matches!(command, RenderCommand::SetColor(_)))
            .collect();
        assert_eq!(
            colors,
            [
                &RenderCommand::SetColor(Color::BLACK),
                &RenderCommand::SetColor(red),
                &RenderCommand::SetColor(Color::BLACK),
            ]
        );
    }

    #[test]
    fn phantom_paints_nothing() {
        let root = MathBox::Phantom {
            width: 10.0,
            height: 7.0,
            depth: 2.0,
        };
        let render = Render::new(&root, Color::BLACK);
        assert_eq!(render.commands().len(), 1);
        assert_eq!(render.width, 10.0);
    }
}
