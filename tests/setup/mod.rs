//! Shared fixtures for the integration suite: one context for every test
//! and a surface that records draw calls as comparable strings.

use std::sync::OnceLock;

use mathbox::font_metrics::{FixedFontBackend, FontStyle, LayoutId};
use mathbox::{
    parse_and_layout, Color, DrawingSurface, MathContext, ParseError, Render, Settings,
};
use mathbox::render::Transform2D;

static CONTEXT: OnceLock<MathContext> = OnceLock::new();

pub fn ctx() -> &'static MathContext {
    CONTEXT.get_or_init(|| MathContext::new(Box::new(FixedFontBackend::default())))
}

pub fn display_settings() -> Settings {
    Settings::builder().build()
}

pub fn inline_settings() -> Settings {
    Settings::builder().display_mode(false).build()
}

pub fn layout(expression: &str) -> Result<Render, ParseError> {
    parse_and_layout(ctx(), expression, &display_settings())
}

pub fn layout_with(expression: &str, settings: &Settings) -> Result<Render, ParseError> {
    parse_and_layout(ctx(), expression, settings)
}

/// Records every surface call as a line of text, so two replays can be
/// compared with plain equality.
#[derive(Debug, Default, PartialEq)]
pub struct RecordingSurface {
    pub log: Vec<String>,
}

impl DrawingSurface for RecordingSurface {
    fn set_color(&mut self, color: Color) {
        self.log.push(format!("color {:08x}", color.0));
    }

    fn draw_glyph(
        &mut self,
        glyph_id: u32,
        character: char,
        style: FontStyle,
        x: f64,
        y: f64,
        size: f64,
    ) {
        self.log.push(format!(
            "glyph {glyph_id} {character} {style} {x:.3} {y:.3} {size:.3}"
        ));
    }

    fn draw_text_layout(&mut self, layout: LayoutId, x: f64, y: f64) {
        self.log.push(format!("text {layout} {x:.3} {y:.3}"));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.log
            .push(format!("fill {x:.3} {y:.3} {width:.3} {height:.3}"));
    }

    fn stroke_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        thickness: f64,
        rounded: bool,
    ) {
        self.log.push(format!(
            "stroke-rect {x:.3} {y:.3} {width:.3} {height:.3} {thickness:.3} {rounded}"
        ));
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, thickness: f64) {
        self.log.push(format!(
            "stroke-line {x1:.3} {y1:.3} {x2:.3} {y2:.3} {thickness:.3}"
        ));
    }

    fn begin_transform(&mut self, transform: Transform2D) {
        self.log.push(format!(
            "push {:.3} {:.3} {:.3} {:.3} {:.3}",
            transform.translate_x,
            transform.translate_y,
            transform.scale_x,
            transform.scale_y,
            transform.rotate_degrees
        ));
    }

    fn end_transform(&mut self) {
        self.log.push("pop".to_owned());
    }
}

/// Replay a render and return the recorded lines.
pub fn record(render: &Render) -> Vec<String> {
    let mut surface = RecordingSurface::default();
    render.draw(&mut surface, 0.0, 0.0);
    surface.log
}
